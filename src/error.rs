use thiserror::Error;

/// Why a tap did not change the color layer.
///
/// All three variants are expected outcomes of normal use; the UI answers
/// them with feedback, not an error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("Seed ({x}, {y}) outside {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Seed ({x}, {y}) is on a line")]
    BoundaryHit { x: u32, y: u32 },

    #[error("Region at ({x}, {y}) already has that color")]
    NoOpFill { x: u32, y: u32 },
}

impl FillError {
    /// True for outcomes that mean "nothing changed" rather than a failure.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            FillError::OutOfBounds { .. } | FillError::BoundaryHit { .. } | FillError::NoOpFill { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Nothing to {0}")]
    EmptyHistory(&'static str),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Layer size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Line art error: {0}")]
    LineArt(#[from] lineart::LineArtError),

    #[error("Worker error: {0}")]
    Worker(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}
