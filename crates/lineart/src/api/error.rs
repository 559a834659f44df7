//! Unified error type for the lineart public API.

use std::fmt;

/// Errors returned by the line-art pipelines.
///
/// # Example
///
/// ```
/// use image::RgbaImage;
/// use lineart::{LineArtError, LineArtOptions, LineArtPreprocessor};
///
/// let empty = RgbaImage::new(0, 0);
/// let err = LineArtPreprocessor::new(LineArtOptions::new())
///     .process(&empty)
///     .unwrap_err();
/// assert_eq!(err, LineArtError::EmptyImage { width: 0, height: 0 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineArtError {
    /// Input image has a zero dimension
    EmptyImage {
        /// Width of the rejected image
        width: u32,
        /// Height of the rejected image
        height: u32,
    },
    /// Working size of zero was configured
    InvalidWorkingSize(u32),
}

impl fmt::Display for LineArtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineArtError::EmptyImage { width, height } => {
                write!(f, "image has no pixels ({}x{})", width, height)
            }
            LineArtError::InvalidWorkingSize(size) => {
                write!(f, "invalid working size: {}", size)
            }
        }
    }
}

impl std::error::Error for LineArtError {}

/// Reject zero-sized inputs before any stage runs.
pub(crate) fn ensure_not_empty(width: u32, height: u32) -> Result<(), LineArtError> {
    if width == 0 || height == 0 {
        Err(LineArtError::EmptyImage { width, height })
    } else {
        Ok(())
    }
}
