//! Line-art preprocessing options.
//!
//! This module provides the [`LineArtOptions`] struct that tunes the
//! photo-to-outline pipeline.

/// Longest edge of the working raster, in pixels.
pub const DEFAULT_WORKING_SIZE: u32 = 1024;

/// Outline strength used when none is supplied (0..=100).
pub const DEFAULT_STRENGTH: u8 = 50;

/// Standard deviation of the pre-edge blur.
pub const DEFAULT_BLUR_SIGMA: f32 = 1.0;

/// Blurred luminance at or below which a pixel is "very dark" and counts
/// as line regardless of gradient.
pub const DEFAULT_DARK_CUTOFF: u8 = 80;

/// Line pixels with fewer line 8-neighbors than this are removed as noise.
pub const DEFAULT_MIN_DARK_NEIGHBORS: u8 = 2;

/// Invert when line pixels outnumber background by more than this ratio.
pub const DEFAULT_POLARITY_RATIO: f32 = 2.0;

/// Grid spacing used when sampling for polarity.
pub const DEFAULT_POLARITY_GRID_STEP: u32 = 4;

/// Rings of dilation applied to the final lines.
pub const DEFAULT_DILATE_RINGS: u32 = 1;

/// Configuration for [`LineArtPreprocessor`](super::LineArtPreprocessor).
///
/// # Defaults
///
/// - Working size: 1024 (longest edge)
/// - Strength: 50
/// - Blur sigma: 1.0
/// - Dark cutoff: 80
/// - Despeckle minimum: 2 neighbors
/// - Polarity: invert above 2:1, sampled every 4th pixel
/// - Dilation: 1 ring
///
/// # Example
///
/// ```
/// use lineart::LineArtOptions;
///
/// let options = LineArtOptions::new()
///     .working_size(512)
///     .strength(80);
/// assert_eq!(options.working_size, 512);
/// assert_eq!(options.strength, 80);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LineArtOptions {
    /// Longest edge after the resize stage. Smaller inputs are upscaled.
    pub working_size: u32,

    /// Outline strength, 0..=100. Higher strength lowers the gradient
    /// threshold and yields more lines.
    pub strength: u8,

    /// Gaussian blur sigma applied before edge detection. 0 disables blur.
    pub blur_sigma: f32,

    /// Blurred luminance cutoff for solid dark regions.
    pub dark_cutoff: u8,

    /// Minimum line neighbors kept by the despeckle stage.
    pub min_dark_neighbors: u8,

    /// Polarity inversion ratio.
    pub polarity_ratio: f32,

    /// Polarity sampling grid step.
    pub polarity_grid_step: u32,

    /// Dilation rings applied last.
    pub dilate_rings: u32,
}

impl Default for LineArtOptions {
    fn default() -> Self {
        Self {
            working_size: DEFAULT_WORKING_SIZE,
            strength: DEFAULT_STRENGTH,
            blur_sigma: DEFAULT_BLUR_SIGMA,
            dark_cutoff: DEFAULT_DARK_CUTOFF,
            min_dark_neighbors: DEFAULT_MIN_DARK_NEIGHBORS,
            polarity_ratio: DEFAULT_POLARITY_RATIO,
            polarity_grid_step: DEFAULT_POLARITY_GRID_STEP,
            dilate_rings: DEFAULT_DILATE_RINGS,
        }
    }
}

impl LineArtOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working size (longest edge in pixels).
    #[inline]
    pub fn working_size(mut self, size: u32) -> Self {
        self.working_size = size;
        self
    }

    /// Set the outline strength. Values above 100 are clamped.
    #[inline]
    pub fn strength(mut self, strength: u8) -> Self {
        self.strength = strength.min(crate::edge::MAX_STRENGTH);
        self
    }

    #[inline]
    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma.max(0.0);
        self
    }

    #[inline]
    pub fn dark_cutoff(mut self, cutoff: u8) -> Self {
        self.dark_cutoff = cutoff;
        self
    }

    #[inline]
    pub fn min_dark_neighbors(mut self, neighbors: u8) -> Self {
        self.min_dark_neighbors = neighbors;
        self
    }

    /// Set the polarity ratio and sampling step.
    #[inline]
    pub fn polarity(mut self, ratio: f32, grid_step: u32) -> Self {
        self.polarity_ratio = ratio;
        self.polarity_grid_step = grid_step.max(1);
        self
    }

    #[inline]
    pub fn dilate_rings(mut self, rings: u32) -> Self {
        self.dilate_rings = rings;
        self
    }
}
