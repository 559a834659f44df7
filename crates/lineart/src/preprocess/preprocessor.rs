//! Photo to line-art pipeline.
//!
//! # Stages
//!
//! 1. **Grayscale** by luminance (alpha composited over white)
//! 2. **Resize** so the longest edge equals the working size. Reduction
//!    keeps the darkest sample of each block so thin strokes survive;
//!    enlargement interpolates
//! 3. **Blur** with a small Gaussian
//! 4. **Classify**: a pixel is line when its Sobel magnitude reaches the
//!    strength-derived threshold, or when its blurred luminance is at or
//!    below the dark cutoff
//! 5. **Polarity**: invert when line pixels dominate the sampled grid
//! 6. **Despeckle** isolated line pixels
//! 7. **Dilate** the surviving lines
//!
//! Dilation runs last so that the two parallel edge responses of a thin
//! stroke merge into one closed band.

use image::{GrayImage, Rgba, RgbaImage};

use crate::api::{ensure_not_empty, LineArtError};
use crate::bitmap::Bitmap;
use crate::edge::{gradient_magnitude, threshold_for_strength, Gradient};
use crate::morphology::{despeckle, dilate, normalize_polarity};
use crate::raster::{
    darkest_downscale, fit_longest_edge, gaussian_blur, resize_longest_edge, to_gray,
};

use super::LineArtOptions;

/// Opaque black used for line pixels in rendered output.
pub const LINE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Opaque white used for background pixels in rendered output.
pub const PAPER_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Every intermediate of one preprocessing run.
#[derive(Debug, Clone)]
pub struct StagedLineArt {
    /// Grayscale at working resolution, before blur.
    pub gray: GrayImage,
    /// Blurred grayscale.
    pub blurred: GrayImage,
    /// Sobel magnitude of `blurred`.
    pub gradient: Gradient,
    /// Gradient threshold that was applied.
    pub threshold: f32,
    /// Raw classification before polarity and cleanup.
    pub classified: Bitmap,
    /// Whether the polarity stage inverted the classification.
    pub inverted: bool,
    /// Final line mask (true = line).
    pub line_art: Bitmap,
}

impl StagedLineArt {
    /// Render the final mask as opaque black lines on white.
    pub fn to_rgba(&self) -> RgbaImage {
        let lines = &self.line_art;
        RgbaImage::from_fn(lines.width(), lines.height(), |x, y| {
            if lines.get(x, y) {
                LINE_COLOR
            } else {
                PAPER_COLOR
            }
        })
    }
}

/// Converts photos into binary line art.
///
/// # Example
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use lineart::{LineArtOptions, LineArtPreprocessor};
///
/// let photo = RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 255]));
/// let preprocessor = LineArtPreprocessor::new(LineArtOptions::new().working_size(40));
/// let outline = preprocessor.process(&photo).unwrap();
///
/// assert_eq!(outline.dimensions(), (40, 20));
/// assert!(outline.pixels().all(|p| p.0 == [255, 255, 255, 255]));
/// ```
#[derive(Debug, Clone)]
pub struct LineArtPreprocessor {
    options: LineArtOptions,
}

impl LineArtPreprocessor {
    pub fn new(options: LineArtOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &LineArtOptions {
        &self.options
    }

    /// Run the pipeline and return black-on-white RGBA at working size.
    pub fn process(&self, photo: &RgbaImage) -> Result<RgbaImage, LineArtError> {
        Ok(self.run_staged(photo)?.to_rgba())
    }

    /// Run the pipeline keeping every intermediate.
    pub fn run_staged(&self, photo: &RgbaImage) -> Result<StagedLineArt, LineArtError> {
        let opts = &self.options;
        ensure_not_empty(photo.width(), photo.height())?;
        if opts.working_size == 0 {
            return Err(LineArtError::InvalidWorkingSize(opts.working_size));
        }

        let gray = working_gray(photo, opts.working_size);
        let blurred = gaussian_blur(&gray, opts.blur_sigma);
        let gradient = gradient_magnitude(&blurred);
        let threshold = threshold_for_strength(opts.strength);

        let edges = gradient.threshold(threshold);
        let dark = Bitmap::from_gray(&blurred, |v| v <= opts.dark_cutoff);
        let classified = Bitmap::from_fn(blurred.width(), blurred.height(), |x, y| {
            edges.get(x, y) || dark.get(x, y)
        });

        let mut lines = classified.clone();
        let inverted =
            normalize_polarity(&mut lines, opts.polarity_grid_step, opts.polarity_ratio);
        let lines = despeckle(&lines, opts.min_dark_neighbors);
        let line_art = dilate(&lines, opts.dilate_rings);

        Ok(StagedLineArt {
            gray,
            blurred,
            gradient,
            threshold,
            classified,
            inverted,
            line_art,
        })
    }
}

/// Grayscale copy of `photo` with its longest edge at `working_size`.
fn working_gray(photo: &RgbaImage, working_size: u32) -> GrayImage {
    if photo.width().max(photo.height()) > working_size {
        let (w, h) = fit_longest_edge(photo.width(), photo.height(), working_size);
        darkest_downscale(&to_gray(photo), w, h)
    } else {
        to_gray(&resize_longest_edge(photo, working_size))
    }
}
