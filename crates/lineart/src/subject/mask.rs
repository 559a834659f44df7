//! Saliency mask detection.
//!
//! The detector favours strong edges near the image center: it computes a
//! Sobel magnitude on a reduced grayscale copy, weights it by a radial
//! center bias, thresholds relative to the peak, closes small gaps and
//! keeps the largest connected component.

use image::imageops;
use image::{GrayImage, RgbaImage};

use crate::api::{ensure_not_empty, LineArtError};
use crate::bitmap::Bitmap;
use crate::edge::gradient_magnitude;
use crate::morphology::{close, fill_holes};
use crate::raster::{downscale_longest_edge, gaussian_blur, to_gray};

use super::bbox::BoundingBox;
use super::components::largest_component;
use super::SubjectOptions;

/// Mask value for subject pixels.
pub const MASK_SUBJECT: u8 = 255;

/// Mask value for background pixels.
pub const MASK_BACKGROUND: u8 = 0;

/// Result of [`detect_subject`].
#[derive(Debug, Clone)]
pub struct SubjectDetection {
    /// Binary mask at working resolution (255 = subject, 0 = background).
    pub mask: GrayImage,
    /// Subject bounds in mask coordinates. Centered half-size fallback
    /// when nothing was found.
    pub bounds: BoundingBox,
    /// Whether any subject pixels survived.
    pub found: bool,
}

impl SubjectDetection {
    /// Bounds mapped onto an image of `width` x `height`.
    pub fn bounds_for(&self, width: u32, height: u32) -> BoundingBox {
        self.bounds.scale(self.mask.dimensions(), (width, height))
    }

    /// Crop the subject region out of the full-resolution photo.
    pub fn crop(&self, photo: &RgbaImage) -> RgbaImage {
        let b = self.bounds_for(photo.width(), photo.height());
        imageops::crop_imm(photo, b.x, b.y, b.width, b.height).to_image()
    }
}

/// Detect the salient subject of `photo`.
pub fn detect_subject(
    photo: &RgbaImage,
    options: &SubjectOptions,
) -> Result<SubjectDetection, LineArtError> {
    ensure_not_empty(photo.width(), photo.height())?;
    if options.working_size == 0 {
        return Err(LineArtError::InvalidWorkingSize(options.working_size));
    }

    let small = downscale_longest_edge(photo, options.working_size);
    let gray = gaussian_blur(&to_gray(&small), options.blur_sigma);
    let mut gradient = gradient_magnitude(&gray);
    apply_center_bias(
        gradient.as_mut_slice(),
        gray.width(),
        gray.height(),
        options.center_falloff,
    );

    let (width, height) = gray.dimensions();
    let peak = gradient.max();
    let mut subject = if peak > 0.0 {
        let raw = gradient.threshold(peak * options.mask_threshold);
        largest_component(&close(&raw, options.closing_radius))
    } else {
        Bitmap::new(width, height)
    };
    if options.fill_holes && !subject.is_empty() {
        subject = fill_holes(&subject);
    }

    let bounds = BoundingBox::from_bitmap(&subject, options.bbox_margin);
    let found = bounds.is_some();
    Ok(SubjectDetection {
        mask: subject.to_gray(MASK_SUBJECT, MASK_BACKGROUND),
        bounds: bounds.unwrap_or_else(|| BoundingBox::centered_fallback(width, height)),
        found,
    })
}

/// Multiply each magnitude by `1 - falloff * r`, `r` being the distance
/// from the image center normalized to 1 at the corners.
fn apply_center_bias(magnitude: &mut [f32], width: u32, height: u32, falloff: f32) {
    let cx = (width as f32 - 1.0) / 2.0;
    let cy = (height as f32 - 1.0) / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt();
    if max_dist <= 0.0 {
        return;
    }
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let r = (dx * dx + dy * dy).sqrt() / max_dist;
            let weight = (1.0 - falloff * r).max(0.0);
            magnitude[y as usize * width as usize + x as usize] *= weight;
        }
    }
}
