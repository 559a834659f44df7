//! Gradient-based edge detection.
//!
//! The gradient is estimated with the 3×3 Sobel pair:
//!
//! ```text
//!   Gx:  -1  0 +1        Gy:  -1 -2 -1
//!        -2  0 +2              0  0  0
//!        -1  0 +1             +1 +2 +1
//! ```
//!
//! and the magnitude is `sqrt(Gx² + Gy²)`, so a full black/white step reads
//! about 1020 and a flat region reads 0.

use image::GrayImage;

use crate::bitmap::Bitmap;

/// Gradient threshold used at outline strength 0 (fewest edges).
pub const GRADIENT_THRESHOLD_AT_MIN_STRENGTH: f32 = 240.0;

/// Gradient threshold used at outline strength 100 (most edges).
pub const GRADIENT_THRESHOLD_AT_MAX_STRENGTH: f32 = 40.0;

/// Highest accepted outline strength.
pub const MAX_STRENGTH: u8 = 100;

/// Per-pixel gradient magnitude.
#[derive(Debug, Clone)]
pub struct Gradient {
    width: u32,
    height: u32,
    magnitude: Vec<f32>,
}

impl Gradient {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.magnitude[y as usize * self.width as usize + x as usize]
    }

    /// Mutable access for callers that reweight the map in place.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.magnitude
    }

    /// Largest magnitude in the map (0 for an empty map).
    pub fn max(&self) -> f32 {
        self.magnitude.iter().copied().fold(0.0, f32::max)
    }

    /// Foreground wherever the magnitude reaches `threshold`.
    pub fn threshold(&self, threshold: f32) -> Bitmap {
        Bitmap::from_fn(self.width, self.height, |x, y| {
            let m = self.get(x, y);
            m > 0.0 && m >= threshold
        })
    }
}

/// Sobel gradient magnitude with edge-replicated borders.
pub fn gradient_magnitude(gray: &GrayImage) -> Gradient {
    let (width, height) = gray.dimensions();
    let (w, h) = (width as i64, height as i64);
    let src = gray.as_raw();
    let at = |x: i64, y: i64| -> f32 {
        let x = x.clamp(0, w - 1) as usize;
        let y = y.clamp(0, h - 1) as usize;
        src[y * width as usize + x] as f32
    };

    let mut magnitude = Vec::with_capacity(width as usize * height as usize);
    for y in 0..h {
        for x in 0..w {
            let tl = at(x - 1, y - 1);
            let tc = at(x, y - 1);
            let tr = at(x + 1, y - 1);
            let ml = at(x - 1, y);
            let mr = at(x + 1, y);
            let bl = at(x - 1, y + 1);
            let bc = at(x, y + 1);
            let br = at(x + 1, y + 1);

            let gx = (tr + 2.0 * mr + br) - (tl + 2.0 * ml + bl);
            let gy = (bl + 2.0 * bc + br) - (tl + 2.0 * tc + tr);
            magnitude.push((gx * gx + gy * gy).sqrt());
        }
    }

    Gradient {
        width,
        height,
        magnitude,
    }
}

/// Gradient cutoff for an outline strength in 0..=100.
///
/// Strength is clamped to [`MAX_STRENGTH`]. Higher strength gives a lower
/// cutoff, so more pixels classify as edges.
pub fn threshold_for_strength(strength: u8) -> f32 {
    let s = strength.min(MAX_STRENGTH) as f32 / MAX_STRENGTH as f32;
    GRADIENT_THRESHOLD_AT_MIN_STRENGTH
        - (GRADIENT_THRESHOLD_AT_MIN_STRENGTH - GRADIENT_THRESHOLD_AT_MAX_STRENGTH) * s
}
