//! Luminance helpers.
//!
//! Every stage that collapses RGBA to a single channel goes through
//! [`luminance`] so the wall predicate, the preprocessor and the subject
//! detector agree on what "dark" means.

/// Rec. 601 luma weights, scaled so they sum to 1000.
const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;

/// Weighted luminance of an RGB triple, 0..=255.
///
/// # Example
///
/// ```
/// use lineart::color::luminance;
///
/// assert_eq!(luminance(0, 0, 0), 0);
/// assert_eq!(luminance(255, 255, 255), 255);
/// ```
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + 500) / 1000) as u8
}

/// Luminance of an RGBA pixel as it appears composited over white.
///
/// Fully transparent pixels read as white (255), so an outline layer with
/// an alpha channel never produces walls where nothing is drawn.
#[inline]
pub fn luminance_over_white(rgba: [u8; 4]) -> u8 {
    let [r, g, b, a] = rgba;
    let luma = luminance(r, g, b) as u32;
    let a = a as u32;
    ((luma * a + 255 * (255 - a) + 127) / 255) as u8
}
