//! Hard-cutover compositing of subject line art over background line art.

use image::{GrayImage, RgbaImage};

use crate::api::{ensure_not_empty, LineArtError};

use super::bbox::BoundingBox;

/// Overlay `subject` onto a copy of `background` wherever the mask marks
/// subject.
///
/// - `mask` may have any resolution; it is sampled proportionally
///   (nearest neighbor) over the background.
/// - `placement` is where the subject image lands in background
///   coordinates; the subject is stretched nearest-neighbor to fill it.
/// - A background pixel is replaced when its mask sample is strictly
///   greater than `membership` and it lies inside `placement`.
///
/// Pixels are copied, never blended.
///
/// # Example
///
/// ```
/// use image::{GrayImage, Luma, Rgba, RgbaImage};
/// use lineart::{composite_subject, BoundingBox};
///
/// let background = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
/// let subject = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
/// let mask = GrayImage::from_fn(4, 4, |x, _| Luma([if x < 2 { 255 } else { 0 }]));
///
/// let out = composite_subject(&background, &subject, &mask, BoundingBox::full(4, 4), 128).unwrap();
/// assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
/// assert_eq!(out.get_pixel(3, 0).0, [255, 255, 255, 255]);
/// ```
pub fn composite_subject(
    background: &RgbaImage,
    subject: &RgbaImage,
    mask: &GrayImage,
    placement: BoundingBox,
    membership: u8,
) -> Result<RgbaImage, LineArtError> {
    ensure_not_empty(background.width(), background.height())?;
    ensure_not_empty(subject.width(), subject.height())?;
    ensure_not_empty(mask.width(), mask.height())?;

    let (bw, bh) = background.dimensions();
    let (mw, mh) = mask.dimensions();
    let (sw, sh) = subject.dimensions();
    let placement = placement.clamp_to(bw, bh);

    let mut out = background.clone();
    if placement.is_empty() {
        return Ok(out);
    }

    for y in placement.y..placement.bottom() {
        let my = (y as u64 * mh as u64 / bh as u64) as u32;
        let sy = ((y - placement.y) as u64 * sh as u64 / placement.height as u64) as u32;
        for x in placement.x..placement.right() {
            let mx = (x as u64 * mw as u64 / bw as u64) as u32;
            if mask.get_pixel(mx, my).0[0] <= membership {
                continue;
            }
            let sx = ((x - placement.x) as u64 * sw as u64 / placement.width as u64) as u32;
            out.put_pixel(x, y, *subject.get_pixel(sx, sy));
        }
    }

    Ok(out)
}
