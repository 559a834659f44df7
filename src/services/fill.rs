//! Boundary-respecting flood fill.
//!
//! A pixel is fillable when it is not a wall and its color exactly equals
//! the seed's original color (all four channels). Reachability is
//! 4-connected, so diagonal gaps in a one-pixel line do not leak.

use image::{Rgba, RgbaImage};
use lineart::color::luminance_over_white;
use lineart::Bitmap;
use std::collections::VecDeque;

use crate::error::FillError;

/// Luminance cutoff for walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallPolicy {
    pub threshold: u8,
    /// Whether luminance equal to `threshold` is a wall
    pub inclusive: bool,
}

impl Default for WallPolicy {
    fn default() -> Self {
        Self {
            threshold: 50,
            inclusive: true,
        }
    }
}

impl WallPolicy {
    #[inline]
    pub fn is_wall_luminance(&self, luminance: u8) -> bool {
        if self.inclusive {
            luminance <= self.threshold
        } else {
            luminance < self.threshold
        }
    }

    /// Wall test for one outline pixel, composited over white first.
    #[inline]
    pub fn is_wall(&self, pixel: Rgba<u8>) -> bool {
        self.is_wall_luminance(luminance_over_white(pixel.0))
    }
}

/// Wall predicate evaluated once over an outline layer.
#[derive(Debug, Clone)]
pub struct WallMap {
    walls: Bitmap,
}

impl WallMap {
    pub fn from_outline(outline: &RgbaImage, policy: WallPolicy) -> Self {
        let walls = Bitmap::from_fn(outline.width(), outline.height(), |x, y| {
            policy.is_wall(*outline.get_pixel(x, y))
        });
        Self { walls }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.walls.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.walls.height()
    }

    #[inline]
    pub fn is_wall(&self, x: u32, y: u32) -> bool {
        self.walls.get(x, y)
    }

    pub fn wall_count(&self) -> usize {
        self.walls.count()
    }
}

/// One pixel a fill overwrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelChange {
    pub x: u32,
    pub y: u32,
    pub previous: Rgba<u8>,
}

/// Every pixel changed by one fill, with enough to undo or redo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillDiff {
    pub seed: (u32, u32),
    pub color: Rgba<u8>,
    pub changes: Vec<PixelChange>,
}

impl FillDiff {
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Write every previous color back.
    pub fn revert(&self, layer: &mut RgbaImage) {
        for change in &self.changes {
            layer.put_pixel(change.x, change.y, change.previous);
        }
    }

    /// Write the fill color over every changed pixel again.
    pub fn reapply(&self, layer: &mut RgbaImage) {
        for change in &self.changes {
            layer.put_pixel(change.x, change.y, self.color);
        }
    }
}

/// Fill the region around `(x, y)` in `layer` with `fill`.
///
/// Scanline fill over an explicit queue: each popped seed grows into a
/// horizontal span, the span is painted, and the rows above and below are
/// probed across the span's columns, enqueuing one seed per fillable run.
pub fn flood_fill(
    walls: &WallMap,
    layer: &mut RgbaImage,
    x: u32,
    y: u32,
    fill: Rgba<u8>,
) -> Result<FillDiff, FillError> {
    let (width, height) = layer.dimensions();
    if x >= width || y >= height || x >= walls.width() || y >= walls.height() {
        return Err(FillError::OutOfBounds {
            x,
            y,
            width,
            height,
        });
    }
    if walls.is_wall(x, y) {
        return Err(FillError::BoundaryHit { x, y });
    }
    let target = *layer.get_pixel(x, y);
    if target == fill {
        return Err(FillError::NoOpFill { x, y });
    }

    let w = width as usize;
    let buf: &mut [u8] = layer;
    let target = target.0;
    let fill_px = fill.0;
    let fillable = |buf: &[u8], x: u32, y: u32| -> bool {
        let i = (y as usize * w + x as usize) * 4;
        !walls.is_wall(x, y) && buf[i..i + 4] == target
    };

    let mut changes = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back((x, y));

    while let Some((sx, sy)) = queue.pop_front() {
        if !fillable(buf, sx, sy) {
            continue;
        }

        let mut left = sx;
        while left > 0 && fillable(buf, left - 1, sy) {
            left -= 1;
        }
        let mut right = sx;
        while right + 1 < width && fillable(buf, right + 1, sy) {
            right += 1;
        }

        for px in left..=right {
            let i = (sy as usize * w + px as usize) * 4;
            changes.push(PixelChange {
                x: px,
                y: sy,
                previous: Rgba(target),
            });
            buf[i..i + 4].copy_from_slice(&fill_px);
        }

        let neighbors = [sy.checked_sub(1), (sy + 1 < height).then_some(sy + 1)];
        for ny in neighbors.into_iter().flatten() {
            let mut in_run = false;
            for px in left..=right {
                if fillable(buf, px, ny) {
                    if !in_run {
                        queue.push_back((px, ny));
                        in_run = true;
                    }
                } else {
                    in_run = false;
                }
            }
        }
    }

    Ok(FillDiff {
        seed: (x, y),
        color: fill,
        changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn outline_with(width: u32, height: u32, wall: impl Fn(u32, u32) -> bool) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| if wall(x, y) { BLACK } else { WHITE })
    }

    #[test]
    fn test_wall_policy_inclusive() {
        let policy = WallPolicy {
            threshold: 50,
            inclusive: true,
        };
        assert!(policy.is_wall_luminance(50));
        assert!(!policy.is_wall_luminance(51));

        let strict = WallPolicy {
            threshold: 50,
            inclusive: false,
        };
        assert!(!strict.is_wall_luminance(50));
        assert!(strict.is_wall_luminance(49));
    }

    #[test]
    fn test_transparent_outline_is_never_wall() {
        assert!(!WallPolicy::default().is_wall(CLEAR));
        assert!(WallPolicy::default().is_wall(BLACK));
    }

    #[test]
    fn test_fill_open_canvas() {
        let outline = outline_with(8, 6, |_, _| false);
        let walls = WallMap::from_outline(&outline, WallPolicy::default());
        let mut layer = RgbaImage::from_pixel(8, 6, CLEAR);

        let diff = flood_fill(&walls, &mut layer, 3, 3, RED).unwrap();
        assert_eq!(diff.len(), 48);
        assert!(layer.pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_fill_stops_at_vertical_wall() {
        let outline = outline_with(9, 5, |x, _| x == 4);
        let walls = WallMap::from_outline(&outline, WallPolicy::default());
        let mut layer = RgbaImage::from_pixel(9, 5, CLEAR);

        let diff = flood_fill(&walls, &mut layer, 1, 1, RED).unwrap();
        assert_eq!(diff.len(), 20);
        assert_eq!(*layer.get_pixel(3, 4), RED);
        assert_eq!(*layer.get_pixel(4, 2), CLEAR);
        assert_eq!(*layer.get_pixel(5, 2), CLEAR);
    }

    #[test]
    fn test_fill_does_not_leak_through_diagonal_gap() {
        // Diagonal staircase wall: 4-connected fill must not cross it
        let outline = outline_with(6, 6, |x, y| x == y);
        let walls = WallMap::from_outline(&outline, WallPolicy::default());
        let mut layer = RgbaImage::from_pixel(6, 6, CLEAR);

        let diff = flood_fill(&walls, &mut layer, 5, 0, RED).unwrap();
        assert_eq!(diff.len(), 15);
        assert_eq!(*layer.get_pixel(0, 5), CLEAR);
    }

    #[test]
    fn test_fill_respects_color_mismatch() {
        let outline = outline_with(4, 1, |_, _| false);
        let walls = WallMap::from_outline(&outline, WallPolicy::default());
        let mut layer = RgbaImage::from_pixel(4, 1, CLEAR);
        // Same RGB, different alpha: not the same color
        layer.put_pixel(2, 0, Rgba([0, 0, 0, 1]));

        let diff = flood_fill(&walls, &mut layer, 0, 0, RED).unwrap();
        assert_eq!(diff.len(), 2);
        assert_eq!(*layer.get_pixel(3, 0), CLEAR);
    }

    #[test]
    fn test_fill_serpentine_region() {
        // Comb with teeth from alternating sides forces many spans
        let outline = outline_with(11, 11, |x, y| {
            (y % 4 == 1 && x < 9) || (y % 4 == 3 && x > 1)
        });
        let walls = WallMap::from_outline(&outline, WallPolicy::default());
        let mut layer = RgbaImage::from_pixel(11, 11, CLEAR);

        let diff = flood_fill(&walls, &mut layer, 0, 0, RED).unwrap();
        let open = (0..11u32)
            .flat_map(|y| (0..11u32).map(move |x| (x, y)))
            .filter(|&(x, y)| !walls.is_wall(x, y))
            .count();
        assert_eq!(diff.len(), open);
    }

    #[test]
    fn test_errors_leave_layer_untouched() {
        let outline = outline_with(4, 4, |x, _| x == 0);
        let walls = WallMap::from_outline(&outline, WallPolicy::default());
        let mut layer = RgbaImage::from_pixel(4, 4, CLEAR);
        let before = layer.clone();

        assert!(matches!(
            flood_fill(&walls, &mut layer, 4, 0, RED),
            Err(FillError::OutOfBounds { .. })
        ));
        assert_eq!(
            flood_fill(&walls, &mut layer, 0, 2, RED),
            Err(FillError::BoundaryHit { x: 0, y: 2 })
        );
        assert_eq!(
            flood_fill(&walls, &mut layer, 2, 2, CLEAR),
            Err(FillError::NoOpFill { x: 2, y: 2 })
        );
        assert_eq!(layer, before);
    }

    #[test]
    fn test_revert_and_reapply() {
        let outline = outline_with(6, 6, |x, _| x == 3);
        let walls = WallMap::from_outline(&outline, WallPolicy::default());
        let mut layer = RgbaImage::from_pixel(6, 6, WHITE);
        let before = layer.clone();

        let diff = flood_fill(&walls, &mut layer, 0, 0, RED).unwrap();
        let after = layer.clone();

        diff.revert(&mut layer);
        assert_eq!(layer, before);
        diff.reapply(&mut layer);
        assert_eq!(layer, after);
    }
}
