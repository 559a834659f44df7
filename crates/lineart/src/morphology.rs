//! Binary morphology on [`Bitmap`]s.
//!
//! All neighborhoods are square (Chebyshev radius) and only consider
//! in-bounds pixels, so the image border neither grows nor erodes shapes
//! on its own.

use std::collections::VecDeque;

use crate::bitmap::Bitmap;

/// Clear foreground pixels with fewer than `min_neighbors` foreground
/// 8-neighbors.
///
/// Reads from the input and writes to a copy, so removal does not cascade
/// within a single pass.
pub fn despeckle(bitmap: &Bitmap, min_neighbors: u8) -> Bitmap {
    let mut out = bitmap.clone();
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            if bitmap.get(x, y) && bitmap.neighbor_count(x, y) < min_neighbors {
                out.set(x, y, false);
            }
        }
    }
    out
}

/// Grow foreground by `radius` rings.
pub fn dilate(bitmap: &Bitmap, radius: u32) -> Bitmap {
    if radius == 0 {
        return bitmap.clone();
    }
    let r = radius as i64;
    let (w, h) = (bitmap.width() as i64, bitmap.height() as i64);
    Bitmap::from_fn(bitmap.width(), bitmap.height(), |x, y| {
        let (x, y) = (x as i64, y as i64);
        for ny in (y - r).max(0)..=(y + r).min(h - 1) {
            for nx in (x - r).max(0)..=(x + r).min(w - 1) {
                if bitmap.get(nx as u32, ny as u32) {
                    return true;
                }
            }
        }
        false
    })
}

/// Shrink foreground by `radius` rings.
pub fn erode(bitmap: &Bitmap, radius: u32) -> Bitmap {
    if radius == 0 {
        return bitmap.clone();
    }
    let r = radius as i64;
    let (w, h) = (bitmap.width() as i64, bitmap.height() as i64);
    Bitmap::from_fn(bitmap.width(), bitmap.height(), |x, y| {
        let (x, y) = (x as i64, y as i64);
        for ny in (y - r).max(0)..=(y + r).min(h - 1) {
            for nx in (x - r).max(0)..=(x + r).min(w - 1) {
                if !bitmap.get(nx as u32, ny as u32) {
                    return false;
                }
            }
        }
        true
    })
}

/// Morphological closing: dilate then erode. Fills holes and gaps up to
/// `2 * radius` pixels wide.
pub fn close(bitmap: &Bitmap, radius: u32) -> Bitmap {
    erode(&dilate(bitmap, radius), radius)
}

/// Sample every `step`-th pixel on a grid and invert the bitmap when
/// foreground outnumbers background by more than `ratio` to one.
///
/// Returns whether the bitmap was inverted.
pub fn normalize_polarity(bitmap: &mut Bitmap, step: u32, ratio: f32) -> bool {
    let step = step.max(1);
    let (mut fg, mut bg) = (0usize, 0usize);
    for y in (0..bitmap.height()).step_by(step as usize) {
        for x in (0..bitmap.width()).step_by(step as usize) {
            if bitmap.get(x, y) {
                fg += 1;
            } else {
                bg += 1;
            }
        }
    }
    if fg as f32 > bg as f32 * ratio {
        bitmap.invert();
        true
    } else {
        false
    }
}

/// Mark as foreground every background pixel that cannot reach the image
/// border through 4-connected background.
pub fn fill_holes(bitmap: &Bitmap) -> Bitmap {
    let (w, h) = (bitmap.width(), bitmap.height());
    let mut outside = Bitmap::new(w, h);
    let mut queue = VecDeque::new();

    let seed = |x: u32, y: u32, outside: &mut Bitmap, queue: &mut VecDeque<(u32, u32)>| {
        if !bitmap.get(x, y) && !outside.get(x, y) {
            outside.set(x, y, true);
            queue.push_back((x, y));
        }
    };
    for x in 0..w {
        seed(x, 0, &mut outside, &mut queue);
        if h > 1 {
            seed(x, h - 1, &mut outside, &mut queue);
        }
    }
    for y in 0..h {
        seed(0, y, &mut outside, &mut queue);
        if w > 1 {
            seed(w - 1, y, &mut outside, &mut queue);
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let mut visit = |nx: u32, ny: u32| {
            if !bitmap.get(nx, ny) && !outside.get(nx, ny) {
                outside.set(nx, ny, true);
                queue.push_back((nx, ny));
            }
        };
        if x > 0 {
            visit(x - 1, y);
        }
        if x + 1 < w {
            visit(x + 1, y);
        }
        if y > 0 {
            visit(x, y - 1);
        }
        if y + 1 < h {
            visit(x, y + 1);
        }
    }

    Bitmap::from_fn(w, h, |x, y| !outside.get(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_outline(size: u32, lo: u32, hi: u32) -> Bitmap {
        Bitmap::from_fn(size, size, |x, y| {
            (x == lo || x == hi || y == lo || y == hi)
                && (lo..=hi).contains(&x)
                && (lo..=hi).contains(&y)
        })
    }

    #[test]
    fn test_despeckle_removes_isolated_pixel() {
        let bitmap = Bitmap::from_fn(5, 5, |x, y| x == 2 && y == 2);
        assert!(despeckle(&bitmap, 2).is_empty());
    }

    #[test]
    fn test_despeckle_removes_pixel_pair() {
        // Each pixel of a pair has exactly one neighbor
        let bitmap = Bitmap::from_fn(5, 5, |x, y| y == 2 && (x == 2 || x == 3));
        assert!(despeckle(&bitmap, 2).is_empty());
    }

    #[test]
    fn test_despeckle_keeps_lines() {
        let bitmap = Bitmap::from_fn(9, 3, |_, y| y == 1);
        let out = despeckle(&bitmap, 2);
        // Interior of the line has two neighbors, the end points only one
        assert!(out.get(4, 1));
        assert!(!out.get(0, 1));
        assert!(!out.get(8, 1));
        assert_eq!(out.count(), 7);
    }

    #[test]
    fn test_despeckle_keeps_closed_outline() {
        let outline = square_outline(12, 2, 9);
        assert_eq!(despeckle(&outline, 2), outline);
    }

    #[test]
    fn test_dilate_one_ring() {
        let bitmap = Bitmap::from_fn(5, 5, |x, y| x == 2 && y == 2);
        let out = dilate(&bitmap, 1);
        assert_eq!(out.count(), 9);
        assert!(out.get(1, 1) && out.get(3, 3));
        assert!(!out.get(0, 0));
    }

    #[test]
    fn test_erode_undoes_dilate_on_block() {
        let block = Bitmap::from_fn(9, 9, |x, y| (3..=5).contains(&x) && (3..=5).contains(&y));
        assert_eq!(erode(&dilate(&block, 1), 1), block);
    }

    #[test]
    fn test_close_fills_pinhole() {
        let bitmap = Bitmap::from_fn(7, 7, |x, y| {
            (1..=5).contains(&x) && (1..=5).contains(&y) && !(x == 3 && y == 3)
        });
        let closed = close(&bitmap, 1);
        assert!(closed.get(3, 3));
    }

    #[test]
    fn test_polarity_inverts_mostly_foreground() {
        let mut bitmap = Bitmap::from_fn(10, 10, |x, _| x < 8);
        assert!(normalize_polarity(&mut bitmap, 1, 2.0));
        assert_eq!(bitmap.count(), 20);
    }

    #[test]
    fn test_polarity_leaves_balanced_image() {
        let mut bitmap = Bitmap::from_fn(10, 10, |x, _| x < 6);
        assert!(!normalize_polarity(&mut bitmap, 1, 2.0));
        assert_eq!(bitmap.count(), 60);
    }

    #[test]
    fn test_fill_holes_fills_enclosed_interior() {
        let filled = fill_holes(&square_outline(12, 2, 9));
        assert!(filled.get(5, 5));
        assert!(!filled.get(0, 0));
        assert_eq!(filled.count(), 64);
    }

    #[test]
    fn test_fill_holes_leaves_open_shape() {
        // Square with a gap in the top edge stays hollow
        let mut outline = square_outline(12, 2, 9);
        outline.set(5, 2, false);
        let filled = fill_holes(&outline);
        assert!(!filled.get(5, 5));
    }
}
