//! Axis-aligned integer bounding boxes.

use crate::bitmap::Bitmap;

/// Integer rectangle `(x, y, width, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box covering a whole `width` x `height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Centered half-size box used when no subject was found.
    ///
    /// ```
    /// use lineart::BoundingBox;
    ///
    /// assert_eq!(BoundingBox::centered_fallback(100, 60), BoundingBox::new(25, 15, 50, 30));
    /// ```
    pub fn centered_fallback(width: u32, height: u32) -> Self {
        Self::new(
            width / 4,
            height / 4,
            (width / 2).max(1).min(width),
            (height / 2).max(1).min(height),
        )
    }

    /// Box around every foreground pixel, padded by `margin` and clamped to
    /// the bitmap. `None` when the bitmap has no foreground.
    pub fn from_bitmap(bitmap: &Bitmap, margin: u32) -> Option<Self> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        let mut any = false;
        for y in 0..bitmap.height() {
            for x in 0..bitmap.width() {
                if bitmap.get(x, y) {
                    any = true;
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }
        if !any {
            return None;
        }

        let x0 = min_x.saturating_sub(margin);
        let y0 = min_y.saturating_sub(margin);
        let x1 = max_x.saturating_add(margin).min(bitmap.width() - 1);
        let y1 = max_y.saturating_add(margin).min(bitmap.height() - 1);
        Some(Self::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1))
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Map the box from a `from` sized image onto a `to` sized image.
    ///
    /// The origin rounds down and the far edge rounds up so the scaled box
    /// never loses coverage. The result is clamped to `to`.
    pub fn scale(&self, from: (u32, u32), to: (u32, u32)) -> Self {
        if from.0 == 0 || from.1 == 0 {
            return Self::new(0, 0, 0, 0);
        }
        let scale_axis = |start: u32, end: u32, src: u32, dst: u32| -> (u32, u32) {
            let s = (start as u64 * dst as u64 / src as u64) as u32;
            let e = ((end as u64 * dst as u64).div_ceil(src as u64) as u32).min(dst);
            (s.min(dst), e.max(s.min(dst)))
        };
        let (x0, x1) = scale_axis(self.x, self.right(), from.0, to.0);
        let (y0, y1) = scale_axis(self.y, self.bottom(), from.1, to.1);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Intersect with a `width` x `height` image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self::new(
            x,
            y,
            self.right().min(width) - x,
            self.bottom().min(height) - y,
        )
    }
}
