//! One-bit raster used by the thresholding and morphology stages.
//!
//! A [`Bitmap`] stores `true` for foreground. Which pixels count as
//! foreground depends on the caller: the line-art pipeline uses "line
//! pixel", the subject detector uses "subject pixel".

use image::{GrayImage, Luma};

/// Row-major boolean raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Bitmap {
    /// All-background bitmap of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Build a bitmap by evaluating `f` at every coordinate.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Foreground wherever the gray value satisfies `predicate`.
    pub fn from_gray(gray: &GrayImage, predicate: impl Fn(u8) -> bool) -> Self {
        Self {
            width: gray.width(),
            height: gray.height(),
            bits: gray.as_raw().iter().map(|&v| predicate(v)).collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        let idx = self.index(x, y);
        self.bits[idx] = value;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.bits.iter().any(|&b| b)
    }

    /// Flip every pixel.
    pub fn invert(&mut self) {
        for bit in &mut self.bits {
            *bit = !*bit;
        }
    }

    /// Number of foreground pixels among the in-bounds 8-neighbors of (x, y).
    pub fn neighbor_count(&self, x: u32, y: u32) -> u8 {
        let mut count = 0;
        for (nx, ny) in self.neighbors8(x, y) {
            if self.get(nx, ny) {
                count += 1;
            }
        }
        count
    }

    /// In-bounds 8-neighbors of (x, y).
    pub fn neighbors8(&self, x: u32, y: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (w, h) = (self.width as i64, self.height as i64);
        let (x, y) = (x as i64, y as i64);
        (-1i64..=1)
            .flat_map(move |dy| (-1i64..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| (x + dx, y + dy))
            .filter(move |&(nx, ny)| nx >= 0 && ny >= 0 && nx < w && ny < h)
            .map(|(nx, ny)| (nx as u32, ny as u32))
    }

    /// Render to a gray image with the given foreground / background values.
    pub fn to_gray(&self, foreground: u8, background: u8) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.get(x, y) { foreground } else { background }])
        })
    }
}
