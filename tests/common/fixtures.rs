//! Test fixtures and constants.

use image::{Rgba, RgbaImage};
use inkfill::models::EngineConfig;
use inkfill::rendering::encode_png;

/// Colors used throughout the tests
pub mod colors {
    use image::Rgba;

    pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    pub const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    pub const GREEN: Rgba<u8> = Rgba([0, 200, 0, 255]);
    pub const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    pub const PALETTE: [Rgba<u8>; 4] = [RED, BLUE, GREEN, Rgba([250, 200, 30, 255])];
}

/// Square outline geometry shared by the page and ingest tests
pub mod square {
    /// Canvas edge
    pub const SIZE: u32 = 32;
    /// First and last row/column of the 16px outline
    pub const LO: u32 = 8;
    pub const HI: u32 = 23;
    /// Pixels strictly inside the outline
    pub const INTERIOR: usize = 14 * 14;
}

/// 1px black square outline on white
pub fn square_outline(size: u32, lo: u32, hi: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if on_square(x, y, lo, hi) {
            colors::BLACK
        } else {
            colors::WHITE
        }
    })
}

pub fn on_square(x: u32, y: u32, lo: u32, hi: u32) -> bool {
    ((x == lo || x == hi) && (lo..=hi).contains(&y)) || ((y == lo || y == hi) && (lo..=hi).contains(&x))
}

pub fn inside_square(x: u32, y: u32, lo: u32, hi: u32) -> bool {
    x > lo && x < hi && y > lo && y < hi
}

/// The 32x32 fixture with the 16x16 centered outline
pub fn centered_square() -> RgbaImage {
    square_outline(square::SIZE, square::LO, square::HI)
}

/// Square outline `thickness` px wide spanning the middle half of a
/// `size`x`size` white photo
pub fn thick_square(size: u32, thickness: u32) -> RgbaImage {
    let (lo, hi) = (size / 4, size * 3 / 4);
    let band = |v: u32, edge: u32| (edge..edge + thickness).contains(&v);
    let span = |v: u32| (lo..hi + thickness).contains(&v);
    RgbaImage::from_fn(size, size, |x, y| {
        let on_edge = ((band(x, lo) || band(x, hi)) && span(y))
            || ((band(y, lo) || band(y, hi)) && span(x));
        if on_edge {
            colors::BLACK
        } else {
            colors::WHITE
        }
    })
}

/// Solid disc on white
pub fn disc(size: u32, cx: u32, cy: u32, radius: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if in_disc(x, y, cx, cy, radius) {
            color
        } else {
            colors::WHITE
        }
    })
}

pub fn in_disc(x: u32, y: u32, cx: u32, cy: u32, radius: u32) -> bool {
    let dx = x as i64 - cx as i64;
    let dy = y as i64 - cy as i64;
    dx * dx + dy * dy <= (radius as i64) * (radius as i64)
}

pub fn png(image: &RgbaImage) -> Vec<u8> {
    encode_png(image).expect("fixture PNG encodes")
}

/// Config with working sizes small enough for fast tests
pub fn test_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.preprocess.working_size = 32;
    config.subject.working_size = 64;
    config
}
