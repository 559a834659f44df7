//! Assertion helpers for tests.

use image::RgbaImage;
use pretty_assertions::assert_eq;

/// Assert bytes are a PNG stream
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.len() > 8 && &bytes[..8] == b"\x89PNG\r\n\x1a\n",
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert two layers are byte-identical, reporting the first difference
pub fn assert_layers_identical(actual: &RgbaImage, expected: &RgbaImage) {
    assert_eq!(actual.dimensions(), expected.dimensions(), "Layer sizes differ");
    if let Some((x, y, a, e)) = actual
        .enumerate_pixels()
        .zip(expected.pixels())
        .find(|((_, _, a), e)| a != e)
        .map(|((x, y, a), e)| (x, y, *a, *e))
    {
        panic!("Layers differ at ({x}, {y}): got {:?}, expected {:?}", a.0, e.0);
    }
}

/// Assert every pixel that differs between `before` and `after` satisfies
/// `allowed`
pub fn assert_changes_within(
    before: &RgbaImage,
    after: &RgbaImage,
    allowed: impl Fn(u32, u32) -> bool,
) {
    for (x, y, p) in after.enumerate_pixels() {
        if p != before.get_pixel(x, y) {
            assert!(allowed(x, y), "Pixel ({x}, {y}) changed outside the allowed region");
        }
    }
}
