//! Lossless byte encodings of the raster layers.

use image::{GrayImage, RgbaImage};
use std::io::Cursor;

use crate::error::RenderError;

/// Decode any supported image format into straight-alpha RGBA.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, RenderError> {
    if bytes.is_empty() {
        return Err(RenderError::Decode("empty input".to_string()));
    }
    let decoded =
        image::load_from_memory(bytes).map_err(|e| RenderError::Decode(e.to_string()))?;
    Ok(decoded.to_rgba8())
}

/// Encode RGBA as 8-bit truecolor-with-alpha PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    encode(
        image.width(),
        image.height(),
        png::ColorType::Rgba,
        image.as_raw(),
    )
}

/// Encode a single-channel image as 8-bit grayscale PNG.
pub fn encode_gray_png(image: &GrayImage) -> Result<Vec<u8>, RenderError> {
    encode(
        image.width(),
        image.height(),
        png::ColorType::Grayscale,
        image.as_raw(),
    )
}

fn encode(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress a PNG with oxipng, keeping every pixel value.
///
/// Returns the input unchanged if optimization fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping original");
            png_bytes
        }
    }
}
