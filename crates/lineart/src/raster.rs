//! Raster helpers: grayscale conversion, aspect-preserving resize,
//! darkest-sample reduction and Gaussian blur.
//!
//! The blur is a hand-rolled separable pass rather than
//! `image::imageops::blur`: it replicates edges and keeps a constant image
//! exactly constant, which the edge detector relies on.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbaImage};

use crate::color::luminance_over_white;

/// Convert RGBA to single-channel luminance (alpha composited over white).
pub fn to_gray(rgba: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        Luma([luminance_over_white(rgba.get_pixel(x, y).0)])
    })
}

/// Dimensions after scaling so the longer edge equals `target`.
///
/// The shorter edge is rounded and never drops below one pixel.
pub fn fit_longest_edge(width: u32, height: u32, target: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest == 0 || target == 0 {
        return (width, height);
    }
    let scale = target as f64 / longest as f64;
    let w = ((width as f64 * scale).round() as u32).max(1);
    let h = ((height as f64 * scale).round() as u32).max(1);
    if width >= height {
        (target, h)
    } else {
        (w, target)
    }
}

/// Resize so the longer edge equals `target`, preserving aspect ratio.
///
/// Upscales as well as downscales. Returns a copy when already at size.
pub fn resize_longest_edge(rgba: &RgbaImage, target: u32) -> RgbaImage {
    let (w, h) = fit_longest_edge(rgba.width(), rgba.height(), target);
    if (w, h) == rgba.dimensions() {
        return rgba.clone();
    }
    let filter = if w < rgba.width() {
        FilterType::Triangle
    } else {
        FilterType::CatmullRom
    };
    imageops::resize(rgba, w, h, filter)
}

/// Like [`resize_longest_edge`] but never enlarges.
pub fn downscale_longest_edge(rgba: &RgbaImage, max_edge: u32) -> RgbaImage {
    if rgba.width().max(rgba.height()) <= max_edge {
        return rgba.clone();
    }
    resize_longest_edge(rgba, max_edge)
}

/// Reduce `gray` to `width`x`height`, each output pixel taking the darkest
/// sample of the source block it covers.
///
/// Blocks overlap by one source pixel when the factor is fractional, so a
/// dark stroke of any width survives as at least one fully dark pixel and
/// a connected stroke stays connected. Targets at or above the source size
/// return a copy.
pub fn darkest_downscale(gray: &GrayImage, width: u32, height: u32) -> GrayImage {
    let (sw, sh) = gray.dimensions();
    if width == 0 || height == 0 || (width >= sw && height >= sh) {
        return gray.clone();
    }
    let (width, height) = (width.min(sw), height.min(sh));

    // Half-open source span covered by output index `o`
    let span = |o: u32, src: u32, dst: u32| -> (usize, usize) {
        let (o, src, dst) = (o as u64, src as u64, dst as u64);
        let start = o * src / dst;
        let end = ((o + 1) * src).div_ceil(dst).clamp(start + 1, src);
        (start as usize, end as usize)
    };

    let src = gray.as_raw();
    let (sw_us, out_w) = (sw as usize, width as usize);

    // Horizontal pass: width x sh
    let mut rows = vec![255u8; out_w * sh as usize];
    for y in 0..sh as usize {
        let row = &src[y * sw_us..(y + 1) * sw_us];
        for ox in 0..width {
            let (x0, x1) = span(ox, sw, width);
            rows[y * out_w + ox as usize] = row[x0..x1].iter().copied().min().unwrap_or(255);
        }
    }

    // Vertical pass: width x height
    let mut out = vec![255u8; out_w * height as usize];
    for oy in 0..height {
        let (y0, y1) = span(oy, sh, height);
        for x in 0..out_w {
            out[oy as usize * out_w + x] = (y0..y1)
                .map(|y| rows[y * out_w + x])
                .min()
                .unwrap_or(255);
        }
    }

    GrayImage::from_raw(width, height, out)
        .unwrap_or_else(|| imageops::resize(gray, width, height, FilterType::Triangle))
}

/// Separable Gaussian blur with edge-replicated borders.
///
/// The kernel is normalized, so a constant image stays exactly constant.
/// `sigma <= 0` returns a copy.
pub fn gaussian_blur(gray: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 || gray.width() == 0 || gray.height() == 0 {
        return gray.clone();
    }

    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as i64;
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    let src = gray.as_raw();

    // Horizontal pass into f32
    let mut horizontal = vec![0.0f32; w * h];
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = (x as i64 + k as i64 - radius).clamp(0, w as i64 - 1) as usize;
                acc += row[sx] as f32 * weight;
            }
            horizontal[y * w + x] = acc;
        }
    }

    // Vertical pass back to u8
    let mut out = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = (y as i64 + k as i64 - radius).clamp(0, h as i64 - 1) as usize;
                acc += horizontal[sy * w + x] * weight;
            }
            out[y * w + x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }

    GrayImage::from_raw(gray.width(), gray.height(), out)
        .unwrap_or_else(|| gray.clone())
}

/// Normalized 1-D Gaussian kernel covering three standard deviations.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil().max(1.0) as i32;
    let two_sigma_sq = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / two_sigma_sq).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    kernel
}
