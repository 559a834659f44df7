//! Layer compositing: paper, color layer, strokes, outline.
//!
//! The same function produces the on-screen image and the exported file.
//! Layers stack bottom to top as white paper, the color layer (alpha over
//! paper), the vector strokes, and finally the outline, which is
//! multiplied in so lines stay black over any color underneath.

use image::{Rgba, RgbaImage};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Transform};

use crate::error::RenderError;
use crate::models::Stroke;

/// Composite the page into an opaque RGBA image.
pub fn composite(
    color: &RgbaImage,
    outline: &RgbaImage,
    strokes: &[Stroke],
) -> Result<RgbaImage, RenderError> {
    if color.dimensions() != outline.dimensions() {
        return Err(RenderError::DimensionMismatch {
            expected_width: outline.width(),
            expected_height: outline.height(),
            width: color.width(),
            height: color.height(),
        });
    }

    let base = render_base(color, strokes)?;
    Ok(RgbaImage::from_fn(outline.width(), outline.height(), |x, y| {
        let [br, bg, bb, _] = base.get_pixel(x, y).0;
        let [or, og, ob] = over_white(outline.get_pixel(x, y).0);
        Rgba([multiply(br, or), multiply(bg, og), multiply(bb, ob), 255])
    }))
}

/// Rasterize the strokes into the color layer, producing an opaque layer
/// that composites identically with no strokes.
pub fn flatten_color(color: &RgbaImage, strokes: &[Stroke]) -> Result<RgbaImage, RenderError> {
    render_base(color, strokes)
}

/// Paper, color layer and strokes as an opaque RGBA image.
fn render_base(color: &RgbaImage, strokes: &[Stroke]) -> Result<RgbaImage, RenderError> {
    let (width, height) = color.dimensions();
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(color.pixels()) {
        let [r, g, b] = over_white(src.0);
        if let Some(px) = PremultipliedColorU8::from_rgba(r, g, b, 255) {
            *dst = px;
        }
    }

    for stroke in strokes {
        draw_stroke(&mut pixmap, stroke);
    }

    let mut out = RgbaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), 255]);
    }
    Ok(out)
}

fn draw_stroke(pixmap: &mut Pixmap, stroke: &Stroke) {
    let [r, g, b, a] = stroke.color.0;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    if stroke.is_dot() {
        let p = stroke.points[0];
        if let Some(circle) = PathBuilder::from_circle(p.x, p.y, stroke.width / 2.0) {
            pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
        }
        return;
    }

    let mut pb = PathBuilder::new();
    let mut points = stroke.points.iter();
    if let Some(first) = points.next() {
        pb.move_to(first.x, first.y);
    }
    for p in points {
        pb.line_to(p.x, p.y);
    }
    let Some(path) = pb.finish() else {
        return;
    };
    let style = tiny_skia::Stroke {
        width: stroke.width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &style, Transform::identity(), None);
}

/// RGB of a straight-alpha pixel composited over white.
#[inline]
fn over_white([r, g, b, a]: [u8; 4]) -> [u8; 3] {
    let a = a as u32;
    let blend = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
    [blend(r), blend(g), blend(b)]
}

#[inline]
fn multiply(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}
