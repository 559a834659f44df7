use image::Rgba;

/// Thinnest stroke that will be drawn, in image pixels
pub const MIN_STROKE_WIDTH: f32 = 1.0;

/// A point in image space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
}

impl StrokePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One continuous freehand drag
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<StrokePoint>,
    pub color: Rgba<u8>,
    pub width: f32,
}

impl Stroke {
    /// Start a stroke at `start`; widths below [`MIN_STROKE_WIDTH`] (or NaN)
    /// are raised to it.
    pub fn new(start: StrokePoint, color: Rgba<u8>, width: f32) -> Self {
        Self {
            points: vec![start],
            color,
            width: if width >= MIN_STROKE_WIDTH {
                width
            } else {
                MIN_STROKE_WIDTH
            },
        }
    }

    /// Append a point, skipping exact repeats of the last one
    pub fn push(&mut self, point: StrokePoint) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    /// A stroke with a single point renders as a dot
    pub fn is_dot(&self) -> bool {
        self.points.len() == 1
    }
}
