use super::stroke::StrokePoint;

/// Maps between view space (where taps land) and image space.
///
/// The image is fitted into the view preserving aspect ratio, centered,
/// then scaled by `zoom` around the view center and shifted by `pan`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub image_width: u32,
    pub image_height: u32,
    pub view_width: f32,
    pub view_height: f32,
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl ViewTransform {
    /// Fitted, unzoomed, unpanned transform
    pub fn fit(image_width: u32, image_height: u32, view_width: f32, view_height: f32) -> Self {
        Self {
            image_width,
            image_height,
            view_width,
            view_height,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
        self
    }

    pub fn with_pan(mut self, pan_x: f32, pan_y: f32) -> Self {
        self.pan_x = pan_x;
        self.pan_y = pan_y;
        self
    }

    /// View pixels per image pixel
    pub fn scale(&self) -> f32 {
        if self.image_width == 0 || self.image_height == 0 {
            return 0.0;
        }
        let fit = (self.view_width / self.image_width as f32)
            .min(self.view_height / self.image_height as f32);
        fit * self.zoom
    }

    fn origin(&self) -> (f32, f32) {
        let scale = self.scale();
        (
            (self.view_width - self.image_width as f32 * scale) / 2.0 + self.pan_x,
            (self.view_height - self.image_height as f32 * scale) / 2.0 + self.pan_y,
        )
    }

    /// Continuous image-space point for a view point, `None` outside the image
    pub fn to_image_point(&self, view_x: f32, view_y: f32) -> Option<StrokePoint> {
        let scale = self.scale();
        if scale <= 0.0 {
            return None;
        }
        let (ox, oy) = self.origin();
        let x = (view_x - ox) / scale;
        let y = (view_y - oy) / scale;
        let inside = x >= 0.0
            && y >= 0.0
            && x < self.image_width as f32
            && y < self.image_height as f32;
        inside.then_some(StrokePoint::new(x, y))
    }

    /// Pixel under a view point, `None` outside the image
    pub fn to_image(&self, view_x: f32, view_y: f32) -> Option<(u32, u32)> {
        self.to_image_point(view_x, view_y)
            .map(|p| (p.x.floor() as u32, p.y.floor() as u32))
    }

    /// View position of an image-space point
    pub fn to_view(&self, point: StrokePoint) -> (f32, f32) {
        let scale = self.scale();
        let (ox, oy) = self.origin();
        (ox + point.x * scale, oy + point.y * scale)
    }
}
