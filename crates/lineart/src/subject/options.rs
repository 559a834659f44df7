//! Subject detection options.

/// Longest edge of the reduced raster the detector works on.
pub const DEFAULT_SUBJECT_WORKING_SIZE: u32 = 256;

/// Weight lost at the image corners by the radial center bias.
pub const DEFAULT_CENTER_FALLOFF: f32 = 0.6;

/// Fraction of the peak biased gradient a pixel must reach to be subject.
pub const DEFAULT_MASK_THRESHOLD: f32 = 0.2;

/// Radius of the closing pass applied to the raw mask.
pub const DEFAULT_CLOSING_RADIUS: u32 = 1;

/// Padding added around the subject bounding box, in working pixels.
pub const DEFAULT_BBOX_MARGIN: u32 = 8;

/// Mask values strictly above this are composited from the subject.
pub const DEFAULT_MEMBERSHIP_THRESHOLD: u8 = 128;

/// Configuration for [`detect_subject`](super::detect_subject).
///
/// # Example
///
/// ```
/// use lineart::SubjectOptions;
///
/// let options = SubjectOptions::new().working_size(128).bbox_margin(4);
/// assert_eq!(options.working_size, 128);
/// assert!(options.fill_holes);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectOptions {
    /// Longest edge of the working raster. Inputs are never enlarged.
    pub working_size: u32,
    /// Blur sigma applied before the gradient.
    pub blur_sigma: f32,
    /// Center-bias falloff: weight is `1 - falloff * r` with `r` the
    /// distance from the center normalized to 1 at the corners.
    pub center_falloff: f32,
    /// Threshold as a fraction of the peak biased gradient.
    pub mask_threshold: f32,
    pub closing_radius: u32,
    pub bbox_margin: u32,
    pub membership_threshold: u8,
    /// Fill enclosed background pockets inside the chosen component.
    pub fill_holes: bool,
}

impl Default for SubjectOptions {
    fn default() -> Self {
        Self {
            working_size: DEFAULT_SUBJECT_WORKING_SIZE,
            blur_sigma: 1.0,
            center_falloff: DEFAULT_CENTER_FALLOFF,
            mask_threshold: DEFAULT_MASK_THRESHOLD,
            closing_radius: DEFAULT_CLOSING_RADIUS,
            bbox_margin: DEFAULT_BBOX_MARGIN,
            membership_threshold: DEFAULT_MEMBERSHIP_THRESHOLD,
            fill_holes: true,
        }
    }
}

impl SubjectOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn working_size(mut self, size: u32) -> Self {
        self.working_size = size;
        self
    }

    #[inline]
    pub fn blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma.max(0.0);
        self
    }

    /// Set the center falloff, clamped to 0.0..=1.0.
    #[inline]
    pub fn center_falloff(mut self, falloff: f32) -> Self {
        self.center_falloff = falloff.clamp(0.0, 1.0);
        self
    }

    /// Set the mask threshold fraction, clamped to 0.0..=1.0.
    #[inline]
    pub fn mask_threshold(mut self, fraction: f32) -> Self {
        self.mask_threshold = fraction.clamp(0.0, 1.0);
        self
    }

    #[inline]
    pub fn closing_radius(mut self, radius: u32) -> Self {
        self.closing_radius = radius;
        self
    }

    #[inline]
    pub fn bbox_margin(mut self, margin: u32) -> Self {
        self.bbox_margin = margin;
        self
    }

    #[inline]
    pub fn membership_threshold(mut self, threshold: u8) -> Self {
        self.membership_threshold = threshold;
        self
    }

    #[inline]
    pub fn fill_holes(mut self, enabled: bool) -> Self {
        self.fill_holes = enabled;
        self
    }
}
