//! Subject masking and compositing.
//!
//! Used in "keep subject, simplify background" mode: the photo's salient
//! subject is located, cropped and sent for separate line-art generation,
//! then the subject line art is pasted over the background line art with
//! a hard cutover along the mask.
//!
//! ```text
//! photo ──► detect_subject ──► SubjectDetection { mask, bounds, found }
//!                                   │
//!               crop ◄──────────────┤
//!                                   ▼
//! background art + subject art ──► composite_subject ──► outline
//! ```

mod bbox;
mod components;
mod compose;
mod mask;
mod options;

pub use bbox::BoundingBox;
pub use components::{largest_component, Components};
pub use compose::composite_subject;
pub use mask::{detect_subject, SubjectDetection, MASK_BACKGROUND, MASK_SUBJECT};
pub use options::{
    SubjectOptions, DEFAULT_BBOX_MARGIN, DEFAULT_CENTER_FALLOFF, DEFAULT_CLOSING_RADIUS,
    DEFAULT_MASK_THRESHOLD, DEFAULT_MEMBERSHIP_THRESHOLD, DEFAULT_SUBJECT_WORKING_SIZE,
};
