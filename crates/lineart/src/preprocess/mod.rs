//! Photo to line-art preprocessing.
//!
//! [`LineArtPreprocessor`] turns an arbitrary photo into a binary outline
//! (pure black lines on pure white) at a fixed working resolution. The
//! central property is that outlines stay closed: a thin dark stroke in
//! the input produces one continuous band, so a flood fill seeded inside
//! a shape cannot leak out.
//!
//! Tuning lives in [`LineArtOptions`]; every stage is also available on
//! its own through [`crate::raster`], [`crate::edge`] and
//! [`crate::morphology`].

mod options;
mod preprocessor;

pub use options::{
    LineArtOptions, DEFAULT_BLUR_SIGMA, DEFAULT_DARK_CUTOFF, DEFAULT_DILATE_RINGS,
    DEFAULT_MIN_DARK_NEIGHBORS, DEFAULT_POLARITY_GRID_STEP, DEFAULT_POLARITY_RATIO,
    DEFAULT_STRENGTH, DEFAULT_WORKING_SIZE,
};
pub use preprocessor::{LineArtPreprocessor, StagedLineArt, LINE_COLOR, PAPER_COLOR};
