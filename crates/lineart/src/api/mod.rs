//! Public error type for the lineart crate.

mod error;

pub(crate) use error::ensure_not_empty;
pub use error::LineArtError;
