pub mod fill;
pub mod history;
pub mod ingest;
pub mod page;

pub use fill::{flood_fill, FillDiff, PixelChange, WallMap, WallPolicy};
pub use history::{
    AppliedEdit, Direction, EditAction, EditKind, History, PaintLayers, StrokeEdit,
    DEFAULT_HISTORY_DEPTH,
};
pub use ingest::{IngestService, SubjectExtraction};
pub use page::{ColoringPage, PageOptions, DEFAULT_MAX_DIMENSION};
