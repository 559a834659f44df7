pub mod config;
pub mod stroke;
pub mod view;

pub use config::{
    CanvasConfig, ColorLayerMode, EngineConfig, ExportConfig, FillConfig, HistoryConfig,
    PreprocessConfig, SubjectConfig,
};
pub use stroke::{Stroke, StrokePoint, MIN_STROKE_WIDTH};
pub use view::ViewTransform;
