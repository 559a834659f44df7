//! A coloring page editing session.
//!
//! Owns the immutable outline layer, its wall map, the mutable color layer
//! and stroke list, and the bounded history. All edits go through
//! `&mut self`, so exactly one fill, undo or redo runs at a time.

use image::{Rgba, RgbaImage};
use std::sync::Arc;

use super::fill::{flood_fill, FillDiff, WallMap, WallPolicy};
use super::history::{
    AppliedEdit, EditAction, History, PaintLayers, StrokeEdit, DEFAULT_HISTORY_DEPTH,
};
use crate::error::{FillError, RenderError};
use crate::models::{ColorLayerMode, Stroke, StrokePoint};
use crate::rendering::{composite, decode_rgba, encode_png, flatten_color, optimize_png};

/// Largest accepted outline edge by default
pub const DEFAULT_MAX_DIMENSION: u32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageOptions {
    pub wall: WallPolicy,
    pub history_depth: usize,
    pub max_dimension: u32,
    pub color_layer: ColorLayerMode,
    pub optimize_png: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            wall: WallPolicy::default(),
            history_depth: DEFAULT_HISTORY_DEPTH,
            max_dimension: DEFAULT_MAX_DIMENSION,
            color_layer: ColorLayerMode::Transparent,
            optimize_png: false,
        }
    }
}

pub struct ColoringPage {
    outline: RgbaImage,
    walls: WallMap,
    layers: PaintLayers,
    active: Option<Stroke>,
    history: History,
    options: PageOptions,
}

impl ColoringPage {
    /// Start a page over `outline` with a fresh color layer.
    pub fn new(outline: RgbaImage, options: PageOptions) -> Result<Self, RenderError> {
        check_dimensions(outline.width(), outline.height(), options.max_dimension)?;
        let initial = match options.color_layer {
            ColorLayerMode::Transparent => Rgba([0, 0, 0, 0]),
            ColorLayerMode::White => Rgba([255, 255, 255, 255]),
        };
        let color = RgbaImage::from_pixel(outline.width(), outline.height(), initial);
        Self::with_color_layer(outline, color, options)
    }

    /// Resume a page with a previously saved color layer.
    pub fn with_color_layer(
        outline: RgbaImage,
        color: RgbaImage,
        options: PageOptions,
    ) -> Result<Self, RenderError> {
        let (width, height) = outline.dimensions();
        check_dimensions(width, height, options.max_dimension)?;
        if color.dimensions() != (width, height) {
            return Err(RenderError::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                width: color.width(),
                height: color.height(),
            });
        }

        let walls = WallMap::from_outline(&outline, options.wall);
        tracing::info!(
            width,
            height,
            walls = walls.wall_count(),
            wall_threshold = options.wall.threshold,
            "Created coloring page"
        );

        Ok(Self {
            outline,
            walls,
            layers: PaintLayers {
                color,
                strokes: Vec::new(),
            },
            active: None,
            history: History::new(options.history_depth),
            options,
        })
    }

    /// Load a page from encoded outline bytes and optional saved color
    /// layer bytes.
    pub fn from_png(
        outline: &[u8],
        color: Option<&[u8]>,
        options: PageOptions,
    ) -> Result<Self, RenderError> {
        let outline = decode_rgba(outline)?;
        match color {
            Some(bytes) => Self::with_color_layer(outline, decode_rgba(bytes)?, options),
            None => Self::new(outline, options),
        }
    }

    /// Fill the region under `(x, y)` and record it for undo.
    pub fn fill(&mut self, x: u32, y: u32, color: Rgba<u8>) -> Result<Arc<FillDiff>, FillError> {
        match flood_fill(&self.walls, &mut self.layers.color, x, y, color) {
            Ok(diff) => {
                let diff = Arc::new(diff);
                tracing::debug!(seed = ?(x, y), changed = diff.len(), "Filled region");
                self.history.record(EditAction::Fill(diff.clone()));
                Ok(diff)
            }
            Err(e) => {
                tracing::debug!(seed = ?(x, y), %e, "Fill made no change");
                Err(e)
            }
        }
    }

    /// Undo the newest edit; `None` when there is nothing to undo.
    ///
    /// A stroke in progress is committed first and is what gets undone.
    pub fn undo(&mut self) -> Option<AppliedEdit> {
        self.end_stroke();
        match self.history.undo(&mut self.layers) {
            Ok(applied) => {
                tracing::debug!(kind = ?applied.kind, depth = self.history.undo_depth(), "Undo");
                Some(applied)
            }
            Err(e) => {
                tracing::debug!(%e, "Undo ignored");
                None
            }
        }
    }

    /// Redo the newest undone edit; `None` when there is nothing to redo.
    ///
    /// A stroke in progress is committed first, which is a new edit and so
    /// discards the redo stack.
    pub fn redo(&mut self) -> Option<AppliedEdit> {
        self.end_stroke();
        match self.history.redo(&mut self.layers) {
            Ok(applied) => {
                tracing::debug!(kind = ?applied.kind, depth = self.history.undo_depth(), "Redo");
                Some(applied)
            }
            Err(e) => {
                tracing::debug!(%e, "Redo ignored");
                None
            }
        }
    }

    /// Start a freehand stroke, committing any stroke still in progress.
    pub fn begin_stroke(&mut self, point: StrokePoint, color: Rgba<u8>, width: f32) {
        self.end_stroke();
        self.active = Some(Stroke::new(point, color, width));
    }

    /// Extend the stroke in progress. Returns `false` if there is none.
    pub fn extend_stroke(&mut self, point: StrokePoint) -> bool {
        match self.active.as_mut() {
            Some(stroke) => {
                stroke.push(point);
                true
            }
            None => false,
        }
    }

    /// Commit the stroke in progress. Returns `false` if there was none.
    pub fn end_stroke(&mut self) -> bool {
        let Some(stroke) = self.active.take() else {
            return false;
        };
        tracing::debug!(points = stroke.points.len(), width = stroke.width, "Stroke committed");
        let before = self.layers.strokes.clone();
        self.layers.strokes.push(stroke);
        self.history.record(EditAction::Strokes {
            kind: StrokeEdit::Draw,
            before,
            after: self.layers.strokes.clone(),
        });
        true
    }

    /// Remove every stroke as one undoable edit. Returns `false` (and
    /// records nothing) when there were no strokes.
    pub fn clear_strokes(&mut self) -> bool {
        self.end_stroke();
        if self.layers.strokes.is_empty() {
            return false;
        }
        let before = std::mem::take(&mut self.layers.strokes);
        tracing::debug!(cleared = before.len(), "Cleared strokes");
        self.history.record(EditAction::Strokes {
            kind: StrokeEdit::ClearAll,
            before,
            after: Vec::new(),
        });
        true
    }

    /// Composite of the page as shown, including any stroke in progress.
    pub fn render(&self) -> Result<RgbaImage, RenderError> {
        match &self.active {
            Some(active) => {
                let mut strokes = self.layers.strokes.clone();
                strokes.push(active.clone());
                composite(&self.layers.color, &self.outline, &strokes)
            }
            None => composite(&self.layers.color, &self.outline, &self.layers.strokes),
        }
    }

    pub fn render_png(&self) -> Result<Vec<u8>, RenderError> {
        self.encode(&self.render()?)
    }

    /// The color layer alone, for persistence.
    pub fn color_layer_png(&self) -> Result<Vec<u8>, RenderError> {
        self.encode(&self.layers.color)
    }

    /// Bake strokes into the color layer and drop history. The composite
    /// is unchanged.
    pub fn finalize(&mut self) -> Result<(), RenderError> {
        self.end_stroke();
        if !self.layers.strokes.is_empty() {
            self.layers.color = flatten_color(&self.layers.color, &self.layers.strokes)?;
            self.layers.strokes.clear();
        }
        self.history.clear();
        tracing::info!(width = self.width(), height = self.height(), "Finalized page");
        Ok(())
    }

    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
        let png = encode_png(image)?;
        Ok(if self.options.optimize_png {
            optimize_png(png)
        } else {
            png
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.outline.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.outline.height()
    }

    pub fn outline(&self) -> &RgbaImage {
        &self.outline
    }

    pub fn color_layer(&self) -> &RgbaImage {
        &self.layers.color
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.layers.strokes
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn walls(&self) -> &WallMap {
        &self.walls
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }
}

fn check_dimensions(width: u32, height: u32, max: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 || width > max || height > max {
        return Err(RenderError::UnsupportedDimensions { width, height });
    }
    Ok(())
}
