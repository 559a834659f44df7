//! Bounded undo/redo log over fills and stroke edits.

use image::RgbaImage;
use std::collections::VecDeque;
use std::sync::Arc;

use super::fill::FillDiff;
use crate::error::HistoryError;
use crate::models::Stroke;

/// Default number of undoable edits
pub const DEFAULT_HISTORY_DEPTH: usize = 5;

/// The mutable state an edit can touch.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintLayers {
    pub color: RgbaImage,
    pub strokes: Vec<Stroke>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEdit {
    Draw,
    ClearAll,
}

/// A reversible edit.
#[derive(Debug, Clone)]
pub enum EditAction {
    /// Pixel-level diff of a fill
    Fill(Arc<FillDiff>),
    /// Whole stroke list before and after the edit
    Strokes {
        kind: StrokeEdit,
        before: Vec<Stroke>,
        after: Vec<Stroke>,
    },
}

impl EditAction {
    fn revert(&self, layers: &mut PaintLayers) {
        match self {
            EditAction::Fill(diff) => diff.revert(&mut layers.color),
            EditAction::Strokes { before, .. } => layers.strokes = before.clone(),
        }
    }

    fn reapply(&self, layers: &mut PaintLayers) {
        match self {
            EditAction::Fill(diff) => diff.reapply(&mut layers.color),
            EditAction::Strokes { after, .. } => layers.strokes = after.clone(),
        }
    }

    pub fn kind(&self) -> EditKind {
        match self {
            EditAction::Fill(diff) => EditKind::Fill {
                seed: diff.seed,
                pixels: diff.len(),
            },
            EditAction::Strokes {
                kind: StrokeEdit::Draw,
                ..
            } => EditKind::DrawStroke,
            EditAction::Strokes {
                kind: StrokeEdit::ClearAll,
                ..
            } => EditKind::ClearStrokes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Fill { seed: (u32, u32), pixels: usize },
    DrawStroke,
    ClearStrokes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

/// What an undo or redo just applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedEdit {
    pub direction: Direction,
    pub kind: EditKind,
}

/// Undo and redo stacks. The undo stack never exceeds `depth`; recording
/// past it evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<EditAction>,
    redo: Vec<EditAction>,
    depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    pub fn new(depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(depth + 1),
            redo: Vec::with_capacity(depth),
            depth,
        }
    }

    /// Push a new edit and drop everything that could be redone.
    pub fn record(&mut self, action: EditAction) {
        self.undo.push_back(action);
        while self.undo.len() > self.depth {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    pub fn undo(&mut self, layers: &mut PaintLayers) -> Result<AppliedEdit, HistoryError> {
        let action = self
            .undo
            .pop_back()
            .ok_or(HistoryError::EmptyHistory("undo"))?;
        action.revert(layers);
        let kind = action.kind();
        self.redo.push(action);
        Ok(AppliedEdit {
            direction: Direction::Undo,
            kind,
        })
    }

    pub fn redo(&mut self, layers: &mut PaintLayers) -> Result<AppliedEdit, HistoryError> {
        let action = self.redo.pop().ok_or(HistoryError::EmptyHistory("redo"))?;
        action.reapply(layers);
        let kind = action.kind();
        self.undo.push_back(action);
        Ok(AppliedEdit {
            direction: Direction::Redo,
            kind,
        })
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[inline]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    #[inline]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Kinds on the undo stack, oldest first.
    pub fn undo_kinds(&self) -> Vec<EditKind> {
        self.undo.iter().map(EditAction::kind).collect()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
