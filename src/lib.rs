//! Inkfill - tap-to-color engine for line-art coloring pages
//!
//! Flood fill, undo/redo and compositing for coloring pages, plus the
//! photo-to-outline ingestion built on the `lineart` crate.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
pub mod telemetry;
