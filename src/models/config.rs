use lineart::{LineArtOptions, SubjectOptions};
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::services::{PageOptions, WallPolicy};

/// Engine configuration loaded from YAML
///
/// Every section and field is optional; missing values fall back to the
/// defaults below.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub fill: FillConfig,
    pub history: HistoryConfig,
    pub canvas: CanvasConfig,
    pub preprocess: PreprocessConfig,
    pub subject: SubjectConfig,
    pub export: ExportConfig,
}

/// Wall predicate for the flood fill
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FillConfig {
    /// Outline luminance at (or below, see `wall_inclusive`) which a pixel
    /// is a wall
    pub wall_threshold: u8,

    /// Whether luminance equal to the threshold counts as wall
    pub wall_inclusive: bool,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            wall_threshold: 50,
            wall_inclusive: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of undoable edits
    pub depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { depth: 5 }
    }
}

/// Initial contents of a new page's color layer
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorLayerMode {
    #[default]
    Transparent,
    White,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    /// Largest accepted width or height of an outline
    pub max_dimension: u32,
    pub color_layer: ColorLayerMode,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_dimension: 2048,
            color_layer: ColorLayerMode::Transparent,
        }
    }
}

/// Photo to line-art tuning
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PreprocessConfig {
    pub working_size: u32,
    /// Outline strength (0-100) used by `IngestService::preprocess_default`
    pub strength: u8,
    pub blur_sigma: f32,
    pub dark_cutoff: u8,
    pub min_dark_neighbors: u8,
    pub polarity_ratio: f32,
    pub polarity_grid_step: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        let defaults = LineArtOptions::default();
        Self {
            working_size: defaults.working_size,
            strength: defaults.strength,
            blur_sigma: defaults.blur_sigma,
            dark_cutoff: defaults.dark_cutoff,
            min_dark_neighbors: defaults.min_dark_neighbors,
            polarity_ratio: defaults.polarity_ratio,
            polarity_grid_step: defaults.polarity_grid_step,
        }
    }
}

/// Subject detection tuning
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SubjectConfig {
    pub working_size: u32,
    pub center_falloff: f32,
    /// Fraction of the peak center-biased gradient
    pub mask_threshold: f32,
    pub closing_radius: u32,
    pub bbox_margin: u32,
    pub membership_threshold: u8,
    pub fill_holes: bool,
}

impl Default for SubjectConfig {
    fn default() -> Self {
        let defaults = SubjectOptions::default();
        Self {
            working_size: defaults.working_size,
            center_falloff: defaults.center_falloff,
            mask_threshold: defaults.mask_threshold,
            closing_radius: defaults.closing_radius,
            bbox_margin: defaults.bbox_margin,
            membership_threshold: defaults.membership_threshold,
            fill_holes: defaults.fill_holes,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Re-compress encoded PNGs with oxipng
    pub optimize_png: bool,
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    wall_threshold = config.fill.wall_threshold,
                    history_depth = config.history.depth,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn wall_policy(&self) -> WallPolicy {
        WallPolicy {
            threshold: self.fill.wall_threshold,
            inclusive: self.fill.wall_inclusive,
        }
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            wall: self.wall_policy(),
            history_depth: self.history.depth,
            max_dimension: self.canvas.max_dimension,
            color_layer: self.canvas.color_layer,
            optimize_png: self.export.optimize_png,
        }
    }

    pub fn line_art_options(&self) -> LineArtOptions {
        let p = &self.preprocess;
        LineArtOptions::new()
            .working_size(p.working_size)
            .strength(p.strength)
            .blur_sigma(p.blur_sigma)
            .dark_cutoff(p.dark_cutoff)
            .min_dark_neighbors(p.min_dark_neighbors)
            .polarity(p.polarity_ratio, p.polarity_grid_step)
    }

    pub fn subject_options(&self) -> SubjectOptions {
        let s = &self.subject;
        SubjectOptions::new()
            .working_size(s.working_size)
            .center_falloff(s.center_falloff)
            .mask_threshold(s.mask_threshold)
            .closing_radius(s.closing_radius)
            .bbox_margin(s.bbox_margin)
            .membership_threshold(s.membership_threshold)
            .fill_holes(s.fill_holes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.fill.wall_threshold, 50);
        assert!(config.fill.wall_inclusive);
        assert_eq!(config.history.depth, 5);
        assert_eq!(config.canvas.max_dimension, 2048);
        assert_eq!(config.canvas.color_layer, ColorLayerMode::Transparent);
        assert_eq!(config.preprocess.working_size, 1024);
        assert_eq!(config.preprocess.dark_cutoff, 80);
        assert_eq!(config.subject.working_size, 256);
        assert_eq!(config.subject.membership_threshold, 128);
        assert!(!config.export.optimize_png);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = EngineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
fill:
  wall_threshold: 90
  wall_inclusive: false
history:
  depth: 10
canvas:
  color_layer: white
preprocess:
  strength: 75
subject:
  bbox_margin: 4
  fill_holes: false
export:
  optimize_png: true
"#;

        let config = EngineConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.fill.wall_threshold, 90);
        assert!(!config.fill.wall_inclusive);
        assert_eq!(config.history.depth, 10);
        assert_eq!(config.canvas.color_layer, ColorLayerMode::White);
        // Unspecified fields keep their defaults
        assert_eq!(config.canvas.max_dimension, 2048);
        assert_eq!(config.preprocess.strength, 75);
        assert_eq!(config.preprocess.working_size, 1024);
        assert_eq!(config.subject.bbox_margin, 4);
        assert!(!config.subject.fill_holes);
        assert!(config.export.optimize_png);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(EngineConfig::from_yaml_str("fill: [1, 2").is_err());
        assert!(EngineConfig::from_yaml_str("canvas:\n  color_layer: sepia\n").is_err());
    }

    #[test]
    fn test_conversions() {
        let mut config = EngineConfig::default();
        config.fill.wall_threshold = 70;
        config.preprocess.strength = 20;
        config.subject.closing_radius = 3;

        let wall = config.wall_policy();
        assert_eq!(wall.threshold, 70);
        assert!(wall.inclusive);

        assert_eq!(config.line_art_options().strength, 20);
        assert_eq!(config.subject_options().closing_radius, 3);

        let page = config.page_options();
        assert_eq!(page.history_depth, 5);
        assert_eq!(page.max_dimension, 2048);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = EngineConfig::load_or_default("/nonexistent/inkfill.yaml");
        assert_eq!(config, EngineConfig::default());
    }
}
