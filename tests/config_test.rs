//! Loading engine configuration from disk.

mod common;

use inkfill::models::{ColorLayerMode, EngineConfig};
use inkfill::services::IngestService;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
fill:
  wall_threshold: 64
canvas:
  max_dimension: 1024
  color_layer: white
preprocess:
  working_size: 512
  strength: 70
"#
    )
    .unwrap();

    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.fill.wall_threshold, 64);
    assert_eq!(config.canvas.max_dimension, 1024);
    assert_eq!(config.canvas.color_layer, ColorLayerMode::White);

    let options = config.line_art_options();
    assert_eq!(options.working_size, 512);
    assert_eq!(options.strength, 70);
    assert_eq!(options.dark_cutoff, 80);
}

#[test]
fn test_load_or_default_on_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inkfill.yaml");
    std::fs::write(&path, "history: [not, a, map").unwrap();

    assert!(EngineConfig::load(&path).is_err());
    assert_eq!(EngineConfig::load_or_default(&path), EngineConfig::default());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().starts_with("IO error"));
}

#[tokio::test]
async fn test_service_uses_configured_working_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inkfill.yaml");
    std::fs::write(&path, "preprocess:\n  working_size: 20\n").unwrap();

    let service = IngestService::new(&EngineConfig::load_or_default(&path));
    let photo = common::fixtures::png(&image::RgbaImage::from_pixel(
        40,
        10,
        common::fixtures::colors::WHITE,
    ));
    let outline = service.preprocess_in_background(photo, 50).await.unwrap();
    let outline = inkfill::rendering::decode_rgba(&outline).unwrap();
    assert_eq!(outline.dimensions(), (20, 5));
}
