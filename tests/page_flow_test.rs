//! Coloring page flows: fills, walls, undo/redo and strokes.

mod common;

use common::fixtures::{self, colors, square};
use image::{Rgba, RgbaImage};
use inkfill::error::FillError;
use inkfill::models::{EngineConfig, StrokePoint, ViewTransform};
use inkfill::services::{ColoringPage, Direction, EditKind, PageOptions};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn square_page() -> ColoringPage {
    ColoringPage::new(fixtures::centered_square(), PageOptions::default()).unwrap()
}

#[test]
fn test_fill_inside_square_fills_exactly_the_interior() {
    let mut page = square_page();
    let before = page.color_layer().clone();

    let diff = page.fill(16, 16, colors::RED).unwrap();
    assert_eq!(diff.len(), square::INTERIOR);

    for (x, y, p) in page.color_layer().enumerate_pixels() {
        let expected = if fixtures::inside_square(x, y, square::LO, square::HI) {
            colors::RED
        } else {
            *before.get_pixel(x, y)
        };
        assert_eq!(*p, expected, "pixel ({x}, {y})");
    }
}

#[test]
fn test_fill_on_outline_is_boundary_hit() {
    let mut page = square_page();
    let before = page.color_layer().clone();

    assert_eq!(
        page.fill(8, 8, colors::BLUE).unwrap_err(),
        FillError::BoundaryHit { x: 8, y: 8 }
    );
    common::assert_layers_identical(page.color_layer(), &before);
    assert!(!page.history().can_undo());
}

#[test]
fn test_fill_outside_never_enters_square() {
    let mut page = square_page();
    let before = page.color_layer().clone();

    page.fill(0, 0, colors::GREEN).unwrap();
    common::assert_changes_within(&before, page.color_layer(), |x, y| {
        !fixtures::inside_square(x, y, square::LO, square::HI)
            && !fixtures::on_square(x, y, square::LO, square::HI)
    });
    assert_eq!(*page.color_layer().get_pixel(16, 16), colors::CLEAR);
}

#[test]
fn test_silent_errors_do_not_touch_history() {
    let mut page = square_page();
    page.fill(16, 16, colors::RED).unwrap();

    let err = page.fill(17, 17, colors::RED).unwrap_err();
    assert!(matches!(err, FillError::NoOpFill { .. }));
    assert!(err.is_silent());

    let err = page.fill(32, 0, colors::RED).unwrap_err();
    assert!(matches!(err, FillError::OutOfBounds { .. }));

    assert_eq!(page.history().undo_depth(), 1);
}

#[test]
fn test_undo_restores_exact_bytes_for_random_fills() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outline = RgbaImage::from_fn(48, 40, |_, _| {
            if rng.gen_bool(0.3) {
                colors::BLACK
            } else {
                colors::WHITE
            }
        });
        let mut page = ColoringPage::new(outline, PageOptions::default()).unwrap();

        let mut snapshots = Vec::new();
        for _ in 0..5 {
            let before = page.color_layer().clone();
            let x = rng.gen_range(0..48);
            let y = rng.gen_range(0..40);
            let color = colors::PALETTE[rng.gen_range(0..colors::PALETTE.len())];
            if page.fill(x, y, color).is_ok() {
                snapshots.push(before);
            }
        }

        while let Some(expected) = snapshots.pop() {
            let applied = page.undo().expect("recorded fill can be undone");
            assert_eq!(applied.direction, Direction::Undo);
            common::assert_layers_identical(page.color_layer(), &expected);
        }
        assert_eq!(page.undo(), None, "seed {seed}");
    }
}

#[test]
fn test_history_is_capped_and_evicts_oldest() {
    let outline = RgbaImage::from_fn(8, 1, |x, _| {
        if x % 2 == 1 {
            colors::BLACK
        } else {
            colors::WHITE
        }
    });
    let mut page = ColoringPage::new(outline, PageOptions::default()).unwrap();

    // Seven single-pixel fills in the four open cells (x = 0, 2, 4, 6)
    let mut states = vec![page.color_layer().clone()];
    for i in 0..7usize {
        let x = (i as u32 % 4) * 2;
        // Shift the color on each pass so a cell never gets its own color
        let color = colors::PALETTE[(i + i / 4) % colors::PALETTE.len()];
        page.fill(x, 0, color).unwrap();
        assert!(page.history().undo_depth() <= 5);
        states.push(page.color_layer().clone());
    }

    let mut undone = 0;
    while page.undo().is_some() {
        undone += 1;
    }
    assert_eq!(undone, 5);
    // The two oldest fills were evicted and remain applied
    common::assert_layers_identical(page.color_layer(), &states[2]);
}

#[test]
fn test_redo_cleared_only_by_new_edits() {
    let mut page = square_page();
    page.fill(16, 16, colors::RED).unwrap();
    page.fill(0, 0, colors::BLUE).unwrap();

    page.undo().unwrap();
    page.undo().unwrap();
    assert_eq!(page.history().redo_depth(), 2);

    let applied = page.redo().unwrap();
    assert_eq!(applied.direction, Direction::Redo);
    assert_eq!(
        applied.kind,
        EditKind::Fill {
            seed: (16, 16),
            pixels: square::INTERIOR
        }
    );
    assert_eq!(page.history().redo_depth(), 1);

    page.begin_stroke(StrokePoint::new(2.0, 2.0), colors::GREEN, 2.0);
    page.end_stroke();
    assert_eq!(page.history().redo_depth(), 0);
    assert_eq!(page.redo(), None);
}

#[test]
fn test_strokes_and_fills_share_history() {
    let mut page = square_page();
    page.fill(16, 16, colors::RED).unwrap();
    page.begin_stroke(StrokePoint::new(1.0, 1.0), colors::BLUE, 2.0);
    page.extend_stroke(StrokePoint::new(30.0, 1.0));
    page.end_stroke();
    page.clear_strokes();

    assert_eq!(
        page.history().undo_kinds().last(),
        Some(&EditKind::ClearStrokes)
    );

    assert_eq!(page.undo().unwrap().kind, EditKind::ClearStrokes);
    assert_eq!(page.strokes().len(), 1);
    assert_eq!(page.undo().unwrap().kind, EditKind::DrawStroke);
    assert!(page.strokes().is_empty());
    assert!(matches!(page.undo().unwrap().kind, EditKind::Fill { .. }));
    assert_eq!(*page.color_layer().get_pixel(16, 16), colors::CLEAR);
}

#[test]
fn test_rendered_page_keeps_lines_black() {
    let mut page = square_page();
    page.fill(0, 0, colors::BLUE).unwrap();
    page.fill(16, 16, colors::RED).unwrap();

    let rendered = page.render().unwrap();
    assert_eq!(*rendered.get_pixel(8, 16), colors::BLACK);
    assert_eq!(*rendered.get_pixel(16, 16), colors::RED);
    assert_eq!(*rendered.get_pixel(2, 2), colors::BLUE);

    common::assert_png(&page.render_png().unwrap());
}

#[test]
fn test_tap_through_view_transform() {
    let mut page = square_page();
    // 32x32 page shown at 4x in a 128x200 view: letterboxed vertically
    let view = ViewTransform::fit(32, 32, 128.0, 200.0);
    let (x, y) = view.to_image(64.0, 100.0).unwrap();
    assert_eq!((x, y), (16, 16));
    page.fill(x, y, colors::RED).unwrap();

    assert_eq!(view.to_image(64.0, 10.0), None);
}

#[test]
fn test_config_drives_page_options() {
    let config = EngineConfig::from_yaml_str(
        r#"
fill:
  wall_threshold: 200
history:
  depth: 1
canvas:
  color_layer: white
"#,
    )
    .unwrap();
    // Mid-gray outline: a wall only under the raised threshold
    let outline = RgbaImage::from_fn(5, 1, |x, _| {
        if x == 2 {
            Rgba([150, 150, 150, 255])
        } else {
            colors::WHITE
        }
    });
    let mut page = ColoringPage::new(outline.clone(), config.page_options()).unwrap();
    assert_eq!(*page.color_layer().get_pixel(0, 0), colors::WHITE);

    assert_eq!(page.fill(0, 0, colors::RED).unwrap().len(), 2);
    page.fill(3, 0, colors::BLUE).unwrap();
    assert_eq!(page.history().undo_depth(), 1);

    let mut default_page = ColoringPage::new(outline, PageOptions::default()).unwrap();
    assert_eq!(default_page.fill(0, 0, colors::RED).unwrap().len(), 5);
}
