//! Headless rendering integration tests.
//!
//! These render the shipped assets without a window. They require a GPU
//! adapter (real or software fallback); without one the tests print a
//! notice and return.

use std::path::PathBuf;

use pitchview::*;

fn assets() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

fn shipped_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.textures.grass.path = assets().join("images/grass.ppm");
    config.textures.plastic.path = assets().join("images/plastic.ppm");
    config.model.directory = assets().join("models");
    config
}

/// Helper: check that a pixel buffer is not all-black and not uniform.
fn has_nontrivial_content(pixels: &[u8], width: u32, height: u32) -> bool {
    let total = (width * height) as usize;
    assert_eq!(pixels.len(), total * 4, "pixel buffer size mismatch");

    let all_black = pixels.chunks(4).all(|px| px[0] == 0 && px[1] == 0 && px[2] == 0);

    let first = &pixels[0..4];
    let all_uniform = pixels.chunks(4).all(|px| px == first);

    !all_black && !all_uniform
}

#[test]
fn headless_render_shipped_scene() {
    let config = shipped_config();
    let pixels = match render_to_image(&config, 320, 240) {
        Ok(pixels) => pixels,
        Err(AppError::Render(e)) => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
            return;
        }
        Err(e) => panic!("headless render failed: {e}"),
    };

    assert!(
        has_nontrivial_content(&pixels, 320, 240),
        "pitch, goal and model should produce non-trivial output"
    );

    // From the default view the goal tops out well below the upper edge.
    let row = |y: u32| &pixels[(y * 320 * 4) as usize..((y + 1) * 320 * 4) as usize];
    let top_lit = row(0).chunks(4).filter(|px| px[..3] != [0, 0, 0]).count();
    assert_eq!(top_lit, 0, "nothing reaches the top row from the default view");
}

#[test]
fn headless_render_missing_model_is_an_error() {
    let mut config = shipped_config();
    config.model.file_name = "does_not_exist.obj".to_string();

    match render_to_image(&config, 64, 64) {
        Err(AppError::Render(e)) => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
        }
        Err(AppError::Scene(PitchviewError::ModelLoad { path, .. })) => {
            assert!(path.ends_with("does_not_exist.obj"));
        }
        other => panic!("expected a model load error, got {other:?}"),
    }
}

#[test]
fn headless_render_to_file_writes_png() {
    let config = shipped_config();
    let path = std::env::temp_dir().join(format!("pitchview_headless_{}.png", std::process::id()));

    match render_to_file(&config, &path, 96, 64) {
        Ok(()) => {}
        Err(AppError::Render(e)) => {
            eprintln!("Skipping headless test: no GPU adapter available ({e})");
            return;
        }
        Err(e) => panic!("headless render failed: {e}"),
    }

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let _ = std::fs::remove_file(&path);
}
