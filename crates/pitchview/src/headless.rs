//! Headless rendering API.
//!
//! Renders the scene described by a configuration to an image buffer or
//! file without opening a window. Useful for integration tests and batch
//! screenshots.

use std::path::Path;

use pollster::FutureExt;

use pitchview_core::{SceneConfig, World};
use pitchview_render::RenderEngine;

use crate::error::AppResult;

/// Renders one frame of the scene to a raw RGBA pixel buffer.
///
/// The model and textures named in `config` are loaded first, so missing
/// assets are reported as errors. The buffer holds `width * height * 4`
/// bytes, ordered row by row from the top-left corner.
pub fn render_to_image(config: &SceneConfig, width: u32, height: u32) -> AppResult<Vec<u8>> {
    let mut engine = RenderEngine::new_headless(width, height, config).block_on()?;

    let mut world = World::new(config.clone(), width, height);
    world.initialize()?;
    engine.load_textures(&config.textures)?;
    engine.upload_scene(&world);

    let pixels = engine.render_to_image(&world.frame())?;
    Ok(pixels)
}

/// Renders one frame of the scene and saves it as PNG or JPEG.
pub fn render_to_file(
    config: &SceneConfig,
    path: impl AsRef<Path>,
    width: u32,
    height: u32,
) -> AppResult<()> {
    let pixels = render_to_image(config, width, height)?;
    pitchview_render::save_image(path, &pixels, width, height)?;
    Ok(())
}
