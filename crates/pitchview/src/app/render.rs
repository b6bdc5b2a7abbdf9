use std::path::{Path, PathBuf};

use pitchview_core::Frame;
use pitchview_render::{save_image, RenderEngine, RenderError};

use super::App;
use crate::error::AppResult;

impl App {
    /// Renders a single frame and, if requested, saves it.
    pub(super) fn render(&mut self) {
        let (Some(engine), Some(world)) = (&mut self.engine, &self.world) else {
            return;
        };

        let frame = world.frame();
        match engine.render(&frame) {
            Ok(()) => {}
            Err(e @ RenderError::OutOfMemory) => {
                self.fail(e.into());
                return;
            }
            Err(e) => log::warn!("frame skipped: {e}"),
        }

        if self.screenshot_pending {
            self.screenshot_pending = false;
            let filename = screenshot_filename();
            if let Err(e) = capture_screenshot(engine, &frame, &filename) {
                log::error!("Failed to save screenshot '{}': {e}", filename.display());
            }
        }
    }

    /// Replaces the imported model with the file at `path`. On failure the
    /// current model stays.
    pub(super) fn reload_model(&mut self, path: &Path) {
        let (Some(engine), Some(world)) = (&mut self.engine, &mut self.world) else {
            return;
        };
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Ignoring dropped path without a file name: {}", path.display());
            return;
        };
        let directory = path.parent().unwrap_or(Path::new("."));

        match world.reload_model(directory, file_name) {
            Ok(()) => {
                engine.upload_model(world.scene());
                log::info!("Loaded model '{}'", path.display());
            }
            Err(e) => log::error!("Failed to load dropped model: {e}"),
        }
    }
}

/// Renders `frame` offscreen at the engine's size and writes it to `path`.
fn capture_screenshot(engine: &mut RenderEngine, frame: &Frame, path: &Path) -> AppResult<()> {
    let pixels = engine.render_to_image(frame)?;
    let (width, height) = engine.dimensions();
    save_image(path, &pixels, width, height)?;
    Ok(())
}

fn screenshot_filename() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("pitchview_{timestamp}.png"))
}
