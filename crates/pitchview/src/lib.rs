//! pitchview: a football pitch, a goal and an imported model.
//!
//! The viewer draws a grass-textured ground plane, a goal built from
//! cylinders and disks, and one OBJ model placed on the pitch. The camera
//! orbits the scene under keyboard and mouse control.
//!
//! # Quick Start
//!
//! ```no_run
//! use pitchview::*;
//!
//! fn main() -> Result<(), AppError> {
//!     init_logging();
//!     let config = SceneConfig::load_or_default(None)?;
//!     run(config)
//! }
//! ```
//!
//! Models can be swapped at runtime by dropping an `.obj` file onto the
//! window. F12 saves a screenshot to the working directory.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod app;
pub mod controls;
pub mod error;
mod headless;

pub use app::App;
pub use controls::{ControlAction, Controls};
pub use error::{AppError, AppResult};
pub use headless::{render_to_file, render_to_image};

// Re-export core types
pub use pitchview_core::{
    CameraConfig, ImportedScene, ModelConfig, PitchviewError, SceneConfig, TextureConfig,
    TextureMode, World, WorldView,
};

// Re-export render types
pub use pitchview_render::{RenderEngine, RenderError, ScreenshotError};

pub use pitchview_core::{Mat4, Vec2, Vec3, Vec4};

/// Initializes `env_logger` unless a logger is already installed.
///
/// The log level defaults to `info` and can be changed with `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Validates `config` and shows the viewer until the window is closed.
pub fn run(config: SceneConfig) -> AppResult<()> {
    config.validate()?;
    log::info!(
        "pitchview starting with model '{}'",
        config.model.model_path().display()
    );
    app::run_app(config)
}
