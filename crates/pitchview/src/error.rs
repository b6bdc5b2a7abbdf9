//! Error type for the application shell.

use thiserror::Error;

use pitchview_core::PitchviewError;
use pitchview_render::{RenderError, ScreenshotError};

/// Everything that can stop the viewer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration or scene loading failed.
    #[error(transparent)]
    Scene(#[from] PitchviewError),

    /// GPU setup or rendering failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Writing a screenshot failed.
    #[error("screenshot error: {0}")]
    Screenshot(#[from] ScreenshotError),

    /// The window could not be created.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// The event loop could not be created or exited abnormally.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Result alias for application operations.
pub type AppResult<T> = std::result::Result<T, AppError>;
