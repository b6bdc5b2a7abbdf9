//! Application window and event loop management.

mod input;
mod render;

pub(super) use std::sync::Arc;

pub(super) use pollster::FutureExt;
pub(super) use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

pub(super) use pitchview_core::{SceneConfig, World};
pub(super) use pitchview_render::RenderEngine;

use crate::controls::Controls;
use crate::error::{AppError, AppResult};

/// The viewer application state.
pub struct App {
    pub(super) config: SceneConfig,
    pub(super) window: Option<Arc<Window>>,
    pub(super) engine: Option<RenderEngine>,
    pub(super) world: Option<World>,
    pub(super) controls: Controls,
    pub(super) close_requested: bool,
    // Saved after the next presented frame
    pub(super) screenshot_pending: bool,
    // First fatal error, returned from `run_app`
    pub(super) error: Option<AppError>,
}

impl App {
    /// Creates a new application for `config`. Nothing is loaded until the
    /// event loop resumes.
    pub fn new(config: SceneConfig) -> Self {
        let controls = Controls::new(config.camera);
        Self {
            config,
            window: None,
            engine: None,
            world: None,
            controls,
            close_requested: false,
            screenshot_pending: false,
            error: None,
        }
    }

    /// Creates the window, the render engine and the world, then uploads
    /// the scene.
    pub(super) fn start(&mut self, event_loop: &ActiveEventLoop) -> AppResult<()> {
        let window_config = &self.config.window;
        let window_attributes = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));

        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let mut engine = RenderEngine::new_windowed(window.clone(), &self.config).block_on()?;
        let (width, height) = engine.dimensions();

        let mut world = World::new(self.config.clone(), width, height);
        world.initialize()?;
        engine.load_textures(&self.config.textures)?;
        engine.upload_scene(&world);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
        self.world = Some(world);
        Ok(())
    }

    /// Records a fatal error and asks the loop to stop.
    pub(super) fn fail(&mut self, error: AppError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.close_requested = true;
    }

    pub(super) fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Runs the viewer until the window closes.
pub fn run_app(config: SceneConfig) -> AppResult<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);

    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
