use super::{ActiveEventLoop, App, ApplicationHandler, WindowEvent, WindowId};
use crate::controls::ControlAction;

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let action = match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
                ControlAction::None
            }
            WindowEvent::Resized(size) => {
                if let Some(world) = &mut self.world {
                    world.resize(size.width, size.height);
                }
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
                ControlAction::Redraw
            }
            WindowEvent::RedrawRequested => {
                self.render();
                ControlAction::None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                match (event.physical_key, self.world.as_mut()) {
                    (winit::keyboard::PhysicalKey::Code(code), Some(world))
                        if event.state.is_pressed() =>
                    {
                        self.controls.key_pressed(code, world.view_mut())
                    }
                    _ => ControlAction::None,
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.controls.mouse_input(button, state);
                ControlAction::None
            }
            WindowEvent::CursorMoved { position, .. } => match self.world.as_mut() {
                Some(world) => self
                    .controls
                    .cursor_moved(position.x, position.y, world.view_mut()),
                None => ControlAction::None,
            },
            WindowEvent::MouseWheel { delta, .. } => match self.world.as_mut() {
                Some(world) => self.controls.scroll(delta, world.view_mut()),
                None => ControlAction::None,
            },
            WindowEvent::DroppedFile(path) => {
                log::info!("File dropped: {}", path.display());
                self.reload_model(&path);
                ControlAction::Redraw
            }
            _ => ControlAction::None,
        };

        match action {
            ControlAction::None => {}
            ControlAction::Redraw => self.request_redraw(),
            ControlAction::Exit => self.close_requested = true,
            ControlAction::Screenshot => {
                self.screenshot_pending = true;
                log::info!("Screenshot requested (F12)");
                self.request_redraw();
            }
        }

        if self.close_requested {
            event_loop.exit();
        }
    }
}
