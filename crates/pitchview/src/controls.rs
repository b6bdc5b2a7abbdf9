//! Keyboard and mouse bindings for the world view.
//!
//! | input                    | effect                              |
//! |--------------------------|-------------------------------------|
//! | W / S                    | rotate about X by -step / +step     |
//! | A / D                    | rotate about Y by -step / +step     |
//! | `+` / numpad `+`         | move closer                         |
//! | `-` / numpad `-`         | move away                           |
//! | left drag                | rotate                              |
//! | wheel                    | change distance                     |
//! | F12                      | screenshot                          |
//! | Escape / F10             | quit                                |

use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use pitchview_core::{CameraConfig, WorldView};

/// Pixel scroll deltas are scaled down to roughly one line per 10 pixels.
const PIXEL_SCROLL_SCALE: f32 = 0.1;

/// What the shell should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Nothing changed.
    None,
    /// The view changed; draw a new frame.
    Redraw,
    /// Close the window.
    Exit,
    /// Save the next frame to a file.
    Screenshot,
}

/// Translates input events into [`WorldView`] changes.
#[derive(Debug, Clone)]
pub struct Controls {
    config: CameraConfig,
    dragging: bool,
    cursor: Option<(f64, f64)>,
}

impl Controls {
    #[must_use]
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            dragging: false,
            cursor: None,
        }
    }

    /// Handles a key press.
    pub fn key_pressed(&self, key: KeyCode, view: &mut WorldView) -> ControlAction {
        let rotation = self.config.rotation_step;
        let distance = self.config.distance_step;
        match key {
            KeyCode::KeyW => view.set_rotation_x(view.rotation_x() - rotation),
            KeyCode::KeyS => view.set_rotation_x(view.rotation_x() + rotation),
            KeyCode::KeyA => view.set_rotation_y(view.rotation_y() - rotation),
            KeyCode::KeyD => view.set_rotation_y(view.rotation_y() + rotation),
            KeyCode::Equal | KeyCode::NumpadAdd => {
                view.set_scene_distance(view.scene_distance() - distance);
            }
            KeyCode::Minus | KeyCode::NumpadSubtract => {
                view.set_scene_distance(view.scene_distance() + distance);
            }
            KeyCode::F12 => return ControlAction::Screenshot,
            KeyCode::Escape | KeyCode::F10 => return ControlAction::Exit,
            _ => return ControlAction::None,
        }
        ControlAction::Redraw
    }

    /// Tracks the left button for drag rotation.
    pub fn mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
        }
    }

    /// Rotates the view while the left button is held.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cursor_moved(&mut self, x: f64, y: f64, view: &mut WorldView) -> ControlAction {
        let previous = self.cursor.replace((x, y));
        let Some((last_x, last_y)) = previous else {
            return ControlAction::None;
        };
        if !self.dragging {
            return ControlAction::None;
        }

        let dx = (x - last_x) as f32;
        let dy = (y - last_y) as f32;
        if dx == 0.0 && dy == 0.0 {
            return ControlAction::None;
        }
        let sensitivity = self.config.mouse_sensitivity;
        view.set_rotation_y(view.rotation_y() + dx * sensitivity);
        view.set_rotation_x(view.rotation_x() + dy * sensitivity);
        ControlAction::Redraw
    }

    /// Moves closer on scroll up, away on scroll down.
    #[allow(clippy::cast_possible_truncation)]
    pub fn scroll(&self, delta: MouseScrollDelta, view: &mut WorldView) -> ControlAction {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * PIXEL_SCROLL_SCALE,
        };
        if lines == 0.0 {
            return ControlAction::None;
        }
        view.set_scene_distance(view.scene_distance() - lines * self.config.distance_step);
        ControlAction::Redraw
    }

    /// Whether the left button is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}
