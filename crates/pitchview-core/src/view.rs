//! Camera parameters of the world view.

use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Wraps an angle in degrees into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Rotation, distance and viewport size driving the world transform.
///
/// The camera sits at the origin looking down -Z with +Y up; the scene is
/// pushed `scene_distance` units away and rotated about X, then Y.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldView {
    rotation_x: f32,
    rotation_y: f32,
    scene_distance: f32,
    width: u32,
    height: u32,
    min_distance: f32,
    max_distance: f32,
}

impl WorldView {
    /// Creates a view with default camera settings.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(&CameraConfig::default(), width, height)
    }

    /// Creates a view from camera configuration.
    #[must_use]
    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut view = Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            scene_distance: config.initial_distance,
            width,
            height,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
        };
        view.set_scene_distance(config.initial_distance);
        view
    }

    /// Rotation of the world about the X axis, in degrees.
    #[must_use]
    pub fn rotation_x(&self) -> f32 {
        self.rotation_x
    }

    /// Sets the X rotation; the value is wrapped into `[0, 360)`.
    pub fn set_rotation_x(&mut self, degrees: f32) {
        self.rotation_x = wrap_degrees(degrees);
    }

    /// Rotation of the world about the Y axis, in degrees.
    #[must_use]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Sets the Y rotation; the value is wrapped into `[0, 360)`.
    pub fn set_rotation_y(&mut self, degrees: f32) {
        self.rotation_y = wrap_degrees(degrees);
    }

    /// Distance from the camera to the scene origin.
    #[must_use]
    pub fn scene_distance(&self) -> f32 {
        self.scene_distance
    }

    /// Sets the scene distance, clamped to the configured bounds.
    pub fn set_scene_distance(&mut self, distance: f32) {
        self.scene_distance = distance.clamp(self.min_distance, self.max_distance);
    }

    /// Viewport width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Viewport height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Updates the viewport size.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Width over height; a zero height counts as one pixel.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Returns the allowed distance range.
    #[must_use]
    pub fn distance_bounds(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    /// Returns the world-to-eye transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.scene_distance))
            * Mat4::from_rotation_x(self.rotation_x.to_radians())
            * Mat4::from_rotation_y(self.rotation_y.to_radians())
    }
}

impl Default for WorldView {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}
