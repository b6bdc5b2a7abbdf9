//! Projection management.

use glam::Mat4;

use pitchview_core::ProjectionConfig;

/// Perspective projection tracking the viewport's aspect ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Projection {
    /// Creates a projection from configuration and an initial viewport.
    #[must_use]
    pub fn new(config: &ProjectionConfig, width: u32, height: u32) -> Self {
        let mut projection = Self {
            fov_y_degrees: config.fov_y_degrees,
            aspect_ratio: 1.0,
            near: config.near,
            far: config.far,
        };
        projection.set_viewport(width, height);
        projection
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Updates the aspect ratio from a viewport size. Zero sizes are ignored.
    #[allow(clippy::cast_precision_loss)]
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.set_aspect_ratio(width as f32 / height as f32);
    }

    /// Returns the projection matrix (right-handed, depth in `[0, 1]`).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(&ProjectionConfig::default(), 1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn test_projection_defaults() {
        let projection = Projection::new(&ProjectionConfig::default(), 800, 400);
        assert_eq!(projection.fov_y_degrees, 45.0);
        assert_eq!(projection.near, 0.5);
        assert_eq!(projection.far, 20000.0);
        assert!((projection.aspect_ratio - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_viewport_is_ignored() {
        let mut projection = Projection::new(&ProjectionConfig::default(), 640, 480);
        projection.set_viewport(0, 480);
        projection.set_viewport(640, 0);
        assert!((projection.aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_mode_perspective() {
        let projection = Projection::default();
        let proj = projection.projection_matrix();
        // Perspective matrix has non-zero w division
        assert!(proj.z_axis.w != 0.0);
    }

    #[test]
    fn test_clip_planes_map_to_unit_depth() {
        let projection = Projection::new(&ProjectionConfig::default(), 1, 1);
        let proj = projection.projection_matrix();

        let near = proj * Vec4::new(0.0, 0.0, -0.5, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);

        let far = proj * Vec4::new(0.0, 0.0, -20000.0, 1.0);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_fov_bounds_visible_height() {
        let projection = Projection::new(&ProjectionConfig::default(), 1, 1);
        let proj = projection.projection_matrix();
        let half = (22.5f32).to_radians().tan() * 10.0;
        let top = proj.project_point3(Vec3::new(0.0, half, -10.0));
        assert!((top.y - 1.0).abs() < 1e-4);
    }
}
