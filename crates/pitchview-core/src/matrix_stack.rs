//! A fixed-function style transform stack.
//!
//! Every operation post-multiplies the top matrix, so transforms apply to
//! geometry in the reverse of the order they were issued.

use glam::{Mat4, Vec3};

/// Stack of model transforms with push/pop semantics.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
}

impl MatrixStack {
    /// Creates a stack holding the identity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_top(Mat4::IDENTITY)
    }

    /// Creates a stack whose base entry is `top`.
    #[must_use]
    pub fn with_top(top: Mat4) -> Self {
        Self { stack: vec![top] }
    }

    /// Current transform.
    #[must_use]
    pub fn top(&self) -> Mat4 {
        // The base entry is never removed.
        self.stack.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    /// Number of entries, including the base.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Duplicates the current transform.
    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
    }

    /// Restores the transform saved by the matching [`push`](Self::push).
    ///
    /// Popping the base entry is ignored.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::warn!("matrix stack underflow ignored");
        }
    }

    /// Replaces the current transform with the identity.
    pub fn load_identity(&mut self) {
        self.set_top(Mat4::IDENTITY);
    }

    /// Multiplies the current transform by `matrix`.
    pub fn mult(&mut self, matrix: Mat4) {
        let top = self.top() * matrix;
        self.set_top(top);
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.mult(Mat4::from_translation(offset));
    }

    /// Rotates by `degrees` about `axis`. A zero axis leaves the transform unchanged.
    pub fn rotate(&mut self, degrees: f32, axis: Vec3) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        self.mult(Mat4::from_axis_angle(axis, degrees.to_radians()));
    }

    /// Rotates about X, then Y, then Z (angles in degrees).
    pub fn rotate_xyz(&mut self, x_degrees: f32, y_degrees: f32, z_degrees: f32) {
        self.rotate(x_degrees, Vec3::X);
        self.rotate(y_degrees, Vec3::Y);
        self.rotate(z_degrees, Vec3::Z);
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.mult(Mat4::from_scale(factors));
    }

    fn set_top(&mut self, matrix: Mat4) {
        if let Some(top) = self.stack.last_mut() {
            *top = matrix;
        }
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
