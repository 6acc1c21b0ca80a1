use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Degrees of rotation per pixel of pointer drag.
pub const ROTATION_SENSITIVITY: f32 = 0.3;

/// Depth change per scroll tick.
pub const DOLLY_STEP: f32 = 0.1;

/// Uniform scale applied to the `[-1, 1]^3` cube.
pub const CUBE_SIZE: f32 = 0.05;

/// Scale along Z. Kept equal to [`CUBE_SIZE`], so the cube is not stretched.
pub const CUBE_STRETCH: f32 = CUBE_SIZE;

/// Where the cube sits before any scrolling.
pub const INITIAL_TRANSLATION: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Camera state driven by pointer input and consumed by the renderer.
///
/// Rotations are in degrees: `x` turns about the Y axis, `y` about the X axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Rotation committed at the last button release.
    pub rotation_accumulated: Vec2,
    /// Rotation currently displayed.
    pub rotation_pending: Vec2,
    /// Model translation; `z` is the dolly depth.
    pub translation: Vec3,
    /// Pointer position at the last press.
    pub pointer_anchor: Vec2,
    /// Whether the primary button is down.
    pub primary_held: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            rotation_accumulated: Vec2::ZERO,
            rotation_pending: Vec2::ZERO,
            translation: INITIAL_TRANSLATION,
            pointer_anchor: Vec2::ZERO,
            primary_held: false,
        }
    }
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pointer_down(&mut self, position: Vec2) {
        self.pointer_anchor = position;
        self.primary_held = true;
    }

    pub fn on_pointer_up(&mut self) {
        self.rotation_accumulated = self.rotation_pending;
        self.primary_held = false;
        tracing::debug!(
            "rotation committed: ({:.1}, {:.1})",
            self.rotation_accumulated.x,
            self.rotation_accumulated.y
        );
    }

    /// Drag-to-rotate. Ignored unless the primary button is held.
    pub fn on_pointer_move(&mut self, position: Vec2) {
        if !self.primary_held {
            return;
        }
        self.rotation_pending =
            self.rotation_accumulated + ROTATION_SENSITIVITY * (position - self.pointer_anchor);
    }

    /// One dolly step per call regardless of magnitude. Scrolling up
    /// (positive delta) decreases `z`; scrolling down increases it.
    pub fn on_scroll(&mut self, delta: f32) {
        if delta > 0.0 {
            self.translation.z -= DOLLY_STEP;
        } else if delta < 0.0 {
            self.translation.z += DOLLY_STEP;
        }
    }

    pub fn displayed_rotation(&self) -> Vec2 {
        self.rotation_pending
    }

    /// `translate(t) * rotY(rx) * rotX(ry) * scale(size, size, stretch)`.
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = self.displayed_rotation();
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_y(rotation.x.to_radians())
            * Mat4::from_rotation_x(rotation.y.to_radians())
            * Mat4::from_scale(Vec3::new(CUBE_SIZE, CUBE_SIZE, CUBE_STRETCH))
    }
}
