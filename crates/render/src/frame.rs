use colorcube_camera::CameraState;
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A pixel rectangle inside the window, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The window split into two equal side-by-side halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLayout {
    pub left: Viewport,
    pub right: Viewport,
}

impl FrameLayout {
    pub fn from_size(width: u32, height: u32) -> Self {
        let half = width / 2;
        Self {
            left: Viewport {
                x: 0,
                y: 0,
                width: half,
                height,
            },
            right: Viewport {
                x: half,
                y: 0,
                width: half,
                height,
            },
        }
    }

    /// Half-width over height. A zero height is treated as one pixel.
    pub fn aspect(&self) -> f32 {
        self.left.width as f32 / self.left.height.max(1) as f32
    }

    /// False for minimized or sliver windows where a half is empty.
    pub fn is_drawable(&self) -> bool {
        self.left.width > 0 && self.left.height > 0
    }
}

/// Perspective parameters. Field of view is vertical, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 30.0,
            near: 0.01,
            far: 500.0,
        }
    }
}

impl Projection {
    /// Right-handed, depth mapped to `[0, 1]`.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }
}

/// `projection * model` for the current camera and window.
pub fn frame_matrix(camera: &CameraState, layout: &FrameLayout) -> Mat4 {
    Projection::default().matrix(layout.aspect()) * camera.model_matrix()
}

/// Model-space point to window pixels inside `viewport`.
///
/// Returns `None` when the point is at or behind the eye.
pub fn project_to_viewport(matrix: &Mat4, point: Vec3, viewport: &Viewport) -> Option<Vec2> {
    let clip = *matrix * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let x = viewport.x as f32 + (ndc.x + 1.0) * 0.5 * viewport.width as f32;
    let y = viewport.y as f32 + (1.0 - ndc.y) * 0.5 * viewport.height as f32;
    Some(Vec2::new(x, y))
}
