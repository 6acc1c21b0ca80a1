use crate::frame::{FrameLayout, frame_matrix, project_to_viewport};
use colorcube_camera::CameraState;
use colorcube_geometry::CUBE_VERTICES;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the camera state and the window layout, then produces
/// output. It never mutates the camera; input handlers own that.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given camera and layout.
    fn render(&self, camera: &CameraState, layout: &FrameLayout) -> Self::Output;
}

/// Text renderer for headless inspection.
///
/// Prints the layout, camera state, combined matrix and where each cube
/// corner lands in both halves.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, camera: &CameraState, layout: &FrameLayout) -> String {
        let mut out = String::new();
        let l = layout.left;
        let r = layout.right;
        out.push_str(&format!(
            "=== Frame (left={}x{}@{}, right={}x{}@{}, aspect={:.3}) ===\n",
            l.width,
            l.height,
            l.x,
            r.width,
            r.height,
            r.x,
            layout.aspect()
        ));
        let rot = camera.displayed_rotation();
        let t = camera.translation;
        out.push_str(&format!(
            "Camera: rotation=({:.2}, {:.2}) committed=({:.2}, {:.2}) translation=({:.2}, {:.2}, {:.2})\n",
            rot.x,
            rot.y,
            camera.rotation_accumulated.x,
            camera.rotation_accumulated.y,
            t.x,
            t.y,
            t.z
        ));

        if !layout.is_drawable() {
            out.push_str("Viewport empty, nothing drawn\n");
            return out;
        }

        let m = frame_matrix(camera, layout);
        out.push_str("Matrix:\n");
        for row in 0..4 {
            let values = m.row(row);
            out.push_str(&format!(
                "  [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]\n",
                values.x, values.y, values.z, values.w
            ));
        }

        out.push_str("Vertices:\n");
        for (i, v) in CUBE_VERTICES.iter().enumerate() {
            let fill = project_to_viewport(&m, v.position(), &layout.left);
            let wire = project_to_viewport(&m, v.position(), &layout.right);
            match (fill, wire) {
                (Some(a), Some(b)) => {
                    out.push_str(&format!(
                        "  [{i}] fill=({:.1}, {:.1}) wire=({:.1}, {:.1})\n",
                        a.x, a.y, b.x, b.y
                    ));
                }
                _ => {
                    out.push_str(&format!("  [{i}] behind eye\n"));
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn debug_renderer_default_frame() {
        let renderer = DebugTextRenderer::new();
        let output = renderer.render(&CameraState::new(), &FrameLayout::from_size(600, 600));

        assert!(output.contains("left=300x600@0"));
        assert!(output.contains("right=300x600@300"));
        assert!(output.contains("aspect=0.500"));
        assert!(output.contains("translation=(0.00, 0.00, -1.00)"));
        assert_eq!(output.matches("fill=").count(), 8);
    }

    #[test]
    fn debug_renderer_reports_drag() {
        let mut camera = CameraState::new();
        camera.on_pointer_down(Vec2::new(100.0, 100.0));
        camera.on_pointer_move(Vec2::new(110.0, 100.0));

        let output = DebugTextRenderer::new().render(&camera, &FrameLayout::from_size(600, 600));
        assert!(output.contains("rotation=(3.00, 0.00) committed=(0.00, 0.00)"));
    }

    #[test]
    fn debug_renderer_writes_one_line_per_row() {
        let output =
            DebugTextRenderer::new().render(&CameraState::new(), &FrameLayout::from_size(600, 600));
        let lines: Vec<&str> = output.lines().collect();

        // header, camera, "Matrix:", 4 rows, "Vertices:", 8 corners
        assert_eq!(lines.len(), 16);
        assert!(output.ends_with('\n'));
        assert_eq!(lines[2], "Matrix:");
        assert!(lines[3..7].iter().all(|l| l.starts_with("  [") && l.ends_with(']')));
        assert_eq!(lines[7], "Vertices:");
    }

    #[test]
    fn debug_renderer_skips_empty_viewport() {
        let output =
            DebugTextRenderer::new().render(&CameraState::new(), &FrameLayout::from_size(0, 0));
        assert!(output.contains("nothing drawn"));
        assert!(!output.contains("Matrix"));
    }
}
