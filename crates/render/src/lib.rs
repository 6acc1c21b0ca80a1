//! Rendering Adapter: renderer-agnostic frame computation.
//!
//! # Invariants
//! - Nothing is cached between frames; every frame is derived from the
//!   current camera state and window size.
//! - The renderer never mutates camera state.
//! - Both halves of the window use the same combined matrix.

mod frame;
mod renderer;

pub use frame::{FrameLayout, Projection, Viewport, frame_matrix, project_to_viewport};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "colorcube-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
