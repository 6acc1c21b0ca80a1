//! wgpu render backend for the colored cube.
//!
//! Draws the filled cube into the left half of the surface and the
//! point/line wireframe into the right half, both with the same matrix.
//!
//! # Invariants
//! - Vertex, index and segment buffers are uploaded once and never written again.
//! - Only the uniform buffer changes per frame.
//! - Pipeline state is fixed per pipeline; nothing carries over between frames.

mod error;
mod gpu;
mod shaders;

pub use error::RendererError;
pub use gpu::{CLEAR_COLOR, LINE_WIDTH, POINT_SIZE, WgpuRenderer, pick_surface_format};
