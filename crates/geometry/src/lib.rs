//! Geometry Store: the fixed colored cube.
//!
//! # Invariants
//! - Vertex and face data are compile-time constants and never mutate.
//! - Every face index is in `0..VERTEX_COUNT`.

pub mod cube;

pub use cube::{
    CUBE_FACES, CUBE_VERTICES, FACE_COUNT, Face, Segment, VERTEX_COUNT, Vertex, edge_segments,
    triangle_indices,
};
