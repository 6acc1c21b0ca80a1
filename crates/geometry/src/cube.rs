use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Number of cube corners.
pub const VERTEX_COUNT: usize = 8;

/// Number of quad faces.
pub const FACE_COUNT: usize = 6;

/// A cube corner: position in model space and a fixed color.
///
/// Laid out `#[repr(C)]` so the constant table uploads to the GPU as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub point: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.point)
    }
}

/// A quad face as four indices into [`CUBE_VERTICES`], in loop order.
pub type Face = [u16; 4];

const L: f32 = -1.0;
const R: f32 = 1.0;
const B: f32 = -1.0;
const T: f32 = 1.0;
const N: f32 = -1.0;
const F: f32 = 1.0;

/// The eight corners of the `[-1, 1]^3` cube.
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; VERTEX_COUNT] = [
    Vertex { point: [L, B, N], color: [0.0, 0.0, 1.0] }, // blue
    Vertex { point: [L, B, F], color: [0.0, 1.0, 0.0] }, // green
    Vertex { point: [L, T, N], color: [0.0, 1.0, 1.0] }, // cyan
    Vertex { point: [L, T, F], color: [1.0, 0.0, 0.0] }, // red
    Vertex { point: [R, B, N], color: [1.0, 0.0, 1.0] }, // magenta
    Vertex { point: [R, B, F], color: [1.0, 1.0, 0.0] }, // yellow
    Vertex { point: [R, T, N], color: [0.0, 0.0, 0.0] }, // black
    Vertex { point: [R, T, F], color: [1.0, 1.0, 1.0] }, // white
];

/// The six faces closing the cube.
#[rustfmt::skip]
pub const CUBE_FACES: [Face; FACE_COUNT] = [
    [1, 3, 2, 0], // -X
    [6, 7, 5, 4], // +X
    [4, 5, 1, 0], // -Y
    [3, 7, 6, 2], // +Y
    [2, 6, 4, 0], // -Z
    [5, 7, 3, 1], // +Z
];

/// Triangle-list indices for the filled cube.
///
/// Each quad `{a, b, c, d}` becomes `(a, b, c)` and `(a, c, d)`, which keeps
/// the per-vertex colors of the quad corners.
pub fn triangle_indices() -> Vec<u16> {
    CUBE_FACES
        .iter()
        .flat_map(|&[a, b, c, d]| [a, b, c, a, c, d])
        .collect()
}

/// One line segment of the wireframe, endpoints carried by value.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Segment {
    pub start: Vertex,
    pub end: Vertex,
}

/// Closed line loops of every face, as individual segments.
///
/// Edges shared by two faces are emitted once per face, the same as drawing
/// one line loop per face.
pub fn edge_segments() -> Vec<Segment> {
    let mut segments = Vec::with_capacity(FACE_COUNT * 4);
    for face in &CUBE_FACES {
        for i in 0..face.len() {
            let a = face[i] as usize;
            let b = face[(i + 1) % face.len()] as usize;
            segments.push(Segment {
                start: CUBE_VERTICES[a],
                end: CUBE_VERTICES[b],
            });
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn face_indices_in_range() {
        for face in &CUBE_FACES {
            for &i in face {
                assert!((i as usize) < VERTEX_COUNT);
            }
        }
    }

    #[test]
    fn every_face_is_planar_on_one_axis() {
        for face in &CUBE_FACES {
            let points: Vec<Vec3> = face
                .iter()
                .map(|&i| CUBE_VERTICES[i as usize].position())
                .collect();
            let shared_axis = (0..3).any(|axis| {
                let v = points[0][axis];
                points.iter().all(|p| p[axis] == v)
            });
            assert!(shared_axis, "face {face:?} is not axis-aligned");
        }
    }

    #[test]
    fn faces_cover_each_side_once() {
        let mut sides = BTreeSet::new();
        for face in &CUBE_FACES {
            let centroid: Vec3 = face
                .iter()
                .map(|&i| CUBE_VERTICES[i as usize].position())
                .sum::<Vec3>()
                / 4.0;
            sides.insert((
                centroid.x as i32,
                centroid.y as i32,
                centroid.z as i32,
            ));
        }
        assert_eq!(sides.len(), FACE_COUNT);
    }

    #[test]
    fn vertex_colors_are_distinct() {
        let colors: BTreeSet<[u8; 3]> = CUBE_VERTICES
            .iter()
            .map(|v| v.color.map(|c| c as u8))
            .collect();
        assert_eq!(colors.len(), VERTEX_COUNT);
    }

    #[test]
    fn quads_split_into_two_triangles() {
        let indices = triangle_indices();
        assert_eq!(indices.len(), FACE_COUNT * 6);
        assert_eq!(&indices[..6], &[1, 3, 2, 1, 2, 0]);
    }

    #[test]
    fn line_loops_close_each_face() {
        let segments = edge_segments();
        assert_eq!(segments.len(), FACE_COUNT * 4);

        // Last segment of the first face returns to its first corner.
        assert_eq!(segments[3].start, CUBE_VERTICES[0]);
        assert_eq!(segments[3].end, CUBE_VERTICES[1]);

        // Every segment is a cube edge: endpoints differ on exactly one axis.
        for s in &segments {
            let d = s.end.position() - s.start.position();
            let changed = d.to_array().iter().filter(|c| **c != 0.0).count();
            assert_eq!(changed, 1);
        }
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(std::mem::size_of::<Segment>(), 48);
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&CUBE_VERTICES).len(), 192);
    }
}
