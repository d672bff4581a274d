//! Single-hexagon mesh construction.
//!
//! Every hex in the system is the same flat-top hexagon: six vertices in a
//! fixed order, four triangles in a fixed fan, uvs projected from the
//! horizontal plane. Only the overall scale (driven by the hex height)
//! varies. The mesh is returned by value; nothing here is cached or shared.

use bevy::prelude::{Vec2, Vec3};

use crate::math;

/// Triangle index fan shared by every hex, wound front-face up.
///
/// Clockwise when viewed from +y in Unity terms; equivalently the
/// counter-clockwise front face with a +y normal under Bevy's right-handed
/// convention. The stitcher's index arithmetic depends on this exact order.
pub const HEX_TRIANGLES: [u32; 12] = [
    2, 1, 0, //
    1, 2, 3, //
    4, 3, 2, //
    3, 4, 5,
];

/// Number of vertices in a single hex mesh.
pub const HEX_VERTS: usize = 6;

/// One flat-top hexagon in the x/z plane, y initialized to 0.
///
/// Vertex layout (x right, z up when viewed from above):
/// ```text
///      2       4
///  0               5
///      1       3
/// ```
/// Index 0 is the left pole, 5 the right pole; 1/3 the bottom pair,
/// 2/4 the top pair.
#[derive(Clone, Debug, PartialEq)]
pub struct HexMesh {
    vertices: [Vec3; HEX_VERTS],
}

impl HexMesh {
    /// Builds the hexagon for pole-to-pole height `hex_height`.
    ///
    /// Width is derived from the equilateral-triangle decomposition
    /// (`3w² = 4h²`, see [`math::hex_width`]).
    pub fn with_height(hex_height: f32) -> Self {
        let width = math::hex_width(hex_height);
        let side = width * 0.5;
        let half_side = side * 0.5;
        let half_height = hex_height * 0.5;

        Self {
            vertices: [
                Vec3::new(-side, 0.0, 0.0),
                Vec3::new(-half_side, 0.0, -half_height),
                Vec3::new(-half_side, 0.0, half_height),
                Vec3::new(half_side, 0.0, -half_height),
                Vec3::new(half_side, 0.0, half_height),
                Vec3::new(side, 0.0, 0.0),
            ],
        }
    }

    /// The six local-space vertices in fixed order.
    pub fn vertices(&self) -> &[Vec3; HEX_VERTS] {
        &self.vertices
    }

    /// Planar-projected uv for each vertex: `(x, z)`.
    pub fn uvs(&self) -> [Vec2; HEX_VERTS] {
        self.vertices.map(|v| Vec2::new(v.x, v.z))
    }

    /// Bounding-box footprint `(width, height)` in the horizontal plane.
    ///
    /// The grid layouts read spacing from here rather than re-deriving it,
    /// mirroring a renderer asking a sample mesh for its bounds.
    pub fn bounds_size(&self) -> Vec2 {
        let width = self.vertices[5].x - self.vertices[0].x;
        let height = self.vertices[2].z - self.vertices[1].z;
        Vec2::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::compute_normal;

    // ── geometry ────────────────────────────────────────────────────

    #[test]
    fn bounds_match_requested_height() {
        let mesh = HexMesh::with_height(2.0);
        let size = mesh.bounds_size();
        assert!((size.y - 2.0).abs() < 1e-6);
        // 3w² = 4h²
        assert!((3.0 * size.x * size.x - 4.0 * 2.0 * 2.0).abs() < 1e-4);
    }

    #[test]
    fn vertices_start_at_base_height() {
        let mesh = HexMesh::with_height(1.0);
        for v in mesh.vertices() {
            assert_eq!(v.y, 0.0);
        }
    }

    #[test]
    fn left_and_right_poles_are_symmetric() {
        let mesh = HexMesh::with_height(3.0);
        let verts = mesh.vertices();
        assert_eq!(verts[0].x, -verts[5].x);
        assert_eq!(verts[0].z, 0.0);
        assert_eq!(verts[5].z, 0.0);
    }

    // ── topology ────────────────────────────────────────────────────

    #[test]
    fn all_four_triangles_face_up() {
        let mesh = HexMesh::with_height(1.0);
        let verts = mesh.vertices();
        for tri in HEX_TRIANGLES.chunks(3) {
            let n = compute_normal(
                verts[tri[0] as usize],
                verts[tri[1] as usize],
                verts[tri[2] as usize],
            );
            assert!(n.y > 0.99, "triangle {tri:?} has normal {n:?}");
        }
    }

    #[test]
    fn fan_covers_all_six_vertices() {
        let mut seen = [false; HEX_VERTS];
        for &i in HEX_TRIANGLES.iter() {
            seen[i as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn uvs_are_planar_projection() {
        let mesh = HexMesh::with_height(2.5);
        let uvs = mesh.uvs();
        for (v, uv) in mesh.vertices().iter().zip(uvs.iter()) {
            assert_eq!(uv.x, v.x);
            assert_eq!(uv.y, v.z);
        }
    }
}
