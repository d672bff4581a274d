//! Mesh stitching: merging per-hex meshes into one seamless terrain mesh.
//!
//! Two combiners exist. [`stitch_circle`] is the seam-welding path for
//! circular grids: it closes the vertical gaps between neighboring hex tops
//! with bridge quads and walls off grid boundaries with skirt geometry down
//! to the base plane, so the result reads as one continuous solid.
//! [`combine`] is the naive translate-and-concatenate path used by
//! rectangular grids, with no seam closing.
//!
//! Vertices are never shared across hexes; every hex contributes its own
//! six vertices, and inter-hex triangles index into both hexes' ranges.

use bevy::log::{info, warn};
use bevy::platform::collections::HashMap;
use bevy::prelude::{Vec2, Vec3};
use core::hash::Hash;

use crate::grid::HexGrid;
use crate::hex_mesh::{HEX_TRIANGLES, HEX_VERTS};
use crate::layout::{CubeCoord, circle_coords};
use crate::math;

/// Final combined mesh buffers, built once per stitch call.
#[derive(Clone, Debug, Default)]
pub struct CombinedMesh {
    /// World-space vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangle indices, in triples.
    pub indices: Vec<u32>,
    /// Planar-projected uvs, one per vertex.
    pub uvs: Vec<Vec2>,
}

impl CombinedMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Smooth per-vertex normals derived from the final geometry.
    ///
    /// Face normals are accumulated onto each referenced vertex and
    /// normalized; vertices with no facing (or fully cancelling faces)
    /// fall back to straight up.
    pub fn compute_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks(3) {
            let n = math::compute_normal(
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            );
            for &i in tri {
                normals[i as usize] += n;
            }
        }
        normals
            .into_iter()
            .map(|n| {
                let n = n.normalize_or_zero();
                if n == Vec3::ZERO { Vec3::Y } else { n }
            })
            .collect()
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Duplicates the vertex at `src` with y forced to the base plane and
    /// returns the new vertex's index.
    fn push_skirt_vertex(&mut self, src: u32) -> u32 {
        let mut v = self.positions[src as usize];
        v.y = 0.0;
        let index = self.positions.len() as u32;
        self.positions.push(v);
        index
    }

    /// Rebuilds uvs for every vertex as the `(x, z)` planar projection.
    fn rebuild_uvs(&mut self) {
        self.uvs = self.positions.iter().map(|v| Vec2::new(v.x, v.z)).collect();
    }
}

/// Stitches every hex of a circular grid into one seamless mesh.
///
/// Each adjacency is resolved exactly once, from the "male" side: the
/// below / top-right / bottom-right edges bridge to an existing neighbor
/// (or skirt down when the neighbor is absent), while the above /
/// bottom-left / top-left edges only ever skirt — the inverse bridge is
/// already covered by the neighbor's own male pass. A grid of zero or one
/// hex therefore degenerates to pure boundary skirting.
///
/// Coordinates expected by the enumeration but missing from the grid log a
/// warning and contribute no geometry.
pub fn stitch_circle(grid: &HexGrid<CubeCoord>, radius: i32) -> CombinedMesh {
    let mut mesh = CombinedMesh::default();
    if grid.is_empty() {
        warn!("stitching an empty grid");
        return mesh;
    }

    // Pass 1: concatenate all hex buffers, translated into world space.
    // Hex index = position in enumeration order, skipping absent cells.
    let mut order: Vec<CubeCoord> = Vec::new();
    let mut hex_index: HashMap<CubeCoord, u32> = HashMap::new();
    for coord in circle_coords(radius) {
        let Some(cell) = grid.get(&coord) else {
            warn!("missing hex at {} {} {}", coord.x, coord.y, coord.z);
            continue;
        };
        let base = (order.len() * HEX_VERTS) as u32;
        for v in cell.mesh.vertices() {
            mesh.positions.push(*v + cell.position);
        }
        for &i in HEX_TRIANGLES.iter() {
            mesh.indices.push(base + i);
        }
        hex_index.insert(coord, order.len() as u32);
        order.push(coord);
    }

    // Pass 2: resolve each hex's six edges.
    for (counter, coord) in order.iter().enumerate() {
        let cur = (counter * HEX_VERTS) as u32;
        let recv = |i: u32| i * HEX_VERTS as u32;

        // Male edge: below. Bridge vertices 1/3 to the neighbor's 2/4.
        if let Some(&j) = hex_index.get(&coord.below()) {
            mesh.push_triangle(cur + 1, cur + 3, recv(j) + 2);
            mesh.push_triangle(cur + 3, recv(j) + 4, recv(j) + 2);
        } else {
            let a = mesh.push_skirt_vertex(cur + 1);
            let b = mesh.push_skirt_vertex(cur + 3);
            mesh.push_triangle(a, cur + 1, cur + 3);
            mesh.push_triangle(cur + 3, b, a);
        }

        // Male edge: top-right. Bridge vertices 5/4 to the neighbor's 0/1.
        if let Some(&j) = hex_index.get(&coord.top_right()) {
            mesh.push_triangle(cur + 5, cur + 4, recv(j));
            mesh.push_triangle(recv(j), recv(j) + 1, cur + 5);
        } else {
            let a = mesh.push_skirt_vertex(cur + 4);
            let b = mesh.push_skirt_vertex(cur + 5);
            mesh.push_triangle(a, cur + 5, cur + 4);
            mesh.push_triangle(cur + 5, a, b);
        }

        // Male edge: bottom-right. Bridge vertices 3/5 to the neighbor's 2/0.
        if let Some(&j) = hex_index.get(&coord.bottom_right()) {
            mesh.push_triangle(cur + 3, cur + 5, recv(j) + 2);
            mesh.push_triangle(cur + 3, recv(j) + 2, recv(j));
        } else {
            let a = mesh.push_skirt_vertex(cur + 5);
            let b = mesh.push_skirt_vertex(cur + 3);
            mesh.push_triangle(cur + 3, cur + 5, a);
            mesh.push_triangle(a, b, cur + 3);
        }

        // Female edges: skirt only when the neighbor is absent; the
        // neighbor's male pass owns the bridge.
        if !hex_index.contains_key(&coord.above()) {
            let a = mesh.push_skirt_vertex(cur + 2);
            let b = mesh.push_skirt_vertex(cur + 4);
            mesh.push_triangle(cur + 4, cur + 2, a);
            mesh.push_triangle(a, b, cur + 4);
        }
        if !hex_index.contains_key(&coord.bottom_left()) {
            let a = mesh.push_skirt_vertex(cur);
            let b = mesh.push_skirt_vertex(cur + 1);
            mesh.push_triangle(cur, cur + 1, b);
            mesh.push_triangle(b, a, cur);
        }
        if !hex_index.contains_key(&coord.top_left()) {
            let a = mesh.push_skirt_vertex(cur + 2);
            let b = mesh.push_skirt_vertex(cur);
            mesh.push_triangle(cur + 2, cur, b);
            mesh.push_triangle(b, a, cur + 2);
        }
    }

    mesh.rebuild_uvs();

    info!(
        "stitched {} hexes into {} vertices / {} triangles",
        order.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}

/// Concatenates every cell's mesh at its world position into one buffer.
///
/// No seam closing: gaps between hexes of different heights stay open.
/// This mirrors a host engine's native mesh combiner and is the path used
/// for rectangular grids.
pub fn combine<C: Copy + Eq + Hash>(grid: &HexGrid<C>) -> CombinedMesh {
    let mut mesh = CombinedMesh::default();
    for (counter, (_, cell)) in grid.iter().enumerate() {
        let base = (counter * HEX_VERTS) as u32;
        for v in cell.mesh.vertices() {
            mesh.positions.push(*v + cell.position);
        }
        for uv in cell.mesh.uvs() {
            mesh.uvs.push(uv);
        }
        for &i in HEX_TRIANGLES.iter() {
            mesh.indices.push(base + i);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{generate_circle, generate_rect};
    use crate::layout::circle_hex_count;
    use bevy::platform::collections::HashSet;

    /// Hex indices referenced by a triangle, counting only top vertices
    /// (skirt vertices belong to no hex).
    fn hexes_of_triangle(tri: &[u32], top_vertex_count: u32) -> Vec<u32> {
        let mut hexes: Vec<u32> = tri
            .iter()
            .filter(|&&i| i < top_vertex_count)
            .map(|&i| i / HEX_VERTS as u32)
            .collect();
        hexes.sort_unstable();
        hexes.dedup();
        hexes
    }

    // ── isolated hex ────────────────────────────────────────────────

    #[test]
    fn single_hex_is_fully_skirted() {
        let grid = generate_circle(0, 1.0, Vec3::new(0.0, 2.0, 0.0));
        let mesh = stitch_circle(&grid, 0);

        // 6 top vertices + 2 skirt vertices per boundary edge.
        assert_eq!(mesh.vertex_count(), 6 + 12);
        // 4 cap triangles + 2 wall triangles per boundary edge.
        assert_eq!(mesh.triangle_count(), 4 + 12);

        // No triangle spans two hexes.
        for tri in mesh.indices.chunks(3) {
            assert!(hexes_of_triangle(tri, 6).len() <= 1);
        }
        // Skirt vertices sit on the base plane; top vertices keep their y.
        for (i, v) in mesh.positions.iter().enumerate() {
            if i < 6 {
                assert_eq!(v.y, 2.0);
            } else {
                assert_eq!(v.y, 0.0);
            }
        }
    }

    // ── radius-1 flower ─────────────────────────────────────────────

    #[test]
    fn radius_one_grid_has_expected_counts() {
        let grid = generate_circle(1, 1.0, Vec3::ZERO);
        let mesh = stitch_circle(&grid, 1);

        assert_eq!(circle_hex_count(1), 7);
        // 42 top vertices + 18 boundary edges × 2 skirt vertices.
        assert_eq!(mesh.vertex_count(), 42 + 36);
        // 28 caps + 12 adjacencies × 2 bridge triangles + 36 walls.
        assert_eq!(mesh.triangle_count(), 28 + 24 + 36);
    }

    #[test]
    fn no_hex_pair_is_double_bridged() {
        let grid = generate_circle(1, 1.0, Vec3::ZERO);
        let mesh = stitch_circle(&grid, 1);
        let top_count = 7 * HEX_VERTS as u32;

        let mut bridges_per_pair: HashMap<(u32, u32), u32> = HashMap::new();
        for tri in mesh.indices.chunks(3) {
            let hexes = hexes_of_triangle(tri, top_count);
            if hexes.len() == 2 {
                *bridges_per_pair.entry((hexes[0], hexes[1])).or_insert(0) += 1;
            }
        }
        // Every adjacent pair is bridged by exactly one quad (2 triangles).
        assert_eq!(bridges_per_pair.len(), 12);
        for (&pair, &count) in bridges_per_pair.iter() {
            assert_eq!(count, 2, "pair {pair:?} bridged {count} times");
        }
    }

    #[test]
    fn uvs_are_planar_projection_of_final_vertices() {
        let grid = generate_circle(1, 1.0, Vec3::new(3.0, 1.0, -2.0));
        let mesh = stitch_circle(&grid, 1);
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
        for (v, uv) in mesh.positions.iter().zip(mesh.uvs.iter()) {
            assert_eq!(uv.x, v.x);
            assert_eq!(uv.y, v.z);
        }
    }

    #[test]
    fn bridges_span_displaced_heights() {
        // Raise the center hex; the bridge triangles must reference both
        // the raised and the base-level vertices.
        let mut grid = generate_circle(1, 1.0, Vec3::ZERO);
        grid.get_mut(&CubeCoord::new(0, 0)).unwrap().position.y = 4.0;
        let mesh = stitch_circle(&grid, 1);

        let ys: HashSet<i32> = mesh.positions.iter().map(|v| v.y as i32).collect();
        assert!(ys.contains(&4) && ys.contains(&0));
    }

    // ── degraded grids ──────────────────────────────────────────────

    #[test]
    fn missing_center_is_skipped_with_boundary_closed() {
        let mut grid = generate_circle(1, 1.0, Vec3::ZERO);
        grid.remove(&CubeCoord::new(0, 0));
        let mesh = stitch_circle(&grid, 1);

        // 6 ring hexes: 36 top vertices. Each ring hex has 4 absent
        // neighbors (center + 3 outside), so 8 skirt vertices each.
        assert_eq!(mesh.vertex_count(), 36 + 48);
        // 24 caps + 6 ring adjacencies × 2 + 48 walls.
        assert_eq!(mesh.triangle_count(), 24 + 12 + 48);
    }

    #[test]
    fn empty_grid_stitches_to_empty_mesh() {
        let mut grid = generate_circle(0, 1.0, Vec3::ZERO);
        grid.clear();
        let mesh = stitch_circle(&grid, 0);
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
    }

    // ── normals ─────────────────────────────────────────────────────

    #[test]
    fn flat_grid_cap_normals_point_up() {
        let grid = generate_circle(1, 1.0, Vec3::ZERO);
        let mesh = stitch_circle(&grid, 1);
        let normals = mesh.compute_normals();
        assert_eq!(normals.len(), mesh.vertex_count());
        // Interior top vertices of the center hex are dominated by cap
        // and near-flat bridge faces.
        for n in normals.iter().take(6) {
            assert!(n.y > 0.5, "expected upward-ish normal, got {n:?}");
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let grid = generate_circle(1, 1.0, Vec3::ZERO);
        let mesh = stitch_circle(&grid, 1);
        for n in mesh.compute_normals() {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    // ── naive combine ───────────────────────────────────────────────

    #[test]
    fn combine_concatenates_without_new_geometry() {
        let grid = generate_rect(2, 2, 1.0, Vec3::ZERO);
        let mesh = combine(&grid);
        assert_eq!(mesh.vertex_count(), 4 * 6);
        assert_eq!(mesh.triangle_count(), 4 * 4);
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
    }

    #[test]
    fn combine_translates_vertices_to_world_space() {
        let grid = generate_rect(1, 2, 1.0, Vec3::new(0.0, 5.0, 0.0));
        let mesh = combine(&grid);
        for v in mesh.positions.iter() {
            assert_eq!(v.y, 5.0);
        }
        // Two distinct hex centers: min and max x must straddle more than
        // one hex width.
        let min_x = mesh.positions.iter().map(|v| v.x).fold(f32::MAX, f32::min);
        let max_x = mesh.positions.iter().map(|v| v.x).fold(f32::MIN, f32::max);
        assert!(max_x - min_x > grid.hex_width());
    }
}
