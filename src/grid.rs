//! The hex grid: coordinate → (mesh, world position) storage.
//!
//! A [`HexGrid`] exclusively owns its cells. It is populated by one of the
//! two generation functions, mutated in place by the height applier, and
//! cleared and rebuilt whenever the configuration changes shape or size.

use bevy::platform::collections::HashMap;
use bevy::prelude::Vec3;
use core::hash::Hash;

use crate::hex_mesh::HexMesh;
use crate::layout::{CubeCoord, OffsetCoord, circle_coords, rect_coords};

/// One populated grid cell: the hex's local mesh and its world position.
#[derive(Clone, Debug)]
pub struct HexCell {
    /// Local-space hex mesh (y = 0 at build time).
    pub mesh: HexMesh,
    /// World-space center; the height applier writes `.y`.
    pub position: Vec3,
}

/// Mapping from hex coordinate to cell, plus the shared hex footprint.
///
/// `C` is either [`CubeCoord`] (circular grids) or [`OffsetCoord`]
/// (rectangular grids); the two are never mixed in one grid.
pub struct HexGrid<C> {
    cells: HashMap<C, HexCell>,
    hex_width: f32,
    hex_height: f32,
    origin: Vec3,
}

impl<C: Copy + Eq + Hash> HexGrid<C> {
    fn empty(hex_height: f32, origin: Vec3) -> Self {
        // Footprint comes from a sample mesh's bounds, not from re-derived
        // math, so grid spacing always agrees with the geometry produced.
        let sample = HexMesh::with_height(hex_height);
        let bounds = sample.bounds_size();
        Self {
            cells: HashMap::new(),
            hex_width: bounds.x,
            hex_height: bounds.y,
            origin,
        }
    }

    /// Pole-to-pole hex height shared by every cell.
    pub fn hex_height(&self) -> f32 {
        self.hex_height
    }

    /// Hex width shared by every cell.
    pub fn hex_width(&self) -> f32 {
        self.hex_width
    }

    /// World-space origin the grid was generated around.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cells are populated.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at `coord`, if populated.
    pub fn get(&self, coord: &C) -> Option<&HexCell> {
        self.cells.get(coord)
    }

    /// Mutable cell at `coord`, if populated.
    pub fn get_mut(&mut self, coord: &C) -> Option<&mut HexCell> {
        self.cells.get_mut(coord)
    }

    /// Iterates all populated cells in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&C, &HexCell)> {
        self.cells.iter()
    }

    /// Removes every cell, keeping the footprint configuration.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Test helper: removes the cell at `coord`, leaving a hole.
    #[cfg(test)]
    pub fn remove(&mut self, coord: &C) -> Option<HexCell> {
        self.cells.remove(coord)
    }

    fn insert(&mut self, coord: C, cell: HexCell) {
        self.cells.insert(coord, cell);
    }
}

/// Clears `grid` and repopulates it as a circle of `radius` rings around
/// its origin.
///
/// Only cube coordinates with `x + y + z = 0` and all components within
/// `radius` are populated; every cell starts at the origin's base height.
pub fn populate_circle(grid: &mut HexGrid<CubeCoord>, radius: i32) {
    grid.clear();
    let sample = HexMesh::with_height(grid.hex_height);
    for coord in circle_coords(radius) {
        let position = grid.origin + coord.world_offset(grid.hex_width, grid.hex_height);
        grid.insert(
            coord,
            HexCell {
                mesh: sample.clone(),
                position,
            },
        );
    }
}

/// Clears `grid` and repopulates it as a `rows × cols` rectangle starting
/// at its origin.
pub fn populate_rect(grid: &mut HexGrid<OffsetCoord>, rows: i32, cols: i32) {
    grid.clear();
    let sample = HexMesh::with_height(grid.hex_height);
    for coord in rect_coords(rows, cols) {
        let position = grid.origin + coord.world_offset(grid.hex_width, grid.hex_height);
        grid.insert(
            coord,
            HexCell {
                mesh: sample.clone(),
                position,
            },
        );
    }
}

/// Generates a fresh circular grid of `radius` rings around `origin`.
pub fn generate_circle(radius: i32, hex_height: f32, origin: Vec3) -> HexGrid<CubeCoord> {
    let mut grid = HexGrid::empty(hex_height, origin);
    populate_circle(&mut grid, radius);
    grid
}

/// Generates a fresh `rows × cols` rectangular grid starting at `origin`.
pub fn generate_rect(rows: i32, cols: i32, hex_height: f32, origin: Vec3) -> HexGrid<OffsetCoord> {
    let mut grid = HexGrid::empty(hex_height, origin);
    populate_rect(&mut grid, rows, cols);
    grid
}
