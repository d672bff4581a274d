//! Hex coordinate systems and world-space placement.
//!
//! Two layouts exist and are never mixed within one grid:
//! cube coordinates (`x + y + z = 0`) drive circular, radius-bounded grids;
//! offset coordinates (row, col) drive rectangular "brick" grids with a
//! column-parity vertical shift.

use bevy::prelude::Vec3;

/// Largest circular-grid radius that keeps a seamless mesh under a 16-bit
/// vertex budget.
///
/// A radius-`r` circle holds `1 + 3r(r+1)` hexes of 6 vertices each;
/// solving `6·(1 + 3r(r+1)) ≤ 65535` gives `r ≤ 59`.
pub const MAX_CIRCLE_RADIUS: i32 = 59;

/// Smallest circular-grid radius accepted by configuration validation.
pub const MIN_CIRCLE_RADIUS: i32 = 8;

/// Number of hexes in a circular grid of the given radius: the center hex
/// plus `r` concentric rings of `6·ring` hexes.
pub fn circle_hex_count(radius: i32) -> usize {
    (1 + 3 * radius * (radius + 1)) as usize
}

/// Cube coordinate identifying a hex in a circular grid.
///
/// Invariant: `x + y + z == 0`. One increment in `x` moves top-right,
/// one increment in `z` moves up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    /// Top-right axis.
    pub x: i32,
    /// Derived axis, always `-x - z`.
    pub y: i32,
    /// Vertical axis.
    pub z: i32,
}

impl CubeCoord {
    /// Constructs from the two free axes, recomputing `y = -x - z`.
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, y: -x - z, z }
    }

    /// Whether all three components fit within `radius` rings of the origin.
    pub fn within_radius(&self, radius: i32) -> bool {
        self.x.abs() <= radius && self.y.abs() <= radius && self.z.abs() <= radius
    }

    /// Neighbor one step down (`Δz = -1`).
    pub fn below(&self) -> Self {
        Self::new(self.x, self.z - 1)
    }

    /// Neighbor one step up (`Δz = +1`).
    pub fn above(&self) -> Self {
        Self::new(self.x, self.z + 1)
    }

    /// Neighbor up-right (`Δx = +1`).
    pub fn top_right(&self) -> Self {
        Self::new(self.x + 1, self.z)
    }

    /// Neighbor down-right (`Δx = +1, Δz = -1`).
    pub fn bottom_right(&self) -> Self {
        Self::new(self.x + 1, self.z - 1)
    }

    /// Neighbor down-left (`Δx = -1`).
    pub fn bottom_left(&self) -> Self {
        Self::new(self.x - 1, self.z)
    }

    /// Neighbor up-left (`Δx = -1, Δz = +1`).
    pub fn top_left(&self) -> Self {
        Self::new(self.x - 1, self.z + 1)
    }

    /// World-space center offset for a hex of footprint
    /// `hex_width × hex_height`, in the horizontal plane (y left at 0).
    pub fn world_offset(&self, hex_width: f32, hex_height: f32) -> Vec3 {
        Vec3::new(
            self.x as f32 * 0.75 * hex_width,
            0.0,
            self.z as f32 * hex_height + self.x as f32 * 0.5 * hex_height,
        )
    }
}

/// Offset coordinate identifying a hex in a rectangular grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OffsetCoord {
    /// Row index, `0..rows`.
    pub row: i32,
    /// Column index, `0..cols`.
    pub col: i32,
}

impl OffsetCoord {
    /// Constructs from row and column indices.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// World-space center offset: columns advance by `0.75·w`, rows by `h`,
    /// with odd columns shifted up half a hex ("brick" layout).
    pub fn world_offset(&self, hex_width: f32, hex_height: f32) -> Vec3 {
        let parity_shift = if self.col % 2 != 0 {
            0.5 * hex_height
        } else {
            0.0
        };
        Vec3::new(
            self.col as f32 * 0.75 * hex_width,
            0.0,
            self.row as f32 * hex_height + parity_shift,
        )
    }
}

/// All cube coordinates of a circular grid of the given radius.
///
/// Enumeration order is fixed (x outer, y inner, z derived); the stitcher
/// assigns hex indices by this order.
pub fn circle_coords(radius: i32) -> impl Iterator<Item = CubeCoord> {
    (-radius..=radius).flat_map(move |x| {
        (-radius..=radius).filter_map(move |y| {
            let coord = CubeCoord::new(x, -x - y);
            coord.within_radius(radius).then_some(coord)
        })
    })
}

/// All offset coordinates of a `rows × cols` rectangular grid, row-major.
pub fn rect_coords(rows: i32, cols: i32) -> impl Iterator<Item = OffsetCoord> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| OffsetCoord::new(row, col)))
}
