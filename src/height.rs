//! Height displacement: sampling a [`HeightField`] over a grid and moving
//! each hex vertically.
//!
//! The clamp/remap step is a pluggable [`HeightRemap`] strategy because the
//! circular and rectangular pipelines historically used different (and
//! mutually inconsistent) arithmetic; both survive here as separate
//! variants rather than being merged into one.

use bevy::log::warn;

use crate::grid::HexGrid;
use crate::layout::{CubeCoord, OffsetCoord, circle_coords, rect_coords};
use crate::noise_map::HeightField;

/// Clamp/remap policy applied to each height sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeightRemap {
    /// Pre-scale step clamp: samples inside `[min, max]` pass through,
    /// below `min` collapse to 0, above `max` saturate to 1.
    StepClamp {
        /// Lower band edge.
        min: f32,
        /// Upper band edge.
        max: f32,
    },
    /// Post-scale dead band: displacements inside `[low, high]` flatten to
    /// 0, below `low` become `-v²`, above `high` become `v²`.
    DeadBand {
        /// Lower band edge, in scaled-displacement units.
        low: f32,
        /// Upper band edge, in scaled-displacement units.
        high: f32,
    },
    /// No remapping; the sample scales straight through.
    Linear,
}

/// Dead-band edges used by the rectangular pipeline by default.
pub const DEFAULT_DEAD_BAND: HeightRemap = HeightRemap::DeadBand {
    low: 0.3,
    high: 0.6,
};

impl HeightRemap {
    /// Vertical displacement for a raw field sample, in world units.
    ///
    /// `StepClamp` remaps before scaling by `hex_height × height_scale`;
    /// `DeadBand` reshapes the already-scaled displacement.
    pub fn displacement(&self, sample: f32, hex_height: f32, height_scale: f32) -> f32 {
        let scale = hex_height * height_scale;
        match *self {
            Self::StepClamp { min, max } => {
                let v = if (min..=max).contains(&sample) {
                    sample
                } else if sample < min {
                    0.0
                } else {
                    1.0
                };
                v * scale
            }
            Self::DeadBand { low, high } => {
                let v = sample * scale;
                if (low..=high).contains(&v) {
                    0.0
                } else if v < low {
                    -(v * v)
                } else {
                    v * v
                }
            }
            Self::Linear => sample * scale,
        }
    }
}

/// How the applier treats a cell's existing y-position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseMode {
    /// Reset y to the grid origin's base height before adding, so
    /// re-applying the same field recomputes rather than stacks.
    Reset,
    /// Add on top of whatever y the cell already has; repeated
    /// application accumulates.
    Accumulate,
}

/// Displaces every cell of a circular grid by the field sampled at its
/// cube-coordinate index.
///
/// The field's extent must match the grid's: `(2r+1) × (2r+1)` samples,
/// cell `(x, y, z)` sampling at `(radius + x, radius + y)`. Cells missing
/// from the grid are a warning, not an error; they are skipped.
pub fn apply_circle(
    grid: &mut HexGrid<CubeCoord>,
    field: &HeightField,
    remap: HeightRemap,
    base: BaseMode,
    height_scale: f32,
) {
    debug_assert!(field.size_x() % 2 == 1, "circular field extent must be odd");
    let radius = (field.size_x() as i32 - 1) / 2;
    let base_y = grid.origin().y;
    let hex_height = grid.hex_height();

    for coord in circle_coords(radius) {
        let sample = field.get((radius + coord.x) as usize, (radius + coord.y) as usize);
        let Some(cell) = grid.get_mut(&coord) else {
            warn!("missing hex at {} {} {}", coord.x, coord.y, coord.z);
            continue;
        };
        let displacement = remap.displacement(sample, hex_height, height_scale);
        match base {
            BaseMode::Reset => cell.position.y = base_y + displacement,
            BaseMode::Accumulate => cell.position.y += displacement,
        }
    }
}

/// Displaces every cell of a rectangular grid by the field sampled at its
/// (row, col) index. Field extent is `rows × cols`.
pub fn apply_rect(
    grid: &mut HexGrid<OffsetCoord>,
    field: &HeightField,
    remap: HeightRemap,
    base: BaseMode,
    height_scale: f32,
) {
    let base_y = grid.origin().y;
    let hex_height = grid.hex_height();

    for coord in rect_coords(field.size_x() as i32, field.size_y() as i32) {
        let sample = field.get(coord.row as usize, coord.col as usize);
        let Some(cell) = grid.get_mut(&coord) else {
            warn!("missing hex at row {} col {}", coord.row, coord.col);
            continue;
        };
        let displacement = remap.displacement(sample, hex_height, height_scale);
        match base {
            BaseMode::Reset => cell.position.y = base_y + displacement,
            BaseMode::Accumulate => cell.position.y += displacement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{generate_circle, generate_rect};
    use crate::noise_map::{HeightField, cone_map};
    use bevy::prelude::Vec3;

    fn constant_field(size: usize, value: f32) -> HeightField {
        let mut map = HeightField::new(size, size);
        for x in 0..size {
            for y in 0..size {
                map.set(x, y, value);
            }
        }
        map
    }

    // ── HeightRemap ─────────────────────────────────────────────────

    #[test]
    fn step_clamp_passes_band_through() {
        let remap = HeightRemap::StepClamp { min: 0.3, max: 0.6 };
        let d = remap.displacement(0.5, 1.0, 2.0);
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn step_clamp_zeroes_below_band() {
        let remap = HeightRemap::StepClamp { min: 0.3, max: 0.6 };
        assert_eq!(remap.displacement(0.1, 1.0, 2.0), 0.0);
    }

    #[test]
    fn step_clamp_saturates_above_band() {
        let remap = HeightRemap::StepClamp { min: 0.3, max: 0.6 };
        let d = remap.displacement(0.9, 1.0, 2.0);
        assert!((d - 2.0).abs() < 1e-6, "expected full scale, got {d}");
    }

    #[test]
    fn dead_band_flattens_inside() {
        // Scaled displacement 0.5 lands inside the default band.
        assert_eq!(DEFAULT_DEAD_BAND.displacement(0.5, 1.0, 1.0), 0.0);
    }

    #[test]
    fn dead_band_squares_and_negates_below() {
        let d = DEFAULT_DEAD_BAND.displacement(0.2, 1.0, 1.0);
        assert!((d - (-0.04)).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn dead_band_squares_above() {
        let d = DEFAULT_DEAD_BAND.displacement(0.5, 1.0, 5.0);
        // 0.5 * 5 = 2.5, above the band, squared.
        assert!((d - 6.25).abs() < 1e-5, "got {d}");
    }

    #[test]
    fn linear_scales_straight_through() {
        let d = HeightRemap::Linear.displacement(0.4, 2.0, 5.0);
        assert!((d - 4.0).abs() < 1e-6);
    }

    // ── application ─────────────────────────────────────────────────

    #[test]
    fn reset_mode_recomputes_instead_of_stacking() {
        let mut grid = generate_circle(1, 1.0, Vec3::new(0.0, 2.0, 0.0));
        let field = constant_field(3, 0.5);
        apply_circle(&mut grid, &field, HeightRemap::Linear, BaseMode::Reset, 1.0);
        apply_circle(&mut grid, &field, HeightRemap::Linear, BaseMode::Reset, 1.0);
        for (_, cell) in grid.iter() {
            assert!((cell.position.y - 2.5).abs() < 1e-6, "got {}", cell.position.y);
        }
    }

    #[test]
    fn accumulate_mode_stacks_displacement() {
        let mut grid = generate_rect(3, 3, 1.0, Vec3::ZERO);
        let field = constant_field(3, 0.5);
        apply_rect(
            &mut grid,
            &field,
            HeightRemap::Linear,
            BaseMode::Accumulate,
            1.0,
        );
        apply_rect(
            &mut grid,
            &field,
            HeightRemap::Linear,
            BaseMode::Accumulate,
            1.0,
        );
        // base + 2 × displacement, not base + displacement.
        for (_, cell) in grid.iter() {
            assert!((cell.position.y - 1.0).abs() < 1e-6, "got {}", cell.position.y);
        }
    }

    #[test]
    fn cone_field_raises_center_above_rim() {
        let mut grid = generate_circle(3, 1.0, Vec3::ZERO);
        let field = cone_map(7, 7, 3.0);
        apply_circle(
            &mut grid,
            &field,
            HeightRemap::Linear,
            BaseMode::Reset,
            5.0,
        );
        let center = grid.get(&crate::layout::CubeCoord::new(0, 0)).unwrap();
        let rim = grid.get(&crate::layout::CubeCoord::new(3, 0)).unwrap();
        assert!(center.position.y > rim.position.y);
    }

    #[test]
    fn missing_cells_are_skipped_not_fatal() {
        let mut grid = generate_circle(1, 1.0, Vec3::ZERO);
        grid.remove(&crate::layout::CubeCoord::new(0, 0));
        let field = constant_field(3, 1.0);
        apply_circle(&mut grid, &field, HeightRemap::Linear, BaseMode::Reset, 1.0);
        // The six remaining cells were still displaced.
        for (_, cell) in grid.iter() {
            assert!((cell.position.y - 1.0).abs() < 1e-6);
        }
    }
}
