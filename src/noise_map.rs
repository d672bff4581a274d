//! Scalar height-field generation: Perlin maps, radial cone maps, and blends.
//!
//! A [`HeightField`] is a dense row-major 2D grid of `f32` samples, one per
//! grid cell, produced here in `[0, 1]` and consumed by the height applier.
//! Fields are transient: recomputed on demand, discarded after application.

use noise::{NoiseFn, Perlin};

use crate::math;

/// Dense 2D scalar map, row-major, `size_x * size_y` samples.
#[derive(Clone, Debug)]
pub struct HeightField {
    size_x: usize,
    size_y: usize,
    values: Vec<f32>,
}

impl HeightField {
    /// A zero-filled field of the given dimensions.
    pub fn new(size_x: usize, size_y: usize) -> Self {
        Self {
            size_x,
            size_y,
            values: vec![0.0; size_x * size_y],
        }
    }

    /// Sample count along x.
    pub fn size_x(&self) -> usize {
        self.size_x
    }

    /// Sample count along y.
    pub fn size_y(&self) -> usize {
        self.size_y
    }

    /// Sample at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[x * self.size_y + y]
    }

    /// Overwrites the sample at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.values[x * self.size_y + y] = value;
    }

    /// All samples in row-major order.
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Substitute for a cone radius at or below zero, avoiding division by zero.
const MIN_CONE_RADIUS: f32 = 0.1;

/// Samples 2D Perlin noise over a `size_x × size_y` grid.
///
/// Cell `(x, y)` samples the noise lattice at `(x/size_x·scale,
/// y/size_y·scale)`; raw `[-1, 1]` output is remapped to `[0, 1]`.
/// Deterministic for a fixed `(size_x, size_y, scale, seed)`.
pub fn perlin_map(size_x: usize, size_y: usize, scale: f32, seed: u32) -> HeightField {
    let perlin = Perlin::new(seed);
    let mut map = HeightField::new(size_x, size_y);
    for x in 0..size_x {
        for y in 0..size_y {
            let noise_val = perlin.get([
                x as f64 / size_x as f64 * scale as f64,
                y as f64 / size_y as f64 * scale as f64,
            ]);
            map.set(x, y, math::map_noise_to_range(noise_val, 0.0, 1.0));
        }
    }
    map
}

/// Radial falloff map: 1 at the grid center, linearly down to 0 at
/// `cone_radius` cells out, 0 beyond.
///
/// A `cone_radius` at or below zero is substituted with a small positive
/// default rather than treated as an error.
pub fn cone_map(size_x: usize, size_y: usize, cone_radius: f32) -> HeightField {
    let center_x = size_x as f32 * 0.5;
    let center_y = size_y as f32 * 0.5;
    let cone_radius = if cone_radius <= 0.0 {
        MIN_CONE_RADIUS
    } else {
        cone_radius
    };

    let mut map = HeightField::new(size_x, size_y);
    for x in 0..size_x {
        for y in 0..size_y {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();
            let value = if dist / cone_radius < 1.0 {
                1.0 - dist / cone_radius
            } else {
                0.0
            };
            map.set(x, y, value);
        }
    }
    map
}

/// Per-cell linear interpolation between two fields of equal extent.
///
/// `ratio` is clamped to `[0, 1]` before use: 0 yields `a` untouched,
/// 1 yields `b`. Out-of-range ratios never propagate.
pub fn blend(a: &HeightField, b: &HeightField, ratio: f32) -> HeightField {
    debug_assert_eq!(a.size_x, b.size_x);
    debug_assert_eq!(a.size_y, b.size_y);

    let ratio = ratio.clamp(0.0, 1.0);
    let mut map = HeightField::new(a.size_x, a.size_y);
    for x in 0..a.size_x {
        for y in 0..a.size_y {
            map.set(x, y, a.get(x, y) * (1.0 - ratio) + b.get(x, y) * ratio);
        }
    }
    map
}
