//! Island terrain viewer plugin: configuration and the generate → displace
//! → stitch pipeline, run once at startup.

pub mod systems;

use bevy::prelude::*;

use crate::layout::{MAX_CIRCLE_RADIUS, MIN_CIRCLE_RADIUS};

/// Which grid shape the pipeline builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum GridShape {
    /// Cube-coordinate circular grid, seam-welded by the stitcher.
    Circle,
    /// Offset-coordinate rectangular grid, host-style combined (no seam
    /// closing).
    Rect,
}

/// Which height field displaces the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum HeightMapKind {
    /// Pure Perlin noise.
    Perlin,
    /// Pure radial cone falloff.
    Cone,
    /// Cone and Perlin blended by `cone_to_perlin_ratio`.
    Blend,
}

/// Top-level configuration for the terrain pipeline.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct TerrainConfig {
    /// Grid shape selector.
    pub shape: GridShape,
    /// Height-field selector.
    pub height_map: HeightMapKind,
    /// Pole-to-pole height of every hex tile.
    pub hex_height: f32,
    /// Circular-grid settings.
    pub circle: CircleSettings,
    /// Rectangular-grid settings.
    pub rect: RectSettings,
    /// Noise-field settings shared by both shapes.
    pub noise: NoiseSettings,
}

/// Circular-grid layout and clamp settings.
#[derive(Clone, Debug, Reflect)]
pub struct CircleSettings {
    /// Ring count around the center hex; validation clamps to `[8, 59]`.
    pub radius: i32,
    /// Lower edge of the step-clamp band.
    pub min_height_clamp: f32,
    /// Upper edge of the step-clamp band.
    pub max_height_clamp: f32,
    /// Vertical exaggeration multiplier.
    pub height_scale: f32,
}

/// Rectangular-grid layout settings.
#[derive(Clone, Debug, Reflect)]
pub struct RectSettings {
    /// Row count; validation forces ≥ 1.
    pub grid_height: i32,
    /// Column count; validation forces ≥ 1.
    pub grid_width: i32,
    /// Vertical exaggeration multiplier.
    pub height_scale: f32,
}

/// Height-field sampling parameters.
#[derive(Clone, Debug, Reflect)]
pub struct NoiseSettings {
    /// Perlin lattice scale across the grid extent.
    pub perlin_scale: f32,
    /// Cone falloff radius, in grid cells.
    pub cone_radius: f32,
    /// Blend weight: 0 = all cone, 1 = all Perlin.
    pub cone_to_perlin_ratio: f32,
    /// Perlin seed.
    pub seed: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            shape: GridShape::Circle,
            height_map: HeightMapKind::Blend,
            hex_height: 1.0,
            circle: CircleSettings {
                radius: 16,
                min_height_clamp: 0.3,
                max_height_clamp: 0.6,
                height_scale: 5.0,
            },
            rect: RectSettings {
                grid_height: 11,
                grid_width: 11,
                height_scale: 5.0,
            },
            noise: NoiseSettings {
                perlin_scale: 4.0,
                cone_radius: 12.0,
                cone_to_perlin_ratio: 0.4,
                seed: 42,
            },
        }
    }
}

impl TerrainConfig {
    /// Silently corrects out-of-range values to the nearest valid ones.
    ///
    /// Configuration anomalies are never surfaced as errors: the circular
    /// radius is clamped to its vertex-budget range, rectangular dimensions
    /// are forced positive, and the blend ratio is pulled into `[0, 1]`.
    pub fn validate(&mut self) {
        self.circle.radius = self.circle.radius.clamp(MIN_CIRCLE_RADIUS, MAX_CIRCLE_RADIUS);
        self.rect.grid_height = self.rect.grid_height.max(1);
        self.rect.grid_width = self.rect.grid_width.max(1);
        self.noise.cone_to_perlin_ratio = self.noise.cone_to_perlin_ratio.clamp(0.0, 1.0);
        if self.hex_height <= 0.0 {
            self.hex_height = 1.0;
        }
    }
}

/// Terrain plugin: validates its config and runs the pipeline at startup.
pub struct TerrainPlugin(pub TerrainConfig);

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        let mut cfg = self.0.clone();
        cfg.validate();
        app.register_type::<TerrainConfig>()
            .insert_resource(cfg)
            .add_systems(Startup, systems::generate_island)
            .add_systems(Update, systems::regenerate_on_key);
    }
}
