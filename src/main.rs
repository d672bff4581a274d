#![warn(missing_docs)]
//! Hex island terrain generator.
//!
//! Builds a hexagonal tile grid (circular or rectangular), displaces it
//! with a noise-derived height field, welds the tiles into one seamless
//! terrain mesh, and renders the result with a free-fly camera.

mod camera;
mod grid;
mod height;
mod hex_mesh;
mod layout;
pub mod math;
mod noise_map;
mod stitch;
mod terrain;

use bevy::app::AppExit;
use bevy::input::common_conditions::input_toggle_active;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;

#[cfg(feature = "native")]
mod cli {
    use clap::{Parser, ValueEnum};

    use crate::terrain::{GridShape, HeightMapKind, TerrainConfig};

    /// Grid shape flag values.
    #[derive(Clone, Copy, Debug, ValueEnum)]
    pub enum ShapeArg {
        /// Circular cube-coordinate grid, seam-welded.
        Circle,
        /// Rectangular offset-coordinate grid, naively combined.
        Rect,
    }

    /// Height-map flag values.
    #[derive(Clone, Copy, Debug, ValueEnum)]
    pub enum MapArg {
        /// Pure Perlin noise.
        Perlin,
        /// Pure radial cone falloff.
        Cone,
        /// Cone blended with Perlin.
        Blend,
    }

    /// Hex island terrain generator.
    #[derive(Parser, Debug)]
    #[command(version, about)]
    pub struct Args {
        /// Grid shape.
        #[arg(long, value_enum)]
        shape: Option<ShapeArg>,
        /// Height field applied to the grid.
        #[arg(long, value_enum)]
        map: Option<MapArg>,
        /// Circular-grid ring count (clamped to 8..=59).
        #[arg(long)]
        radius: Option<i32>,
        /// Rectangular-grid row count.
        #[arg(long)]
        grid_height: Option<i32>,
        /// Rectangular-grid column count.
        #[arg(long)]
        grid_width: Option<i32>,
        /// Perlin lattice scale.
        #[arg(long)]
        perlin_scale: Option<f32>,
        /// Cone falloff radius, in cells.
        #[arg(long)]
        cone_radius: Option<f32>,
        /// Cone-to-Perlin blend ratio (0 = cone, 1 = Perlin).
        #[arg(long)]
        ratio: Option<f32>,
        /// Vertical exaggeration.
        #[arg(long)]
        height_scale: Option<f32>,
        /// Perlin seed.
        #[arg(long)]
        seed: Option<u32>,
    }

    impl Args {
        /// Overlays any provided flags onto `cfg`; validation happens later.
        pub fn apply(&self, cfg: &mut TerrainConfig) {
            if let Some(shape) = self.shape {
                cfg.shape = match shape {
                    ShapeArg::Circle => GridShape::Circle,
                    ShapeArg::Rect => GridShape::Rect,
                };
            }
            if let Some(map) = self.map {
                cfg.height_map = match map {
                    MapArg::Perlin => HeightMapKind::Perlin,
                    MapArg::Cone => HeightMapKind::Cone,
                    MapArg::Blend => HeightMapKind::Blend,
                };
            }
            if let Some(radius) = self.radius {
                cfg.circle.radius = radius;
            }
            if let Some(rows) = self.grid_height {
                cfg.rect.grid_height = rows;
            }
            if let Some(cols) = self.grid_width {
                cfg.rect.grid_width = cols;
            }
            if let Some(scale) = self.perlin_scale {
                cfg.noise.perlin_scale = scale;
            }
            if let Some(radius) = self.cone_radius {
                cfg.noise.cone_radius = radius;
            }
            if let Some(ratio) = self.ratio {
                cfg.noise.cone_to_perlin_ratio = ratio;
            }
            if let Some(scale) = self.height_scale {
                cfg.circle.height_scale = scale;
                cfg.rect.height_scale = scale;
            }
            if let Some(seed) = self.seed {
                cfg.noise.seed = seed;
            }
        }
    }
}

fn main() {
    #[allow(unused_mut)]
    let mut config = terrain::TerrainConfig::default();
    #[cfg(feature = "native")]
    {
        use clap::Parser;
        cli::Args::parse().apply(&mut config);
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hex Island".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(bevy_egui::EguiPlugin::default())
        .add_plugins(terrain::TerrainPlugin(config))
        .add_plugins(camera::CameraPlugin)
        .add_plugins(WorldInspectorPlugin::new().run_if(input_toggle_active(false, KeyCode::Tab)))
        .add_systems(Update, exit_on_esc)
        .run();
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
