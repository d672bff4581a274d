//! Terrain pipeline systems: generate the grid, displace it by the
//! configured height field, weld it into one mesh, and hand the buffers to
//! the renderer. Pressing R re-runs the pipeline with a fresh seed,
//! picking up any config edits made in the inspector.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;

use super::{GridShape, HeightMapKind, TerrainConfig};
use crate::grid::{HexGrid, generate_circle, generate_rect, populate_circle, populate_rect};
use crate::height::{self, BaseMode, DEFAULT_DEAD_BAND, HeightRemap};
use crate::layout::{CubeCoord, OffsetCoord, circle_hex_count};
use crate::noise_map::{self, HeightField};
use crate::stitch::{self, CombinedMesh};

/// The generated grid, kept between frames so regeneration can clear and
/// rebuild it in place.
#[derive(Resource)]
pub enum IslandGrid {
    /// Cube-coordinate circular grid.
    Circle(HexGrid<CubeCoord>),
    /// Offset-coordinate rectangular grid.
    Rect(HexGrid<OffsetCoord>),
}

/// Marker for the spawned terrain mesh entity.
#[derive(Component)]
pub struct TerrainMesh;

/// Startup: runs the full pipeline and spawns the terrain mesh, a sun
/// light, and ambient fill.
pub fn generate_island(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<TerrainConfig>,
) {
    let (island, combined) = build_island(&cfg);
    commands.insert_resource(island);

    let terrain_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.5, 0.3),
        perceptual_roughness: 0.95,
        ..default()
    });

    commands.spawn((
        TerrainMesh,
        Name::new("IslandTerrain"),
        Mesh3d(meshes.add(to_render_mesh(&combined))),
        MeshMaterial3d(terrain_material),
        Transform::default(),
        Visibility::default(),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(30.0, 50.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 120.0,
        ..default()
    });
}

/// Update: on R, advances the seed, revalidates the (possibly
/// inspector-edited) config, rebuilds the grid, and swaps the mesh asset.
pub fn regenerate_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    mut cfg: ResMut<TerrainConfig>,
    mut island: ResMut<IslandGrid>,
    mut meshes: ResMut<Assets<Mesh>>,
    mesh_q: Query<&Mesh3d, With<TerrainMesh>>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    cfg.noise.seed = cfg.noise.seed.wrapping_add(1);
    cfg.validate();

    // Reuse the stored grid when shape and footprint still match;
    // otherwise rebuild it from scratch.
    let combined = match (&mut *island, cfg.shape) {
        (IslandGrid::Circle(grid), GridShape::Circle)
            if (grid.hex_height() - cfg.hex_height).abs() < f32::EPSILON =>
        {
            populate_circle(grid, cfg.circle.radius);
            displace_and_stitch_circle(grid, &cfg)
        }
        (IslandGrid::Rect(grid), GridShape::Rect)
            if (grid.hex_height() - cfg.hex_height).abs() < f32::EPSILON =>
        {
            populate_rect(grid, cfg.rect.grid_height, cfg.rect.grid_width);
            displace_and_combine_rect(grid, &cfg)
        }
        (store, _) => {
            let (new_store, combined) = build_island(&cfg);
            *store = new_store;
            combined
        }
    };

    if let Ok(mesh3d) = mesh_q.single() {
        let _ = meshes.insert(&mesh3d.0, to_render_mesh(&combined));
    }
}

/// Builds a fresh grid for the configured shape and runs it through the
/// pipeline.
fn build_island(cfg: &TerrainConfig) -> (IslandGrid, CombinedMesh) {
    match cfg.shape {
        GridShape::Circle => {
            let mut grid = generate_circle(cfg.circle.radius, cfg.hex_height, Vec3::ZERO);
            let combined = displace_and_stitch_circle(&mut grid, cfg);
            (IslandGrid::Circle(grid), combined)
        }
        GridShape::Rect => {
            let mut grid = generate_rect(
                cfg.rect.grid_height,
                cfg.rect.grid_width,
                cfg.hex_height,
                Vec3::ZERO,
            );
            let combined = displace_and_combine_rect(&mut grid, cfg);
            (IslandGrid::Rect(grid), combined)
        }
    }
}

/// Circular pipeline tail: step-clamped displacement with base reset,
/// then the seam-welding stitcher.
fn displace_and_stitch_circle(grid: &mut HexGrid<CubeCoord>, cfg: &TerrainConfig) -> CombinedMesh {
    let radius = cfg.circle.radius;
    info!(
        "circular grid: radius {radius}, {} of {} hexes, footprint {:.2} × {:.2}",
        grid.len(),
        circle_hex_count(radius),
        grid.hex_width(),
        grid.hex_height(),
    );

    let extent = (radius * 2 + 1) as usize;
    let field = build_field(extent, extent, cfg);
    height::apply_circle(
        grid,
        &field,
        HeightRemap::StepClamp {
            min: cfg.circle.min_height_clamp,
            max: cfg.circle.max_height_clamp,
        },
        BaseMode::Reset,
        cfg.circle.height_scale,
    );

    stitch::stitch_circle(grid, radius)
}

/// Rectangular pipeline tail: additive displacement, then the naive
/// host-style combine (no seam closing).
fn displace_and_combine_rect(grid: &mut HexGrid<OffsetCoord>, cfg: &TerrainConfig) -> CombinedMesh {
    let rows = cfg.rect.grid_height;
    let cols = cfg.rect.grid_width;
    info!("rectangular grid: {rows} × {cols}, {} hexes", grid.len());

    let field = build_field(rows as usize, cols as usize, cfg);
    // Only the Perlin path carries the dead-band remap; cone and blend
    // displace linearly, always additive.
    let remap = match cfg.height_map {
        HeightMapKind::Perlin => DEFAULT_DEAD_BAND,
        HeightMapKind::Cone | HeightMapKind::Blend => HeightRemap::Linear,
    };
    height::apply_rect(grid, &field, remap, BaseMode::Accumulate, cfg.rect.height_scale);

    stitch::combine(grid)
}

/// Builds the configured height field at the given extent.
fn build_field(size_x: usize, size_y: usize, cfg: &TerrainConfig) -> HeightField {
    let n = &cfg.noise;
    let field = match cfg.height_map {
        HeightMapKind::Perlin => noise_map::perlin_map(size_x, size_y, n.perlin_scale, n.seed),
        HeightMapKind::Cone => noise_map::cone_map(size_x, size_y, n.cone_radius),
        HeightMapKind::Blend => {
            let cone = noise_map::cone_map(size_x, size_y, n.cone_radius);
            let perlin = noise_map::perlin_map(size_x, size_y, n.perlin_scale, n.seed);
            noise_map::blend(&cone, &perlin, n.cone_to_perlin_ratio)
        }
    };

    let (min, max) = field
        .values()
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    info!("height field {size_x} × {size_y}: samples in [{min:.3}, {max:.3}]");
    field
}

/// Converts combined buffers into a renderable mesh with derived normals.
fn to_render_mesh(combined: &CombinedMesh) -> Mesh {
    let positions: Vec<[f32; 3]> = combined.positions.iter().map(|v| v.to_array()).collect();
    let normals: Vec<[f32; 3]> = combined
        .compute_normals()
        .iter()
        .map(|n| n.to_array())
        .collect();
    let uvs: Vec<[f32; 2]> = combined.uvs.iter().map(|uv| uv.to_array()).collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(combined.indices.clone()))
}
