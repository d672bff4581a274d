//! Free-fly viewer camera: WASD + mouse look, Q/E for altitude.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions};

use crate::math;
use crate::terrain::{GridShape, TerrainConfig};

/// Spawns the viewer camera and drives it from keyboard + mouse input.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, hide_cursor))
            .add_systems(Update, move_camera);
    }
}

/// Marker component for the player-controlled camera entity.
#[derive(Component)]
pub struct TerrainCamera;

const MOVE_SPEED: f32 = 15.0;
const MOUSE_SENSITIVITY: f32 = 0.003;

/// Spawns the camera above the grid's rim, looking at its center.
fn setup_camera(mut commands: Commands, cfg: Res<TerrainConfig>) {
    // Pull back proportionally to the grid's horizontal extent.
    let hex_width = math::hex_width(cfg.hex_height);
    let extent = match cfg.shape {
        GridShape::Circle => cfg.circle.radius as f32 * 0.75 * hex_width,
        GridShape::Rect => cfg.rect.grid_width as f32 * 0.75 * hex_width,
    };

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, extent * 0.8, extent * 1.4).looking_at(Vec3::ZERO, Vec3::Y),
        TerrainCamera,
    ));
}

fn move_camera(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut query: Query<&mut Transform, With<TerrainCamera>>,
) {
    let Ok(mut transform) = query.single_mut() else {
        return;
    };

    // Mouse look: yaw (horizontal) + pitch (vertical)
    let mut yaw = 0.0;
    let mut pitch = 0.0;
    for ev in mouse_motion.read() {
        yaw -= ev.delta.x * MOUSE_SENSITIVITY;
        pitch -= ev.delta.y * MOUSE_SENSITIVITY;
    }
    if yaw != 0.0 {
        transform.rotate_y(yaw);
    }
    if pitch != 0.0 {
        // Apply pitch on local X axis, clamped to avoid flipping
        let (_, current_pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        let clamped_pitch = (current_pitch + pitch).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.05,
            std::f32::consts::FRAC_PI_2 - 0.05,
        );
        let pitch_delta = clamped_pitch - current_pitch;
        transform.rotate_local_x(pitch_delta);
    }

    // WASD movement in the camera's forward/right plane (XZ only)
    let forward = transform.forward();
    let forward_xz = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let right = transform.right();
    let right_xz = Vec3::new(right.x, 0.0, right.z).normalize_or_zero();

    let mut direction = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        direction += forward_xz;
    }
    if keys.pressed(KeyCode::KeyS) {
        direction -= forward_xz;
    }
    if keys.pressed(KeyCode::KeyD) {
        direction += right_xz;
    }
    if keys.pressed(KeyCode::KeyA) {
        direction -= right_xz;
    }
    if keys.pressed(KeyCode::KeyE) {
        direction += Vec3::Y;
    }
    if keys.pressed(KeyCode::KeyQ) {
        direction -= Vec3::Y;
    }

    if direction != Vec3::ZERO {
        let delta = direction.normalize() * MOVE_SPEED * time.delta_secs();
        transform.translation += delta;
    }
}

fn hide_cursor(mut cursor_q: Query<&mut CursorOptions>) {
    for mut opts in &mut cursor_q {
        opts.visible = false;
        opts.grab_mode = CursorGrabMode::Confined;
    }
}
