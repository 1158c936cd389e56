//! Motion domain: camera and player bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::{CollisionProbe, Facing, GameLayer, MotionController, Player, ProbeCasts};

/// World units are metres; one unit renders as this many pixels.
pub const PIXELS_PER_UNIT: f32 = 32.0;

/// Player body size in world units.
pub const PLAYER_SIZE: Vec2 = Vec2::new(1.0, 2.0);

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / PIXELS_PER_UNIT)),
    ));
}

pub(crate) fn spawn_player(mut commands: Commands, existing_player: Query<Entity, With<Player>>) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    info!(
        "Spawning player: size={}x{}",
        PLAYER_SIZE.x, PLAYER_SIZE.y
    );

    commands.spawn((
        // Identity & Motion
        (
            Player,
            MotionController::new(Facing::Right),
            CollisionProbe::default(),
            ProbeCasts::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, 0.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // The controller owns gravity
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, GameLayer::WORLD),
        ),
    ));
}
