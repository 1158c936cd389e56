//! Motion domain: ECS components and physics layers for the host.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
}

impl GameLayer {
    /// Everything the probes treat as solid world geometry.
    pub const WORLD: [GameLayer; 2] = [GameLayer::Ground, GameLayer::Wall];
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// One shape cast, kept for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CastRecord {
    pub origin: Vec2,
    pub size: Vec2,
    pub direction: Vec2,
    pub distance: f32,
    pub hit: bool,
}

/// The casts behind the latest [`CollisionProbe`](super::CollisionProbe).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ProbeCasts {
    pub ground: CastRecord,
    pub head: CastRecord,
    pub wall: CastRecord,
}
