//! Motion domain: collision probe results refreshed once per physics tick.

use bevy::prelude::*;

/// Contact information produced by the host's shape casts.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionProbe {
    pub grounded: bool,
    pub head_bumped: bool,
    pub touching_wall: bool,
    /// Closest point on the wall hit this tick, if any.
    pub wall_contact_point: Option<Vec2>,
    /// Centre of the body when the probe ran.
    pub body_center: Vec2,
}

impl CollisionProbe {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..default()
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }

    /// Airborne and pressed against a wall at `contact`.
    pub fn against_wall(contact: Vec2, body_center: Vec2) -> Self {
        Self {
            touching_wall: true,
            wall_contact_point: Some(contact),
            body_center,
            ..default()
        }
    }
}
