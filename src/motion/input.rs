//! Motion domain: per-tick input snapshot consumed by the controller.

use bevy::prelude::*;

/// What the player asked for this tick.
///
/// The edge flags (`jump_pressed`, `jump_released`, `dash_pressed`) are true
/// for exactly one logic tick; [`InputSnapshot::consume_edges`] clears them.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub movement: Vec2,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub run_held: bool,
    pub dash_pressed: bool,
}

impl InputSnapshot {
    /// Held movement with no button edges.
    pub fn holding(movement: Vec2) -> Self {
        Self {
            movement,
            ..default()
        }
    }

    pub fn consume_edges(&mut self) {
        self.jump_pressed = false;
        self.jump_released = false;
        self.dash_pressed = false;
    }
}
