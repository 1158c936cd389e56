//! Motion domain: logic and physics phases driving the controller.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::{CollisionProbe, InputSnapshot, MotionController, MotionTuning, Player};

/// Logic phase, once per rendered frame.
pub(crate) fn run_logic_phase(
    time: Res<Time>,
    tuning: Res<MotionTuning>,
    input: Res<InputSnapshot>,
    mut query: Query<&mut MotionController, With<Player>>,
) {
    let dt = time.delta_secs();

    for mut controller in &mut query {
        controller.logic_tick(&tuning, &input, dt);
    }
}

pub(crate) fn consume_input_edges(mut input: ResMut<InputSnapshot>) {
    input.consume_edges();
}

/// Physics phase, at the fixed timestep after the probes ran.
pub(crate) fn run_physics_phase(
    time: Res<Time>,
    tuning: Res<MotionTuning>,
    input: Res<InputSnapshot>,
    mut query: Query<(&mut MotionController, &CollisionProbe, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut controller, probe, mut velocity) in &mut query {
        velocity.0 = controller.physics_tick(&tuning, probe, &input, dt);
    }
}

pub(crate) fn face_sprite(mut query: Query<(&MotionController, &mut Sprite), With<Player>>) {
    for (controller, mut sprite) in &mut query {
        let flip = !controller.facing().is_right();
        if sprite.flip_x != flip {
            sprite.flip_x = flip;
        }
    }
}
