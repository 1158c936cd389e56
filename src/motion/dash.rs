//! Motion domain: 8-way dashing and the post-dash fast fall.

use std::f32::consts::FRAC_1_SQRT_2;

use bevy::prelude::*;

use super::curves;
use super::input::InputSnapshot;
use super::state::{Facing, Launch, MotionState};
use super::tuning::MotionTuning;

/// The directions a dash can resolve to. Index 0 means "no direction" and
/// resolves to the facing direction.
pub const DASH_DIRECTIONS: [Vec2; 9] = [
    Vec2::ZERO,
    Vec2::new(1.0, 0.0),
    Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(0.0, 1.0),
    Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Vec2::new(0.0, -1.0),
    Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashKind {
    Ground,
    Air,
}

fn is_diagonal(direction: Vec2) -> bool {
    direction.x != 0.0 && direction.y != 0.0
}

/// Snap raw stick input to the nearest canonical direction. Diagonals have
/// `diagonal_bias` knocked off their distance so near-diagonal input favours
/// them. No direction resolves to `facing`.
pub fn quantize_direction(raw: Vec2, facing: Facing, diagonal_bias: f32) -> Vec2 {
    let closest = if let Some(exact) = DASH_DIRECTIONS.iter().find(|d| **d == raw) {
        *exact
    } else {
        let mut closest = Vec2::ZERO;
        let mut min_distance = raw.distance(Vec2::ZERO);

        for candidate in &DASH_DIRECTIONS[1..] {
            let mut distance = raw.distance(*candidate);
            if is_diagonal(*candidate) {
                distance -= diagonal_bias;
            }
            if distance < min_distance {
                min_distance = distance;
                closest = *candidate;
            }
        }

        closest
    };

    if closest == Vec2::ZERO {
        facing.unit()
    } else {
        closest
    }
}

/// Whether this tick's dash press would start a dash.
pub fn dash_ready(
    state: &MotionState,
    tuning: &MotionTuning,
    input: &InputSnapshot,
) -> Option<DashKind> {
    if !input.dash_pressed || state.dash.dashing {
        return None;
    }

    if state.contact.grounded {
        state.timers.ground_dash_ready().then_some(DashKind::Ground)
    } else {
        (state.dash.dashes_used < tuning.number_of_dashes).then_some(DashKind::Air)
    }
}

pub fn initiate(state: &mut MotionState, tuning: &MotionTuning, input: &InputSnapshot, kind: DashKind) {
    if kind == DashKind::Air {
        state.dash.air_dashing = true;
    }

    state.dash.direction = quantize_direction(
        input.movement,
        state.kinematics.facing,
        tuning.dash_diagonal_bias,
    );
    state.add_dash_used(tuning.number_of_dashes);
    state.dash.dashing = true;
    state.dash.elapsed = 0.0;
    state.dash.cut.clear();
    state.timers.dash_ground_cooldown = tuning.time_between_dashes_on_ground;
    state.timers.jump_buffer = 0.0;

    state.reset_jump_values();
    state.reset_wall_jump_values();
    state.stop_wall_slide(tuning.number_of_jumps_allowed);

    // Dashing out of a slide refunds the jump that leaving the wall spent.
    if kind == DashKind::Air && state.timers.in_wall_jump_window() {
        state.jump.jumps_used = state.jump.jumps_used.saturating_sub(1);
    }

    debug!(
        "Dash: kind={:?}, direction={}, dashes_used={}",
        kind, state.dash.direction, state.dash.dashes_used
    );
}

/// Dash velocity override, dash expiry and the post-dash fast fall.
pub fn integrate(state: &mut MotionState, tuning: &MotionTuning, dt: f32) {
    if state.dash.dashing {
        state.dash.elapsed += dt;

        if state.dash.elapsed >= tuning.dash_time {
            finish(state);
            return;
        }

        let direction = state.dash.direction;
        state.kinematics.horizontal = tuning.dash_speed * direction.x;

        if direction.y != 0.0 || state.dash.air_dashing {
            state.kinematics.vertical = tuning.dash_speed * direction.y;
        }
    } else if state.dash.cut.active {
        let gravity = tuning.derived().gravity * tuning.dash_gravity_on_release_multiplier;
        let cancel_time = tuning.dash_time_for_upwards_cancel;
        let cut = &mut state.dash.cut;

        if state.kinematics.vertical > 0.0 {
            state.kinematics.vertical = if cut.elapsed < cancel_time {
                curves::lerp(cut.release_speed, 0.0, cut.elapsed / cancel_time)
            } else {
                state.kinematics.vertical + gravity * dt
            };
            cut.elapsed += dt;
        } else {
            state.kinematics.vertical += gravity * dt;
        }
    }
}

fn finish(state: &mut MotionState) {
    if state.contact.grounded {
        state.reset_dashes();
    }

    state.dash.air_dashing = false;
    state.dash.dashing = false;

    if state.launch == Launch::None {
        let cut = &mut state.dash.cut;
        cut.elapsed = 0.0;
        cut.release_speed = state.kinematics.vertical;
        cut.active = !state.contact.grounded;
    }

    debug!("Dash finished: dashes_used={}", state.dash.dashes_used);
}
