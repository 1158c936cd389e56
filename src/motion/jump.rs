//! Motion domain: buffered/coyote jumping, multi-jump, landing and free fall.

use bevy::prelude::*;

use super::curves::{self, Ascent};
use super::input::InputSnapshot;
use super::state::{Launch, MotionState};
use super::tuning::MotionTuning;

/// Which guard let a buffered jump through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// From the ground or inside the coyote window.
    Grounded,
    /// Another jump while already moving through the air.
    Multi,
    /// Walked off a ledge and the coyote window lapsed; spends two credits.
    CoyoteLapsed,
}

/// Handle this tick's jump press and release edges.
pub fn handle_input(state: &mut MotionState, tuning: &MotionTuning, input: &InputSnapshot) {
    if input.jump_pressed {
        on_jump_pressed(state, tuning);
    }
    if input.jump_released {
        on_jump_released(state, tuning);
    }
}

fn on_jump_pressed(state: &mut MotionState, tuning: &MotionTuning) {
    // Wall contact hands the press to the wall-jump path instead.
    if state.wall.slide_falling && state.timers.wall_jump_post_buffer >= 0.0 {
        return;
    }
    if state.wall.sliding || (state.contact.touching_wall && !state.contact.grounded) {
        return;
    }

    state.timers.jump_buffer = tuning.jump_buffer_time;
    state.timers.jump_released_during_buffer = false;
}

fn on_jump_released(state: &mut MotionState, tuning: &MotionTuning) {
    if state.timers.jump_buffered() {
        state.timers.jump_released_during_buffer = true;
    }

    if state.is_jumping() && state.kinematics.vertical > 0.0 {
        curves::cut_ascent(
            &mut state.jump.apex,
            &mut state.jump.cut,
            &mut state.kinematics.vertical,
            tuning.time_for_upwards_cancel,
        );
    }
}

/// Fire a buffered jump if any guard allows it. Guards are tried in priority
/// order and the first match wins.
pub fn try_initiate(state: &mut MotionState, tuning: &MotionTuning) -> Option<JumpKind> {
    if !state.timers.jump_buffered() {
        return None;
    }

    let allowed = tuning.number_of_jumps_allowed;
    let used = state.jump.jumps_used;

    let moving_through_air = state.is_jumping()
        || state.is_wall_jumping()
        || state.wall.slide_falling
        || state.dash.air_dashing
        || state.is_dash_fast_falling();

    if !state.is_jumping() && (state.contact.grounded || state.timers.in_coyote_window()) {
        initiate(state, tuning, 1);

        if state.timers.jump_released_during_buffer {
            state.timers.jump_released_during_buffer = false;
            state.jump.cut.release_from(state.kinematics.vertical);
        }

        debug!("Jump: grounded/coyote, jumps_used={}", state.jump.jumps_used);
        Some(JumpKind::Grounded)
    } else if moving_through_air && !state.contact.touching_wall && used < allowed {
        initiate(state, tuning, 1);

        debug!("Jump: multi, jumps_used={}", state.jump.jumps_used);
        Some(JumpKind::Multi)
    } else if state.jump.falling && !state.wall.slide_falling && used + 1 < allowed {
        initiate(state, tuning, 2);

        debug!("Jump: coyote lapsed, jumps_used={}", state.jump.jumps_used);
        Some(JumpKind::CoyoteLapsed)
    } else {
        None
    }
}

fn initiate(state: &mut MotionState, tuning: &MotionTuning, credits: u32) {
    state.reset_wall_jump_values();
    state.launch = Launch::Jump;
    state.jump.falling = false;
    state.jump.cut.clear();
    state.jump.apex = Default::default();
    state.dash.cut.clear();

    state.timers.jump_buffer = 0.0;
    state.add_jumps_used(credits, tuning.number_of_jumps_allowed);
    state.kinematics.vertical = tuning.derived().initial_jump_velocity;
}

/// Close out every airborne regime on touching down. Returns true on the
/// landing tick.
pub fn land_check(state: &mut MotionState, tuning: &MotionTuning) -> bool {
    if !(state.is_airborne_regime()
        && state.contact.grounded
        && state.kinematics.vertical <= 0.0)
    {
        return false;
    }

    state.reset_jump_values();
    state.stop_wall_slide(tuning.number_of_jumps_allowed);
    state.reset_wall_jump_values();
    state.reset_dashes();
    state.reset_dash_values();
    state.jump.jumps_used = 0;
    state.kinematics.vertical = tuning.ambient_gravity;

    debug!("Landed: jumps and dashes restored");
    true
}

/// Vertical integration while a jump owns gravity.
pub fn integrate(state: &mut MotionState, tuning: &MotionTuning, dt: f32) {
    if !state.is_jumping() {
        return;
    }

    let derived = tuning.derived();
    let release_gravity = derived.gravity * tuning.gravity_on_release_multiplier;

    if state.contact.bumped_head {
        curves::bump_head(
            &mut state.jump.cut,
            state.kinematics.vertical,
            tuning.time_for_upwards_cancel,
        );
    }

    let vertical = state.kinematics.vertical;

    state.kinematics.vertical = if state.jump.cut.active {
        let next = curves::step_cancel(
            &mut state.jump.cut,
            vertical,
            release_gravity,
            tuning.time_for_upwards_cancel,
            dt,
        );
        if next < 0.0 {
            state.jump.falling = true;
        }
        next
    } else if vertical >= 0.0 {
        curves::step_ascent(
            &mut state.jump.apex,
            vertical,
            Ascent {
                launch_speed: derived.initial_jump_velocity,
                gravity: derived.gravity,
                apex_threshold: tuning.apex_threshold,
                apex_hang_time: tuning.apex_hang_time,
            },
            dt,
        )
    } else {
        vertical + release_gravity * dt
    };
}

/// Plain gravity when nothing else owns the vertical axis.
pub fn integrate_free_fall(state: &mut MotionState, tuning: &MotionTuning, dt: f32) {
    if state.contact.grounded
        || state.launch != Launch::None
        || state.wall.sliding
        || state.dash.dashing
        || state.is_dash_fast_falling()
    {
        return;
    }

    state.jump.falling = true;
    state.kinematics.vertical += tuning.derived().gravity * dt;
}
