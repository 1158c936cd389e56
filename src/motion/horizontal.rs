//! Motion domain: horizontal speed smoothing and facing.

use super::curves;
use super::input::InputSnapshot;
use super::state::{Facing, MotionState};
use super::tuning::MotionTuning;

/// Acceleration/deceleration pair in effect this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveProfile {
    Ground,
    WallJump,
    Air,
}

impl MoveProfile {
    pub fn select(state: &MotionState) -> Self {
        if state.contact.grounded {
            Self::Ground
        } else if state.wall.use_move_profile {
            Self::WallJump
        } else {
            Self::Air
        }
    }

    pub fn rates(self, tuning: &MotionTuning) -> (f32, f32) {
        match self {
            Self::Ground => (tuning.ground_acceleration, tuning.ground_deceleration),
            Self::WallJump => (
                tuning.wall_jump_move_acceleration,
                tuning.wall_jump_move_deceleration,
            ),
            Self::Air => (tuning.air_acceleration, tuning.air_deceleration),
        }
    }
}

/// Returns the new facing if this tick turned the body around.
pub fn integrate(
    state: &mut MotionState,
    tuning: &MotionTuning,
    input: &InputSnapshot,
    dt: f32,
) -> Option<Facing> {
    if state.dash.dashing {
        return None;
    }

    let (acceleration, deceleration) = MoveProfile::select(state).rates(tuning);
    let x = input.movement.x;

    if x.abs() >= tuning.move_threshold {
        let turned = turn_check(state, x);

        let max_speed = if input.run_held {
            tuning.max_run_speed
        } else {
            tuning.max_walk_speed
        };

        state.kinematics.horizontal =
            curves::lerp(state.kinematics.horizontal, x * max_speed, acceleration * dt);
        turned
    } else {
        state.kinematics.horizontal =
            curves::lerp(state.kinematics.horizontal, 0.0, deceleration * dt);
        None
    }
}

fn turn_check(state: &mut MotionState, x: f32) -> Option<Facing> {
    let wanted = Facing::from_sign(x)?;
    if wanted == state.kinematics.facing {
        return None;
    }

    state.kinematics.facing = wanted;
    Some(wanted)
}
