//! Motion domain: the orchestrator that sequences the subsystems each tick.

use bevy::prelude::*;

use super::dash::{self, DashKind};
use super::horizontal;
use super::input::InputSnapshot;
use super::jump::{self, JumpKind};
use super::probe::CollisionProbe;
use super::state::{Facing, MotionState};
use super::tuning::{MotionTuning, VERTICAL_SPEED_CEILING};
use super::wall;

/// The single state transition a logic tick started, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initiation {
    Jump(JumpKind),
    WallJump,
    Dash(DashKind),
}

/// Owns one body's [`MotionState`] and advances it.
///
/// [`MotionController::logic_tick`] runs once per rendered frame and resolves
/// transitions; [`MotionController::physics_tick`] runs at the fixed timestep
/// and produces the velocity.
#[derive(Component, Debug, Clone, Default)]
pub struct MotionController {
    state: MotionState,
}

impl MotionController {
    pub fn new(facing: Facing) -> Self {
        let mut state = MotionState::default();
        state.kinematics.facing = facing;
        Self { state }
    }

    pub fn state(&self) -> &MotionState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut MotionState {
        &mut self.state
    }

    pub fn velocity(&self) -> Vec2 {
        self.state.velocity()
    }

    pub fn facing(&self) -> Facing {
        self.state.kinematics.facing
    }

    /// Advance timers and resolve this tick's transitions.
    ///
    /// At most one of jump, wall jump and dash starts per tick, in the order
    /// dash, wall jump, jump.
    pub fn logic_tick(
        &mut self,
        tuning: &MotionTuning,
        input: &InputSnapshot,
        dt: f32,
    ) -> Option<Initiation> {
        let state = &mut self.state;

        let arm_post_buffer = state.should_arm_wall_jump_buffer();
        state
            .timers
            .advance(dt, state.contact.grounded, arm_post_buffer, tuning);

        jump::handle_input(state, tuning, input);
        wall::release_check(state, tuning, input);
        jump::land_check(state, tuning);
        wall::slide_check(state, tuning);

        if let Some(kind) = dash::dash_ready(state, tuning, input) {
            dash::initiate(state, tuning, input, kind);
            return Some(Initiation::Dash(kind));
        }

        if wall::wall_jump_ready(state, input) {
            wall::initiate_wall_jump(state, tuning);
            return Some(Initiation::WallJump);
        }

        jump::try_initiate(state, tuning).map(Initiation::Jump)
    }

    /// Refresh contact, integrate every regime in order and return the
    /// clamped velocity.
    pub fn physics_tick(
        &mut self,
        tuning: &MotionTuning,
        probe: &CollisionProbe,
        input: &InputSnapshot,
        dt: f32,
    ) -> Vec2 {
        let state = &mut self.state;

        state.contact.refresh(probe);

        jump::integrate(state, tuning, dt);
        jump::integrate_free_fall(state, tuning, dt);
        wall::integrate_slide(state, tuning, dt);
        wall::integrate_wall_jump(state, tuning, dt);
        dash::integrate(state, tuning, dt);
        if let Some(facing) = horizontal::integrate(state, tuning, input, dt) {
            trace!("Turned to face {:?}", facing);
        }

        let floor = if state.dash.dashing {
            -VERTICAL_SPEED_CEILING
        } else {
            -tuning.max_fall_speed
        };
        state.kinematics.vertical = state
            .kinematics
            .vertical
            .clamp(floor, VERTICAL_SPEED_CEILING);

        state.velocity()
    }
}
