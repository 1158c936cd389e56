//! Motion domain: the countdown timers advanced once per logic tick.

use super::tuning::MotionStats;

/// Countdown timers shared by the jump, wall and dash subsystems.
///
/// Values are allowed to go negative: a negative timer means "expired that
/// long ago", and every reader compares against zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimerBank {
    pub jump_buffer: f32,
    pub coyote: f32,
    pub wall_jump_post_buffer: f32,
    pub dash_ground_cooldown: f32,
    /// Jump was released while a press was still buffered.
    pub jump_released_during_buffer: bool,
}

impl TimerBank {
    /// `arm_post_buffer` is the "airborne and on or sliding down a wall"
    /// predicate; while it holds the wall-jump window stays fully open.
    pub fn advance(&mut self, dt: f32, grounded: bool, arm_post_buffer: bool, stats: &MotionStats) {
        self.jump_buffer -= dt;
        self.dash_ground_cooldown -= dt;

        if grounded {
            self.coyote = stats.jump_coyote_time;
        } else {
            self.coyote -= dt;
        }

        if arm_post_buffer {
            self.wall_jump_post_buffer = stats.wall_jump_post_buffer_time;
        } else {
            self.wall_jump_post_buffer -= dt;
        }
    }

    pub fn jump_buffered(&self) -> bool {
        self.jump_buffer > 0.0
    }

    pub fn in_coyote_window(&self) -> bool {
        self.coyote > 0.0
    }

    pub fn in_wall_jump_window(&self) -> bool {
        self.wall_jump_post_buffer > 0.0
    }

    pub fn ground_dash_ready(&self) -> bool {
        self.dash_ground_cooldown < 0.0
    }
}
