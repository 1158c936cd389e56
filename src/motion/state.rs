//! Motion domain: the mutable state of one controlled body.
//!
//! The state is split into orthogonal regions. Which launch (if any) owns the
//! vertical velocity is a single [`Launch`] tag, so a body can never be jumping
//! and wall jumping at once; slide, dash and fast-fall are overlays on top.

use bevy::prelude::*;

use super::probe::CollisionProbe;
use super::timers::TimerBank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn from_sign(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Self::Right)
        } else if x < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    pub fn unit(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    pub fn is_right(self) -> bool {
        self == Self::Right
    }
}

/// The launch currently shaping vertical velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Launch {
    #[default]
    None,
    Jump,
    WallJump,
}

/// Probe results copied in at the start of each physics tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contact {
    pub grounded: bool,
    pub bumped_head: bool,
    pub touching_wall: bool,
    pub body_center: Vec2,
    /// Survives losing contact; wall jumps push away from it.
    pub last_wall_contact_point: Option<Vec2>,
}

impl Contact {
    pub fn refresh(&mut self, probe: &CollisionProbe) {
        self.grounded = probe.grounded;
        self.bumped_head = probe.head_bumped;
        self.touching_wall = probe.touching_wall;
        self.body_center = probe.body_center;
        if probe.touching_wall {
            if let Some(point) = probe.wall_contact_point {
                self.last_wall_contact_point = Some(point);
            }
        }
    }
}

/// Upward-cancel curve shared by the jump, wall-jump and dash regimes:
/// velocity eases from `release_speed` to zero over the cancel duration, then
/// plain gravity takes over.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CancelCurve {
    pub active: bool,
    pub elapsed: f32,
    pub release_speed: f32,
}

impl CancelCurve {
    /// Start easing from `speed`.
    pub fn release_from(&mut self, speed: f32) {
        self.active = true;
        self.elapsed = 0.0;
        self.release_speed = speed;
    }

    /// Start directly in the gravity phase.
    pub fn skip_to_gravity(&mut self, cancel_time: f32) {
        self.active = true;
        self.elapsed = cancel_time;
        self.release_speed = 0.0;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Apex hang bookkeeping for one launch regime.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ApexHang {
    pub past_threshold: bool,
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpRegion {
    /// Airborne without a launch owning gravity.
    pub falling: bool,
    pub cut: CancelCurve,
    pub apex: ApexHang,
    pub jumps_used: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallRegion {
    pub sliding: bool,
    /// Left a slide without landing or jumping.
    pub slide_falling: bool,
    pub use_move_profile: bool,
    pub falling: bool,
    pub cut: CancelCurve,
    pub apex: ApexHang,
    /// Time since the wall jump started.
    pub elapsed: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashRegion {
    pub dashing: bool,
    pub air_dashing: bool,
    pub dashes_used: u32,
    pub direction: Vec2,
    pub elapsed: f32,
    /// Post-dash fast fall.
    pub cut: CancelCurve,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    pub horizontal: f32,
    pub vertical: f32,
    pub facing: Facing,
}

/// Everything the controller knows about one body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MotionState {
    pub launch: Launch,
    pub contact: Contact,
    pub jump: JumpRegion,
    pub wall: WallRegion,
    pub dash: DashRegion,
    pub timers: TimerBank,
    pub kinematics: Kinematics,
}

impl MotionState {
    pub fn is_jumping(&self) -> bool {
        self.launch == Launch::Jump
    }

    pub fn is_wall_jumping(&self) -> bool {
        self.launch == Launch::WallJump
    }

    pub fn is_dash_fast_falling(&self) -> bool {
        self.dash.cut.active
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.kinematics.horizontal, self.kinematics.vertical)
    }

    /// Airborne and either on a wall or sliding down one.
    pub fn should_arm_wall_jump_buffer(&self) -> bool {
        !self.contact.grounded && (self.contact.touching_wall || self.wall.sliding)
    }

    /// Any airborne regime that the landing check has to close out.
    pub fn is_airborne_regime(&self) -> bool {
        self.launch != Launch::None
            || self.jump.falling
            || self.wall.falling
            || self.wall.slide_falling
            || self.wall.sliding
            || self.dash.cut.active
    }

    pub fn add_jumps_used(&mut self, count: u32, allowed: u32) {
        self.jump.jumps_used = (self.jump.jumps_used + count).min(allowed);
    }

    pub fn add_dash_used(&mut self, allowed: u32) {
        self.dash.dashes_used = (self.dash.dashes_used + 1).min(allowed);
    }

    pub fn reset_jump_values(&mut self) {
        if self.launch == Launch::Jump {
            self.launch = Launch::None;
        }
        self.jump.falling = false;
        self.jump.cut.clear();
        self.jump.apex = ApexHang::default();
    }

    pub fn reset_wall_jump_values(&mut self) {
        if self.launch == Launch::WallJump {
            self.launch = Launch::None;
        }
        self.wall.slide_falling = false;
        self.wall.use_move_profile = false;
        self.wall.falling = false;
        self.wall.cut.clear();
        self.wall.apex = ApexHang::default();
        self.wall.elapsed = 0.0;
    }

    /// Leaving a slide spends the jump it granted.
    pub fn stop_wall_slide(&mut self, jumps_allowed: u32) {
        if self.wall.sliding {
            self.add_jumps_used(1, jumps_allowed);
            self.wall.sliding = false;
            debug!("Wall slide ended: jumps_used={}", self.jump.jumps_used);
        }
    }

    pub fn reset_dash_values(&mut self) {
        self.dash.cut.clear();
        self.timers.dash_ground_cooldown = -0.01;
    }

    pub fn reset_dashes(&mut self) {
        self.dash.dashes_used = 0;
    }
}
