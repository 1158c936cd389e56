//! Motion domain: platformer character controller and its Bevy host.
//!
//! The controller itself ([`MotionController`]) is plain data driven by two
//! calls per frame and knows nothing about the ECS. The systems in this module
//! feed it keyboard input and avian2d shape casts and apply its velocity.

mod arc;
mod bootstrap;
mod components;
mod controller;
mod curves;
mod dash;
#[cfg(feature = "dev-tools")]
mod dev;
mod horizontal;
mod input;
mod jump;
mod loader;
mod probe;
mod state;
mod systems;
mod timers;
mod tuning;
mod wall;

pub use arc::{arc_time_step, preview_jump_arc};
pub use bootstrap::{PIXELS_PER_UNIT, PLAYER_SIZE};
pub use components::{CastRecord, GameLayer, Ground, Player, ProbeCasts, Wall};
pub use controller::{Initiation, MotionController};
pub use dash::{DASH_DIRECTIONS, DashKind, quantize_direction};
pub use horizontal::MoveProfile;
pub use input::InputSnapshot;
pub use jump::JumpKind;
pub use loader::{TUNING_PATH, TuningLoadError, load_tuning, tuning_from_str};
pub use probe::CollisionProbe;
pub use state::{
    ApexHang, CancelCurve, Contact, DashRegion, Facing, JumpRegion, Kinematics, Launch,
    MotionState, WallRegion,
};
pub use timers::TimerBank;
pub use tuning::{
    ArcPreview, DebugDraw, DerivedMotion, InvalidTuning, MotionStats, MotionTuning,
    ProbeGeometry, TuningError, VERTICAL_SPEED_CEILING,
};

use bevy::prelude::*;

use crate::motion::bootstrap::{setup_camera, spawn_player};
use crate::motion::loader::load_motion_tuning;
use crate::motion::systems::{
    consume_input_edges, face_sprite, probe_collisions, read_input, run_logic_phase,
    run_physics_phase,
};

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionTuning>()
            .init_resource::<InputSnapshot>()
            .register_type::<MotionStats>()
            .add_systems(
                Startup,
                (load_motion_tuning, setup_camera, spawn_player).chain(),
            )
            .add_systems(
                Update,
                (read_input, run_logic_phase, consume_input_edges, face_sprite).chain(),
            )
            .add_systems(FixedUpdate, (probe_collisions, run_physics_phase).chain());

        #[cfg(feature = "dev-tools")]
        {
            use crate::motion::dev::{
                draw_jump_arcs, draw_probe_gizmos, spawn_test_room, toggle_debug_draw,
            };

            app.add_systems(Startup, spawn_test_room).add_systems(
                Update,
                (toggle_debug_draw, draw_probe_gizmos, draw_jump_arcs).chain(),
            );
        }
    }
}
