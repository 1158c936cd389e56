//! Motion domain: system modules for the host layer.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod motion;

pub(crate) use collisions::probe_collisions;
pub(crate) use input::read_input;
pub(crate) use motion::{consume_input_edges, face_sprite, run_logic_phase, run_physics_phase};
