//! Platformer character motion: a tight-feel 2D controller with buffered and
//! coyote jumps, wall slides and wall jumps, and an 8-direction dash.

pub mod motion;
