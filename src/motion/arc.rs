//! Motion domain: jump-arc preview for tuning sessions.

use bevy::prelude::*;

use super::controller::MotionController;
use super::input::InputSnapshot;
use super::probe::CollisionProbe;
use super::state::Facing;
use super::tuning::MotionTuning;

/// Time step used when sampling a preview arc: `resolution` samples across a
/// full rise-and-fall of a ground jump.
pub fn arc_time_step(tuning: &MotionTuning) -> f32 {
    tuning.time_till_jump_apex * 2.0 / tuning.arc.resolution.max(1) as f32
}

/// Positions, relative to the take-off point, of a full-height ground jump
/// taken at top walk or run speed with the stick held forward. The body is
/// treated as airborne after take-off, so the arc never lands by itself.
pub fn preview_jump_arc(
    tuning: &MotionTuning,
    run: bool,
    facing: Facing,
    steps: u32,
    dt: f32,
) -> Vec<Vec2> {
    let max_speed = if run {
        tuning.max_run_speed
    } else {
        tuning.max_walk_speed
    };

    let hold = InputSnapshot {
        movement: facing.unit(),
        jump_held: true,
        run_held: run,
        ..default()
    };
    let press = InputSnapshot {
        jump_pressed: true,
        ..hold
    };

    let mut controller = MotionController::new(facing);
    controller.state_mut().contact.grounded = true;
    controller.state_mut().kinematics.horizontal = facing.sign() * max_speed;
    controller.logic_tick(tuning, &press, dt);

    let airborne = CollisionProbe::airborne();
    let mut position = Vec2::ZERO;
    let mut points = Vec::with_capacity(steps as usize + 1);
    points.push(position);

    for _ in 0..steps {
        let velocity = controller.physics_tick(tuning, &airborne, &hold, dt);
        position += velocity * dt;
        points.push(position);
        controller.logic_tick(tuning, &hold, dt);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_rises_then_falls() {
        let tuning = MotionTuning::default();
        let dt = arc_time_step(&tuning);
        let points = preview_jump_arc(&tuning, false, Facing::Right, 90, dt);

        assert_eq!(points.len(), 91);
        assert_eq!(points[0], Vec2::ZERO);

        let peak = points.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert!(peak > 0.0);
        assert!(points.last().unwrap().y < peak);
        assert!(points.windows(2).all(|w| w[1].x >= w[0].x));
    }

    #[test]
    fn test_run_arc_travels_further() {
        let tuning = MotionTuning::default();
        let dt = arc_time_step(&tuning);

        let walk = preview_jump_arc(&tuning, false, Facing::Left, 40, dt);
        let run = preview_jump_arc(&tuning, true, Facing::Left, 40, dt);

        assert!(run.last().unwrap().x < walk.last().unwrap().x);
        assert!(walk.last().unwrap().x < 0.0);
    }

    #[test]
    fn test_peak_is_close_to_tuned_height() {
        let tuning = MotionTuning::default();
        let points = preview_jump_arc(&tuning, false, Facing::Right, 400, 0.002);

        let peak = points.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let target = tuning.derived().adjusted_jump_height;
        assert!((peak - target).abs() < target * 0.1, "peak {peak} vs {target}");
    }
}
