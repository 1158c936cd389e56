//! Motion domain: wall slide, wall jump and the post-wall jump window.

use bevy::prelude::*;

use super::curves::{self, Ascent};
use super::input::InputSnapshot;
use super::state::{Launch, MotionState};
use super::tuning::MotionTuning;

/// Enter, keep or leave a wall slide based on this tick's contact.
pub fn slide_check(state: &mut MotionState, tuning: &MotionTuning) {
    let contact = state.contact;
    let allowed = tuning.number_of_jumps_allowed;

    if contact.touching_wall && !contact.grounded && !state.dash.dashing {
        if state.kinematics.vertical < 0.0 && !state.wall.sliding {
            state.reset_jump_values();
            state.reset_wall_jump_values();
            state.reset_dash_values();

            if tuning.reset_dash_on_wall_slide {
                state.reset_dashes();
            }

            state.wall.slide_falling = false;
            state.wall.sliding = true;

            if tuning.reset_jumps_on_wall_slide {
                state.jump.jumps_used = 0;
            }

            debug!(
                "Wall slide started: jumps_used={}, dashes_used={}",
                state.jump.jumps_used, state.dash.dashes_used
            );
        }
    } else if state.wall.sliding
        && !contact.touching_wall
        && !contact.grounded
        && !state.wall.slide_falling
    {
        state.wall.slide_falling = true;
        state.stop_wall_slide(allowed);
    } else {
        state.stop_wall_slide(allowed);
    }
}

/// Ease fall speed toward the slide speed.
pub fn integrate_slide(state: &mut MotionState, tuning: &MotionTuning, dt: f32) {
    if !state.wall.sliding {
        return;
    }

    state.kinematics.vertical = curves::lerp(
        state.kinematics.vertical,
        -tuning.wall_slide_speed,
        tuning.wall_slide_deceleration * dt,
    );
}

/// Releasing jump during a rising wall jump away from the wall cuts it short.
pub fn release_check(state: &mut MotionState, tuning: &MotionTuning, input: &InputSnapshot) {
    if !(input.jump_released
        && !state.contact.grounded
        && !state.wall.sliding
        && !state.contact.touching_wall
        && state.is_wall_jumping())
    {
        return;
    }

    if state.kinematics.vertical > 0.0 {
        curves::cut_ascent(
            &mut state.wall.apex,
            &mut state.wall.cut,
            &mut state.kinematics.vertical,
            tuning.time_for_upwards_cancel,
        );
    }
}

/// A press inside the post-wall window wall-jumps regardless of contact.
pub fn wall_jump_ready(state: &MotionState, input: &InputSnapshot) -> bool {
    input.jump_pressed && state.timers.in_wall_jump_window()
}

/// +1 pushes right, -1 pushes left: always away from the last wall touched.
pub fn push_direction(state: &MotionState) -> f32 {
    match state.contact.last_wall_contact_point {
        Some(point) if point.x > state.contact.body_center.x => -1.0,
        Some(_) => 1.0,
        None => -state.kinematics.facing.sign(),
    }
}

pub fn initiate_wall_jump(state: &mut MotionState, tuning: &MotionTuning) {
    state.stop_wall_slide(tuning.number_of_jumps_allowed);
    state.reset_jump_values();
    state.reset_wall_jump_values();
    state.dash.cut.clear();

    state.launch = Launch::WallJump;
    state.wall.use_move_profile = true;
    state.timers.jump_buffer = 0.0;
    state.kinematics.vertical = tuning.derived().initial_wall_jump_velocity;

    let direction = push_direction(state);
    state.kinematics.horizontal = tuning.wall_jump_direction().x.abs() * direction;

    debug!(
        "Wall jump: direction={}, jumps_used={}",
        direction, state.jump.jumps_used
    );
}

/// Vertical integration while a wall jump owns gravity.
pub fn integrate_wall_jump(state: &mut MotionState, tuning: &MotionTuning, dt: f32) {
    if !state.is_wall_jumping() {
        return;
    }

    let derived = tuning.derived();

    state.wall.elapsed += dt;
    if state.wall.elapsed >= tuning.time_till_jump_apex {
        state.wall.use_move_profile = false;
    }

    if state.contact.bumped_head {
        state.wall.use_move_profile = false;
        curves::bump_head(
            &mut state.wall.cut,
            state.kinematics.vertical,
            tuning.time_for_upwards_cancel,
        );
    }

    let vertical = state.kinematics.vertical;

    state.kinematics.vertical = if state.wall.cut.active {
        let next = curves::step_cancel(
            &mut state.wall.cut,
            vertical,
            derived.wall_jump_gravity * tuning.wall_jump_gravity_on_release_multiplier,
            tuning.time_for_upwards_cancel,
            dt,
        );
        if next < 0.0 {
            state.wall.falling = true;
        }
        next
    } else if vertical >= 0.0 {
        curves::step_ascent(
            &mut state.wall.apex,
            vertical,
            Ascent {
                launch_speed: tuning.wall_jump_direction().y,
                gravity: derived.wall_jump_gravity,
                apex_threshold: tuning.apex_threshold,
                apex_hang_time: tuning.apex_hang_time,
            },
            dt,
        )
    } else {
        vertical + derived.wall_jump_gravity * dt
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn against_wall(tuning: &MotionTuning) -> MotionState {
        let mut state = MotionState::default();
        state.contact.touching_wall = true;
        state.contact.body_center = Vec2::new(0.0, 0.0);
        state.contact.last_wall_contact_point = Some(Vec2::new(0.5, 0.0));
        state.kinematics.vertical = -2.0;
        state.jump.jumps_used = tuning.number_of_jumps_allowed;
        state.dash.dashes_used = 1;
        state
    }

    /// Freshly launched off a right-hand wall and clear of it.
    fn wall_jumping(tuning: &MotionTuning) -> MotionState {
        let mut state = against_wall(tuning);
        initiate_wall_jump(&mut state, tuning);
        state.contact.touching_wall = false;
        state
    }

    #[test]
    fn test_descending_on_wall_enters_slide() {
        let tuning = MotionTuning::default();
        let mut state = against_wall(&tuning);
        state.launch = Launch::Jump;

        slide_check(&mut state, &tuning);

        assert!(state.wall.sliding);
        assert_eq!(state.launch, Launch::None);
        assert_eq!(state.jump.jumps_used, 0);
        assert_eq!(state.dash.dashes_used, 0);
    }

    #[test]
    fn test_slide_entry_respects_reset_options() {
        let mut tuning = MotionTuning::default();
        tuning
            .update(|stats| {
                stats.reset_jumps_on_wall_slide = false;
                stats.reset_dash_on_wall_slide = false;
            })
            .unwrap();
        let mut state = against_wall(&tuning);

        slide_check(&mut state, &tuning);

        assert!(state.wall.sliding);
        assert_eq!(state.jump.jumps_used, tuning.number_of_jumps_allowed);
        assert_eq!(state.dash.dashes_used, 1);
    }

    #[test]
    fn test_rising_on_wall_does_not_slide() {
        let tuning = MotionTuning::default();
        let mut state = against_wall(&tuning);
        state.kinematics.vertical = 3.0;

        slide_check(&mut state, &tuning);

        assert!(!state.wall.sliding);
    }

    #[test]
    fn test_losing_wall_becomes_slide_fall_and_spends_jump() {
        let tuning = MotionTuning::default();
        let mut state = against_wall(&tuning);
        slide_check(&mut state, &tuning);
        assert_eq!(state.jump.jumps_used, 0);

        state.contact.touching_wall = false;
        slide_check(&mut state, &tuning);

        assert!(!state.wall.sliding);
        assert!(state.wall.slide_falling);
        assert_eq!(state.jump.jumps_used, 1);
    }

    #[test]
    fn test_slide_exit_never_exceeds_jump_budget() {
        let mut tuning = MotionTuning::default();
        tuning
            .update(|stats| stats.reset_jumps_on_wall_slide = false)
            .unwrap();
        let mut state = against_wall(&tuning);
        slide_check(&mut state, &tuning);

        state.contact.grounded = true;
        slide_check(&mut state, &tuning);

        assert!(!state.wall.sliding);
        assert_eq!(state.jump.jumps_used, tuning.number_of_jumps_allowed);
    }

    #[test]
    fn test_slide_eases_toward_slide_speed() {
        let tuning = MotionTuning::default();
        let mut state = against_wall(&tuning);
        state.wall.sliding = true;
        state.kinematics.vertical = -20.0;

        integrate_slide(&mut state, &tuning, 0.01);

        let expected = curves::lerp(-20.0, -tuning.wall_slide_speed, 0.5);
        assert!((state.kinematics.vertical - expected).abs() < 1e-4);
    }

    #[test]
    fn test_wall_jump_pushes_away_from_right_wall() {
        let tuning = MotionTuning::default();
        let mut state = against_wall(&tuning);
        state.wall.sliding = true;

        initiate_wall_jump(&mut state, &tuning);

        assert!(state.is_wall_jumping());
        assert!(!state.wall.sliding);
        assert!(state.wall.use_move_profile);
        assert!(state.kinematics.horizontal < 0.0);
        assert_eq!(state.kinematics.horizontal, -20.0);
        assert_eq!(
            state.kinematics.vertical,
            tuning.derived().initial_wall_jump_velocity
        );
    }

    #[test]
    fn test_wall_jump_pushes_away_from_left_wall() {
        let tuning = MotionTuning::default();
        let mut state = against_wall(&tuning);
        state.contact.last_wall_contact_point = Some(Vec2::new(-0.5, 0.0));

        initiate_wall_jump(&mut state, &tuning);

        assert_eq!(state.kinematics.horizontal, 20.0);
    }

    #[test]
    fn test_wall_jump_ready_needs_window() {
        let mut state = MotionState::default();
        let input = InputSnapshot {
            jump_pressed: true,
            ..default()
        };

        assert!(!wall_jump_ready(&state, &input));
        state.timers.wall_jump_post_buffer = 0.05;
        assert!(wall_jump_ready(&state, &input));
    }

    #[test]
    fn test_release_cuts_rising_wall_jump() {
        let tuning = MotionTuning::default();
        let mut state = against_wall(&tuning);
        initiate_wall_jump(&mut state, &tuning);
        state.contact.touching_wall = false;

        let release = InputSnapshot {
            jump_released: true,
            ..default()
        };
        release_check(&mut state, &tuning, &release);

        assert!(state.wall.cut.active);
        assert_eq!(
            state.wall.cut.release_speed,
            tuning.derived().initial_wall_jump_velocity
        );
    }

    #[test]
    fn test_move_profile_expires_at_apex_time() {
        let tuning = MotionTuning::default();
        let mut state = against_wall(&tuning);
        initiate_wall_jump(&mut state, &tuning);
        state.contact.touching_wall = false;

        let dt = 0.02;
        let ticks = (tuning.time_till_jump_apex / dt).ceil() as usize + 1;
        for _ in 0..ticks {
            integrate_wall_jump(&mut state, &tuning, dt);
        }

        assert!(!state.wall.use_move_profile);
    }

    #[test]
    fn test_head_bump_ends_move_profile() {
        let tuning = MotionTuning::default();
        let mut state = against_wall(&tuning);
        initiate_wall_jump(&mut state, &tuning);
        state.contact.bumped_head = true;

        integrate_wall_jump(&mut state, &tuning, 0.02);

        assert!(!state.wall.use_move_profile);
        assert!(state.wall.cut.active);
        assert_eq!(state.kinematics.vertical, 0.0);
    }

    #[test]
    fn test_release_on_ground_does_not_cut() {
        let tuning = MotionTuning::default();
        let mut state = wall_jumping(&tuning);
        state.contact.grounded = true;

        let release = InputSnapshot {
            jump_released: true,
            ..default()
        };
        release_check(&mut state, &tuning, &release);

        assert!(!state.wall.cut.active);
        assert_eq!(
            state.kinematics.vertical,
            tuning.derived().initial_wall_jump_velocity
        );
    }

    #[test]
    fn test_ascent_uses_wall_jump_gravity() {
        let mut tuning = MotionTuning::default();
        tuning
            .update(|stats| stats.wall_jump_direction = (-20.0, 4.0))
            .unwrap();
        let derived = *tuning.derived();
        assert!(derived.wall_jump_gravity != derived.gravity);

        let mut state = wall_jumping(&tuning);
        let launch = state.kinematics.vertical;
        integrate_wall_jump(&mut state, &tuning, 0.01);
        let expected = launch + derived.wall_jump_gravity * 0.01;
        assert!((state.kinematics.vertical - expected).abs() < 1e-4);

        // Close enough to zero to count as apex against the launch velocity,
        // but not against the configured wall-jump height.
        state.kinematics.vertical = 0.5;
        integrate_wall_jump(&mut state, &tuning, 0.01);

        assert!(!state.wall.apex.past_threshold);
        let expected = 0.5 + derived.wall_jump_gravity * 0.01;
        assert!((state.kinematics.vertical - expected).abs() < 1e-4);
    }

    #[test]
    fn test_wall_jump_apex_hangs_then_releases() {
        let tuning = MotionTuning::default();
        let dt = 0.005;
        let mut state = wall_jumping(&tuning);
        state.kinematics.vertical = 0.1;

        let mut zero_ticks = 0;
        let mut released = None;
        for _ in 0..100 {
            integrate_wall_jump(&mut state, &tuning, dt);
            if state.kinematics.vertical == 0.0 {
                zero_ticks += 1;
            } else {
                released = Some(state.kinematics.vertical);
                break;
            }
        }

        assert!(
            zero_ticks as f32 * dt >= tuning.apex_hang_time - 1e-6,
            "hung for {zero_ticks} ticks"
        );
        assert_eq!(released, Some(curves::APEX_RELEASE_VELOCITY));
    }

    #[test]
    fn test_cut_eases_to_zero_then_falls_at_release_gravity() {
        let mut tuning = MotionTuning::default();
        tuning
            .update(|stats| {
                stats.time_for_upwards_cancel = 0.5;
                stats.wall_jump_gravity_on_release_multiplier = 3.0;
            })
            .unwrap();
        let mut state = wall_jumping(&tuning);
        let launch = state.kinematics.vertical;

        let release = InputSnapshot {
            jump_released: true,
            ..default()
        };
        release_check(&mut state, &tuning, &release);

        let dt = 0.125;
        for expected in [1.0, 0.75, 0.5, 0.25] {
            integrate_wall_jump(&mut state, &tuning, dt);
            assert!((state.kinematics.vertical - launch * expected).abs() < 1e-4);
        }
        assert!(!state.wall.falling);

        let before = state.kinematics.vertical;
        integrate_wall_jump(&mut state, &tuning, dt);

        let release_gravity = tuning.derived().wall_jump_gravity * 3.0;
        assert!((state.kinematics.vertical - (before + release_gravity * dt)).abs() < 1e-4);
        assert!(state.kinematics.vertical < 0.0);
        assert!(state.wall.falling);
    }

    #[test]
    fn test_descent_uses_unmultiplied_wall_jump_gravity() {
        let mut tuning = MotionTuning::default();
        tuning
            .update(|stats| stats.wall_jump_gravity_on_release_multiplier = 3.0)
            .unwrap();
        let mut state = wall_jumping(&tuning);
        state.kinematics.vertical = -2.0;

        integrate_wall_jump(&mut state, &tuning, 0.02);

        let expected = -2.0 + tuning.derived().wall_jump_gravity * 0.02;
        assert!((state.kinematics.vertical - expected).abs() < 1e-4);
        assert!(!state.wall.cut.active);
    }
}
