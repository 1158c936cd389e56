//! Motion domain: tunable parameters and the values derived from them.

use std::ops::Deref;

use bevy::prelude::*;
use serde::Deserialize;

/// Vertical speed ceiling applied on every physics tick.
pub const VERTICAL_SPEED_CEILING: f32 = 50.0;

/// Raw tunables, as authored in `movement.ron`.
///
/// Missing fields fall back to [`MotionStats::default`], so a tuning file only
/// needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize, Reflect)]
#[serde(default)]
pub struct MotionStats {
    // Walk
    pub move_threshold: f32,
    pub max_walk_speed: f32,
    pub ground_acceleration: f32,
    pub ground_deceleration: f32,
    pub air_acceleration: f32,
    pub air_deceleration: f32,
    pub wall_jump_move_acceleration: f32,
    pub wall_jump_move_deceleration: f32,

    // Run
    pub max_run_speed: f32,

    // Jump
    pub jump_height: f32,
    pub jump_height_compensation_factor: f32,
    pub time_till_jump_apex: f32,
    pub gravity_on_release_multiplier: f32,
    pub max_fall_speed: f32,
    pub number_of_jumps_allowed: u32,

    // Jump cut
    pub time_for_upwards_cancel: f32,

    // Jump apex
    pub apex_threshold: f32,
    pub apex_hang_time: f32,

    // Jump buffer / coyote
    pub jump_buffer_time: f32,
    pub jump_coyote_time: f32,

    pub reset_jumps_on_wall_slide: bool,

    // Wall slide
    pub wall_slide_speed: f32,
    pub wall_slide_deceleration: f32,

    // Wall jump
    /// Horizontal push magnitude and apex height of a wall jump.
    pub wall_jump_direction: (f32, f32),
    pub wall_jump_post_buffer_time: f32,
    pub wall_jump_gravity_on_release_multiplier: f32,

    // Dash
    pub dash_time: f32,
    pub dash_speed: f32,
    pub time_between_dashes_on_ground: f32,
    pub reset_dash_on_wall_slide: bool,
    pub number_of_dashes: u32,
    pub dash_diagonal_bias: f32,
    pub dash_gravity_on_release_multiplier: f32,
    pub dash_time_for_upwards_cancel: f32,

    /// Vertical velocity written on landing (resting-contact convention).
    pub ambient_gravity: f32,

    pub probe: ProbeGeometry,
    pub debug: DebugDraw,
    pub arc: ArcPreview,
}

impl Default for MotionStats {
    fn default() -> Self {
        Self {
            move_threshold: 0.25,
            max_walk_speed: 12.5,
            ground_acceleration: 5.0,
            ground_deceleration: 20.0,
            air_acceleration: 5.0,
            air_deceleration: 5.0,
            wall_jump_move_acceleration: 5.0,
            wall_jump_move_deceleration: 5.0,
            max_run_speed: 20.0,
            jump_height: 6.5,
            jump_height_compensation_factor: 1.054,
            time_till_jump_apex: 0.35,
            gravity_on_release_multiplier: 2.0,
            max_fall_speed: 26.0,
            number_of_jumps_allowed: 2,
            time_for_upwards_cancel: 0.027,
            apex_threshold: 0.97,
            apex_hang_time: 0.075,
            jump_buffer_time: 0.125,
            jump_coyote_time: 0.1,
            reset_jumps_on_wall_slide: true,
            wall_slide_speed: 5.0,
            wall_slide_deceleration: 50.0,
            wall_jump_direction: (-20.0, 6.5),
            wall_jump_post_buffer_time: 0.125,
            wall_jump_gravity_on_release_multiplier: 1.0,
            dash_time: 0.11,
            dash_speed: 40.0,
            time_between_dashes_on_ground: 0.225,
            reset_dash_on_wall_slide: true,
            number_of_dashes: 2,
            dash_diagonal_bias: 0.4,
            dash_gravity_on_release_multiplier: 1.0,
            dash_time_for_upwards_cancel: 0.027,
            ambient_gravity: -9.81,
            probe: ProbeGeometry::default(),
            debug: DebugDraw::default(),
            arc: ArcPreview::default(),
        }
    }
}

/// Shape-cast lengths and proportions used by the collision probe host.
#[derive(Debug, Clone, PartialEq, Deserialize, Reflect)]
#[serde(default)]
pub struct ProbeGeometry {
    /// Ground cast width as a fraction of body width; keeps a body flush
    /// against a wall from reading the wall as floor.
    pub feet_width: f32,
    pub ground_ray_length: f32,
    pub head_ray_length: f32,
    pub head_width: f32,
    pub wall_ray_length: f32,
    pub wall_ray_height_multiplier: f32,
}

impl Default for ProbeGeometry {
    fn default() -> Self {
        Self {
            feet_width: 0.9,
            ground_ray_length: 0.02,
            head_ray_length: 0.02,
            head_width: 0.75,
            wall_ray_length: 0.125,
            wall_ray_height_multiplier: 0.9,
        }
    }
}

/// Toggles for probe gizmos.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Reflect)]
#[serde(default)]
pub struct DebugDraw {
    pub show_ground_box: bool,
    pub show_head_box: bool,
    pub show_wall_box: bool,
}

/// Jump-arc visualisation settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Reflect)]
#[serde(default)]
pub struct ArcPreview {
    pub show_walk_arc: bool,
    pub show_run_arc: bool,
    pub stop_on_collision: bool,
    pub draw_right: bool,
    pub resolution: u32,
    pub steps: u32,
}

impl Default for ArcPreview {
    fn default() -> Self {
        Self {
            show_walk_arc: false,
            show_run_arc: false,
            stop_on_collision: true,
            draw_right: true,
            resolution: 20,
            steps: 90,
        }
    }
}

impl MotionStats {
    pub fn wall_jump_direction(&self) -> Vec2 {
        Vec2::new(self.wall_jump_direction.0, self.wall_jump_direction.1)
    }

    /// Check every tunable the integrator divides by or compares against.
    /// Returns all problems found, empty if the stats are usable.
    pub fn validate(&self) -> Vec<TuningError> {
        let mut errors = Vec::new();

        macro_rules! positive {
            ($($field:ident),+ $(,)?) => {
                $(
                    if !(self.$field.is_finite() && self.$field > 0.0) {
                        errors.push(TuningError::NotPositive {
                            field: stringify!($field),
                            value: self.$field,
                        });
                    }
                )+
            };
        }

        macro_rules! non_negative {
            ($($field:ident),+ $(,)?) => {
                $(
                    if !(self.$field.is_finite() && self.$field >= 0.0) {
                        errors.push(TuningError::Negative {
                            field: stringify!($field),
                            value: self.$field,
                        });
                    }
                )+
            };
        }

        macro_rules! unit_interval {
            ($($field:ident),+ $(,)?) => {
                $(
                    if !(self.$field > 0.0 && self.$field <= 1.0) {
                        errors.push(TuningError::OutsideUnitInterval {
                            field: stringify!($field),
                            value: self.$field,
                        });
                    }
                )+
            };
        }

        positive!(
            max_walk_speed,
            ground_acceleration,
            ground_deceleration,
            air_acceleration,
            air_deceleration,
            wall_jump_move_acceleration,
            wall_jump_move_deceleration,
            max_run_speed,
            jump_height,
            jump_height_compensation_factor,
            time_till_jump_apex,
            gravity_on_release_multiplier,
            max_fall_speed,
            time_for_upwards_cancel,
            apex_hang_time,
            wall_slide_speed,
            wall_slide_deceleration,
            wall_jump_gravity_on_release_multiplier,
            dash_time,
            dash_speed,
            dash_gravity_on_release_multiplier,
            dash_time_for_upwards_cancel,
            jump_buffer_time,
            wall_jump_post_buffer_time,
        );

        non_negative!(
            jump_coyote_time,
            time_between_dashes_on_ground,
            dash_diagonal_bias,
        );

        unit_interval!(move_threshold, apex_threshold);

        let probe = &self.probe;
        for (field, value) in [
            ("probe.feet_width", probe.feet_width),
            ("probe.head_width", probe.head_width),
            ("probe.wall_ray_height_multiplier", probe.wall_ray_height_multiplier),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(TuningError::OutsideUnitInterval { field, value });
            }
        }

        let (push, height) = self.wall_jump_direction;
        if !(push.is_finite() && height.is_finite() && height > 0.0) {
            errors.push(TuningError::NotPositive {
                field: "wall_jump_direction.y",
                value: height,
            });
        }

        if !self.ambient_gravity.is_finite() {
            errors.push(TuningError::NotFinite {
                field: "ambient_gravity",
                value: self.ambient_gravity,
            });
        }

        if self.number_of_jumps_allowed == 0 {
            errors.push(TuningError::NoJumpsAllowed);
        }

        errors
    }
}

/// A single tunable outside the range the integrator can handle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("{field} must be finite and greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite and non-negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must lie in (0, 1] (got {value})")]
    OutsideUnitInterval { field: &'static str, value: f32 },

    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },

    #[error("number_of_jumps_allowed must be at least 1")]
    NoJumpsAllowed,
}

/// Every problem found while validating a set of stats.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid movement tuning{}", list_errors(.0))]
pub struct InvalidTuning(pub Vec<TuningError>);

fn list_errors(errors: &[TuningError]) -> String {
    errors
        .iter()
        .map(|error| format!("\n  - {error}"))
        .collect()
}

/// Values computed from [`MotionStats`]; never authored directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMotion {
    pub adjusted_jump_height: f32,
    pub gravity: f32,
    pub initial_jump_velocity: f32,
    pub adjusted_wall_jump_height: f32,
    pub wall_jump_gravity: f32,
    pub initial_wall_jump_velocity: f32,
}

impl DerivedMotion {
    /// Gravity that reaches height `h` in time `t` is `-2h / t²`, and the
    /// launch speed that decelerates to zero over `t` is `|g| * t`.
    pub fn from_stats(stats: &MotionStats) -> Self {
        let apex_time = stats.time_till_jump_apex;

        let adjusted_jump_height = stats.jump_height * stats.jump_height_compensation_factor;
        let gravity = -(2.0 * adjusted_jump_height) / apex_time.powi(2);
        let initial_jump_velocity = gravity.abs() * apex_time;

        let adjusted_wall_jump_height =
            stats.wall_jump_direction.1 * stats.jump_height_compensation_factor;
        let wall_jump_gravity = -(2.0 * adjusted_wall_jump_height) / apex_time.powi(2);
        let initial_wall_jump_velocity = wall_jump_gravity.abs() * apex_time;

        Self {
            adjusted_jump_height,
            gravity,
            initial_jump_velocity,
            adjusted_wall_jump_height,
            wall_jump_gravity,
            initial_wall_jump_velocity,
        }
    }
}

/// Validated stats plus their derived values.
///
/// Reads go through `Deref` to [`MotionStats`]; writes go through
/// [`MotionTuning::update`] so the derived values can never go stale.
#[derive(Resource, Debug, Clone)]
pub struct MotionTuning {
    stats: MotionStats,
    derived: DerivedMotion,
}

impl Default for MotionTuning {
    fn default() -> Self {
        let stats = MotionStats::default();
        let derived = DerivedMotion::from_stats(&stats);
        Self { stats, derived }
    }
}

impl Deref for MotionTuning {
    type Target = MotionStats;

    fn deref(&self) -> &Self::Target {
        &self.stats
    }
}

impl MotionTuning {
    pub fn new(stats: MotionStats) -> Result<Self, InvalidTuning> {
        let errors = stats.validate();
        if !errors.is_empty() {
            return Err(InvalidTuning(errors));
        }

        let derived = DerivedMotion::from_stats(&stats);
        Ok(Self { stats, derived })
    }

    pub fn stats(&self) -> &MotionStats {
        &self.stats
    }

    pub fn derived(&self) -> &DerivedMotion {
        &self.derived
    }

    /// Apply an edit to the stats. The edit is rejected, and the current
    /// values kept, if the result fails validation.
    pub fn update(&mut self, edit: impl FnOnce(&mut MotionStats)) -> Result<(), InvalidTuning> {
        let mut stats = self.stats.clone();
        edit(&mut stats);
        *self = Self::new(stats)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats_are_valid() {
        assert!(MotionStats::default().validate().is_empty());
        assert!(MotionTuning::new(MotionStats::default()).is_ok());
    }

    #[test]
    fn test_derived_gravity_and_launch_speed() {
        let tuning = MotionTuning::default();
        let derived = tuning.derived();

        let h = 6.5 * 1.054;
        let t = 0.35_f32;
        assert!((derived.adjusted_jump_height - h).abs() < 1e-5);
        assert!((derived.gravity - (-2.0 * h / (t * t))).abs() < 1e-3);
        assert!((derived.initial_jump_velocity - derived.gravity.abs() * t).abs() < 1e-4);
        assert!(derived.gravity < 0.0);
        assert!(derived.wall_jump_gravity < 0.0);
    }

    #[test]
    fn test_zero_time_to_apex_is_rejected() {
        let stats = MotionStats {
            time_till_jump_apex: 0.0,
            ..default()
        };

        let err = MotionTuning::new(stats).unwrap_err();
        assert!(err.0.contains(&TuningError::NotPositive {
            field: "time_till_jump_apex",
            value: 0.0,
        }));
    }

    #[test]
    fn test_zero_buffer_is_rejected() {
        let stats = MotionStats {
            jump_buffer_time: 0.0,
            wall_jump_post_buffer_time: 0.0,
            ..default()
        };

        let errors = stats.validate();
        assert_eq!(
            errors,
            vec![
                TuningError::NotPositive {
                    field: "jump_buffer_time",
                    value: 0.0,
                },
                TuningError::NotPositive {
                    field: "wall_jump_post_buffer_time",
                    value: 0.0,
                },
            ]
        );
    }

    #[test]
    fn test_zero_coyote_and_cooldown_are_allowed() {
        let stats = MotionStats {
            jump_coyote_time: 0.0,
            time_between_dashes_on_ground: 0.0,
            ..default()
        };

        assert!(stats.validate().is_empty());
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let stats = MotionStats {
            dash_speed: f32::NAN,
            apex_threshold: 1.5,
            number_of_jumps_allowed: 0,
            jump_buffer_time: -0.1,
            ..default()
        };

        let errors = stats.validate();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&TuningError::NoJumpsAllowed));
    }

    #[test]
    fn test_update_recomputes_derived_values() {
        let mut tuning = MotionTuning::default();
        let before = tuning.derived().initial_jump_velocity;

        tuning
            .update(|stats| stats.jump_height *= 2.0)
            .expect("doubled jump height is valid");

        let after = tuning.derived().initial_jump_velocity;
        assert!((after - before * 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_rejected_update_keeps_previous_values() {
        let mut tuning = MotionTuning::default();

        let result = tuning.update(|stats| stats.time_till_jump_apex = -1.0);

        assert!(result.is_err());
        assert_eq!(tuning.time_till_jump_apex, 0.35);
        assert!(tuning.derived().gravity.is_finite());
    }

    #[test]
    fn test_invalid_tuning_display_lists_fields() {
        let err = InvalidTuning(vec![
            TuningError::NoJumpsAllowed,
            TuningError::NotPositive {
                field: "dash_time",
                value: 0.0,
            },
        ]);

        let message = err.to_string();
        assert!(message.starts_with("invalid movement tuning"));
        assert!(message.contains("\n  - number_of_jumps_allowed must be at least 1"));
        assert!(message.contains("\n  - dash_time must be finite"));
    }
}
