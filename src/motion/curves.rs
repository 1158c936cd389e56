//! Motion domain: vertical integration curves shared by every launch regime.

use super::state::{ApexHang, CancelCurve};

/// Velocity written once the apex hang runs out, so the next tick falls.
pub const APEX_RELEASE_VELOCITY: f32 = -0.01;

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Where `value` sits between `from` and `to`, clamped to `[0, 1]`.
pub fn inverse_lerp(from: f32, to: f32, value: f32) -> f32 {
    if from == to {
        return 0.0;
    }
    ((value - from) / (to - from)).clamp(0.0, 1.0)
}

/// Settings for one ascending regime.
#[derive(Debug, Clone, Copy)]
pub struct Ascent {
    /// Speed at which apex progress is zero.
    pub launch_speed: f32,
    pub gravity: f32,
    pub apex_threshold: f32,
    pub apex_hang_time: f32,
}

/// Integrate an ascending, uncut launch. Once apex progress crosses the
/// threshold the velocity is held at zero for the hang time, then nudged
/// negative.
pub fn step_ascent(apex: &mut ApexHang, vertical: f32, ascent: Ascent, dt: f32) -> f32 {
    let progress = inverse_lerp(ascent.launch_speed, 0.0, vertical);

    if progress > ascent.apex_threshold {
        if !apex.past_threshold {
            apex.past_threshold = true;
            apex.elapsed = 0.0;
        }

        let hanging = apex.elapsed < ascent.apex_hang_time;
        apex.elapsed += dt;

        if hanging { 0.0 } else { APEX_RELEASE_VELOCITY }
    } else {
        apex.past_threshold = false;
        vertical + ascent.gravity * dt
    }
}

/// Advance an active cancel curve by one tick.
pub fn step_cancel(
    curve: &mut CancelCurve,
    vertical: f32,
    gravity: f32,
    cancel_time: f32,
    dt: f32,
) -> f32 {
    let next = if curve.elapsed >= cancel_time {
        vertical + gravity * dt
    } else {
        lerp(curve.release_speed, 0.0, curve.elapsed / cancel_time)
    };

    curve.elapsed += dt;
    next
}

/// Cut an ascending launch short. Past the apex threshold the velocity snaps
/// to zero and the curve skips straight to gravity.
pub fn cut_ascent(apex: &mut ApexHang, curve: &mut CancelCurve, vertical: &mut f32, cancel_time: f32) {
    if apex.past_threshold {
        apex.past_threshold = false;
        curve.skip_to_gravity(cancel_time);
        *vertical = 0.0;
    } else {
        curve.release_from(*vertical);
    }
}

/// Response to hitting a ceiling: stop rising now, then fall.
pub fn bump_head(curve: &mut CancelCurve, vertical: f32, cancel_time: f32) {
    if curve.active {
        return;
    }
    if vertical > 0.0 {
        curve.release_from(0.0);
    } else {
        curve.skip_to_gravity(cancel_time);
    }
}
