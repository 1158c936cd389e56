//! Motion domain: debug-only room, probe gizmos and jump-arc preview.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::{
    CastRecord, Facing, GameLayer, Ground, MotionTuning, Player, ProbeCasts, Wall, arc_time_step,
    preview_jump_arc,
};

const HIT_COLOR: Color = Color::srgb(0.2, 0.9, 0.3);
const MISS_COLOR: Color = Color::srgb(0.9, 0.2, 0.2);
const WALK_ARC_COLOR: Color = Color::srgb(0.3, 0.7, 1.0);
const RUN_ARC_COLOR: Color = Color::srgb(1.0, 0.6, 0.2);

pub(crate) fn spawn_test_room(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    let mut block = |marker_is_wall: bool, color: Color, size: Vec2, at: Vec2| {
        let mut entity = commands.spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(at.x, at.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        ));
        if marker_is_wall {
            entity.insert((Wall, wall_layers));
        } else {
            entity.insert((Ground, ground_layers));
        }
    };

    // Floor
    block(false, ground_color, Vec2::new(40.0, 1.0), Vec2::new(0.0, -6.0));

    // Outer walls
    block(true, wall_color, Vec2::new(1.0, 24.0), Vec2::new(-20.5, 5.5));
    block(true, wall_color, Vec2::new(1.0, 24.0), Vec2::new(20.5, 5.5));

    // Platforms at single, double and wall-assisted jump heights
    block(false, platform_color, Vec2::new(5.0, 0.5), Vec2::new(-10.0, -1.0));
    block(false, platform_color, Vec2::new(5.0, 0.5), Vec2::new(10.0, 4.0));
    block(false, platform_color, Vec2::new(4.0, 0.5), Vec2::new(0.0, 9.0));

    // Pillar for wall jumping practice
    block(true, wall_color, Vec2::new(1.0, 7.0), Vec2::new(-4.0, -2.0));
}

/// F1 toggles the probe boxes, F2 the jump arcs.
pub(crate) fn toggle_debug_draw(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut tuning: ResMut<MotionTuning>,
) {
    let result = if keyboard.just_pressed(KeyCode::F1) {
        tuning.update(|stats| {
            let show = !stats.debug.show_ground_box;
            stats.debug.show_ground_box = show;
            stats.debug.show_head_box = show;
            stats.debug.show_wall_box = show;
        })
    } else if keyboard.just_pressed(KeyCode::F2) {
        tuning.update(|stats| {
            let show = !stats.arc.show_walk_arc;
            stats.arc.show_walk_arc = show;
            stats.arc.show_run_arc = show;
        })
    } else {
        return;
    };

    match result {
        Ok(()) => info!(
            "Debug draw: probes={}, arcs={}",
            tuning.debug.show_ground_box, tuning.arc.show_walk_arc
        ),
        Err(e) => warn!("Debug toggle rejected: {}", e),
    }
}

fn draw_cast(gizmos: &mut Gizmos, cast: &CastRecord) {
    let color = if cast.hit { HIT_COLOR } else { MISS_COLOR };
    let end = cast.origin + cast.direction * cast.distance;
    gizmos.rect_2d(cast.origin, cast.size, color);
    gizmos.rect_2d(end, cast.size, color);
    gizmos.line_2d(cast.origin, end, color);
}

pub(crate) fn draw_probe_gizmos(
    mut gizmos: Gizmos,
    tuning: Res<MotionTuning>,
    query: Query<&ProbeCasts, With<Player>>,
) {
    let debug = &tuning.debug;
    if !(debug.show_ground_box || debug.show_head_box || debug.show_wall_box) {
        return;
    }

    for casts in &query {
        if debug.show_ground_box {
            draw_cast(&mut gizmos, &casts.ground);
        }
        if debug.show_head_box {
            draw_cast(&mut gizmos, &casts.head);
        }
        if debug.show_wall_box {
            draw_cast(&mut gizmos, &casts.wall);
        }
    }
}

/// Cut `points` at the first segment that hits world geometry.
fn stop_at_first_hit(
    spatial_query: &SpatialQuery,
    filter: &SpatialQueryFilter,
    points: Vec<Vec2>,
) -> Vec<Vec2> {
    let mut kept = Vec::with_capacity(points.len());
    let Some(&first) = points.first() else {
        return kept;
    };
    kept.push(first);

    for segment in points.windows(2) {
        let (from, to) = (segment[0], segment[1]);
        let Ok((direction, length)) = Dir2::new_and_length(to - from) else {
            kept.push(to);
            continue;
        };

        if let Some(hit) = spatial_query.cast_ray(from, direction, length, true, filter) {
            kept.push(from + direction * hit.distance);
            break;
        }
        kept.push(to);
    }

    kept
}

pub(crate) fn draw_jump_arcs(
    mut gizmos: Gizmos,
    spatial_query: SpatialQuery,
    tuning: Res<MotionTuning>,
    query: Query<(&Transform, &Collider), With<Player>>,
) {
    let arc = &tuning.arc;
    if !(arc.show_walk_arc || arc.show_run_arc) {
        return;
    }

    let facing = if arc.draw_right {
        Facing::Right
    } else {
        Facing::Left
    };
    let dt = arc_time_step(&tuning);
    let filter = SpatialQueryFilter::from_mask(GameLayer::WORLD);

    for (transform, collider) in &query {
        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 1.0,
        };
        let feet = transform.translation.truncate() - Vec2::new(0.0, half_height);

        for (show, run, color) in [
            (arc.show_walk_arc, false, WALK_ARC_COLOR),
            (arc.show_run_arc, true, RUN_ARC_COLOR),
        ] {
            if !show {
                continue;
            }

            let points: Vec<Vec2> = preview_jump_arc(&tuning, run, facing, arc.steps, dt)
                .into_iter()
                .map(|p| feet + p)
                .collect();
            let points = if arc.stop_on_collision {
                stop_at_first_hit(&spatial_query, &filter, points)
            } else {
                points
            };

            gizmos.linestrip_2d(points, color);
        }
    }
}
