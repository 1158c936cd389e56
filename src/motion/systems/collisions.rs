//! Motion domain: ground, head and wall probes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::{
    CastRecord, CollisionProbe, GameLayer, MotionController, MotionTuning, Player, ProbeCasts,
};

/// Box-cast a `size` rectangle from `origin` along `direction`.
fn box_cast(
    spatial_query: &SpatialQuery,
    filter: &SpatialQueryFilter,
    origin: Vec2,
    size: Vec2,
    direction: Dir2,
    distance: f32,
) -> (CastRecord, Option<ShapeHitData>) {
    let shape = Collider::rectangle(size.x, size.y);
    let config = ShapeCastConfig::from_max_distance(distance);
    let hit = spatial_query.cast_shape(&shape, origin, 0.0, direction, &config, filter);

    let record = CastRecord {
        origin,
        size,
        direction: direction.as_vec2(),
        distance,
        hit: hit.is_some(),
    };
    (record, hit)
}

pub(crate) fn probe_collisions(
    spatial_query: SpatialQuery,
    tuning: Res<MotionTuning>,
    mut query: Query<
        (
            &Transform,
            &Collider,
            &MotionController,
            &mut CollisionProbe,
            &mut ProbeCasts,
        ),
        With<Player>,
    >,
) {
    let filter = SpatialQueryFilter::from_mask(GameLayer::WORLD);
    let geometry = &tuning.probe;

    for (transform, collider, controller, mut probe, mut casts) in &mut query {
        let half = match collider.shape_scaled().as_cuboid() {
            Some(c) => Vec2::new(c.half_extents.x, c.half_extents.y),
            None => Vec2::new(0.5, 1.0),
        };
        let center = transform.translation.truncate();
        let size = half * 2.0;

        let (ground, ground_hit) = box_cast(
            &spatial_query,
            &filter,
            center - Vec2::new(0.0, half.y),
            Vec2::new(size.x * geometry.feet_width, geometry.ground_ray_length),
            Dir2::NEG_Y,
            geometry.ground_ray_length,
        );

        let (head, head_hit) = box_cast(
            &spatial_query,
            &filter,
            center + Vec2::new(0.0, half.y),
            Vec2::new(size.x * geometry.head_width, geometry.head_ray_length),
            Dir2::Y,
            geometry.head_ray_length,
        );

        let facing = controller.facing();
        let wall_direction = if facing.is_right() {
            Dir2::X
        } else {
            Dir2::NEG_X
        };
        let (wall, wall_hit) = box_cast(
            &spatial_query,
            &filter,
            center + Vec2::new(facing.sign() * half.x, 0.0),
            Vec2::new(
                geometry.wall_ray_length,
                size.y * geometry.wall_ray_height_multiplier,
            ),
            wall_direction,
            geometry.wall_ray_length,
        );

        let next = CollisionProbe {
            grounded: ground_hit.is_some(),
            head_bumped: head_hit.is_some(),
            touching_wall: wall_hit.is_some(),
            wall_contact_point: wall_hit.map(|hit| hit.point1),
            body_center: center,
        };

        if next.grounded != probe.grounded {
            debug!("Ground contact: grounded={}", next.grounded);
        }
        if next.touching_wall != probe.touching_wall {
            debug!(
                "Wall contact: touching={}, facing={:?}",
                next.touching_wall, facing
            );
        }

        *probe = next;
        *casts = ProbeCasts { ground, head, wall };
    }
}
