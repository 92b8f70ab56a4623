//! Move stage - linear integration with elastic bounce off the world bounds

use crate::core::types::{Vec2, WorldBounds};

/// Reflect one axis back inside `[min, max]`.
///
/// Both sides are checked independently so the result is always clamped.
#[inline]
fn bounce_axis(pos: &mut f32, vel: &mut f32, min: f32, max: f32) {
    if *pos < min {
        *vel = -*vel;
        *pos = min;
    }
    if *pos > max {
        *vel = -*vel;
        *pos = max;
    }
}

/// Advance every entity by `velocity * dt` and bounce it off `bounds`.
///
/// Runs over the whole population, hazards included, before the grid is
/// rebuilt.
pub fn move_entities(positions: &mut [Vec2], velocities: &mut [Vec2], bounds: &WorldBounds, dt: f32) {
    debug_assert_eq!(positions.len(), velocities.len());

    for (pos, vel) in positions.iter_mut().zip(velocities.iter_mut()) {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;

        bounce_axis(&mut pos.x, &mut vel.x, bounds.x_min, bounds.x_max);
        bounce_axis(&mut pos.y, &mut vel.y, bounds.y_min, bounds.y_max);
    }
}
