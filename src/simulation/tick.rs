//! Frame pipeline: move, rebuild hazard grid, resolve avoidance

use crate::core::error::Result;
use crate::ecs::world::World;
use crate::simulation::avoidance::{resolve_avoidance, AvoidanceParams};
use crate::simulation::movement::move_entities;

/// Advance the world by `dt` seconds. Returns hazard contacts resolved.
///
/// Order matters: the grid is built from hazard positions after this
/// frame's movement, and avoidance reads that grid.
pub fn run_frame(world: &mut World, dt: f32) -> Result<usize> {
    if !world.is_populated() {
        return Ok(0);
    }

    let regular_count = world.config.regular_count;
    let radius = world.config.avoid_radius;
    let bounds = world.config.bounds;

    // 1. Move everyone, hazards included
    let (positions, velocities, _) = world.store.columns_mut();
    move_entities(positions, velocities, &bounds, dt);

    // 2. Rebuild the grid from the hazard group
    let hazards = world
        .store
        .handles()
        .skip(regular_count)
        .map(|h| (h, world.store.positions[h.index()]));
    world.grid.rebuild(hazards, radius)?;

    // 3. Regular entities avoid the hazards sharing their cell
    let params = AvoidanceParams {
        radius,
        overshoot: world.config.overshoot,
        bounds,
    };
    let (positions, velocities, visuals) = world.store.columns_mut();
    let contacts = resolve_avoidance(
        positions,
        velocities,
        visuals,
        regular_count,
        &world.grid,
        params,
        dt,
    );

    tracing::debug!(
        frame = world.current_frame,
        contacts,
        "Frame complete"
    );
    Ok(contacts)
}
