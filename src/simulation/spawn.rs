//! Initial population: regular swarm across the world, hazards near the center

use std::f32::consts::TAU;

use rand::Rng;

use crate::core::config::{SpeedRange, SwarmConfig};
use crate::core::error::{Result, SwarmError};
use crate::core::types::{EntityHandle, Vec2, Visual, WorldBounds};
use crate::entity::store::EntityStore;

fn random_position<R: Rng>(rng: &mut R, area: &WorldBounds) -> Vec2 {
    Vec2::new(
        rng.gen_range(area.x_min..=area.x_max),
        rng.gen_range(area.y_min..=area.y_max),
    )
}

/// Random heading with a speed drawn from `speed`
fn random_velocity<R: Rng>(rng: &mut R, speed: SpeedRange) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let magnitude = rng.gen_range(speed.min..=speed.max);
    Vec2::from_angle(angle, magnitude)
}

/// Mid-to-bright color so hazards stand out against the white swarm
fn random_hazard_visual<R: Rng>(rng: &mut R, sprite: u8) -> Visual {
    Visual::new(
        rng.gen_range(128..=255),
        rng.gen_range(128..=255),
        rng.gen_range(128..=255),
        sprite,
    )
}

fn spawn_or_full(
    store: &mut EntityStore,
    position: Vec2,
    velocity: Vec2,
    visual: Visual,
) -> Result<EntityHandle> {
    store.spawn(position, velocity, visual).ok_or_else(|| {
        SwarmError::InvalidConfig(format!(
            "entity store capacity {} exhausted",
            store.capacity()
        ))
    })
}

/// Reserve the store and create both groups, regular first.
pub fn spawn_population<R: Rng>(
    store: &mut EntityStore,
    config: &SwarmConfig,
    rng: &mut R,
) -> Result<()> {
    store.reserve(config.total_count())?;

    for _ in 0..config.regular_count {
        let position = random_position(rng, &config.bounds);
        let visual = Visual::white(rng.gen_range(0..config.regular_sprite_variants));
        let velocity = random_velocity(rng, config.regular_speed);
        spawn_or_full(store, position, velocity, visual)?;
    }

    let hazard_area = config.bounds.scaled(config.hazard_spawn_scale);
    for _ in 0..config.hazard_count {
        let position = random_position(rng, &hazard_area);
        let visual = random_hazard_visual(rng, config.hazard_sprite);
        let velocity = random_velocity(rng, config.hazard_speed);
        spawn_or_full(store, position, velocity, visual)?;
    }

    tracing::info!(
        regular = config.regular_count,
        hazards = config.hazard_count,
        "Spawned swarm population"
    );
    Ok(())
}
