//! Property tests for the hazard grid and the move stage

use proptest::prelude::*;

use sprite_swarm::core::types::{EntityHandle, Vec2, WorldBounds};
use sprite_swarm::simulation::movement::move_entities;
use sprite_swarm::spatial::grid::{CellAddressing, HazardGrid};

const BOUNDS: WorldBounds = WorldBounds {
    x_min: -80.0,
    x_max: 80.0,
    y_min: -50.0,
    y_max: 50.0,
};

fn addressing() -> impl Strategy<Value = CellAddressing> {
    prop_oneof![Just(CellAddressing::Wrap), Just(CellAddressing::Clamp)]
}

fn resolution() -> impl Strategy<Value = usize> {
    (0u32..7).prop_map(|shift| 1usize << shift)
}

/// Reference coordinate-to-cell mapping for one axis
fn expected_axis(value: f32, min: f32, extent: f32, res: usize, mode: CellAddressing) -> usize {
    let raw = ((value - min) / (extent / res as f32)).floor() as i32;
    match mode {
        CellAddressing::Wrap => (raw & (res as i32 - 1)) as usize,
        CellAddressing::Clamp => raw.clamp(0, res as i32 - 1) as usize,
    }
}

proptest! {
    /// Any point within the radius of a hazard finds it with one cell lookup
    #[test]
    fn grid_covers_full_radius(
        hx in -80.0f32..=80.0,
        hy in -50.0f32..=50.0,
        radius in 0.05f32..30.0,
        angle in 0.0f32..std::f32::consts::TAU,
        fraction in 0.0f32..0.99,
        res in resolution(),
        mode in addressing(),
    ) {
        let hazard = Vec2::new(hx, hy);
        let point = hazard + Vec2::from_angle(angle, radius * fraction);
        // Regular entities always sit inside the world
        prop_assume!(BOUNDS.contains(point));

        let mut grid = HazardGrid::new(BOUNDS, res, 1, mode).unwrap();
        grid.insert(EntityHandle(0), hazard, radius).unwrap();

        prop_assert_eq!(grid.lookup(point), &[EntityHandle(0)][..]);
    }

    /// Lookup buckets on both axes: the cell row tracks y independently of x
    #[test]
    fn lookup_uses_both_axes(
        x in -80.0f32..80.0,
        y in -50.0f32..50.0,
        res in resolution(),
        mode in addressing(),
    ) {
        let grid = HazardGrid::new(BOUNDS, res, 1, mode).unwrap();
        let expected_col = expected_axis(x, BOUNDS.x_min, BOUNDS.width(), res, mode);
        let expected_row = expected_axis(y, BOUNDS.y_min, BOUNDS.height(), res, mode);

        prop_assert_eq!(grid.cell_coords(Vec2::new(x, y)), (expected_col, expected_row));
        prop_assert_eq!(grid.cell_index(Vec2::new(x, y)), expected_row * res + expected_col);
    }

    /// A hazard is registered at most once per cell, so capacity == hazard
    /// count can never overflow
    #[test]
    fn rebuild_never_overflows(
        hazards in prop::collection::vec((-80.0f32..=80.0, -50.0f32..=50.0), 1..40),
        radius in 0.05f32..200.0,
        res in resolution(),
        mode in addressing(),
    ) {
        let mut grid = HazardGrid::new(BOUNDS, res, hazards.len(), mode).unwrap();
        let result = grid.rebuild(
            hazards
                .iter()
                .enumerate()
                .map(|(i, (x, y))| (EntityHandle(i as u32), Vec2::new(*x, *y))),
            radius,
        );
        prop_assert!(result.is_ok());
        for index in 0..res * res {
            prop_assert!(grid.cell(index).len() <= hazards.len());
        }
    }

    /// Positions stay inside the bounds after any step, and speed is preserved
    #[test]
    fn move_keeps_bounds(
        x in -80.0f32..=80.0,
        y in -50.0f32..=50.0,
        vx in -5.0f32..5.0,
        vy in -5.0f32..5.0,
        dt in 0.0f32..100.0,
    ) {
        let mut positions = [Vec2::new(x, y)];
        let mut velocities = [Vec2::new(vx, vy)];
        move_entities(&mut positions, &mut velocities, &BOUNDS, dt);

        prop_assert!(BOUNDS.contains(positions[0]));
        prop_assert_eq!(velocities[0].x.abs(), vx.abs());
        prop_assert_eq!(velocities[0].y.abs(), vy.abs());
    }

    /// Crossing the left wall lands exactly on it with the x velocity flipped
    #[test]
    fn left_wall_reflection_is_exact(
        gap in 0.0f32..1.0,
        speed in 1.01f32..5.0,
    ) {
        let mut positions = [Vec2::new(BOUNDS.x_min + gap, 0.0)];
        let mut velocities = [Vec2::new(-speed, 0.0)];
        move_entities(&mut positions, &mut velocities, &BOUNDS, 1.0);

        prop_assert_eq!(positions[0].x, BOUNDS.x_min);
        prop_assert_eq!(velocities[0].x, speed);
    }
}
