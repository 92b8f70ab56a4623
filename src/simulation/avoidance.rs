//! Avoidance stage - regular entities bounce off hazards and take their color

use crate::core::types::{Vec2, Visual, WorldBounds};
use crate::spatial::grid::HazardGrid;

/// Tunables read by [`resolve_avoidance`]
#[derive(Debug, Clone, Copy)]
pub struct AvoidanceParams {
    pub radius: f32,
    /// Extra push past the reflected step so the entity clears the overlap
    pub overshoot: f32,
    /// Nudged positions are clamped to this rectangle
    pub bounds: WorldBounds,
}

/// Test every regular entity against the hazards sharing its grid cell.
///
/// The arrays hold the regular group in `[0, regular_count)` followed by the
/// hazard group. On contact the regular entity reverses, steps out along the
/// reflected velocity and copies the hazard's color. Hazards are read only.
/// The nudge is clamped to `params.bounds`, so positions stay inside the
/// world once the frame ends.
///
/// Returns the number of contacts resolved.
pub fn resolve_avoidance(
    positions: &mut [Vec2],
    velocities: &mut [Vec2],
    visuals: &mut [Visual],
    regular_count: usize,
    grid: &HazardGrid,
    params: AvoidanceParams,
    dt: f32,
) -> usize {
    let radius_sq = params.radius * params.radius;
    let step = dt * params.overshoot;

    let (regular_pos, hazard_pos) = positions.split_at_mut(regular_count);
    let (regular_vis, hazard_vis) = visuals.split_at_mut(regular_count);
    let regular_vel = &mut velocities[..regular_count];

    let mut contacts = 0;
    for ((pos, vel), visual) in regular_pos
        .iter_mut()
        .zip(regular_vel.iter_mut())
        .zip(regular_vis.iter_mut())
    {
        for hazard in grid.lookup(*pos) {
            let h = hazard.index() - regular_count;
            if pos.distance_squared(&hazard_pos[h]) < radius_sq {
                *vel = -*vel;
                *pos = params.bounds.clamp(*pos + *vel * step);
                visual.recolor_from(&hazard_vis[h]);
                contacts += 1;
            }
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityHandle;
    use crate::spatial::grid::CellAddressing;

    const BOUNDS: WorldBounds = WorldBounds {
        x_min: -8.0,
        x_max: 8.0,
        y_min: -8.0,
        y_max: 8.0,
    };

    const PARAMS: AvoidanceParams = AvoidanceParams {
        radius: 1.0,
        overshoot: 1.1,
        bounds: BOUNDS,
    };

    fn grid_for(hazards: &[Vec2], regular_count: usize) -> HazardGrid {
        let mut grid = HazardGrid::new(
            BOUNDS,
            4,
            hazards.len(),
            CellAddressing::Clamp,
        )
        .unwrap();
        grid.rebuild(
            hazards
                .iter()
                .enumerate()
                .map(|(i, p)| (EntityHandle((regular_count + i) as u32), *p)),
            PARAMS.radius,
        )
        .unwrap();
        grid
    }

    #[test]
    fn test_contact_flips_nudges_and_recolors() {
        let mut pos = vec![Vec2::new(0.5, 0.0), Vec2::new(0.0, 0.0)];
        let mut vel = vec![Vec2::new(-1.0, 0.5), Vec2::new(0.1, 0.1)];
        let mut vis = vec![Visual::white(2), Visual::new(200, 150, 130, 5)];
        let grid = grid_for(&pos[1..], 1);

        let contacts = resolve_avoidance(&mut pos, &mut vel, &mut vis, 1, &grid, PARAMS, 0.5);

        assert_eq!(contacts, 1);
        assert_eq!(vel[0], Vec2::new(1.0, -0.5));
        assert!((pos[0].x - (0.5 + 1.0 * 0.5 * 1.1)).abs() < 1e-6);
        assert!((pos[0].y - (0.0 - 0.5 * 0.5 * 1.1)).abs() < 1e-6);
        assert_eq!(vis[0], Visual::new(200, 150, 130, 2));
    }

    #[test]
    fn test_hazard_untouched() {
        let mut pos = vec![Vec2::new(0.2, 0.2), Vec2::new(0.0, 0.0)];
        let mut vel = vec![Vec2::new(1.0, 0.0), Vec2::new(0.1, 0.1)];
        let mut vis = vec![Visual::white(0), Visual::new(128, 128, 128, 5)];
        let grid = grid_for(&pos[1..], 1);

        resolve_avoidance(&mut pos, &mut vel, &mut vis, 1, &grid, PARAMS, 1.0);

        assert_eq!(pos[1], Vec2::new(0.0, 0.0));
        assert_eq!(vel[1], Vec2::new(0.1, 0.1));
        assert_eq!(vis[1], Visual::new(128, 128, 128, 5));
    }

    #[test]
    fn test_out_of_radius_ignored() {
        let mut pos = vec![Vec2::new(1.5, 0.0), Vec2::new(0.0, 0.0)];
        let mut vel = vec![Vec2::new(-1.0, 0.0), Vec2::new(0.0, 0.0)];
        let mut vis = vec![Visual::white(1), Visual::new(130, 140, 150, 5)];
        let grid = grid_for(&pos[1..], 1);

        let contacts = resolve_avoidance(&mut pos, &mut vel, &mut vis, 1, &grid, PARAMS, 1.0);

        assert_eq!(contacts, 0);
        assert_eq!(vel[0], Vec2::new(-1.0, 0.0));
        assert_eq!(vis[0], Visual::white(1));
    }

    #[test]
    fn test_multiple_hazards_last_color_wins() {
        let mut pos = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.3, 0.0),
            Vec2::new(-0.3, 0.0),
        ];
        let mut vel = vec![Vec2::new(0.5, 0.0), Vec2::default(), Vec2::default()];
        let mut vis = vec![
            Visual::white(0),
            Visual::new(200, 0, 0, 5),
            Visual::new(0, 0, 200, 5),
        ];
        let grid = grid_for(&pos[1..], 1);

        let contacts = resolve_avoidance(&mut pos, &mut vel, &mut vis, 1, &grid, PARAMS, 0.1);

        // Two flips cancel; both nudges still applied
        assert_eq!(contacts, 2);
        assert_eq!(vel[0], Vec2::new(0.5, 0.0));
        assert_eq!(vis[0], Visual::new(0, 0, 200, 0));
        let expected = -0.5 * 0.1 * 1.1 + 0.5 * 0.1 * 1.1;
        assert!((pos[0].x - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt_recolors_without_moving() {
        let mut pos = vec![Vec2::new(0.1, 0.1), Vec2::new(0.0, 0.0)];
        let mut vel = vec![Vec2::new(0.6, 0.0), Vec2::new(0.0, 0.0)];
        let mut vis = vec![Visual::white(0), Visual::new(180, 170, 160, 5)];
        let grid = grid_for(&pos[1..], 1);

        resolve_avoidance(&mut pos, &mut vel, &mut vis, 1, &grid, PARAMS, 0.0);

        assert_eq!(pos[0], Vec2::new(0.1, 0.1));
    }

    #[test]
    fn test_nudge_clamped_at_wall() {
        // Pressed against the right wall with a hazard just inside
        let mut pos = vec![Vec2::new(7.9, 7.95), Vec2::new(7.5, 7.6)];
        let mut vel = vec![Vec2::new(-0.6, -0.4), Vec2::default()];
        let mut vis = vec![Visual::white(0), Visual::new(140, 150, 160, 5)];
        let grid = grid_for(&pos[1..], 1);

        let contacts = resolve_avoidance(&mut pos, &mut vel, &mut vis, 1, &grid, PARAMS, 1.0);

        assert_eq!(contacts, 1);
        assert_eq!(vel[0], Vec2::new(0.6, 0.4));
        assert_eq!(pos[0], Vec2::new(8.0, 8.0));
        assert!(BOUNDS.contains(pos[0]));
    }
}
