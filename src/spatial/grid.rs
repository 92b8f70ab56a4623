//! Uniform hazard grid for the avoidance stage
//!
//! The world rectangle is split into `N x N` cells. Each hazard is registered
//! in every cell its avoidance square touches, so a regular entity only has
//! to read the one cell it sits in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::SwarmConfig;
use crate::core::error::{Result, SwarmError};
use crate::core::types::{EntityHandle, Vec2, WorldBounds};

/// How cell coordinates outside `[0, N)` are brought back into the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellAddressing {
    /// Toroidal: `c & (N - 1)`. A hazard poking past one edge also lands in
    /// the cells along the opposite edge.
    Wrap,
    /// Saturate to the border cells.
    #[default]
    Clamp,
}

impl FromStr for CellAddressing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wrap" => Ok(Self::Wrap),
            "clamp" => Ok(Self::Clamp),
            other => Err(format!("unknown cell addressing '{}'", other)),
        }
    }
}

impl fmt::Display for CellAddressing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrap => write!(f, "wrap"),
            Self::Clamp => write!(f, "clamp"),
        }
    }
}

/// Fixed-resolution grid of bounded hazard lists
#[derive(Debug, Clone)]
pub struct HazardGrid {
    resolution: usize,
    mask: i32,
    bounds: WorldBounds,
    cell_width: f32,
    cell_height: f32,
    addressing: CellAddressing,
    /// Hazards per cell
    capacity: usize,
    /// `resolution * resolution * capacity` slots, one run per cell
    slots: Vec<EntityHandle>,
    counts: Vec<usize>,
}

impl HazardGrid {
    pub fn new(
        bounds: WorldBounds,
        resolution: usize,
        capacity: usize,
        addressing: CellAddressing,
    ) -> Result<Self> {
        if resolution == 0 || !resolution.is_power_of_two() || resolution > i32::MAX as usize {
            return Err(SwarmError::InvalidConfig(format!(
                "grid resolution {} is not a power of two",
                resolution
            )));
        }
        if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
            return Err(SwarmError::InvalidConfig(format!(
                "grid bounds {:?} are empty",
                bounds
            )));
        }

        let cell_count = resolution * resolution;
        Ok(Self {
            resolution,
            mask: (resolution - 1) as i32,
            bounds,
            cell_width: bounds.width() / resolution as f32,
            cell_height: bounds.height() / resolution as f32,
            addressing,
            capacity,
            slots: vec![EntityHandle::default(); cell_count * capacity],
            counts: vec![0; cell_count],
        })
    }

    /// Grid sized for `config`: per-cell capacity equals the hazard count
    pub fn from_config(config: &SwarmConfig) -> Result<Self> {
        Self::new(
            config.bounds,
            config.grid_resolution,
            config.hazard_count,
            config.addressing,
        )
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn addressing(&self) -> CellAddressing {
        self.addressing
    }

    /// Raw, unaddressed cell coordinate along one axis
    #[inline]
    fn axis_coord(value: f32, min: f32, cell_size: f32) -> i32 {
        ((value - min) / cell_size).floor() as i32
    }

    /// Bring a raw coordinate into `[0, N)` according to the addressing policy
    #[inline]
    fn address(&self, c: i32) -> usize {
        match self.addressing {
            CellAddressing::Wrap => (c & self.mask) as usize,
            CellAddressing::Clamp => c.clamp(0, self.mask) as usize,
        }
    }

    /// First raw coordinate and number of cells covered by `[lo, hi]`
    #[inline]
    fn span(&self, lo: i32, hi: i32) -> (i32, usize) {
        match self.addressing {
            CellAddressing::Wrap => {
                let len = (hi as i64 - lo as i64 + 1).clamp(1, self.resolution as i64);
                (lo, len as usize)
            }
            CellAddressing::Clamp => {
                let lo = lo.clamp(0, self.mask);
                let hi = hi.clamp(0, self.mask);
                (lo, (hi - lo + 1) as usize)
            }
        }
    }

    /// Cell coordinates `(cx, cy)` containing `pos`
    #[inline]
    pub fn cell_coords(&self, pos: Vec2) -> (usize, usize) {
        let cx = Self::axis_coord(pos.x, self.bounds.x_min, self.cell_width);
        let cy = Self::axis_coord(pos.y, self.bounds.y_min, self.cell_height);
        (self.address(cx), self.address(cy))
    }

    /// Flat index of the cell containing `pos`; both axes contribute
    #[inline]
    pub fn cell_index(&self, pos: Vec2) -> usize {
        let (cx, cy) = self.cell_coords(pos);
        cy * self.resolution + cx
    }

    pub fn clear(&mut self) {
        self.counts.fill(0);
    }

    fn push(&mut self, cell: usize, hazard: EntityHandle) -> Result<()> {
        let count = self.counts[cell];
        if count >= self.capacity {
            return Err(SwarmError::CellOverflow {
                cell,
                capacity: self.capacity,
                hazard,
            });
        }
        self.slots[cell * self.capacity + count] = hazard;
        self.counts[cell] = count + 1;
        Ok(())
    }

    /// Register `hazard` in every cell overlapping the square `pos ± radius`
    pub fn insert(&mut self, hazard: EntityHandle, pos: Vec2, radius: f32) -> Result<()> {
        let b = self.bounds;
        let (x0, nx) = self.span(
            Self::axis_coord(pos.x - radius, b.x_min, self.cell_width),
            Self::axis_coord(pos.x + radius, b.x_min, self.cell_width),
        );
        let (y0, ny) = self.span(
            Self::axis_coord(pos.y - radius, b.y_min, self.cell_height),
            Self::axis_coord(pos.y + radius, b.y_min, self.cell_height),
        );

        for j in 0..ny {
            let cy = self.address(y0 + j as i32);
            for i in 0..nx {
                let cx = self.address(x0 + i as i32);
                self.push(cy * self.resolution + cx, hazard)?;
            }
        }
        Ok(())
    }

    /// Clear and repopulate from this frame's hazard positions
    pub fn rebuild(
        &mut self,
        hazards: impl IntoIterator<Item = (EntityHandle, Vec2)>,
        radius: f32,
    ) -> Result<()> {
        self.clear();
        for (hazard, pos) in hazards {
            self.insert(hazard, pos, radius)?;
        }
        Ok(())
    }

    /// Hazards registered in the single cell containing `pos`
    #[inline]
    pub fn lookup(&self, pos: Vec2) -> &[EntityHandle] {
        self.cell(self.cell_index(pos))
    }

    /// Hazards registered in cell `index`
    #[inline]
    pub fn cell(&self, index: usize) -> &[EntityHandle] {
        let start = index * self.capacity;
        &self.slots[start..start + self.counts[index]]
    }

    /// Total registrations across all cells
    pub fn occupancy(&self) -> usize {
        self.counts.iter().sum()
    }
}
