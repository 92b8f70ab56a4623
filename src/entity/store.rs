//! Entity store with SoA layout
//!
//! Position, velocity and visual data live in parallel arrays indexed by
//! [`EntityHandle`]. Capacity is reserved once; nothing is ever removed.

use crate::core::error::{Result, SwarmError};
use crate::core::types::{EntityHandle, Vec2, Visual};

/// Structure of Arrays for every entity in the swarm
#[derive(Debug, Default)]
pub struct EntityStore {
    pub positions: Vec<Vec2>,
    pub velocities: Vec<Vec2>,
    pub visuals: Vec<Visual>,
    /// Handles handed out so far; `[0, created)` are live
    created: usize,
    reserved: bool,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate zeroed arrays for exactly `n` entities. Only valid once.
    pub fn reserve(&mut self, n: usize) -> Result<()> {
        if self.reserved {
            return Err(SwarmError::AlreadyReserved(self.capacity()));
        }
        self.positions = vec![Vec2::default(); n];
        self.velocities = vec![Vec2::default(); n];
        self.visuals = vec![Visual::default(); n];
        self.reserved = true;
        Ok(())
    }

    /// Hand out the next unused handle, or `None` once capacity is exhausted
    pub fn create_entity(&mut self) -> Option<EntityHandle> {
        if self.created >= self.capacity() {
            return None;
        }
        let handle = EntityHandle(u32::try_from(self.created).ok()?);
        self.created += 1;
        Some(handle)
    }

    /// Create an entity and fill in its initial state
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2, visual: Visual) -> Option<EntityHandle> {
        let handle = self.create_entity()?;
        let idx = handle.index();
        self.positions[idx] = position;
        self.velocities[idx] = velocity;
        self.visuals[idx] = visual;
        Some(handle)
    }

    /// Number of created entities
    pub fn count(&self) -> usize {
        self.created
    }

    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    /// Drop all storage. The store can be reserved again afterwards.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    pub fn handles(&self) -> impl Iterator<Item = EntityHandle> {
        (0..self.created as u32).map(EntityHandle)
    }

    /// Split borrows of the live prefix of every array, for the frame stages
    pub fn columns_mut(&mut self) -> (&mut [Vec2], &mut [Vec2], &mut [Visual]) {
        let n = self.created;
        (
            &mut self.positions[..n],
            &mut self.velocities[..n],
            &mut self.visuals[..n],
        )
    }
}
