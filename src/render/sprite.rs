//! Per-frame sprite instance records handed to the renderer.

use bytemuck::{Pod, Zeroable};

use crate::core::error::{Result, SwarmError};
use crate::core::types::{Vec2, Visual};
use crate::entity::store::EntityStore;

/// Sprite position. 8 bytes, one per entity, uploaded as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpritePosition {
    pub x: f32,
    pub y: f32,
}

impl From<Vec2> for SpritePosition {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Sprite color and atlas index packed as RGBA8-sized record.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct SpriteVisual {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub sprite: u8,
}

impl From<Visual> for SpriteVisual {
    fn from(v: Visual) -> Self {
        Self {
            r: v.r,
            g: v.g,
            b: v.b,
            sprite: v.sprite,
        }
    }
}

/// Fail with `OutputTooSmall` unless both buffers hold `required` records
pub fn check_output(
    required: usize,
    positions: &[SpritePosition],
    visuals: &[SpriteVisual],
) -> Result<()> {
    if positions.len() < required || visuals.len() < required {
        return Err(SwarmError::OutputTooSmall {
            required,
            positions: positions.len(),
            visuals: visuals.len(),
        });
    }
    Ok(())
}

/// Copy every live entity into the output buffers; returns the count written.
///
/// Nothing is written when either buffer is shorter than `store.count()`.
pub fn write_snapshot(
    store: &EntityStore,
    positions: &mut [SpritePosition],
    visuals: &mut [SpriteVisual],
) -> Result<usize> {
    let n = store.count();
    check_output(n, positions, visuals)?;
    for (out, pos) in positions[..n].iter_mut().zip(&store.positions[..n]) {
        *out = (*pos).into();
    }
    for (out, vis) in visuals[..n].iter_mut().zip(&store.visuals[..n]) {
        *out = (*vis).into();
    }
    Ok(n)
}
