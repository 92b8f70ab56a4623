//! Renderer-facing output of the simulation
//!
//! Provides flat per-frame snapshots of simulation state.
//! This module is READ-ONLY - it never modifies simulation state.

pub mod metrics;
pub mod sprite;

pub use metrics::FrameMetrics;
pub use sprite::{check_output, write_snapshot, SpritePosition, SpriteVisual};
