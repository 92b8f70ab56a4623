//! Sprite Swarm - per-frame simulation core for a large bouncing sprite swarm
//! with hazard avoidance over a uniform spatial grid

pub mod core;
pub mod ecs;
pub mod entity;
pub mod render;
pub mod simulation;
pub mod spatial;
