pub mod config;
pub mod error;
pub mod types;

pub use config::{SpeedRange, SwarmConfig};
pub use error::{Result, SwarmError};
pub use types::{EntityHandle, Vec2, Visual, WorldBounds};
