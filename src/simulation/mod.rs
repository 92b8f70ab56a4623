pub mod avoidance;
pub mod movement;
pub mod spawn;
pub mod tick;

pub use avoidance::{resolve_avoidance, AvoidanceParams};
pub use movement::move_entities;
pub use spawn::spawn_population;
pub use tick::run_frame;
