pub mod grid;

pub use grid::{CellAddressing, HazardGrid};
