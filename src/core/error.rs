use thiserror::Error;

use crate::core::types::EntityHandle;

#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Entity store already reserved for {0} entities")]
    AlreadyReserved(usize),

    #[error("Grid cell {cell} full ({capacity} hazards), cannot insert {hazard:?}")]
    CellOverflow {
        cell: usize,
        capacity: usize,
        hazard: EntityHandle,
    },

    #[error("Output buffers too small: need {required}, got {positions} positions and {visuals} visuals")]
    OutputTooSmall {
        required: usize,
        positions: usize,
        visuals: usize,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SwarmError>;
