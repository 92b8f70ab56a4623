//! Swarm configuration with documented constants
//!
//! Every tunable the frame stages read lives here. Defaults reproduce the
//! reference scene: 100k sprites, 20 of them hazards, in a 160x100 world.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SwarmError};
use crate::core::types::WorldBounds;
use crate::spatial::grid::CellAddressing;

/// Inclusive `[min, max]` range a group's initial speed is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, speed: f32) -> bool {
        speed >= self.min && speed <= self.max
    }
}

/// Configuration for one simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    // === POPULATION ===
    /// Size of the regular group (handles `[0, regular_count)`)
    pub regular_count: usize,

    /// Size of the hazard group (handles after the regular group)
    ///
    /// Also the per-cell capacity of the spatial grid, so a cell can never
    /// overflow no matter how hazards cluster.
    pub hazard_count: usize,

    // === WORLD ===
    pub bounds: WorldBounds,

    /// Hazards spawn inside `bounds` scaled by this factor about the origin
    pub hazard_spawn_scale: f32,

    // === AVOIDANCE ===
    /// Distance below which a regular entity collides with a hazard
    pub avoid_radius: f32,

    /// Multiplier on the post-collision nudge; must exceed 1.0 so the entity
    /// leaves the overlap in the same frame
    pub overshoot: f32,

    // === SPATIAL GRID ===
    /// Cells per axis; power of two
    pub grid_resolution: usize,

    /// What happens to cell coordinates that fall outside the grid
    pub addressing: CellAddressing,

    // === MOTION ===
    pub regular_speed: SpeedRange,
    pub hazard_speed: SpeedRange,

    // === SPRITES ===
    /// Regular entities pick a sprite index in `[0, regular_sprite_variants)`
    pub regular_sprite_variants: u8,

    /// Fixed sprite index marking hazards
    pub hazard_sprite: u8,

    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            regular_count: 99_980,
            hazard_count: 20,
            bounds: WorldBounds::default(),
            hazard_spawn_scale: 0.2,
            avoid_radius: 1.3,
            overshoot: 1.1,
            grid_resolution: 32,
            addressing: CellAddressing::Clamp,
            regular_speed: SpeedRange::new(0.5, 0.7),
            hazard_speed: SpeedRange::new(0.1, 0.2),
            regular_sprite_variants: 5,
            hazard_sprite: 5,
            seed: None,
        }
    }
}

impl SwarmConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SwarmConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Total number of entities the store must hold
    pub fn total_count(&self) -> usize {
        self.regular_count + self.hazard_count
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SwarmError::InvalidConfig(msg));

        if self.regular_count == 0 || self.hazard_count == 0 {
            return invalid(format!(
                "both groups must be non-empty (regular {}, hazard {})",
                self.regular_count, self.hazard_count
            ));
        }
        if u32::try_from(self.total_count()).is_err() {
            return invalid(format!(
                "population {} exceeds handle range",
                self.total_count()
            ));
        }
        if self.grid_resolution == 0 || !self.grid_resolution.is_power_of_two() {
            return invalid(format!(
                "grid_resolution ({}) must be a power of two",
                self.grid_resolution
            ));
        }
        let b = &self.bounds;
        if !(b.width() > 0.0 && b.height() > 0.0) {
            return invalid(format!("world bounds {:?} are empty", b));
        }
        if !(self.avoid_radius > 0.0) {
            return invalid(format!(
                "avoid_radius ({}) must be positive",
                self.avoid_radius
            ));
        }
        if !(self.overshoot > 1.0) {
            return invalid(format!(
                "overshoot ({}) must be greater than 1.0",
                self.overshoot
            ));
        }
        if !(self.hazard_spawn_scale > 0.0 && self.hazard_spawn_scale <= 1.0) {
            return invalid(format!(
                "hazard_spawn_scale ({}) must be in (0, 1]",
                self.hazard_spawn_scale
            ));
        }
        for (name, range) in [
            ("regular_speed", self.regular_speed),
            ("hazard_speed", self.hazard_speed),
        ] {
            if !(range.min >= 0.0 && range.min <= range.max) {
                return invalid(format!(
                    "{} [{}, {}] must satisfy 0 <= min <= max",
                    name, range.min, range.max
                ));
            }
        }
        if self.regular_sprite_variants == 0 {
            return invalid("regular_sprite_variants must be at least 1".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SwarmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_count(), 100_000);
    }

    #[test]
    fn test_rejects_non_power_of_two_grid() {
        let config = SwarmConfig {
            grid_resolution: 24,
            ..SwarmConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SwarmError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let config = SwarmConfig {
            hazard_speed: SpeedRange::new(0.3, 0.1),
            ..SwarmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_overshoot_not_above_one() {
        let config = SwarmConfig {
            overshoot: 1.0,
            ..SwarmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_hazard_group() {
        let config = SwarmConfig {
            hazard_count: 0,
            ..SwarmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_overrides_keep_defaults() {
        let config = SwarmConfig::from_toml_str(
            r#"
            regular_count = 500
            hazard_count = 4
            addressing = "wrap"
            seed = 7

            [bounds]
            x_min = -10.0
            x_max = 10.0
            y_min = -5.0
            y_max = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.regular_count, 500);
        assert_eq!(config.hazard_count, 4);
        assert_eq!(config.addressing, CellAddressing::Wrap);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.bounds.width(), 20.0);
        assert_eq!(config.grid_resolution, 32);
        assert_eq!(config.regular_speed, SpeedRange::new(0.5, 0.7));
    }

    #[test]
    fn test_toml_invalid_values_rejected() {
        let result = SwarmConfig::from_toml_str("grid_resolution = 3");
        assert!(matches!(result, Err(SwarmError::InvalidConfig(_))));
    }

    #[test]
    fn test_toml_syntax_error() {
        let result = SwarmConfig::from_toml_str("regular_count = [");
        assert!(matches!(result, Err(SwarmError::TomlError(_))));
    }
}
