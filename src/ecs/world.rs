//! Swarm world - owns the entity store, the hazard grid and the RNG

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::SwarmConfig;
use crate::core::error::Result;
use crate::core::types::EntityHandle;
use crate::entity::store::EntityStore;
use crate::render::sprite::{check_output, write_snapshot, SpritePosition, SpriteVisual};
use crate::simulation::spawn::spawn_population;
use crate::simulation::tick::run_frame;
use crate::spatial::grid::HazardGrid;

/// One independent simulation instance
pub struct World {
    pub config: SwarmConfig,
    pub store: EntityStore,
    pub grid: HazardGrid,
    pub current_frame: u64,
    /// Hazard contacts resolved in the most recent frame
    pub last_contacts: usize,
    rng: ChaCha8Rng,
}

impl World {
    /// Validate `config` and build an empty world. Call [`World::initialize`] next.
    pub fn new(config: SwarmConfig) -> Result<Self> {
        config.validate()?;
        let grid = HazardGrid::from_config(&config)?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            config,
            store: EntityStore::new(),
            grid,
            current_frame: 0,
            last_contacts: 0,
            rng,
        })
    }

    /// Reserve storage and create the regular and hazard groups
    pub fn initialize(&mut self) -> Result<()> {
        spawn_population(&mut self.store, &self.config, &mut self.rng)?;
        self.current_frame = 0;
        tracing::info!(
            entities = self.store.count(),
            grid = self.grid.resolution(),
            addressing = %self.grid.addressing(),
            "World initialized"
        );
        Ok(())
    }

    /// Run one frame and snapshot every entity into the output buffers.
    ///
    /// `_time` is accepted for the host's convenience; only `dt` drives motion.
    /// Returns the number of entities written.
    pub fn update(
        &mut self,
        out_positions: &mut [SpritePosition],
        out_visuals: &mut [SpriteVisual],
        _time: f64,
        dt: f32,
    ) -> Result<usize> {
        let required = self.store.count();
        if let Err(err) = check_output(required, out_positions, out_visuals) {
            tracing::warn!(
                required,
                positions = out_positions.len(),
                visuals = out_visuals.len(),
                "Rejected update with undersized output buffers"
            );
            return Err(err);
        }

        self.last_contacts = run_frame(self, dt)?;
        self.current_frame += 1;

        write_snapshot(&self.store, out_positions, out_visuals)
    }

    /// Release all entity storage. Later updates write nothing.
    pub fn destroy(&mut self) {
        if self.store.is_reserved() {
            tracing::info!(
                entities = self.store.count(),
                frames = self.current_frame,
                "World destroyed"
            );
        }
        self.store.release();
        self.grid.clear();
        self.last_contacts = 0;
    }

    pub fn entity_count(&self) -> usize {
        self.store.count()
    }

    pub fn regular_count(&self) -> usize {
        self.config.regular_count
    }

    pub fn hazard_count(&self) -> usize {
        self.config.hazard_count
    }

    /// True once both groups exist in the store
    pub fn is_populated(&self) -> bool {
        self.store.count() == self.config.total_count()
    }

    pub fn is_hazard(&self, handle: EntityHandle) -> bool {
        handle.index() >= self.config.regular_count && handle.index() < self.store.count()
    }

    pub fn regular_handles(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.store.handles().take(self.config.regular_count)
    }

    pub fn hazard_handles(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.store.handles().skip(self.config.regular_count)
    }
}
