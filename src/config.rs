use std::time::Duration;

use crate::grids::DEFAULT_DIMENSION;
use crate::units::GridDimension;

pub const DEFAULT_ENEMY_COUNT: usize = 4;
pub const DEFAULT_ENEMY_TICK: Duration = Duration::from_millis(2000);

/// Everything needed to set up a game session.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Side length of the maze.
    pub dimension: GridDimension,
    pub enemy_count: usize,
    /// How often the whole enemy roster moves and flips state.
    pub enemy_tick: Duration,
    /// Fixes every random decision of the session when set.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            dimension: DEFAULT_DIMENSION,
            enemy_count: DEFAULT_ENEMY_COUNT,
            enemy_tick: DEFAULT_ENEMY_TICK,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfigBuilder {
    config: SimulationConfig,
}

impl SimulationConfigBuilder {
    pub fn new() -> SimulationConfigBuilder {
        SimulationConfigBuilder { config: SimulationConfig::default() }
    }
    pub fn dimension(mut self, dimension: GridDimension) -> SimulationConfigBuilder {
        self.config.dimension = dimension;
        self
    }
    pub fn enemy_count(mut self, enemy_count: usize) -> SimulationConfigBuilder {
        self.config.enemy_count = enemy_count;
        self
    }
    pub fn enemy_tick(mut self, enemy_tick: Duration) -> SimulationConfigBuilder {
        self.config.enemy_tick = enemy_tick;
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> SimulationConfigBuilder {
        self.config.seed = seed;
        self
    }
    pub fn build(self) -> SimulationConfig {
        self.config
    }
}

impl Default for SimulationConfigBuilder {
    fn default() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
    }
}
