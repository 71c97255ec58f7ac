use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::time::Duration;

use crate::cells::{CellState, CompassPrimary};
use crate::config::SimulationConfig;
use crate::entities::{Enemy, EnemyState, Entity, Player};
use crate::generators;
use crate::grid::Grid;
use crate::grids;
use crate::rules;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Outcome {
    InProgress,
    Won,
    /// Caught by the enemy at this position in the roster.
    Lost { enemy: usize },
}

/// One game session: a maze, the player and the enemy roster.
///
/// Whoever drives the session (a window, a terminal, a test) feeds player moves and elapsed
/// time in and reads the grid and entity positions back out to draw them.
#[derive(Debug)]
pub struct Simulation<R: Rng = XorShiftRng> {
    config: SimulationConfig,
    grid: Grid,
    player: Player,
    enemies: Vec<Enemy>,
    rng: R,
    since_enemy_tick: Duration,
    outcome: Outcome,
}

impl Simulation<XorShiftRng> {
    /// Seeded from `config.seed` if there is one, from entropy otherwise.
    pub fn new(config: SimulationConfig) -> Simulation<XorShiftRng> {
        let rng = match config.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => grids::entropy_rng(),
        };
        Simulation::with_rng(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(config: SimulationConfig, mut rng: R) -> Simulation<R> {
        let grid = grids::new_maze_with_rng(config.dimension, &mut rng);
        let enemies = spawn_enemies(&grid, config.enemy_count, &mut rng);
        Simulation::from_parts(config, grid, enemies, rng)
    }

    /// A session on a ready made grid. The player starts on the `Start` cell, or cell 0 if
    /// the grid has none.
    pub fn from_parts(config: SimulationConfig,
                      grid: Grid,
                      enemies: Vec<Enemy>,
                      rng: R)
                      -> Simulation<R> {
        let start = grid.find_state(CellState::Start).unwrap_or(0);
        Simulation {
            config,
            grid,
            player: Player::new(start),
            enemies,
            rng,
            since_enemy_tick: Duration::default(),
            outcome: Outcome::InProgress,
        }
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[inline]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// One player step through an open wall; walking into a wall does nothing.
    pub fn player_move(&mut self, direction: CompassPrimary) -> usize {
        let neighbours = self.grid.open_neighbours(self.player.cell_index());
        self.player.move_in(direction, &neighbours)
    }

    /// Moves every enemy one step and flips its attack state.
    pub fn enemy_tick(&mut self) {
        let player_index = self.player.cell_index();
        for enemy in self.enemies.iter_mut() {
            let index = enemy.cell_index();
            let _ = enemy.choose_move(&self.grid.open_neighbours(index),
                                      &self.grid.path_neighbour_states(index),
                                      player_index,
                                      &mut self.rng);
            enemy.switch_state();
        }
    }

    pub fn has_won(&self) -> bool {
        rules::has_won(self.grid.cell_state(self.player.cell_index()))
    }

    /// The first enemy in the roster that has caught the player.
    pub fn has_lost(&self) -> Option<usize> {
        let player_index = self.player.cell_index();
        self.enemies
            .iter()
            .position(|enemy| rules::has_lost(player_index, enemy.cell_index(), enemy.state()))
    }

    /// Win is checked before loss, so reaching the end cell always wins.
    pub fn evaluate(&mut self) -> Outcome {
        self.outcome = if self.has_won() {
            Outcome::Won
        } else if let Some(enemy) = self.has_lost() {
            Outcome::Lost { enemy }
        } else {
            Outcome::InProgress
        };
        self.outcome
    }

    /// One iteration of the game loop: apply the player's input, let the enemies move if a full
    /// tick interval has built up, then decide the outcome.
    ///
    /// Once the session is won or lost further steps change nothing.
    pub fn step(&mut self, input: Option<CompassPrimary>, elapsed: Duration) -> Outcome {
        if self.outcome != Outcome::InProgress {
            return self.outcome;
        }

        if let Some(direction) = input {
            let _ = self.player_move(direction);
        }

        self.since_enemy_tick += elapsed;
        if self.since_enemy_tick >= self.config.enemy_tick {
            self.enemy_tick();
            self.since_enemy_tick = Duration::default();
        }

        self.evaluate()
    }

    /// Play again: a new maze, the player back on the start cell and a fresh enemy roster.
    pub fn restart(&mut self) {
        generators::recursive_backtracker(&mut self.grid, &mut self.rng);
        self.enemies = spawn_enemies(&self.grid, self.config.enemy_count, &mut self.rng);
        self.player = Player::new(self.grid.find_state(CellState::Start).unwrap_or(0));
        self.since_enemy_tick = Duration::default();
        self.outcome = Outcome::InProgress;
    }
}

/// Places `count` attacking enemies away from the start area.
///
/// Spawn cells are drawn from the band past the first two rows, with one reroll if the draw
/// lands on the end cell. On grids too small for that band the last cell is used.
pub fn spawn_enemies<R: Rng>(grid: &Grid, count: usize, rng: &mut R) -> Vec<Enemy> {
    let cells_count = grid.size();
    let end = cells_count - 1;
    let band_start = (2 * grid.dimension().0).min(end);

    (0..count)
        .map(|_| {
            let mut index = rng.gen_range(band_start..cells_count);
            if index == end {
                index = rng.gen_range(band_start..cells_count);
            }
            Enemy::new(index, EnemyState::Attacking)
        })
        .collect()
}
