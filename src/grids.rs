use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::generators;
use crate::grid::Grid;
use crate::units::GridDimension;

/// Side length of the reference game's maze.
pub const DEFAULT_DIMENSION: GridDimension = GridDimension(16);

/// A fresh random generator, seeded from the operating system.
pub fn entropy_rng() -> XorShiftRng {
    XorShiftRng::from_entropy()
}

/// Generates a new perfect maze. Every call gives a different layout.
///
/// Panics if the dimension is zero.
pub fn new_maze(dimension: GridDimension) -> Grid {
    new_maze_with_rng(dimension, &mut entropy_rng())
}

/// Generates the same perfect maze for the same seed.
pub fn seeded_maze(dimension: GridDimension, seed: u64) -> Grid {
    new_maze_with_rng(dimension, &mut XorShiftRng::seed_from_u64(seed))
}

pub fn new_maze_with_rng<R: Rng>(dimension: GridDimension, rng: &mut R) -> Grid {
    let mut grid = Grid::new(dimension);
    generators::recursive_backtracker(&mut grid, rng);
    grid
}
