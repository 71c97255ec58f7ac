use rand::Rng;
use rand::seq::SliceRandom;

use crate::cells::CompassPrimary;
use crate::grid::{CellIndexSmallVec, Neighbours, PathStates};

/// Anything that occupies a single cell of the grid.
pub trait Entity {
    fn cell_index(&self) -> usize;
    fn set_cell_index(&mut self, index: usize);

    #[inline]
    fn is_at(&self, index: usize) -> bool {
        self.cell_index() == index
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Player {
    cell_index: usize,
}

impl Player {
    pub fn new(cell_index: usize) -> Player {
        Player { cell_index }
    }

    /// Steps one cell in `direction` if the neighbourhood has an open passage that way,
    /// otherwise stays put. Returns the cell the player ends up in.
    pub fn move_in(&mut self, direction: CompassPrimary, neighbours: &Neighbours) -> usize {
        if let Some(next) = neighbours.get(direction) {
            self.cell_index = next;
        }
        self.cell_index
    }
}

impl Entity for Player {
    #[inline]
    fn cell_index(&self) -> usize {
        self.cell_index
    }

    #[inline]
    fn set_cell_index(&mut self, index: usize) {
        self.cell_index = index;
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum EnemyState {
    Passive,
    Attacking,
}

impl EnemyState {
    #[inline]
    pub fn toggled(self) -> EnemyState {
        match self {
            EnemyState::Passive => EnemyState::Attacking,
            EnemyState::Attacking => EnemyState::Passive,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Enemy {
    cell_index: usize,
    state: EnemyState,
}

impl Enemy {
    pub fn new(cell_index: usize, state: EnemyState) -> Enemy {
        Enemy { cell_index, state }
    }

    #[inline]
    pub fn state(&self) -> EnemyState {
        self.state
    }

    #[inline]
    pub fn is_attacking(&self) -> bool {
        self.state == EnemyState::Attacking
    }

    pub fn switch_state(&mut self) {
        self.state = self.state.toggled();
    }

    /// Moves the enemy one step along an open passage and returns its new cell.
    ///
    /// Neighbours are scanned top, right, bottom, left. If one of them holds the player, and
    /// that cell is a plain path (the start and end cells are safe), the enemy moves straight
    /// onto the player whatever its attack state. Otherwise it picks uniformly at random from
    /// all the open neighbours.
    ///
    /// Panics if there are no open neighbours, which cannot happen inside a perfect maze.
    pub fn choose_move<R: Rng>(&mut self,
                               neighbours: &Neighbours,
                               path_states: &PathStates,
                               player_index: usize,
                               rng: &mut R)
                               -> usize {

        let mut candidates = CellIndexSmallVec::new();
        for (direction, neighbour) in neighbours.iter() {
            if neighbour == player_index && path_states.get(direction) {
                self.cell_index = neighbour;
                return neighbour;
            }
            candidates.push(neighbour);
        }

        match candidates.choose(rng) {
            Some(&next) => {
                self.cell_index = next;
                next
            }
            None => panic!("enemy at cell {} is walled in", self.cell_index),
        }
    }
}

impl Entity for Enemy {
    #[inline]
    fn cell_index(&self) -> usize {
        self.cell_index
    }

    #[inline]
    fn set_cell_index(&mut self, index: usize) {
        self.cell_index = index;
    }
}
