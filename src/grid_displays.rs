use rand::Rng;
use std::fmt;

use crate::cells::{CellState, CompassPrimary};
use crate::coordinates::Cartesian2DCoordinate;
use crate::entities::{EnemyState, Entity};
use crate::grid::Grid;
use crate::simulation::Simulation;

/// Supplies the three character body drawn inside each cell of a text rendered maze.
pub trait GridDisplay {
    fn render_cell_body(&self, _index: usize) -> String {
        String::from("   ")
    }
}

/// Start and end cells.
impl GridDisplay for Grid {
    fn render_cell_body(&self, index: usize) -> String {
        match self.cell_state(index) {
            CellState::Start => String::from(" S "),
            CellState::End => String::from(" E "),
            CellState::Path => String::from("   "),
        }
    }
}

/// The player over enemies over start and end cells.
impl<R: Rng> GridDisplay for Simulation<R> {
    fn render_cell_body(&self, index: usize) -> String {
        if self.player().is_at(index) {
            return String::from(" @ ");
        }

        match self.enemies().iter().find(|enemy| enemy.is_at(index)) {
            Some(enemy) if enemy.state() == EnemyState::Attacking => String::from(" X "),
            Some(_) => String::from(" x "),
            None => self.grid().render_cell_body(index),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render(self, self))
    }
}

impl<R: Rng> fmt::Display for Simulation<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render(self.grid(), self))
    }
}

// Corner glyphs indexed by which wall segments meet there.
const LEFT: usize = 1;
const RIGHT: usize = 2;
const UP: usize = 4;
const DOWN: usize = 8;
const CORNERS: [&str; 16] = [" ", "╴", "╶", "─", "╵", "┘", "└", "┴",
                             "╷", "┐", "┌", "┬", "│", "┤", "├", "┼"];

/// Draws the maze with box drawing characters, a wall wherever two cells are not joined by a
/// two way passage.
///
/// The drawing alternates lines of corners and horizontal walls with lines of vertical walls
/// and cell bodies, so an `n * n` maze takes `2n + 1` lines.
pub fn render(grid: &Grid, displayer: &dyn GridDisplay) -> String {
    let side = grid.dimension().0;
    let cell_at = |x: usize, y: usize| grid.index(Cartesian2DCoordinate::new(x as u32, y as u32));

    // Wall along the top of cell (x, y). Row `side` is the bottom boundary.
    let wall_above = |x: usize, y: usize| {
        y == 0 || y == side || !grid.is_neighbour_linked(cell_at(x, y - 1), CompassPrimary::South)
    };
    // Wall along the left of cell (x, y). Column `side` is the right boundary.
    let wall_left_of = |x: usize, y: usize| {
        x == 0 || x == side || !grid.is_neighbour_linked(cell_at(x - 1, y), CompassPrimary::East)
    };

    let corner = |x: usize, y: usize| {
        let mut mask = 0;
        if x > 0 && wall_above(x - 1, y) {
            mask |= LEFT;
        }
        if x < side && wall_above(x, y) {
            mask |= RIGHT;
        }
        if y > 0 && wall_left_of(x, y - 1) {
            mask |= UP;
        }
        if y < side && wall_left_of(x, y) {
            mask |= DOWN;
        }
        CORNERS[mask]
    };

    let mut output = String::new();
    for y in 0..=side {
        for x in 0..side {
            output.push_str(corner(x, y));
            output.push_str(if wall_above(x, y) { "───" } else { "   " });
        }
        output.push_str(corner(side, y));
        output.push('\n');

        if y < side {
            for x in 0..side {
                output.push_str(if wall_left_of(x, y) { "│" } else { " " });
                output.push_str(&displayer.render_cell_body(cell_at(x, y)));
            }
            output.push_str("│\n");
        }
    }

    output
}
