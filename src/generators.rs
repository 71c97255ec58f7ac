use rand::Rng;
use rand::seq::SliceRandom;

use crate::cells::CellState;
use crate::grid::Grid;

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// Any previous maze on the grid is discarded first. The walk starts at a random cell and keeps
/// carving into a random unvisited neighbour, remembering the route on an explicit stack. When
/// the current cell has no unvisited neighbours we pop back along the route until a cell that
/// still has some is found.
///
/// Every cell is entered exactly once through a freshly carved passage (apart from the start
/// cell), so the passages form a spanning tree: a perfect maze with `size - 1` passages.
///
/// Afterwards cell 0 becomes the `Start` and the last cell the `End`.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R) {
    grid.reset();

    let mut unvisited_count = grid.size();
    let mut backtrack_stack: Vec<usize> = Vec::with_capacity(grid.size());

    let mut current = grid.random_cell(rng);
    grid.mark_visited(current);

    while unvisited_count != 0 {

        let unvisited_neighbours = grid.unvisited_neighbours(current);

        if let Some(&(direction, next)) = unvisited_neighbours.choose(rng) {

            grid.mark_visited(next);
            if grid.carve_passage(current, direction).is_err() {
                unreachable!("cell {} has no neighbour to the {:?}", current, direction);
            }
            backtrack_stack.push(next);
            current = next;

        } else {

            // Dead end.
            grid.mark_visited(current);
            unvisited_count -= 1;

            match backtrack_stack.pop() {
                Some(previous) => current = previous,
                None => {
                    assert!(unvisited_count == 0,
                            "maze generation stalled with {} cells unvisited",
                            unvisited_count)
                }
            }
        }
    }

    mark_start_and_end(grid);
}

/// The first cell is the start point and the last the end point, all others are paths.
pub fn mark_start_and_end(grid: &mut Grid) {
    let last = grid.size() - 1;
    grid.set_cell_state(0, CellState::Start);
    grid.set_cell_state(last, CellState::End);
}
