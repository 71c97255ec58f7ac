use rand::Rng;
use smallvec::SmallVec;
use std::slice;

use crate::cells::{CellState, CompassPrimary, MazeCell};
use crate::coordinates::{self, Cartesian2DCoordinate};
use crate::units::{EdgesCount, GridDimension, NodesCount};

pub type CellIndexSmallVec = SmallVec<[usize; 4]>;
pub type DirectedCellSmallVec = SmallVec<[(CompassPrimary, usize); 4]>;

// Looking only east and south visits each passage once.
static LINK_DIRECTIONS: [CompassPrimary; 2] = [CompassPrimary::East, CompassPrimary::South];

/// A square grid of `dimension * dimension` cells stored in row major order.
#[derive(Clone, Debug)]
pub struct Grid {
    dimension: GridDimension,
    cells: Vec<MazeCell>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PassageError {
    InvalidCellIndex,
    NoNeighbour,
}

/// Up to one neighbouring cell index per direction.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Neighbours {
    cells: [Option<usize>; 4],
}

impl Neighbours {
    pub fn none() -> Neighbours {
        Neighbours::default()
    }

    /// Builder style setter, mostly useful for hand made neighbourhoods.
    pub fn with(mut self, dir: CompassPrimary, index: usize) -> Neighbours {
        self.cells[dir.ordinal()] = Some(index);
        self
    }

    #[inline]
    pub fn get(&self, dir: CompassPrimary) -> Option<usize> {
        self.cells[dir.ordinal()]
    }

    /// Present neighbours in top, right, bottom, left order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (CompassPrimary, usize)> + 'a {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(ordinal, cell)| cell.map(|index| (CompassPrimary::ALL[ordinal], index)))
    }

    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.iter().any(|c| *c == Some(index))
    }
}

/// For each grid adjacent neighbour, whether it is a plain `Path` cell.
/// Directions with no neighbour (grid boundary) are `false`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct PathStates {
    flags: [bool; 4],
}

impl PathStates {
    #[inline]
    pub fn get(&self, dir: CompassPrimary) -> bool {
        self.flags[dir.ordinal()]
    }

    pub fn as_array(&self) -> [bool; 4] {
        self.flags
    }
}

impl Grid {
    /// Creates a grid of fully enclosed, unvisited `Path` cells.
    ///
    /// Panics if the dimension is zero.
    pub fn new(dimension: GridDimension) -> Grid {
        assert!(dimension.0 > 0, "a grid needs at least one cell");
        Grid {
            dimension,
            cells: vec![MazeCell::new(); dimension.cells_count()],
        }
    }

    #[inline]
    pub fn dimension(&self) -> GridDimension {
        self.dimension
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Node and passage counts of a perfect maze on this grid.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        (NodesCount(cells_count), EdgesCount(cells_count - 1))
    }

    /// Puts every cell back to its freshly created state.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = MazeCell::new();
        }
    }

    #[inline]
    pub fn is_valid_index(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    /// Panics if the index is outside of the grid.
    #[inline]
    pub fn cell(&self, index: usize) -> &MazeCell {
        self.assert_valid(index);
        &self.cells[index]
    }

    pub fn cells(&self) -> slice::Iter<MazeCell> {
        self.cells.iter()
    }

    #[inline]
    pub fn coordinate(&self, index: usize) -> Cartesian2DCoordinate {
        coordinates::to_coordinate(index, self.dimension)
    }

    #[inline]
    pub fn index(&self, coord: Cartesian2DCoordinate) -> usize {
        coordinates::to_index(coord, self.dimension)
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..self.size())
    }

    #[inline]
    pub fn cell_state(&self, index: usize) -> CellState {
        self.cell(index).state()
    }

    pub fn set_cell_state(&mut self, index: usize, state: CellState) {
        self.assert_valid(index);
        self.cells[index].set_state(state);
    }

    /// First cell in row major order carrying the given state.
    pub fn find_state(&self, state: CellState) -> Option<usize> {
        self.cells.iter().position(|cell| cell.state() == state)
    }

    #[inline]
    pub fn is_visited(&self, index: usize) -> bool {
        self.cell(index).visited
    }

    #[inline]
    pub fn mark_visited(&mut self, index: usize) {
        self.assert_valid(index);
        self.cells[index].visited = true;
    }

    /// The cell next to `index` in `direction`, ignoring walls.
    pub fn neighbour_at_direction(&self, index: usize, direction: CompassPrimary) -> Option<usize> {
        let coord = self.coordinate(index);
        coordinates::offset_coordinate(coord, direction, self.dimension)
            .map(|neighbour| self.index(neighbour))
    }

    /// Cells to the North, East, South or West of a cell, but not necessarily linked by a passage.
    pub fn neighbours(&self, index: usize) -> CellIndexSmallVec {
        CompassPrimary::ALL.iter()
            .filter_map(|dir| self.neighbour_at_direction(index, *dir))
            .collect()
    }

    /// Grid adjacent cells that a generator has not reached yet.
    pub fn unvisited_neighbours(&self, index: usize) -> DirectedCellSmallVec {
        CompassPrimary::ALL.iter()
            .filter_map(|dir| {
                self.neighbour_at_direction(index, *dir)
                    .filter(|neighbour| !self.cells[*neighbour].visited)
                    .map(|neighbour| (*dir, neighbour))
            })
            .collect()
    }

    /// Neighbours reachable from this cell: inside the grid and this cell's own wall is open.
    ///
    /// Only the wall flags of `index` are consulted.
    pub fn open_neighbours(&self, index: usize) -> Neighbours {
        let walls = self.cell(index).wall_config();
        CompassPrimary::ALL.iter()
            .filter(|dir| walls.is_open(**dir))
            .fold(Neighbours::none(), |neighbours, dir| {
                match self.neighbour_at_direction(index, *dir) {
                    Some(neighbour) => neighbours.with(*dir, neighbour),
                    None => neighbours,
                }
            })
    }

    /// For each grid adjacent neighbour (walls ignored), is it a plain `Path` cell?
    pub fn path_neighbour_states(&self, index: usize) -> PathStates {
        let mut flags = [false; 4];
        for dir in CompassPrimary::ALL.iter() {
            if let Some(neighbour) = self.neighbour_at_direction(index, *dir) {
                flags[dir.ordinal()] = self.cells[neighbour].state() == CellState::Path;
            }
        }
        PathStates { flags }
    }

    /// Opens the passage between a cell and its neighbour in `direction`, clearing the walls
    /// on both sides. Returns the neighbour's index.
    pub fn carve_passage(&mut self,
                         index: usize,
                         direction: CompassPrimary)
                         -> Result<usize, PassageError> {
        if !self.is_valid_index(index) {
            return Err(PassageError::InvalidCellIndex);
        }
        let neighbour = self.neighbour_at_direction(index, direction)
            .ok_or(PassageError::NoNeighbour)?;

        self.cells[index].remove_wall(direction);
        self.cells[neighbour].remove_wall(direction.opposite());
        Ok(neighbour)
    }

    /// Is there a two way passage from this cell in `direction`?
    pub fn is_neighbour_linked(&self, index: usize, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(index, direction)
            .map_or(false, |neighbour| {
                self.cells[index].wall_config().is_open(direction) &&
                self.cells[neighbour].wall_config().is_open(direction.opposite())
            })
    }

    /// Every two way passage once, as `(cell, neighbour to the east or south)`.
    pub fn iter_links<'a>(&'a self) -> impl Iterator<Item = (usize, usize)> + 'a {
        (0..self.size()).flat_map(move |index| {
            LINK_DIRECTIONS.iter()
                .filter(move |dir| self.is_neighbour_linked(index, **dir))
                .filter_map(move |dir| self.neighbour_at_direction(index, *dir))
                .map(move |neighbour| (index, neighbour))
        })
    }

    #[inline]
    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// Walls that are open on one side only. Always zero for a generated maze.
    pub fn one_way_passages_count(&self) -> usize {
        (0..self.size())
            .map(|index| {
                CompassPrimary::ALL.iter()
                    .filter(|dir| {
                        self.neighbour_at_direction(index, **dir).map_or(false, |neighbour| {
                            self.cells[index].wall_config().is_open(**dir) !=
                            self.cells[neighbour].wall_config().is_open(dir.opposite())
                        })
                    })
                    .count()
            })
            .sum::<usize>() / 2
    }

    #[inline]
    fn assert_valid(&self, index: usize) {
        assert!(self.is_valid_index(index),
                "cell index {} is outside of a grid with {} cells",
                index,
                self.size());
    }
}


#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn grid(size: usize) -> Grid {
        Grid::new(GridDimension(size))
    }

    #[test]
    fn grid_size() {
        let g = grid(10);
        assert_eq!(g.size(), 100);
        assert_eq!(g.dimension(), GridDimension(10));
        assert_eq!(g.graph_size(), (NodesCount(100), EdgesCount(99)));
    }

    #[test]
    #[should_panic]
    fn zero_sized_grid_panics() {
        grid(0);
    }

    #[test]
    fn neighbour_cells() {
        let g = grid(10);
        let check_expected_neighbours = |index, expected: &[usize]| {
            let found = g.neighbours(index).iter().cloned().sorted().collect::<Vec<usize>>();
            let expected = expected.iter().cloned().sorted().collect::<Vec<usize>>();
            assert_eq!(found, expected);
        };

        // corners
        check_expected_neighbours(0, &[1, 10]);
        check_expected_neighbours(9, &[8, 19]);
        check_expected_neighbours(90, &[80, 91]);
        check_expected_neighbours(99, &[89, 98]);

        // sides
        check_expected_neighbours(1, &[0, 2, 11]);
        check_expected_neighbours(10, &[0, 20, 11]);
        check_expected_neighbours(89, &[79, 99, 88]);

        // 4 neighbours inside the grid
        check_expected_neighbours(11, &[1, 10, 12, 21]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = grid(2);
        let check_neighbour = |index, dir, expected| {
            assert_eq!(g.neighbour_at_direction(index, dir), expected);
        };
        check_neighbour(0, CompassPrimary::North, None);
        check_neighbour(0, CompassPrimary::South, Some(2));
        check_neighbour(0, CompassPrimary::East, Some(1));
        check_neighbour(0, CompassPrimary::West, None);

        check_neighbour(3, CompassPrimary::North, Some(1));
        check_neighbour(3, CompassPrimary::South, None);
        check_neighbour(3, CompassPrimary::East, None);
        check_neighbour(3, CompassPrimary::West, Some(2));
    }

    #[test]
    fn enclosed_cells_have_no_open_neighbours() {
        let g = grid(4);
        for index in 0..g.size() {
            assert!(g.open_neighbours(index).is_empty());
        }
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn carving_opens_both_sides() {
        let mut g = grid(4);
        let neighbour = g.carve_passage(5, CompassPrimary::North).expect("carve failed");
        assert_eq!(neighbour, 1);
        assert!(g.cell(5).wall_config().is_open(CompassPrimary::North));
        assert!(g.cell(1).wall_config().is_open(CompassPrimary::South));
        assert!(g.is_neighbour_linked(5, CompassPrimary::North));
        assert!(g.is_neighbour_linked(1, CompassPrimary::South));

        assert_eq!(g.open_neighbours(5), Neighbours::none().with(CompassPrimary::North, 1));
        assert_eq!(g.open_neighbours(1), Neighbours::none().with(CompassPrimary::South, 5));
        assert_eq!(g.links_count(), 1);
        assert_eq!(g.iter_links().collect::<Vec<_>>(), vec![(1, 5)]);
        assert_eq!(g.one_way_passages_count(), 0);
    }

    #[test]
    fn carving_off_the_grid_fails() {
        let mut g = grid(4);
        assert_eq!(g.carve_passage(0, CompassPrimary::North), Err(PassageError::NoNeighbour));
        assert_eq!(g.carve_passage(3, CompassPrimary::East), Err(PassageError::NoNeighbour));
        assert_eq!(g.carve_passage(16, CompassPrimary::West),
                   Err(PassageError::InvalidCellIndex));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn open_neighbours_only_read_the_local_walls() {
        let mut g = grid(3);
        // A one sided opening: 4 can see 1, but 1 cannot see 4.
        g.cells[4].remove_wall(CompassPrimary::North);
        assert_eq!(g.open_neighbours(4).get(CompassPrimary::North), Some(1));
        assert_eq!(g.open_neighbours(1).get(CompassPrimary::South), None);
        assert!(!g.is_neighbour_linked(4, CompassPrimary::North));
        assert_eq!(g.one_way_passages_count(), 1);
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn open_boundary_wall_is_not_a_neighbour() {
        let mut g = grid(3);
        g.cells[0].remove_wall(CompassPrimary::West);
        assert!(g.open_neighbours(0).is_empty());
    }

    #[test]
    fn neighbours_iterate_in_fixed_order() {
        let mut g = grid(3);
        for dir in CompassPrimary::ALL.iter() {
            g.carve_passage(4, *dir).expect("carve failed");
        }
        let found = g.open_neighbours(4).iter().collect::<Vec<_>>();
        assert_eq!(found,
                   vec![(CompassPrimary::North, 1),
                        (CompassPrimary::East, 5),
                        (CompassPrimary::South, 7),
                        (CompassPrimary::West, 3)]);
        assert!(g.open_neighbours(4).contains(7));
        assert!(!g.open_neighbours(4).contains(8));
    }

    #[test]
    fn unvisited_neighbours_shrink_as_cells_are_visited() {
        let mut g = grid(3);
        assert_eq!(g.unvisited_neighbours(4).len(), 4);
        g.mark_visited(1);
        g.mark_visited(3);
        assert_eq!(&*g.unvisited_neighbours(4),
                   &[(CompassPrimary::East, 5), (CompassPrimary::South, 7)]);
        assert!(g.is_visited(1));
        assert!(!g.is_visited(4));
    }

    #[test]
    fn path_states_use_raw_adjacency() {
        let mut g = grid(3);
        g.set_cell_state(0, CellState::Start);
        g.set_cell_state(8, CellState::End);

        // Neighbours of cell 1: north none, east 2, south 4, west 0 (Start)
        assert_eq!(g.path_neighbour_states(1).as_array(), [false, true, true, false]);
        // Neighbours of cell 5: north 2, east none, south 8 (End), west 4
        assert_eq!(g.path_neighbour_states(5).as_array(), [true, false, false, true]);
        // Walls play no part
        assert_eq!(g.path_neighbour_states(4).as_array(), [true, true, true, true]);
    }

    #[test]
    fn states_can_be_found() {
        let mut g = grid(3);
        assert_eq!(g.find_state(CellState::Start), None);
        g.set_cell_state(0, CellState::Start);
        g.set_cell_state(8, CellState::End);
        assert_eq!(g.find_state(CellState::Start), Some(0));
        assert_eq!(g.find_state(CellState::End), Some(8));
        assert_eq!(g.cell_state(4), CellState::Path);
    }

    #[test]
    fn reset_encloses_every_cell_again() {
        let mut g = grid(3);
        g.carve_passage(0, CompassPrimary::East).expect("carve failed");
        g.mark_visited(0);
        g.set_cell_state(0, CellState::Start);
        g.reset();
        assert!(g.cells().all(|cell| *cell == MazeCell::new()));
    }

    #[test]
    #[should_panic]
    fn cell_out_of_range_panics() {
        grid(2).cell(4);
    }

    #[test]
    fn random_cell() {
        let g = grid(4);
        let mut rng = XorShiftRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(g.random_cell(&mut rng) < 16);
        }
    }
}
