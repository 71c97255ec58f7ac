// Distances over the passages of a maze, and the maze viewed as a petgraph graph.
//
// Distances always follow `Grid::open_neighbours`, the same connectivity entities move with,
// so a path found here is one a player can actually walk.

use itertools::Itertools;
use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::CompassPrimary;
use crate::grid::Grid;
use crate::utils::{self, FnvHashMap};

#[derive(Debug, Clone)]
pub struct Distances {
    start_index: usize,
    distances: FnvHashMap<usize, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill the maze from `start`. Returns None if `start` is not on the grid.
    pub fn for_grid(grid: &Grid, start: usize) -> Option<Distances> {

        if !grid.is_valid_index(start) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start, 0);

        // Every step costs the same, so the first time a cell is reached is via a shortest
        // route and the map doubles as the visited set.
        let mut frontier = vec![start];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell in &frontier {
                let distance_to_cell = distances[cell];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for (_, neighbour) in grid.open_neighbours(*cell).iter() {
                    if !distances.contains_key(&neighbour) {
                        distances.insert(neighbour, distance_to_cell + 1);
                        new_frontier.push(neighbour);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_index: start,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> usize {
        self.start_index
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None when the cell cannot be reached from the start.
    #[inline(always)]
    pub fn distance_from_start_to(&self, index: usize) -> Option<u32> {
        self.distances.get(&index).cloned()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[usize; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(index, _)| *index)
            .sorted()
            .collect()
    }
}

/// Cells from the distances' start to `end`, both included.
pub fn shortest_path(grid: &Grid, distances_from_start: &Distances, end: usize) -> Option<Vec<usize>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end)?;
    let mut path = vec![end];
    let mut current = end;

    while current != distances_from_start.start() {

        // Walk back along a two way passage to a cell one step closer to the start.
        let closer = grid.open_neighbours(current)
            .iter()
            .filter(|&(dir, _)| grid.is_neighbour_linked(current, dir))
            .map(|(_, neighbour)| neighbour)
            .find(|neighbour| {
                distances_from_start.distance_from_start_to(*neighbour) ==
                Some(current_distance - 1)
            });

        match closer {
            Some(previous) => {
                current = previous;
                current_distance -= 1;
                path.push(current);
            }
            // Only one way passages lead here.
            None => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The directions to press to walk a path of adjacent open cells.
/// None if two consecutive cells are not joined by an open wall.
pub fn path_directions(grid: &Grid, path: &[usize]) -> Option<Vec<CompassPrimary>> {
    path.iter()
        .tuple_windows()
        .map(|(from, to)| {
            grid.open_neighbours(*from)
                .iter()
                .find(|&(_, neighbour)| neighbour == *to)
                .map(|(dir, _)| dir)
        })
        .collect()
}

/// One node per cell (node index == cell index) and one edge per two way passage.
pub fn passage_graph(grid: &Grid) -> UnGraph<(), ()> {
    let (nodes, edges) = grid.graph_size();
    let mut graph = UnGraph::<(), ()>::with_capacity(nodes.0, edges.0);
    for _ in 0..nodes.0 {
        let _ = graph.add_node(());
    }
    for (a, b) in grid.iter_links() {
        let _ = graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }
    graph
}

/// Exactly one route between any two cells: a connected, acyclic set of two way passages.
pub fn is_perfect_maze(grid: &Grid) -> bool {
    let graph = passage_graph(grid);
    grid.one_way_passages_count() == 0 &&
    graph.edge_count() == grid.size() - 1 &&
    connected_components(&graph) == 1 &&
    !is_cyclic_undirected(&graph)
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::grids::seeded_maze;
    use crate::units::GridDimension;

    // 2x2 grid with all four passages open: a cycle.
    fn open_square() -> Grid {
        let mut g = Grid::new(GridDimension(2));
        g.carve_passage(0, CompassPrimary::East).expect("carve failed");
        g.carve_passage(0, CompassPrimary::South).expect("carve failed");
        g.carve_passage(1, CompassPrimary::South).expect("carve failed");
        g.carve_passage(2, CompassPrimary::East).expect("carve failed");
        g
    }

    #[test]
    fn distances_construction_requires_valid_start() {
        let g = Grid::new(GridDimension(3));
        assert!(Distances::for_grid(&g, 9).is_none());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = Grid::new(GridDimension(3));
        let distances = Distances::for_grid(&g, 4).unwrap();
        assert_eq!(distances.start(), 4);
        for index in 0..g.size() {
            if index == 4 {
                assert_eq!(distances.distance_from_start_to(index), Some(0));
            } else {
                assert_eq!(distances.distance_from_start_to(index), None);
            }
        }
        assert_eq!(distances.reachable_count(), 1);
    }

    #[test]
    fn distances_on_open_grid() {
        let g = open_square();
        let distances = Distances::for_grid(&g, 0).unwrap();
        assert_eq!(distances.distance_from_start_to(0), Some(0));
        assert_eq!(distances.distance_from_start_to(1), Some(1));
        assert_eq!(distances.distance_from_start_to(2), Some(1));
        assert_eq!(distances.distance_from_start_to(3), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(&*distances.furthest_points_on_grid(), &[3]);
    }

    #[test]
    fn open_square_is_not_perfect() {
        let g = open_square();
        assert_eq!(passage_graph(&g).edge_count(), 4);
        assert!(!is_perfect_maze(&g));
    }

    #[test]
    fn enclosed_grid_is_not_perfect() {
        assert!(!is_perfect_maze(&Grid::new(GridDimension(3))));
        assert!(is_perfect_maze(&Grid::new(GridDimension(1))));
    }

    #[test]
    fn generated_mazes_are_perfect() {
        for size in 1..12 {
            assert!(is_perfect_maze(&seeded_maze(GridDimension(size), size as u64)));
        }
    }

    #[test]
    fn shortest_path_crosses_the_maze() {
        let g = seeded_maze(GridDimension(8), 17);
        let distances = Distances::for_grid(&g, 0).unwrap();
        let path = shortest_path(&g, &distances, 63).expect("no path");
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&63));
        assert_eq!(path.len() as u32, distances.distance_from_start_to(63).unwrap() + 1);
        for (a, b) in path.iter().tuple_windows() {
            assert!(g.open_neighbours(*a).contains(*b));
        }
    }

    #[test]
    fn path_to_start_is_the_start() {
        let g = seeded_maze(GridDimension(4), 2);
        let distances = Distances::for_grid(&g, 5).unwrap();
        assert_eq!(shortest_path(&g, &distances, 5), Some(vec![5]));
    }

    #[test]
    fn no_path_to_unreachable_cell() {
        let g = Grid::new(GridDimension(3));
        let distances = Distances::for_grid(&g, 0).unwrap();
        assert_eq!(shortest_path(&g, &distances, 8), None);
    }

    #[test]
    fn directions_along_a_path() {
        let g = open_square();
        assert_eq!(path_directions(&g, &[0, 1, 3, 2]),
                   Some(vec![CompassPrimary::East, CompassPrimary::South, CompassPrimary::West]));
        assert_eq!(path_directions(&g, &[0]), Some(vec![]));
        assert_eq!(path_directions(&g, &[0, 3]), None);
    }
}
