/// Number of cells along one side of a square grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct GridDimension(pub usize);

impl GridDimension {
    /// Total number of cells on the square grid.
    #[inline]
    pub fn cells_count(&self) -> usize {
        self.0 * self.0
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);
