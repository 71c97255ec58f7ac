use smallvec::SmallVec;

/// The four sides of a square cell.
///
/// `North` is the top wall, `East` the right, `South` the bottom and `West` the left.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

impl CompassPrimary {
    /// Fixed enumeration order used everywhere directions are scanned: top, right, bottom, left.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    /// The wall on a neighbouring cell that faces this one.
    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// Position of the direction in `ALL`, handy for indexing 4 element arrays.
    #[inline]
    pub fn ordinal(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::East => 1,
            CompassPrimary::South => 2,
            CompassPrimary::West => 3,
        }
    }
}

/// Which walls of a cell are standing. `true` means the wall is present and the passage closed.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallConfig {
    walls: [bool; 4],
}

impl WallConfig {
    pub fn enclosed() -> WallConfig {
        WallConfig { walls: [true; 4] }
    }

    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.walls[dir.ordinal()]
    }

    #[inline]
    pub fn is_open(&self, dir: CompassPrimary) -> bool {
        !self.has_wall(dir)
    }

    pub fn open_directions(&self) -> DirectionSmallVec {
        CompassPrimary::ALL.iter()
            .cloned()
            .filter(|dir| self.is_open(*dir))
            .collect()
    }

    /// Flags in top, right, bottom, left order.
    #[inline]
    pub fn as_array(&self) -> [bool; 4] {
        self.walls
    }
}

impl Default for WallConfig {
    fn default() -> WallConfig {
        WallConfig::enclosed()
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Path,
    Start,
    End,
}

/// One grid unit.
///
/// Walls belong to the cell alone: opening the north wall here does not touch the south wall
/// of the cell above. Whoever carves a passage must open both sides.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeCell {
    walls: WallConfig,
    state: CellState,
    /// Only meaningful while a generator is running.
    pub visited: bool,
}

impl MazeCell {
    pub fn new() -> MazeCell {
        MazeCell {
            walls: WallConfig::enclosed(),
            state: CellState::Path,
            visited: false,
        }
    }

    #[inline]
    pub fn wall_config(&self) -> WallConfig {
        self.walls
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    #[inline]
    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    /// Clears a single wall flag. Does not check that anything lies on the other side.
    #[inline]
    pub fn remove_wall(&mut self, dir: CompassPrimary) {
        self.walls.walls[dir.ordinal()] = false;
    }
}

impl Default for MazeCell {
    fn default() -> MazeCell {
        MazeCell::new()
    }
}
