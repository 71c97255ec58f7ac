use std::convert::From;

use crate::cells::CompassPrimary;
use crate::units::GridDimension;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// Row major index of a coordinate: `x + dimension * y`.
///
/// Panics if the coordinate lies outside of the grid.
#[inline]
pub fn to_index(coord: Cartesian2DCoordinate, dimension: GridDimension) -> usize {
    let GridDimension(size) = dimension;
    let (x, y) = (coord.x as usize, coord.y as usize);
    assert!(x < size && y < size,
            "coordinate {:?} is outside of a {}x{} grid",
            coord,
            size,
            size);
    x + size * y
}

/// Inverse of `to_index` over `0..dimension²`.
///
/// Panics if the index lies outside of the grid.
#[inline]
pub fn to_coordinate(index: usize, dimension: GridDimension) -> Cartesian2DCoordinate {
    assert!(index < dimension.cells_count(),
            "cell index {} is outside of a {}x{} grid",
            index,
            dimension.0,
            dimension.0);
    let x = index % dimension.0;
    let y = index / dimension.0;
    Cartesian2DCoordinate::new(x as u32, y as u32)
}

/// Creates a new coordinate offset 1 cell away in the given direction.
/// Returns None if that would fall off the edge of the grid.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary,
                         dimension: GridDimension)
                         -> Option<Cartesian2DCoordinate> {
    let (x, y) = (coord.x, coord.y);
    let last = dimension.0 as u32 - 1;
    match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate::new(x, y - 1))
            } else {
                None
            }
        }
        CompassPrimary::East => {
            if x < last {
                Some(Cartesian2DCoordinate::new(x + 1, y))
            } else {
                None
            }
        }
        CompassPrimary::South => {
            if y < last {
                Some(Cartesian2DCoordinate::new(x, y + 1))
            } else {
                None
            }
        }
        CompassPrimary::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate::new(x - 1, y))
            } else {
                None
            }
        }
    }
}

/// Pixel centre of a cell when each cell is drawn `cell_pixels` wide.
/// Only a presentation layer cares about this.
pub fn cell_centre(index: usize, dimension: GridDimension, cell_pixels: u32) -> (u32, u32) {
    let coord = to_coordinate(index, dimension);
    let half = cell_pixels / 2;
    (coord.x * cell_pixels + half, coord.y * cell_pixels + half)
}
