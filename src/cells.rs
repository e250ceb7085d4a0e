use crate::units::{ColumnIndex, RowIndex};

/// A cell position on a rectangular grid. Row 0 is the northern edge, column 0 the western edge.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: RowIndex,
    pub column: ColumnIndex,
}

impl GridCoordinate {
    pub fn new(row: usize, column: usize) -> GridCoordinate {
        GridCoordinate {
            row: RowIndex(row),
            column: ColumnIndex(column),
        }
    }
}

impl From<(usize, usize)> for GridCoordinate {
    fn from(row_column_pair: (usize, usize)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Every direction, in the order neighbour candidates are enumerated.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// Creates a new `GridCoordinate` offset 1 cell away in this direction.
    /// Returns None if the coordinate is not representable (would go below row or column 0).
    /// The upper grid bounds are not known here, see `GridDimensions::neighbour_index`.
    pub fn offset_coordinate(self, coord: GridCoordinate) -> Option<GridCoordinate> {
        let (RowIndex(row), ColumnIndex(column)) = (coord.row, coord.column);
        match self {
            CompassPrimary::North => {
                if row > 0 {
                    Some(GridCoordinate::new(row - 1, column))
                } else {
                    None
                }
            }
            CompassPrimary::South => Some(GridCoordinate::new(row + 1, column)),
            CompassPrimary::East => Some(GridCoordinate::new(row, column + 1)),
            CompassPrimary::West => {
                if column > 0 {
                    Some(GridCoordinate::new(row, column - 1))
                } else {
                    None
                }
            }
        }
    }
}
