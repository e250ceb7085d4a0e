use crate::cells::{CompassPrimary, GridCoordinate};
use crate::errors::*;
use error_chain::bail;
use crate::units::{ColumnIndex, ColumnsCount, EdgesCount, NodesCount, RowIndex, RowsCount};


/// Validated size of a rectangular grid. Cells are numbered in row-major order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
    size: NodesCount,
}

impl GridDimensions {
    /// Fails with `InvalidDimensions` on an empty grid or one whose cell count overflows `usize`.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<GridDimensions> {
        let (RowsCount(rows_count), ColumnsCount(columns_count)) = (rows, columns);
        if rows_count == 0 || columns_count == 0 {
            bail!(ErrorKind::InvalidDimensions(rows_count, columns_count));
        }
        let size = rows_count.checked_mul(columns_count)
            .ok_or(ErrorKind::InvalidDimensions(rows_count, columns_count))?;

        Ok(GridDimensions {
            rows: rows,
            columns: columns,
            size: NodesCount(size),
        })
    }

    #[inline(always)]
    pub fn size(&self) -> NodesCount {
        self.size
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// Node count and the directed edge count of a spanning tree (two half-edges per passage).
    /// The edge count saturates at `usize::MAX` on grids too large to link.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let NodesCount(cells_count) = self.size;
        (self.size, EdgesCount((cells_count - 1).saturating_mul(2)))
    }

    #[inline]
    pub fn is_valid_index(&self, index: usize) -> bool {
        index < self.size.0
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        coord.row.0 < self.rows.0 && coord.column.0 < self.columns.0
    }

    /// Convert a row-major index to a grid coordinate.
    /// Returns None if the index is invalid.
    pub fn coordinate_of(&self, index: usize) -> Option<GridCoordinate> {
        if self.is_valid_index(index) {
            let ColumnsCount(width) = self.columns;
            Some(GridCoordinate {
                row: RowIndex(index / width),
                column: ColumnIndex(index % width),
            })
        } else {
            None
        }
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0..size.
    /// Returns None if the grid coordinate is invalid.
    pub fn index_of(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row.0 * self.columns.0 + coord.column.0)
        } else {
            None
        }
    }

    /// The index of the cell one step away in `direction`, or None at the grid boundary.
    /// No wraparound: the east neighbour of the last column is None, not the next row.
    pub fn neighbour_index(&self, index: usize, direction: CompassPrimary) -> Option<usize> {
        self.coordinate_of(index)
            .and_then(|coord| direction.offset_coordinate(coord))
            .and_then(|neighbour_coord| self.index_of(neighbour_coord))
    }
}
