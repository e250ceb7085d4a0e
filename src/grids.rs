use crate::errors::*;
use crate::grid::GridGraph;
use crate::units::{ColumnsCount, RowsCount};

/// Up to 128 cells.
pub type SmallGridGraph = GridGraph<u8>;
/// Up to 32768 cells.
pub type MediumGridGraph = GridGraph<u16>;
pub type LargeGridGraph = GridGraph<u32>;

pub fn small_grid(rows: RowsCount, columns: ColumnsCount) -> Result<SmallGridGraph> {
    SmallGridGraph::new(rows, columns)
}

pub fn medium_grid(rows: RowsCount, columns: ColumnsCount) -> Result<MediumGridGraph> {
    MediumGridGraph::new(rows, columns)
}

pub fn large_grid(rows: RowsCount, columns: ColumnsCount) -> Result<LargeGridGraph> {
    LargeGridGraph::new(rows, columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_limits_follow_the_index_type() {
        assert!(small_grid(RowsCount(8), ColumnsCount(16)).is_ok());
        assert!(small_grid(RowsCount(16), ColumnsCount(16)).is_err());

        assert!(medium_grid(RowsCount(128), ColumnsCount(256)).is_ok());
        assert!(medium_grid(RowsCount(256), ColumnsCount(256)).is_err());

        assert!(large_grid(RowsCount(256), ColumnsCount(256)).is_ok());
    }
}
