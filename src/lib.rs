//! **gridmaze** generates perfect mazes on rectangular grids with the recursive backtracker
//! algorithm and exposes the resulting passages for rendering and route finding.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grids;
pub mod pathing;
pub mod units;
pub mod utils;
