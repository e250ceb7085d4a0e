// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use errors::*;` to get access to everything `error_chain!` creates.
#![allow(deprecated)]

use error_chain::error_chain;

error_chain! {

    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions: {} rows by {} columns, both must be at least 1", rows, columns)
        }
        VertexOutOfRange(index: usize, size: usize) {
            description("vertex index out of range")
            display("vertex index {} is out of range for a grid of {} vertices", index, size)
        }
        GridTooLarge(vertices: usize, index_limit: usize) {
            description("grid too large for the graph index type")
            display("a grid of {} vertices does not fit a graph index limited to {}", vertices, index_limit)
        }
        EdgeCapacityExceeded(index_limit: usize) {
            description("edge capacity exceeded")
            display("no room for another edge pair, the graph index is limited to {}", index_limit)
        }
    }
}
