use crate::cells::{CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::grid_dimensions::GridDimensions;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

use error_chain::bail;
use petgraph::graph::{self, NodeIndex};
pub use petgraph::graph::IndexType;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Graph};
use smallvec::SmallVec;
use std::fmt;
use std::iter::StepBy;
use std::slice;

/// Row-major position of a vertex in the grid, `row * columns + column`.
pub type VertexIndex = usize;
pub type VertexSmallVec = SmallVec<[VertexIndex; 4]>;
pub type EdgeSmallVec = SmallVec<[Edge; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

pub const DEFAULT_EDGE_WEIGHT: f32 = 1.0;

/// Per cell state stored as the graph node weight.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Vertex {
    visited: bool,
}

/// One directed half of a passage between two cells.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Edge {
    pub source: VertexIndex,
    pub destination: VertexIndex,
    pub weight: f32,
}

/// A rectangular grid of cells as a graph: one vertex per cell, passages as paired directed edges.
///
/// Vertices live in one arena owned by the graph and are only ever referred to by index, so the
/// whole grid can be cloned freely.
#[derive(Clone)]
pub struct GridGraph<GridIndexType: IndexType = u32> {
    graph: Graph<Vertex, f32, Directed, GridIndexType>,
    dimensions: GridDimensions,
}

impl<GridIndexType: IndexType> fmt::Debug for GridGraph<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "GridGraph :: rows: {:?}, columns: {:?}, edges: {:?}",
               self.rows(), self.columns(), self.graph.edge_count())
    }
}

impl<GridIndexType: IndexType> GridGraph<GridIndexType> {
    /// Create `rows * columns` unvisited vertices with no edges.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<GridGraph<GridIndexType>> {
        let dimensions = GridDimensions::new(rows, columns)?;
        check_index_capacity::<GridIndexType>(&dimensions)?;

        let mut grid = GridGraph {
            graph: Graph::default(),
            dimensions: dimensions,
        };
        grid.reset();
        Ok(grid)
    }

    /// Replace all state with a fresh grid of the given size.
    /// On error the existing grid is left untouched.
    pub fn initialize(&mut self, rows: RowsCount, columns: ColumnsCount) -> Result<()> {
        let dimensions = GridDimensions::new(rows, columns)?;
        check_index_capacity::<GridIndexType>(&dimensions)?;
        self.dimensions = dimensions;
        self.reset();
        Ok(())
    }

    /// Recreate the vertex set for the current dimensions, dropping every edge.
    pub fn reset(&mut self) {
        let (NodesCount(nodes), EdgesCount(edges)) = self.dimensions.graph_size();
        self.graph = Graph::with_capacity(nodes, edges);
        for _ in 0..nodes {
            let _ = self.graph.add_node(Vertex::default());
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &GridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size().0
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    /// Number of directed half-edges, twice the number of passages.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of undirected passages.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count() / 2
    }

    /// The conventional exit cell, the north west corner.
    #[inline]
    pub fn exit_vertex(&self) -> VertexIndex {
        0
    }

    /// The conventional entry cell, the south east corner.
    #[inline]
    pub fn entry_vertex(&self) -> VertexIndex {
        self.size() - 1
    }

    pub fn coordinate(&self, vertex: VertexIndex) -> Result<GridCoordinate> {
        self.dimensions.coordinate_of(vertex)
            .ok_or_else(|| ErrorKind::VertexOutOfRange(vertex, self.size()).into())
    }

    pub fn vertex_at(&self, coord: GridCoordinate) -> Option<VertexIndex> {
        self.dimensions.index_of(coord)
    }

    /// The vertex one step away in `direction`, or `Ok(None)` at the grid boundary.
    pub fn neighbour_at_direction(&self,
                                  vertex: VertexIndex,
                                  direction: CompassPrimary)
                                  -> Result<Option<VertexIndex>> {
        self.check_vertex(vertex)?;
        Ok(self.dimensions.neighbour_index(vertex, direction))
    }

    /// Link two vertices with a directed edge each way, both carrying `weight`.
    ///
    /// No check is made for an existing link: linking the same pair twice creates parallel
    /// edges. The maze generators only ever link a vertex to a previously unvisited one, so
    /// they cannot do this.
    pub fn add_edge(&mut self, a: VertexIndex, b: VertexIndex, weight: f32) -> Result<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;

        let index_limit = <GridIndexType as IndexType>::max().index();
        if self.graph.edge_count() + 2 > index_limit {
            bail!(ErrorKind::EdgeCapacityExceeded(index_limit));
        }
        self.link_unchecked(a, b, weight);
        Ok(())
    }

    /// Grid adjacent vertices that have not been visited, in North, South, East, West order.
    pub fn unvisited_adjacent(&self, vertex: VertexIndex) -> Result<VertexSmallVec> {
        self.check_vertex(vertex)?;
        Ok(self.unvisited_adjacent_unchecked(vertex))
    }

    /// Destinations of the vertex's existing edges that have not been visited.
    pub fn unvisited_connected(&self, vertex: VertexIndex) -> Result<VertexSmallVec> {
        Ok(self.edges(vertex)?
            .iter()
            .map(|edge| edge.destination)
            .filter(|&destination| !self.visited_unchecked(destination))
            .collect())
    }

    /// Edges leaving a vertex, oldest first.
    pub fn edges(&self, vertex: VertexIndex) -> Result<EdgeSmallVec> {
        self.check_vertex(vertex)?;

        // petgraph walks a vertex's edge list newest first
        let mut edges = self.graph
            .edges(node(vertex))
            .map(|edge_ref| {
                Edge {
                    source: vertex,
                    destination: edge_ref.target().index(),
                    weight: *edge_ref.weight(),
                }
            })
            .collect::<EdgeSmallVec>();
        edges.reverse();
        Ok(edges)
    }

    /// Vertices linked to a particular vertex by a passage.
    pub fn links(&self, vertex: VertexIndex) -> Result<VertexSmallVec> {
        Ok(self.edges(vertex)?.iter().map(|edge| edge.destination).collect())
    }

    /// Are two vertices linked by a passage? False if either index is invalid.
    pub fn is_linked(&self, a: VertexIndex, b: VertexIndex) -> bool {
        self.dimensions.is_valid_index(a) && self.dimensions.is_valid_index(b) &&
        self.graph.find_edge(node(a), node(b)).is_some()
    }

    /// The sides of a cell that open onto a linked neighbour. Every other side is a wall.
    pub fn open_directions(&self, vertex: VertexIndex) -> Result<DirectionSmallVec> {
        self.check_vertex(vertex)?;
        Ok(CompassPrimary::ALL.iter()
            .cloned()
            .filter(|&dir| {
                self.dimensions
                    .neighbour_index(vertex, dir)
                    .map_or(false, |neighbour| self.is_linked(vertex, neighbour))
            })
            .collect())
    }

    pub fn is_visited(&self, vertex: VertexIndex) -> Result<bool> {
        self.check_vertex(vertex)?;
        Ok(self.visited_unchecked(vertex))
    }

    /// Each undirected passage once, as the half-edge that was added first.
    pub fn iter_links(&self) -> LinksIter<GridIndexType> {
        LinksIter { graph_edge_iter: self.graph.raw_edges().iter().step_by(2) }
    }

    #[inline]
    fn check_vertex(&self, vertex: VertexIndex) -> Result<()> {
        if self.dimensions.is_valid_index(vertex) {
            Ok(())
        } else {
            bail!(ErrorKind::VertexOutOfRange(vertex, self.size()))
        }
    }

    // The unchecked helpers are for the generators, which only hold indices taken from the grid.

    #[inline]
    pub(crate) fn visited_unchecked(&self, vertex: VertexIndex) -> bool {
        self.graph[node(vertex)].visited
    }

    #[inline]
    pub(crate) fn mark_visited(&mut self, vertex: VertexIndex) {
        self.graph[node(vertex)].visited = true;
    }

    pub(crate) fn clear_visited(&mut self) {
        for vertex in self.graph.node_weights_mut() {
            vertex.visited = false;
        }
    }

    pub(crate) fn unvisited_adjacent_unchecked(&self, vertex: VertexIndex) -> VertexSmallVec {
        CompassPrimary::ALL.iter()
            .filter_map(|&dir| self.dimensions.neighbour_index(vertex, dir))
            .filter(|&neighbour| !self.visited_unchecked(neighbour))
            .collect()
    }

    pub(crate) fn has_unvisited_adjacent(&self, vertex: VertexIndex) -> bool {
        CompassPrimary::ALL.iter()
            .filter_map(|&dir| self.dimensions.neighbour_index(vertex, dir))
            .any(|neighbour| !self.visited_unchecked(neighbour))
    }

    pub(crate) fn link_unchecked(&mut self, a: VertexIndex, b: VertexIndex, weight: f32) {
        let _ = self.graph.add_edge(node(a), node(b), weight);
        let _ = self.graph.add_edge(node(b), node(a), weight);
    }
}

#[inline]
fn node<GridIndexType: IndexType>(vertex: VertexIndex) -> NodeIndex<GridIndexType> {
    NodeIndex::new(vertex)
}

/// A grid must hold all its vertices and the half-edges of a spanning tree within the index type.
/// The maximum index value itself is reserved by petgraph as an end marker.
fn check_index_capacity<GridIndexType: IndexType>(dimensions: &GridDimensions) -> Result<()> {
    let index_limit = <GridIndexType as IndexType>::max().index();
    let NodesCount(nodes) = dimensions.size();
    let fits = (nodes - 1).checked_mul(2)
        .map_or(false, |edges| nodes <= index_limit && edges <= index_limit);
    if !fits {
        bail!(ErrorKind::GridTooLarge(nodes, index_limit));
    }
    Ok(())
}

pub struct LinksIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: StepBy<slice::Iter<'a, graph::Edge<f32, GridIndexType>>>,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = Edge;

    fn next(&mut self) -> Option<Self::Item> {
        self.graph_edge_iter.next().map(|edge| {
            Edge {
                source: edge.source().index(),
                destination: edge.target().index(),
                weight: edge.weight,
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {} // default impl using size_hint()

impl<'a, GridIndexType: IndexType> fmt::Debug for LinksIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LinksIter :: remaining: {:?}", self.graph_edge_iter.size_hint().0)
    }
}
