use crate::errors::*;
use crate::grid::{GridGraph, IndexType, VertexIndex};
use crate::utils::{self, VertexMap};

use smallvec::SmallVec;


/// Step counts from a start vertex to every vertex reachable from it along passages.
#[derive(Debug, Clone)]
pub struct Distances {
    start: VertexIndex,
    distances: VertexMap<u32>,
    max_distance: u32,
}

impl Distances {
    pub fn new<GridIndexType>(grid: &GridGraph<GridIndexType>, start: VertexIndex) -> Result<Distances>
        where GridIndexType: IndexType
    {
        // Every passage is one step, so a breadth first flood fill settles each vertex the first
        // time it is reached. The distances map doubles as the visited set.
        let mut distances = utils::vertex_map(grid.size());
        let mut max = 0;
        distances.insert(start, 0);

        let mut frontier = vec![start];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for &vertex in &frontier {
                let distance_to_vertex = distances[&vertex];
                if distance_to_vertex > max {
                    max = distance_to_vertex;
                }

                for &linked in grid.links(vertex)?.iter() {
                    if !distances.contains_key(&linked) {
                        distances.insert(linked, distance_to_vertex + 1);
                        new_frontier.push(linked);
                    }
                }
            }
            frontier = new_frontier;
        }

        Ok(Distances {
            start: start,
            distances: distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> VertexIndex {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// None if the vertex cannot be reached from the start.
    #[inline(always)]
    pub fn distance_from_start_to(&self, vertex: VertexIndex) -> Option<u32> {
        self.distances.get(&vertex).cloned()
    }

    /// Every vertex at the maximum distance from the start, in ascending index order.
    pub fn furthest_points(&self) -> SmallVec<[VertexIndex; 8]> {
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, &distance)| distance == self.max_distance)
            .map(|(&vertex, _)| vertex)
            .collect::<SmallVec<[VertexIndex; 8]>>();
        furthest.sort();
        furthest
    }
}

/// The route from the start of `distances_from_start` to `end`, both ends included.
/// None if `end` is unreachable, or if the grid no longer matches the distances.
pub fn shortest_path<GridIndexType>(grid: &GridGraph<GridIndexType>,
                                    distances_from_start: &Distances,
                                    end: VertexIndex)
                                    -> Option<Vec<VertexIndex>>
    where GridIndexType: IndexType
{
    let mut current_distance = distances_from_start.distance_from_start_to(end)?;
    let mut current = end;
    let mut path = vec![end];

    while current != distances_from_start.start() {
        let closer = grid.links(current)
            .ok()?
            .iter()
            .cloned()
            .filter_map(|linked| {
                distances_from_start.distance_from_start_to(linked).map(|d| (linked, d))
            })
            .min_by_key(|&(_, d)| d);

        match closer {
            Some((closer_vertex, closer_distance)) if closer_distance < current_distance => {
                current = closer_vertex;
                current_distance = closer_distance;
                path.push(current);
            }
            // We have not got any closer to the start, the links have changed since the flood fill
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}

/// The longest route through a perfect maze, starting from the vertex furthest from the exit.
/// On a maze with loops this is just some long path.
pub fn longest_path<GridIndexType>(grid: &GridGraph<GridIndexType>) -> Result<Vec<VertexIndex>>
    where GridIndexType: IndexType
{
    let from_exit = Distances::new(grid, grid.exit_vertex())?;
    let path_start = from_exit.furthest_points()[0];

    let from_path_start = Distances::new(grid, path_start)?;
    let path_end = from_path_start.furthest_points()[0];

    Ok(shortest_path(grid, &from_path_start, path_end).unwrap_or_else(Vec::new))
}
