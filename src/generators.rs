use crate::errors::*;
use crate::grid::{GridGraph, IndexType, VertexIndex, DEFAULT_EDGE_WEIGHT};
use crate::units::{ColumnsCount, RowsCount};

use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// The cell every recursive backtracker walk starts from.
const START_VERTEX: VertexIndex = 0;

/// A fast, non cryptographic random source. The same seed always gives the same sequence.
/// Without a seed the generator is seeded from the operating system.
pub fn new_rng(seed: Option<u64>) -> XorShiftRng {
    match seed {
        Some(s) => XorShiftRng::seed_from_u64(s),
        None => XorShiftRng::from_entropy(),
    }
}

/// Build a grid of the requested size and carve a perfect maze into it.
pub fn perfect_maze<GridIndexType>(rows: RowsCount,
                                   columns: ColumnsCount,
                                   seed: Option<u64>)
                                   -> Result<GridGraph<GridIndexType>>
    where GridIndexType: IndexType
{
    let mut grid = GridGraph::new(rows, columns)?;
    let mut rng = new_rng(seed);
    recursive_backtracker(&mut grid, &mut rng);
    Ok(grid)
}

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// Any existing edges are discarded first. Starting from the north west cell we do a random
/// "drunken walk", carving a passage to an unvisited neighbour picked uniformly at random and
/// pushing it on a stack, until the walk reaches a cell with no unvisited neighbours. Then we
/// pop cells off the stack until one has an unvisited neighbour again and resume the walk from
/// there. When the stack is empty every cell has been visited exactly once and linked to the
/// maze by exactly one new passage, so the result is a spanning tree of `size - 1` passages.
///
/// The visited markers are cleared again before returning.
pub fn recursive_backtracker<GridIndexType, R>(grid: &mut GridGraph<GridIndexType>, rng: &mut R)
    where GridIndexType: IndexType,
          R: Rng + ?Sized
{
    grid.reset();

    let mut stack: Vec<VertexIndex> = Vec::with_capacity(grid.size());
    grid.mark_visited(START_VERTEX);
    stack.push(START_VERTEX);
    let mut max_depth = stack.len();

    while !stack.is_empty() {

        // Drunken walk
        while let Some(&current) = stack.last() {
            let candidates = grid.unvisited_adjacent_unchecked(current);
            if let Some(&next) = candidates.choose(&mut *rng) {
                grid.mark_visited(next);
                grid.link_unchecked(current, next, DEFAULT_EDGE_WEIGHT);
                stack.push(next);
            } else {
                break;
            }
        }
        max_depth = max_depth.max(stack.len());

        // Backtrack to the most recent cell that still has somewhere new to go
        while let Some(&current) = stack.last() {
            if grid.has_unvisited_adjacent(current) {
                trace!("resuming walk from vertex {} at depth {}", current, stack.len());
                break;
            }
            let _ = stack.pop();
        }
    }

    grid.clear_visited();

    debug!("recursive backtracker carved {} passages on a {}x{} grid, max stack depth {}",
           grid.links_count(),
           grid.rows().0,
           grid.columns().0,
           max_depth);
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::grid::{Edge, VertexIndex};
    use crate::utils::{undirected_pair, vertex_pair_set, VertexPairSet};
    use quickcheck::{quickcheck, TestResult};

    fn maze(rows: usize, columns: usize, seed: u64) -> GridGraph {
        perfect_maze(RowsCount(rows), ColumnsCount(columns), Some(seed)).expect("valid dimensions")
    }

    // Undirected passages as (low, high) vertex pairs.
    fn passages(g: &GridGraph) -> VertexPairSet {
        let mut set = vertex_pair_set(g.links_count());
        for Edge { source, destination, .. } in g.iter_links() {
            set.insert(undirected_pair(source, destination));
        }
        set
    }

    fn reachable_from_start(g: &GridGraph) -> usize {
        let mut seen = vec![false; g.size()];
        let mut stack = vec![0];
        seen[0] = true;
        let mut count = 1;
        while let Some(v) = stack.pop() {
            for &next in g.links(v).unwrap().iter() {
                if !seen[next] {
                    seen[next] = true;
                    count += 1;
                    stack.push(next);
                }
            }
        }
        count
    }

    fn is_grid_adjacent(g: &GridGraph, a: VertexIndex, b: VertexIndex) -> bool {
        let (ca, cb) = (g.coordinate(a).unwrap(), g.coordinate(b).unwrap());
        let row_diff = (ca.row.0 as isize - cb.row.0 as isize).abs();
        let column_diff = (ca.column.0 as isize - cb.column.0 as isize).abs();
        row_diff + column_diff == 1
    }

    fn check_perfect_maze(g: &GridGraph) {
        let expected_passages = g.size() - 1;
        assert_eq!(g.links_count(), expected_passages);
        assert_eq!(g.edge_count(), 2 * expected_passages);
        // no duplicated passages
        assert_eq!(passages(g).len(), expected_passages);
        // connected with V - 1 edges, so also acyclic
        assert_eq!(reachable_from_start(g), g.size());
        for edge in g.iter_links() {
            assert!(is_grid_adjacent(g, edge.source, edge.destination));
            assert_eq!(edge.weight, DEFAULT_EDGE_WEIGHT);
            assert!(g.is_linked(edge.destination, edge.source));
        }
        for v in 0..g.size() {
            assert!(!g.is_visited(v).unwrap());
        }
    }

    #[test]
    fn single_cell_maze() {
        let g = maze(1, 1, 7);
        assert_eq!(g.size(), 1);
        assert_eq!(g.links_count(), 0);
        assert!(g.links(0).unwrap().is_empty());
        check_perfect_maze(&g);
    }

    #[test]
    fn two_by_two_maze() {
        for seed in 0..20 {
            let g = maze(2, 2, seed);
            assert_eq!(g.links_count(), 3);
            check_perfect_maze(&g);
            for v in 0..4 {
                let degree = g.links(v).unwrap().len();
                assert!(degree >= 1 && degree <= 2);
            }
        }
    }

    #[test]
    fn single_row_is_always_a_path() {
        for seed in 0..20 {
            let g = maze(1, 5, seed);
            let expected: VertexPairSet = [(0, 1), (1, 2), (2, 3), (3, 4)].iter().cloned().collect();
            assert_eq!(passages(&g), expected);
            check_perfect_maze(&g);
        }
    }

    #[test]
    fn single_column_is_always_a_path() {
        let g = maze(4, 1, 99);
        let expected: VertexPairSet = [(0, 1), (1, 2), (2, 3)].iter().cloned().collect();
        assert_eq!(passages(&g), expected);
    }

    #[test]
    fn larger_mazes_are_perfect() {
        check_perfect_maze(&maze(20, 30, 1));
        check_perfect_maze(&maze(31, 7, 2));
    }

    #[test]
    fn same_seed_same_maze() {
        let a = maze(12, 9, 0xdead_beef);
        let b = maze(12, 9, 0xdead_beef);
        assert_eq!(a.iter_links().collect::<Vec<_>>(), b.iter_links().collect::<Vec<_>>());
    }

    #[test]
    fn different_seeds_vary_the_maze() {
        let first = passages(&maze(10, 10, 1));
        let any_different = (2..10).any(|seed| passages(&maze(10, 10, seed)) != first);
        assert!(any_different);
    }

    // Share of the samples that landed on each candidate, in candidate order.
    fn frequencies(samples: &[VertexIndex], candidates: &[VertexIndex]) -> Vec<f64> {
        candidates.iter()
            .map(|c| samples.iter().filter(|&s| s == c).count() as f64 / samples.len() as f64)
            .collect()
    }

    #[test]
    fn first_step_is_uniform_over_candidates() {
        // On a 2x2 grid the start cell can go South (2) or East (1).
        let firsts = (0..4000u64)
            .map(|seed| maze(2, 2, seed).iter_links().next().unwrap().destination)
            .collect::<Vec<_>>();
        assert!(firsts.iter().all(|&v| v == 1 || v == 2));
        for share in frequencies(&firsts, &[2, 1]) {
            assert!(share > 0.45 && share < 0.55, "biased first step: {}", share);
        }
    }

    #[test]
    fn three_way_choice_is_uniform_over_candidates() {
        // 0 1 2
        // 3 4 5
        // 6 7 8
        // After walking 0 -> 1 -> 4 the centre cell has three unvisited neighbours: 7, 5 and 3.
        let mut thirds = vec![];
        for seed in 0..12000u64 {
            let g = maze(3, 3, seed);
            let walk = g.iter_links().take(3).collect::<Vec<_>>();
            if (walk[0].destination, walk[1].destination) == (1, 4) {
                assert_eq!(walk[2].source, 4);
                thirds.push(walk[2].destination);
            }
        }
        assert!(thirds.len() > 2000, "too few samples: {}", thirds.len());
        assert!(thirds.iter().all(|&v| v == 7 || v == 5 || v == 3));
        for share in frequencies(&thirds, &[7, 5, 3]) {
            assert!(share > 0.28 && share < 0.39, "biased choice: {}", share);
        }
    }

    #[test]
    fn regeneration_discards_previous_edges() {
        let mut g = maze(6, 6, 3);
        g.add_edge(0, 35, DEFAULT_EDGE_WEIGHT).unwrap();
        let mut rng = new_rng(Some(4));
        recursive_backtracker(&mut g, &mut rng);
        check_perfect_maze(&g);
    }

    #[test]
    fn works_with_a_trait_object_rng() {
        let mut g = GridGraph::<u16>::new(RowsCount(5), ColumnsCount(5)).unwrap();
        let mut seeded = new_rng(Some(11));
        let rng: &mut dyn rand::RngCore = &mut seeded;
        recursive_backtracker(&mut g, rng);
        assert_eq!(g.links_count(), 24);
    }

    #[test]
    fn first_passage_leaves_the_start_cell() {
        let g = maze(3, 3, 5);
        assert!(!g.links(START_VERTEX).unwrap().is_empty());
    }

    #[test]
    fn quickcheck_mazes_are_spanning_trees() {
        fn prop(rows: u8, columns: u8, seed: u64) -> TestResult {
            let (rows, columns) = (rows as usize % 12 + 1, columns as usize % 12 + 1);
            let g = maze(rows, columns, seed);
            check_perfect_maze(&g);
            TestResult::passed()
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }

    #[test]
    fn quickcheck_generation_is_deterministic() {
        fn prop(rows: u8, columns: u8, seed: u64) -> bool {
            let (rows, columns) = (rows as usize % 10 + 1, columns as usize % 10 + 1);
            passages(&maze(rows, columns, seed)) == passages(&maze(rows, columns, seed))
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool);
    }
}
