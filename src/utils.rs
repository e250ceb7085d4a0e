use crate::grid::VertexIndex;

use fnv::FnvBuildHasher;
use std::collections::{HashMap, HashSet};

/// Maps and sets keyed on vertex indices. FNV beats the default SipHash on small integer keys;
/// the keys never come from untrusted input so collision resistance does not matter here.
pub type VertexMap<V> = HashMap<VertexIndex, V, FnvBuildHasher>;
pub type VertexPairSet = HashSet<(VertexIndex, VertexIndex), FnvBuildHasher>;

pub fn vertex_map<V>(capacity: usize) -> VertexMap<V> {
    HashMap::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}

/// Each undirected pair stored once, smaller index first.
pub fn undirected_pair(a: VertexIndex, b: VertexIndex) -> (VertexIndex, VertexIndex) {
    if a <= b { (a, b) } else { (b, a) }
}

pub fn vertex_pair_set(capacity: usize) -> VertexPairSet {
    HashSet::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_pairs_ignore_order() {
        let mut set = vertex_pair_set(2);
        set.insert(undirected_pair(4, 1));
        set.insert(undirected_pair(1, 4));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&(1, 4)));
    }
}
