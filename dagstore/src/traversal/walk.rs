//! Walks and connected components
//!
//! A walk explores everything reachable from a start node and records, for
//! each node it reaches, the node it was first discovered from. The result is
//! a traversal tree in predecessor-map form. Repeating walks from unvisited
//! nodes partitions the graph into components.

use super::adjacency::Adjacency;
use crate::graph::{GraphError, GraphResult};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

/// Node -> the node it was discovered from; `None` marks the walk's start
pub type PredecessorMap<N> = HashMap<N, Option<N>>;

/// Walks everything reachable from `start`
///
/// The frontier is processed breadth-first, but the order neighbours are
/// visited in depends on the adjacency type, so which predecessor a node gets
/// is unspecified when several could have discovered it. Every reachable node
/// appears exactly once.
///
/// Fails with [`GraphError::UnknownNode`] if `start` has no adjacency entry.
///
/// # Example
///
/// ```
/// use dagstore::traversal::walk;
/// use std::collections::{HashMap, HashSet};
///
/// let graph = HashMap::from([
///     (0, HashSet::from([1, 2, 3])),
///     (1, HashSet::from([3])),
///     (2, HashSet::from([3])),
///     (3, HashSet::new()),
/// ]);
///
/// let tree = walk(&graph, &2).unwrap();
/// assert_eq!(tree, HashMap::from([(2, None), (3, Some(2))]));
/// ```
pub fn walk<N, G>(graph: &G, start: &N) -> GraphResult<PredecessorMap<N>>
where
    N: Clone + Eq + Hash + Debug,
    G: Adjacency<N> + ?Sized,
{
    walk_excluding(graph, start, &HashSet::new())
}

/// Walks everything reachable from `start` without entering `excluded`
///
/// `start` itself is always recorded, even if it is in `excluded`.
pub fn walk_excluding<N, G>(
    graph: &G,
    start: &N,
    excluded: &HashSet<N>,
) -> GraphResult<PredecessorMap<N>>
where
    N: Clone + Eq + Hash + Debug,
    G: Adjacency<N> + ?Sized,
{
    if !graph.contains_node(start) {
        debug!(start = ?start, "walk start is not in graph");
        return Err(GraphError::unknown_node(start));
    }

    Ok(explore(graph, start, excluded))
}

fn explore<N, G>(graph: &G, start: &N, excluded: &HashSet<N>) -> PredecessorMap<N>
where
    N: Clone + Eq + Hash + Debug,
    G: Adjacency<N> + ?Sized,
{
    let mut predecessors = PredecessorMap::new();
    predecessors.insert(start.clone(), None);

    let mut frontier = VecDeque::from([start.clone()]);
    while let Some(node) = frontier.pop_front() {
        for next in graph.neighbors(&node) {
            if predecessors.contains_key(next) || excluded.contains(next) {
                continue;
            }

            trace!(from = ?node, to = ?next, "discovered node");
            predecessors.insert(next.clone(), Some(node.clone()));
            frontier.push_back(next.clone());
        }
    }

    predecessors
}

/// Splits the graph into components, one predecessor map per component
///
/// Walks start from each not-yet-visited node in [`Adjacency::nodes`] order
/// and never re-enter nodes claimed by an earlier walk, so the key sets of
/// the returned maps are disjoint and together cover every node.
///
/// On directed adjacency a component is "everything reachable from its root
/// that no earlier component claimed". Use
/// [`symmetrize`](super::symmetrize) first for undirected connected
/// components.
pub fn components<N, G>(graph: &G) -> Vec<PredecessorMap<N>>
where
    N: Clone + Eq + Hash + Debug,
    G: Adjacency<N> + ?Sized,
{
    let mut seen: HashSet<N> = HashSet::new();
    let mut found = Vec::new();

    for node in graph.nodes() {
        if seen.contains(node) {
            continue;
        }

        let component = explore(graph, node, &seen);
        seen.extend(component.keys().cloned());
        found.push(component);
    }

    debug!(components = found.len(), nodes = seen.len(), "split graph into components");
    found
}

/// Reconstructs the discovery path from a walk's start to `node`
///
/// Returns `None` if `node` was not reached by the walk.
pub fn path_to<N>(predecessors: &PredecessorMap<N>, node: &N) -> Option<Vec<N>>
where
    N: Clone + Eq + Hash,
{
    let mut path = vec![node.clone()];
    let mut current = predecessors.get(node)?;

    while let Some(previous) = current {
        // A well-formed map is a tree; bail out rather than loop forever.
        if path.len() > predecessors.len() {
            return None;
        }
        path.push(previous.clone());
        current = predecessors.get(previous)?;
    }

    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::symmetrize;
    use std::collections::BTreeSet;

    fn bridges() -> HashMap<u32, HashSet<u32>> {
        HashMap::from([
            (0, HashSet::from([1, 2, 3])),
            (1, HashSet::from([3])),
            (2, HashSet::from([3])),
            (3, HashSet::new()),
        ])
    }

    #[test]
    fn test_walk_from_inner_node() {
        let tree = walk(&bridges(), &2).unwrap();
        assert_eq!(tree, HashMap::from([(2, None), (3, Some(2))]));
    }

    #[test]
    fn test_walk_from_root_reaches_everything() {
        let tree = walk(&bridges(), &0).unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree[&0], None);
        assert_eq!(tree[&1], Some(0));
        assert_eq!(tree[&2], Some(0));
        assert_eq!(tree[&3], Some(0));
    }

    #[test]
    fn test_walk_unknown_start() {
        let result = walk(&bridges(), &42);
        assert!(matches!(result, Err(GraphError::UnknownNode { .. })));
    }

    #[test]
    fn test_walk_is_fresh_per_call() {
        let graph = bridges();
        let first = walk(&graph, &0).unwrap();
        let second = walk(&graph, &0).unwrap();
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn test_walk_excluding() {
        let excluded = HashSet::from([1, 2]);
        let tree = walk_excluding(&bridges(), &0, &excluded).unwrap();

        let keys: BTreeSet<_> = tree.keys().copied().collect();
        assert_eq!(keys, BTreeSet::from([0, 3]));
    }

    #[test]
    fn test_walk_handles_cycles() {
        let graph: HashMap<char, Vec<char>> =
            HashMap::from([('a', vec!['b']), ('b', vec!['c']), ('c', vec!['a'])]);

        let tree = walk(&graph, &'a').unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree[&'a'], None);
    }

    #[test]
    fn test_walk_visits_neighbor_without_entry() {
        let graph: HashMap<u8, Vec<u8>> = HashMap::from([(1, vec![2])]);
        let tree = walk(&graph, &1).unwrap();
        assert_eq!(tree, HashMap::from([(1, None), (2, Some(1))]));
    }

    #[test]
    fn test_components_partition_nodes() {
        let graph: HashMap<u32, HashSet<u32>> = HashMap::from([
            (0, HashSet::from([1])),
            (1, HashSet::new()),
            (2, HashSet::from([3])),
            (3, HashSet::from([1])),
            (4, HashSet::new()),
        ]);

        let parts = components(&graph);

        let mut all = HashSet::new();
        for part in &parts {
            for key in part.keys() {
                assert!(all.insert(*key), "node {key} appears in two components");
            }
        }
        assert_eq!(all, HashSet::from([0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_components_of_symmetrized_graph() {
        let graph: HashMap<u32, HashSet<u32>> = HashMap::from([
            (0, HashSet::from([1])),
            (1, HashSet::new()),
            (2, HashSet::from([1])),
            (3, HashSet::new()),
        ]);

        let parts = components(&symmetrize(&graph));

        let mut sizes: Vec<_> = parts.iter().map(HashMap::len).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 3]);
    }

    #[test]
    fn test_path_to() {
        let tree = walk(&bridges(), &0).unwrap();

        assert_eq!(path_to(&tree, &3), Some(vec![0, 3]));
        assert_eq!(path_to(&tree, &0), Some(vec![0]));
        assert_eq!(path_to(&tree, &9), None);
    }

    #[test]
    fn test_path_to_rejects_looping_map() {
        let broken: PredecessorMap<u8> = HashMap::from([(1, Some(2)), (2, Some(1))]);
        assert_eq!(path_to(&broken, &1), None);
    }
}
