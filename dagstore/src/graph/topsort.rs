//! Topological sorting
//!
//! Two algorithms over the same graph:
//!
//! - [`Dag::topological_sort`]: Kahn's algorithm, O(V+E). This is the one to use.
//! - [`Dag::naive_topological_sort`]: decompose-and-insert, O(V·(V+E)). Kept as
//!   a reference implementation for cross-checking Kahn's output.
//!
//! Both fail with [`GraphError::CycleDetected`] when the graph has a cycle.

use super::error::{GraphError, GraphResult};
use super::Dag;
use indexmap::IndexSet;
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

impl<N> Dag<N>
where
    N: Clone + Eq + Hash + Debug,
{
    /// Returns a topological ordering of every node
    ///
    /// Every edge `(u, v)` has `u` before `v` in the result. When several nodes
    /// are ready at once the choice among them is unspecified; callers must not
    /// depend on it.
    ///
    /// # Algorithm
    ///
    /// 1. Compute in-degree for all nodes
    /// 2. Add all nodes with in-degree 0 to queue
    /// 3. While queue is not empty:
    ///    a. Remove node from queue, add to result
    ///    b. For each successor, decrement in-degree
    ///    c. If in-degree becomes 0, add to queue
    /// 4. If result.len() != node_count, graph has a cycle
    pub fn topological_sort(&self) -> GraphResult<Vec<N>> {
        let mut in_degrees: HashMap<&N, usize> = self.nodes().map(|node| (node, 0)).collect();
        for (_, to) in self.edges() {
            if let Some(degree) = in_degrees.get_mut(to) {
                *degree += 1;
            }
        }

        let mut queue: VecDeque<&N> = self
            .nodes()
            .filter(|node| in_degrees.get(node) == Some(&0))
            .collect();
        let mut order = Vec::with_capacity(self.len());

        while let Some(node) = queue.pop_front() {
            order.push(node.clone());

            for successor in self.successor_set(node).into_iter().flatten() {
                if let Some(degree) = in_degrees.get_mut(successor) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(successor);
                    }
                }
            }
        }

        if order.len() != self.len() {
            let unsorted = self.len() - order.len();
            debug!(unsorted, "topological sort stalled on a cycle");
            return Err(GraphError::cycle(unsorted));
        }

        Ok(order)
    }

    /// Returns a topological ordering using the quadratic decompose-and-insert
    /// method
    ///
    /// The graph is taken apart one node at a time, always removing a node with
    /// no successors among those still present. The nodes are then put back in
    /// reverse removal order, each inserted just after the last placed node
    /// that points to it. If at some point every remaining node still has a
    /// remaining successor, the graph has a cycle.
    ///
    /// The result is a valid order but need not match
    /// [`Dag::topological_sort`].
    pub fn naive_topological_sort(&self) -> GraphResult<Vec<N>> {
        let mut remaining: IndexSet<&N> = self.nodes().collect();
        let mut removed: Vec<&N> = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let sink = remaining.iter().rev().copied().find(|node| {
                self.successor_set(node)
                    .into_iter()
                    .flatten()
                    .all(|successor| !remaining.contains(successor))
            });

            let Some(sink) = sink else {
                debug!(
                    unsorted = remaining.len(),
                    "naive topological sort found no sink"
                );
                return Err(GraphError::cycle(remaining.len()));
            };

            remaining.shift_remove(sink);
            removed.push(sink);
        }

        let mut order: Vec<&N> = Vec::with_capacity(removed.len());
        for node in removed.into_iter().rev() {
            let position = order
                .iter()
                .rposition(|placed| {
                    self.successor_set(placed)
                        .is_some_and(|successors| successors.contains(node))
                })
                .map_or(0, |index| index + 1);
            order.insert(position, node);
        }

        Ok(order.into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn position<N: PartialEq>(order: &[N], node: &N) -> usize {
        order.iter().position(|n| n == node).unwrap()
    }

    fn assert_respects_edges<N: Clone + Eq + Hash + Debug>(dag: &Dag<N>, order: &[N]) {
        assert_eq!(order.len(), dag.len());
        for (from, to) in dag.edges() {
            assert!(
                position(order, from) < position(order, to),
                "{from:?} should come before {to:?} in {order:?}"
            );
        }
    }

    fn diamond() -> Dag<&'static str> {
        let mut dag = Dag::new();
        dag.add_nodes(["a", "b", "c", "d"]).unwrap();
        dag.add_edges([("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")])
            .unwrap();
        dag
    }

    #[test]
    fn test_topological_sort_empty() {
        let dag: Dag<u8> = Dag::new();
        assert!(dag.topological_sort().unwrap().is_empty());
        assert!(dag.naive_topological_sort().unwrap().is_empty());
    }

    #[test]
    fn test_topological_sort_linear() {
        let mut dag = Dag::new();
        dag.add_nodes([3, 2, 1]).unwrap();
        dag.add_edges([(1, 2), (2, 3)]).unwrap();

        assert_eq!(dag.topological_sort().unwrap(), vec![1, 2, 3]);
        assert_eq!(dag.naive_topological_sort().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_topological_sort_diamond() {
        let dag = diamond();
        let order = dag.topological_sort().unwrap();

        assert_eq!(order[0], "a");
        assert_eq!(order[3], "d");

        let middle: HashSet<_> = order[1..3].iter().copied().collect();
        assert_eq!(middle, HashSet::from(["b", "c"]));
    }

    #[test]
    fn test_naive_sort_diamond() {
        let dag = diamond();
        let order = dag.naive_topological_sort().unwrap();
        assert_respects_edges(&dag, &order);
    }

    #[test]
    fn test_naive_sort_needs_successor_aware_insertion() {
        // b -> v -> a: inserting v only after its last predecessor would be
        // wrong if a were already placed before b.
        let mut dag = Dag::new();
        dag.add_nodes(["v", "a", "b"]).unwrap();
        dag.add_edges([("b", "v"), ("v", "a")]).unwrap();

        let order = dag.naive_topological_sort().unwrap();
        assert_eq!(order, vec!["b", "v", "a"]);
    }

    #[test]
    fn test_cycle_detection() {
        let mut dag = diamond();
        dag.add_edge("d", "a").unwrap();

        let err = dag.topological_sort().unwrap_err();
        assert_eq!(err, GraphError::cycle(4));

        let err = dag.naive_topological_sort().unwrap_err();
        assert!(err.is_cycle());
    }

    #[test]
    fn test_cycle_behind_independent_node() {
        let mut dag = Dag::new();
        dag.add_nodes(["root", "x", "y"]).unwrap();
        dag.add_edges([("root", "x"), ("x", "y"), ("y", "x")])
            .unwrap();

        assert_eq!(dag.independent_nodes(), vec!["root"]);
        assert_eq!(dag.topological_sort(), Err(GraphError::cycle(2)));
        assert!(!dag.validate());
    }
}
