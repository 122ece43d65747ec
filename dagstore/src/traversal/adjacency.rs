//! Adjacency abstraction shared by the traversal algorithms
//!
//! Traversals only need to list nodes and their neighbours, so they are written
//! against [`Adjacency`] rather than a concrete map type. Plain maps from the
//! standard library and `indexmap` work out of the box, as does [`Dag`].

use crate::graph::Dag;
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// A graph given as a mapping from node to neighbours
///
/// Neighbours that are not themselves listed by [`Adjacency::nodes`] are
/// legal and are treated as having no neighbours of their own.
pub trait Adjacency<N> {
    /// Returns every node that has an adjacency entry
    fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a N>
    where
        N: 'a;

    /// Returns the neighbours of `node`, or nothing if it has no entry
    fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N>
    where
        N: 'a;

    /// Returns true if `node` has an adjacency entry
    fn contains_node(&self, node: &N) -> bool;
}

impl<N: Eq + Hash> Adjacency<N> for HashMap<N, HashSet<N>> {
    fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.keys()
    }

    fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.get(node).into_iter().flatten()
    }

    fn contains_node(&self, node: &N) -> bool {
        self.contains_key(node)
    }
}

impl<N: Eq + Hash> Adjacency<N> for HashMap<N, Vec<N>> {
    fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.keys()
    }

    fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.get(node).into_iter().flatten()
    }

    fn contains_node(&self, node: &N) -> bool {
        self.contains_key(node)
    }
}

impl<N: Ord> Adjacency<N> for BTreeMap<N, BTreeSet<N>> {
    fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.keys()
    }

    fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.get(node).into_iter().flatten()
    }

    fn contains_node(&self, node: &N) -> bool {
        self.contains_key(node)
    }
}

impl<N: Eq + Hash> Adjacency<N> for IndexMap<N, IndexSet<N>> {
    fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.keys()
    }

    fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.get(node).into_iter().flatten()
    }

    fn contains_node(&self, node: &N) -> bool {
        self.contains_key(node)
    }
}

impl<N> Adjacency<N> for Dag<N>
where
    N: Clone + Eq + Hash + Debug,
{
    fn nodes<'a>(&'a self) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        Dag::nodes(self)
    }

    fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N>
    where
        N: 'a,
    {
        self.successor_set(node).into_iter().flatten()
    }

    fn contains_node(&self, node: &N) -> bool {
        Dag::contains_node(self, node)
    }
}

/// Returns an undirected copy of `graph`: every edge is present in both directions
///
/// Walking the result yields connected components in the undirected sense,
/// which plain directed adjacency does not.
pub fn symmetrize<N, G>(graph: &G) -> HashMap<N, HashSet<N>>
where
    N: Clone + Eq + Hash,
    G: Adjacency<N> + ?Sized,
{
    let mut undirected: HashMap<N, HashSet<N>> = HashMap::new();

    for node in graph.nodes() {
        undirected.entry(node.clone()).or_default();
        for neighbor in graph.neighbors(node) {
            undirected
                .entry(node.clone())
                .or_default()
                .insert(neighbor.clone());
            undirected
                .entry(neighbor.clone())
                .or_default()
                .insert(node.clone());
        }
    }

    undirected
}
