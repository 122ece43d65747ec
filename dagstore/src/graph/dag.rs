//! Dag - In-memory directed graph keyed by caller-supplied node identifiers
//!
//! The graph is stored as an insertion-ordered adjacency map: each node maps to
//! the set of its direct successors. There is no reverse index, so predecessor
//! and in-degree queries scan every successor set.
//!
//! # Acyclicity
//!
//! Nothing stops a caller from building a cycle (or a self-loop). Acyclicity is
//! a property checked by [`Dag::topological_sort`] and [`Dag::validate`], not an
//! insertion-time invariant.

use super::error::{GraphError, GraphResult};
use indexmap::{IndexMap, IndexSet};
use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::path::Path;
use tracing::debug;

/// A directed graph whose nodes are opaque identifiers of type `N`
///
/// # Example
///
/// ```
/// use dagstore::Dag;
///
/// let mut dag = Dag::new();
/// dag.add_node("fetch").unwrap();
/// dag.add_node("build").unwrap();
/// dag.add_node("deploy").unwrap();
///
/// dag.add_edge("fetch", "build").unwrap();
/// dag.add_edge("build", "deploy").unwrap();
///
/// assert_eq!(dag.topological_sort().unwrap(), vec!["fetch", "build", "deploy"]);
/// assert_eq!(dag.all_downstreams(&"fetch").unwrap(), vec!["build", "deploy"]);
/// ```
#[derive(Clone)]
pub struct Dag<N> {
    /// Node -> direct successors, both in insertion order
    graph: IndexMap<N, IndexSet<N>>,
}

impl<N> Default for Dag<N> {
    fn default() -> Self {
        Self {
            graph: IndexMap::new(),
        }
    }
}

impl<N: Eq + Hash> PartialEq for Dag<N> {
    fn eq(&self, other: &Self) -> bool {
        self.graph == other.graph
    }
}

impl<N: Eq + Hash> Eq for Dag<N> {}

impl<N: Debug> Debug for Dag<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.graph.iter()).finish()
    }
}

impl<N> Dag<N>
where
    N: Clone + Eq + Hash + Debug,
{
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the graph
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Returns true if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Returns the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.values().map(IndexSet::len).sum()
    }

    /// Returns true if the node exists in the graph
    pub fn contains_node(&self, id: &N) -> bool {
        self.graph.contains_key(id)
    }

    /// Returns true if the edge `from -> to` exists
    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        self.graph
            .get(from)
            .is_some_and(|successors| successors.contains(to))
    }

    /// Returns an iterator over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.keys()
    }

    /// Returns an iterator over all edges as `(from, to)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> {
        self.graph
            .iter()
            .flat_map(|(from, successors)| successors.iter().map(move |to| (from, to)))
    }

    /// Adds a node with no successors
    ///
    /// Returns an error if a node with the same identifier already exists.
    pub fn add_node(&mut self, id: N) -> GraphResult<()> {
        if self.graph.contains_key(&id) {
            debug!(node = ?id, "rejected duplicate node");
            return Err(GraphError::duplicate_node(&id));
        }

        self.graph.insert(id, IndexSet::new());
        Ok(())
    }

    /// Adds several nodes, stopping at the first duplicate
    pub fn add_nodes(&mut self, ids: impl IntoIterator<Item = N>) -> GraphResult<()> {
        for id in ids {
            self.add_node(id)?;
        }
        Ok(())
    }

    /// Adds the edge `from -> to`
    ///
    /// Both endpoints must already be nodes. Adding an existing edge again is a
    /// no-op.
    pub fn add_edge(&mut self, from: N, to: N) -> GraphResult<()> {
        for endpoint in [&from, &to] {
            if !self.graph.contains_key(endpoint) {
                debug!(from = ?from, to = ?to, "rejected edge with unknown endpoint");
                return Err(GraphError::unknown_node(endpoint));
            }
        }

        if let Some(successors) = self.graph.get_mut(&from) {
            successors.insert(to);
        }
        Ok(())
    }

    /// Adds several edges, stopping at the first unknown endpoint
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = (N, N)>) -> GraphResult<()> {
        for (from, to) in edges {
            self.add_edge(from, to)?;
        }
        Ok(())
    }

    pub(crate) fn successor_set(&self, id: &N) -> Option<&IndexSet<N>> {
        self.graph.get(id)
    }

    fn require(&self, id: &N) -> GraphResult<&IndexSet<N>> {
        self.graph
            .get(id)
            .ok_or_else(|| GraphError::unknown_node(id))
    }

    /// Returns the direct successors of a node
    pub fn successors(&self, id: &N) -> GraphResult<Vec<N>> {
        Ok(self.require(id)?.iter().cloned().collect())
    }

    /// Alias for [`Dag::successors`]
    pub fn downstream(&self, id: &N) -> GraphResult<Vec<N>> {
        self.successors(id)
    }

    /// Returns every node with an edge pointing to `id`
    ///
    /// Scans all successor sets, O(V+E).
    pub fn predecessors(&self, id: &N) -> GraphResult<Vec<N>> {
        self.require(id)?;

        Ok(self
            .graph
            .iter()
            .filter(|(_, successors)| successors.contains(id))
            .map(|(node, _)| node.clone())
            .collect())
    }

    /// Returns the number of edges pointing to `id`
    pub fn in_degree(&self, id: &N) -> GraphResult<usize> {
        self.require(id)?;
        Ok(self
            .graph
            .values()
            .filter(|successors| successors.contains(id))
            .count())
    }

    /// Returns the number of edges leaving `id`
    pub fn out_degree(&self, id: &N) -> GraphResult<usize> {
        Ok(self.require(id)?.len())
    }

    /// Returns every node transitively reachable from `id`, in topological order
    ///
    /// Reachability is collected breadth-first, then the full topological order
    /// is filtered down to the reachable set. The ordering step needs the whole
    /// graph to be acyclic, so any cycle anywhere yields
    /// [`GraphError::CycleDetected`].
    pub fn all_downstreams(&self, id: &N) -> GraphResult<Vec<N>> {
        let (start, _) = self
            .graph
            .get_key_value(id)
            .ok_or_else(|| GraphError::unknown_node(id))?;

        let mut seen: HashSet<&N> = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for successor in self.graph.get(node).into_iter().flatten() {
                if seen.insert(successor) {
                    queue.push_back(successor);
                }
            }
        }

        let order = self.topological_sort()?;
        Ok(order.into_iter().filter(|node| seen.contains(node)).collect())
    }

    /// Returns nodes with in-degree zero, in insertion order
    pub fn independent_nodes(&self) -> Vec<N> {
        let dependent: HashSet<&N> = self.graph.values().flatten().collect();

        self.graph
            .keys()
            .filter(|node| !dependent.contains(node))
            .cloned()
            .collect()
    }

    /// Returns nodes with out-degree zero, in insertion order
    pub fn leaves(&self) -> Vec<N> {
        self.graph
            .iter()
            .filter(|(_, successors)| successors.is_empty())
            .map(|(node, _)| node.clone())
            .collect()
    }

    /// Returns true if the graph is a valid DAG
    ///
    /// A valid DAG has at least one independent node and a topological order.
    /// An empty graph has no independent node and is therefore not valid.
    pub fn validate(&self) -> bool {
        if self.independent_nodes().is_empty() {
            debug!(nodes = self.len(), "graph has no independent nodes");
            return false;
        }

        match self.topological_sort() {
            Ok(_) => true,
            Err(error) => {
                debug!(%error, "graph failed validation");
                false
            }
        }
    }

    /// Groups nodes by depth: the length of the longest path reaching them
    /// from an independent node
    ///
    /// Nodes on the same level have no path between them.
    pub fn levels(&self) -> GraphResult<Vec<Vec<N>>> {
        let order = self.topological_sort()?;
        let mut depths: HashMap<&N, usize> = HashMap::with_capacity(order.len());
        let mut levels: Vec<Vec<N>> = Vec::new();

        for node in &order {
            let depth = depths.get(node).copied().unwrap_or(0);
            for successor in self.graph.get(node).into_iter().flatten() {
                let entry = depths.entry(successor).or_insert(0);
                *entry = (*entry).max(depth + 1);
            }

            if levels.len() <= depth {
                levels.resize_with(depth + 1, Vec::new);
            }
            levels[depth].push(node.clone());
        }

        Ok(levels)
    }

    /// Returns a summary of the graph structure
    ///
    /// Fails with [`GraphError::CycleDetected`] on a cyclic graph, since depth
    /// is undefined there.
    pub fn summary(&self) -> GraphResult<DagSummary<N>> {
        let levels = self.levels()?;
        let independent = self.independent_nodes();
        let leaves = self.leaves();

        Ok(DagSummary {
            node_count: self.len(),
            edge_count: self.edge_count(),
            independent_count: independent.len(),
            leaf_count: leaves.len(),
            max_depth: levels.len().saturating_sub(1),
            independent,
            leaves,
        })
    }

    /// Removes every node and edge
    pub fn clear(&mut self) {
        self.graph.clear();
    }
}

impl<N> Dag<N>
where
    N: Clone + Eq + Hash + Debug + Display,
{
    /// Renders the graph in Graphviz DOT format
    ///
    /// ```ignore
    /// std::fs::write("graph.dot", dag.to_dot())?;
    /// // dot -Tpng graph.dot -o graph.png
    /// ```
    pub fn to_dot(&self) -> String {
        let mut graph = DiGraph::<String, ()>::new();
        let mut indices = HashMap::with_capacity(self.len());

        for node in self.graph.keys() {
            indices.insert(node, graph.add_node(node.to_string()));
        }

        for (from, to) in self.edges() {
            if let (Some(&source), Some(&target)) = (indices.get(from), indices.get(to)) {
                graph.add_edge(source, target, ());
            }
        }

        format!("{:?}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }

    /// Writes the DOT rendering to a file
    pub fn save_dot(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.to_dot())
    }
}

/// Summary information about a graph structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagSummary<N> {
    pub node_count: usize,
    pub edge_count: usize,
    pub independent_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
    pub independent: Vec<N>,
    pub leaves: Vec<N>,
}

/// Wire shape: node list plus edge list, so deserialization can replay inserts
#[derive(Serialize)]
#[serde(rename = "Dag")]
struct DagRef<'a, N> {
    nodes: Vec<&'a N>,
    edges: Vec<(&'a N, &'a N)>,
}

#[derive(Deserialize)]
#[serde(rename = "Dag")]
struct DagOwned<N> {
    nodes: Vec<N>,
    #[serde(default = "Vec::new")]
    edges: Vec<(N, N)>,
}

impl<N> Serialize for Dag<N>
where
    N: Serialize + Clone + Eq + Hash + Debug,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DagRef {
            nodes: self.nodes().collect(),
            edges: self.edges().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, N> Deserialize<'de> for Dag<N>
where
    N: Deserialize<'de> + Clone + Eq + Hash + Debug,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = DagOwned::<N>::deserialize(deserializer)?;
        let mut dag = Dag::new();
        dag.add_nodes(raw.nodes).map_err(D::Error::custom)?;
        dag.add_edges(raw.edges).map_err(D::Error::custom)?;
        Ok(dag)
    }
}
