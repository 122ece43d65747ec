//! dagstore: In-memory Directed Graph Store for Rust
//!
//! `dagstore` keeps a directed graph over caller-supplied node identifiers and
//! answers structural questions about it: who points where, what is reachable,
//! whether the graph is acyclic, and in which order its nodes can be processed.
//!
//! # Features
//!
//! - **Generic nodes**: any `Clone + Eq + Hash` identifier, never interpreted
//! - **Topological sort**: Kahn's algorithm with cycle detection
//! - **Reachability**: transitive downstream queries in topological order
//! - **Traversal**: walks and components over any adjacency mapping
//! - **Generation**: seeded random DAGs for tests and benchmarks
//!
//! # Quick Start
//!
//! ```
//! use dagstore::prelude::*;
//!
//! let mut dag = Dag::new();
//! for node in 0..6 {
//!     dag.add_node(node)?;
//! }
//! dag.add_edges([(0, 5), (0, 4), (0, 2), (1, 0), (1, 2), (3, 2), (4, 2), (4, 3), (5, 4)])?;
//!
//! assert_eq!(dag.topological_sort()?, vec![1, 0, 5, 4, 3, 2]);
//! assert!(dag.validate());
//!
//! dag.add_edge(2, 1)?;
//! assert!(dag.topological_sort().unwrap_err().is_cycle());
//! # Ok::<(), GraphError>(())
//! ```
//!
//! # Module Organization
//!
//! Following Parnas's information hiding principles, each module hides specific design
//! decisions that are likely to change:
//!
//! - [`graph`]: The graph store (hides the adjacency representation)
//! - [`traversal`]: Walks over adjacency mappings (hides frontier handling)
//! - [`generate`]: Random DAG construction (hides the RNG)
//!
//! # Concurrency
//!
//! Everything is synchronous and in-memory. [`Dag`] has no interior locking;
//! share it behind your own lock if several threads need to mutate it.

pub mod generate;
pub mod graph;
pub mod traversal;

pub use graph::{Dag, DagSummary, GraphError, GraphResult};

pub use traversal::{components, walk, walk_excluding, Adjacency, PredecessorMap};

pub use generate::{random_dag, RandomDagConfig};

/// Prelude module for convenient glob imports
///
/// # Example
///
/// ```
/// use dagstore::prelude::*;
/// ```
pub mod prelude {
    pub use crate::generate::{random_dag, RandomDagConfig};

    pub use crate::graph::{Dag, DagSummary, GraphError, GraphResult};

    pub use crate::traversal::{
        components, path_to, symmetrize, walk, walk_excluding, Adjacency, PredecessorMap,
    };
}
