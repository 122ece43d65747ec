//! Graph store for directed graphs over opaque node identifiers
//!
//! This module provides the graph data structure and its algorithms:
//!
//! - Node and edge insertion with structural error checking
//! - Adjacency queries (successors, predecessors, degrees)
//! - Reachability queries (`all_downstreams`)
//! - Topological sorting with cycle detection
//! - DAG validation without error handling on the caller's side
//!
//! # Design Principles
//!
//! Following Parnas's information hiding principles:
//! - This module hides the graph representation (an insertion-ordered adjacency map)
//! - Exposes only abstract operations: add_node, add_edge, topological_sort, etc.
//!
//! # Algorithm References
//!
//! - Kahn's algorithm for topological sort
//! - Decompose-and-insert (Hetland, *Python Algorithms*, ch. 4) as a quadratic reference

mod dag;
mod error;
mod topsort;

pub use dag::{Dag, DagSummary};
pub use error::{GraphError, GraphResult};
