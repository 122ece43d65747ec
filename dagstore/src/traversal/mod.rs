//! Reachability over plain adjacency mappings
//!
//! These algorithms are independent of [`Dag`](crate::Dag): they accept any
//! [`Adjacency`], need no acyclicity, and report what they reach as
//! predecessor maps.

mod adjacency;
mod walk;

pub use adjacency::{symmetrize, Adjacency};
pub use walk::{components, path_to, walk, walk_excluding, PredecessorMap};
