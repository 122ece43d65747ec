//! Error types for graph operations
//!
//! Node identifiers are generic, so errors carry their `Debug` rendering
//! instead of the identifier itself. This keeps `GraphError` a single,
//! non-generic type that can cross module and crate boundaries.

use std::fmt::Debug;
use thiserror::Error;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur during graph operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// A node was added with an identifier that is already present
    #[error("node {node} already exists")]
    DuplicateNode {
        /// The duplicate node identifier
        node: String,
    },

    /// An edge, query or traversal referenced a node that is not in the graph
    #[error("node {node} is not in graph")]
    UnknownNode {
        /// The missing node identifier
        node: String,
    },

    /// The graph contains a cycle, so no topological order exists
    #[error("graph is not acyclic: {unsorted} node(s) could not be ordered")]
    CycleDetected {
        /// Number of nodes left over when the sort stalled
        unsorted: usize,
    },

    /// A generator configuration value is out of range
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration was rejected
        reason: String,
    },
}

impl GraphError {
    /// Creates a duplicate node error
    pub fn duplicate_node<N: Debug + ?Sized>(node: &N) -> Self {
        Self::DuplicateNode {
            node: format!("{node:?}"),
        }
    }

    /// Creates an unknown node error
    pub fn unknown_node<N: Debug + ?Sized>(node: &N) -> Self {
        Self::UnknownNode {
            node: format!("{node:?}"),
        }
    }

    /// Creates a cycle detected error
    pub fn cycle(unsorted: usize) -> Self {
        Self::CycleDetected { unsorted }
    }

    /// Creates an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns true if this error reports a cycle
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_render_node_with_debug() {
        let err = GraphError::duplicate_node(&"a");
        assert_eq!(err.to_string(), "node \"a\" already exists");

        let err = GraphError::unknown_node(&7);
        assert_eq!(err.to_string(), "node 7 is not in graph");
    }

    #[test]
    fn test_is_cycle() {
        assert!(GraphError::cycle(2).is_cycle());
        assert!(!GraphError::unknown_node(&1).is_cycle());
    }
}
