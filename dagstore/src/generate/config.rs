use crate::graph::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};

/// Default number of nodes in a generated graph.
pub const DEFAULT_NODES: usize = 10;

/// Default probability that an edge-adding attempt succeeds.
pub const DEFAULT_EDGE_PROBABILITY: f64 = 0.2;

/// Default number of edge-adding attempts.
pub const DEFAULT_MAX_EDGE_ATTEMPTS: usize = 50;

/// Configuration for [`random_dag`](super::random_dag).
///
/// Every field has a default, so partial configs deserialize:
///
/// ```
/// use dagstore::generate::RandomDagConfig;
///
/// let config: RandomDagConfig = serde_json::from_str(r#"{ "nodes": 4, "seed": 7 }"#).unwrap();
/// assert_eq!(config.nodes, 4);
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.max_edge_attempts, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomDagConfig {
    /// Number of nodes, labelled `0..nodes`.
    pub nodes: usize,
    /// Probability in `[0, 1]` that an attempt adds an edge.
    pub edge_probability: f64,
    /// Number of edge-adding attempts.
    pub max_edge_attempts: usize,
    /// RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for RandomDagConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES,
            edge_probability: DEFAULT_EDGE_PROBABILITY,
            max_edge_attempts: DEFAULT_MAX_EDGE_ATTEMPTS,
            seed: None,
        }
    }
}

impl RandomDagConfig {
    /// Returns a copy with a fixed seed, for reproducible graphs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that every field is in range.
    pub fn validate(&self) -> GraphResult<()> {
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(GraphError::invalid_config(format!(
                "edge_probability must be within [0, 1], got {}",
                self.edge_probability
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RandomDagConfig::default();
        assert_eq!(config.nodes, DEFAULT_NODES);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_probability_out_of_range() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let config = RandomDagConfig {
                edge_probability: bad,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(GraphError::InvalidConfig { .. })
            ));
        }
    }
}
