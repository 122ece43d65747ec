//! Random DAG construction
//!
//! Generated graphs are acyclic by construction: every edge points from a
//! lower-numbered node to a higher-numbered one, so `0..n` is always a valid
//! topological order. After the random edges are placed, every independent
//! node other than `0` is hooked up to a random lower-numbered node, leaving
//! `0` as the only entry point.

mod config;

pub use config::{
    RandomDagConfig, DEFAULT_EDGE_PROBABILITY, DEFAULT_MAX_EDGE_ATTEMPTS, DEFAULT_NODES,
};

use crate::graph::{Dag, GraphResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Builds a random DAG over the nodes `0..config.nodes`
///
/// # Example
///
/// ```
/// use dagstore::generate::{random_dag, RandomDagConfig};
///
/// let dag = random_dag(&RandomDagConfig::default().with_seed(18)).unwrap();
/// assert!(dag.validate());
/// assert_eq!(dag.independent_nodes(), vec![0]);
/// ```
pub fn random_dag(config: &RandomDagConfig) -> GraphResult<Dag<usize>> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut dag = Dag::new();
    dag.add_nodes(0..config.nodes)?;
    if config.nodes < 2 {
        return Ok(dag);
    }

    for _ in 0..config.max_edge_attempts {
        if !rng.gen_bool(config.edge_probability) {
            continue;
        }
        let from = rng.gen_range(0..config.nodes - 1);
        let to = rng.gen_range(from + 1..config.nodes);
        dag.add_edge(from, to)?;
    }

    for node in dag.independent_nodes() {
        if node == 0 {
            continue;
        }
        let from = rng.gen_range(0..node);
        dag.add_edge(from, node)?;
    }

    debug!(
        nodes = dag.len(),
        edges = dag.edge_count(),
        seed = ?config.seed,
        "generated random dag"
    );
    Ok(dag)
}
