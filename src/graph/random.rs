use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::{GraphError, Result};
use crate::graph::model::{Graph, Position};

/// Parameters for [`random_graph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomGraphConfig {
    pub vertices: usize,
    /// Probability that any given pair of vertices is joined.
    pub edge_probability: f64,
    /// Canvas size used to place vertices on a circle.
    pub width: f64,
    pub height: f64,
}

impl Default for RandomGraphConfig {
    fn default() -> Self {
        Self {
            vertices: 6,
            edge_probability: 0.4,
            width: 600.0,
            height: 500.0,
        }
    }
}

impl RandomGraphConfig {
    pub fn with_vertices(mut self, vertices: usize) -> Self {
        self.vertices = vertices;
        self
    }

    pub fn with_edge_probability(mut self, edge_probability: f64) -> Self {
        self.edge_probability = edge_probability;
        self
    }
}

/// Generates an Erdős–Rényi style random graph.
///
/// Vertices are labelled `A, B, …, Z, AA, AB, …` and spread evenly on a circle
/// centred in the canvas; every pair is joined independently with
/// `edge_probability`.
pub fn random_graph<R: Rng + ?Sized>(rng: &mut R, config: &RandomGraphConfig) -> Result<Graph> {
    if !(0.0..=1.0).contains(&config.edge_probability) {
        return Err(GraphError::invalid_input(format!(
            "edge probability must be within [0, 1], got {}",
            config.edge_probability
        )));
    }

    let n = config.vertices;
    let (cx, cy) = (config.width / 2.0, config.height / 2.0);
    let radius = (cx.min(cy) - 60.0).max(0.0);

    let mut graph = Graph::new();
    for i in 0..n {
        let angle = (i as f64 * 360.0 / n as f64).to_radians();
        let position = Position::new(
            (cx + radius * angle.cos()).round(),
            (cy + radius * angle.sin()).round(),
        );
        graph.add_vertex(vertex_label(i), position);
    }

    let labels: Vec<String> = graph.vertices().map(str::to_owned).collect();
    for i in 0..n {
        for j in i + 1..n {
            if rng.gen_bool(config.edge_probability) {
                graph.add_edge(&labels[i], &labels[j]);
            }
        }
    }
    Ok(graph)
}

/// [`random_graph`] driven by a ChaCha generator seeded with `seed`, so the
/// same seed always yields the same graph.
///
/// # Example
/// ```
/// use hamilton::graph::{seeded_random_graph, RandomGraphConfig};
///
/// let config = RandomGraphConfig::default();
/// let a = seeded_random_graph(7, &config).unwrap();
/// let b = seeded_random_graph(7, &config).unwrap();
/// assert_eq!(a.vertex_count(), 6);
/// assert!(a.edges().eq(b.edges()));
/// ```
pub fn seeded_random_graph(seed: u64, config: &RandomGraphConfig) -> Result<Graph> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    random_graph(&mut rng, config)
}

/// Spreadsheet-style column label: 0 -> A, 25 -> Z, 26 -> AA.
fn vertex_label(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}
