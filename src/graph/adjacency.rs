use indexmap::IndexSet;

use crate::graph::model::Graph;

/// Index-based adjacency snapshot of a [`Graph`], built once per search.
///
/// Vertex `i` is the `i`-th vertex in insertion order. Each neighbor set is
/// ordered by edge insertion, and iterating it is the only source of branch
/// order in the searches. Self-loops are dropped: they can never be part of a
/// simple cycle.
#[derive(Debug, Clone)]
pub struct Adjacency<'g> {
    labels: IndexSet<&'g str>,
    neighbors: Vec<IndexSet<usize>>,
}

impl<'g> Adjacency<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        let labels: IndexSet<&str> = graph.vertices().collect();
        let mut neighbors = vec![IndexSet::new(); labels.len()];
        for edge in graph.edges() {
            if edge.is_loop() {
                continue;
            }
            let (a, b) = edge.endpoints();
            // Graph never stores an edge to a missing vertex.
            if let (Some(i), Some(j)) = (graph.vertex_index(a), graph.vertex_index(b)) {
                neighbors[i].insert(j);
                neighbors[j].insert(i);
            }
        }
        Self { labels, neighbors }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, vertex: usize) -> &'g str {
        self.labels[vertex]
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors[vertex].iter().copied()
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.neighbors[vertex].len()
    }

    pub fn are_adjacent(&self, u: usize, v: usize) -> bool {
        self.neighbors[u].contains(&v)
    }

    /// Resolves an optional start label, falling back to the first vertex
    /// when it is absent or unknown. Must not be called on an empty view.
    pub fn resolve_start(&self, start: Option<&str>) -> usize {
        match start {
            None => 0,
            Some(label) => self.index_of(label).unwrap_or_else(|| {
                log::warn!(
                    "start vertex {label:?} is not in the graph; starting from {:?}",
                    self.labels[0]
                );
                0
            }),
        }
    }

    /// Owned labels for a sequence of vertex indices.
    pub fn labels_of(&self, vertices: &[usize]) -> Vec<String> {
        vertices.iter().map(|&v| self.labels[v].to_owned()).collect()
    }

    /// Renders a vertex sequence as `A -> B -> C`.
    pub fn join(&self, vertices: &[usize]) -> String {
        self.join_with(vertices, " -> ")
    }

    pub fn join_with(&self, vertices: &[usize], separator: &str) -> String {
        vertices
            .iter()
            .map(|&v| self.labels[v])
            .collect::<Vec<_>>()
            .join(separator)
    }
}
