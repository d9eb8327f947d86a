use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::components::count_connected_components;

/// Screen position of a vertex. Only the rendering layer cares about it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An undirected edge between two vertex labels.
///
/// Equality and hashing ignore endpoint order, so `Edge::new("A", "B")` and
/// `Edge::new("B", "A")` are the same edge. The orientation given at
/// insertion is kept for display and export.
#[derive(Debug, Clone, Eq)]
pub struct Edge {
    a: String,
    b: String,
}

impl Edge {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }

    pub fn is_loop(&self) -> bool {
        self.a == self.b
    }

    pub fn touches(&self, label: &str) -> bool {
        self.a == label || self.b == label
    }

    fn key(&self) -> (&str, &str) {
        if self.a <= self.b {
            (&self.a, &self.b)
        } else {
            (&self.b, &self.a)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

/// An undirected graph of labelled vertices.
///
/// Vertices and edges remember their insertion order; every derived view
/// (adjacency, components, search order) follows it, which is what makes
/// search results and traces reproducible.
///
/// All mutators are idempotent: adding something that already exists or
/// removing something that does not is a silent no-op, reported only through
/// the returned `bool`.
///
/// # Example
/// ```
/// use hamilton::graph::{Graph, Position};
///
/// let mut g = Graph::new();
/// g.add_vertex("A", Position::default());
/// g.add_vertex("B", Position::default());
/// assert!(g.add_edge("A", "B"));
/// assert!(!g.add_edge("B", "A")); // same undirected edge
/// assert_eq!(g.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: IndexMap<String, Position>,
    edges: IndexSet<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from labels and edges, placing every vertex at the
    /// origin. Edges naming unknown labels are ignored, like [`Graph::add_edge`].
    pub fn from_edges<'a>(
        labels: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut graph = Self::new();
        for label in labels {
            graph.add_vertex(label, Position::default());
        }
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Adds a vertex. Returns `false` (and keeps the old position) if the
    /// label is already taken.
    pub fn add_vertex(&mut self, label: impl Into<String>, position: Position) -> bool {
        match self.vertices.entry(label.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(position);
                true
            }
        }
    }

    /// Adds the undirected edge `u-v`. Returns `false` if the pair already
    /// exists in either orientation or if either endpoint is not a vertex.
    pub fn add_edge(&mut self, u: &str, v: &str) -> bool {
        if !self.contains_vertex(u) || !self.contains_vertex(v) {
            return false;
        }
        self.edges.insert(Edge::new(u, v))
    }

    /// Removes a vertex together with every edge touching it.
    pub fn remove_vertex(&mut self, label: &str) -> bool {
        if self.vertices.shift_remove(label).is_none() {
            return false;
        }
        self.edges.retain(|edge| !edge.touches(label));
        true
    }

    /// Removes the undirected edge `u-v`, whichever orientation it was added in.
    pub fn remove_edge(&mut self, u: &str, v: &str) -> bool {
        self.edges.shift_remove(&Edge::new(u, v))
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains_vertex(&self, label: &str) -> bool {
        self.vertices.contains_key(label)
    }

    pub fn contains_edge(&self, u: &str, v: &str) -> bool {
        self.edges.contains(&Edge::new(u, v))
    }

    /// Vertex labels in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices.keys().map(String::as_str)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    pub fn position(&self, label: &str) -> Option<Position> {
        self.vertices.get(label).copied()
    }

    pub fn set_position(&mut self, label: &str, position: Position) -> Result<()> {
        let slot = self
            .vertices
            .get_mut(label)
            .ok_or_else(|| GraphError::vertex_not_found(label))?;
        *slot = position;
        Ok(())
    }

    /// Neighbors of `label` in edge insertion order. Self-loops are skipped.
    pub fn neighbors(&self, label: &str) -> Result<Vec<&str>> {
        if !self.contains_vertex(label) {
            return Err(GraphError::vertex_not_found(label));
        }
        let neighbors = self
            .edges
            .iter()
            .filter(|edge| !edge.is_loop())
            .filter_map(|edge| match edge.endpoints() {
                (a, b) if a == label => Some(b),
                (a, b) if b == label => Some(a),
                _ => None,
            })
            .collect();
        Ok(neighbors)
    }

    /// Number of distinct neighbors of `label`, ignoring self-loops.
    pub fn degree(&self, label: &str) -> Result<usize> {
        self.neighbors(label).map(|neighbors| neighbors.len())
    }

    pub(crate) fn vertex_index(&self, label: &str) -> Option<usize> {
        self.vertices.get_index_of(label)
    }

    /// 0/1 adjacency matrix in vertex insertion order. A self-loop sets the
    /// diagonal entry.
    pub fn adjacency_matrix(&self) -> Vec<Vec<u8>> {
        let n = self.vertex_count();
        let mut matrix = vec![vec![0u8; n]; n];
        for edge in &self.edges {
            let (a, b) = edge.endpoints();
            if let (Some(i), Some(j)) = (self.vertex_index(a), self.vertex_index(b)) {
                matrix[i][j] = 1;
                matrix[j][i] = 1;
            }
        }
        matrix
    }

    /// True for a connected graph with exactly `n - 1` edges.
    pub fn is_tree(&self) -> bool {
        !self.is_empty()
            && self.edge_count() + 1 == self.vertex_count()
            && count_connected_components(self) == 1
    }

    pub fn info(&self) -> GraphInfo {
        let labels: Vec<String> = self.vertices().map(str::to_owned).collect();
        let degrees = labels
            .iter()
            .map(|label| self.degree(label).unwrap_or(0))
            .collect();
        GraphInfo {
            edges: self.edges.iter().map(ToString::to_string).collect(),
            adjacency_matrix: self.adjacency_matrix(),
            labels,
            degrees,
        }
    }
}

/// A printable summary of a graph: counts, labels, adjacency matrix and
/// degrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphInfo {
    pub labels: Vec<String>,
    pub edges: Vec<String>,
    pub adjacency_matrix: Vec<Vec<u8>>,
    pub degrees: Vec<usize>,
}

impl fmt::Display for GraphInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return writeln!(f, "Empty graph");
        }
        writeln!(f, "Vertices: {}", self.labels.len())?;
        writeln!(f, "Edges: {}", self.edges.len())?;
        writeln!(f, "Vertex list: {}", self.labels.join(", "))?;
        if !self.edges.is_empty() {
            writeln!(f, "Edge list: {}", self.edges.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "Adjacency matrix:")?;
        writeln!(f, "   {}", self.labels.join("  "))?;
        for (label, row) in self.labels.iter().zip(&self.adjacency_matrix) {
            let cells: Vec<String> = row.iter().map(u8::to_string).collect();
            writeln!(f, "{label}  {}", cells.join("  "))?;
        }

        writeln!(f)?;
        writeln!(f, "Degrees:")?;
        for (label, degree) in self.labels.iter().zip(&self.degrees) {
            writeln!(f, "{label}: {degree}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        Graph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C"), ("C", "A")])
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut g = Graph::new();
        assert!(g.add_vertex("A", Position::new(1.0, 2.0)));
        assert!(!g.add_vertex("A", Position::new(9.0, 9.0)));
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.position("A"), Some(Position::new(1.0, 2.0)));
    }

    #[test]
    fn test_add_edge_ignores_orientation() {
        let mut g = Graph::from_edges(["A", "B"], []);
        assert!(g.add_edge("A", "B"));
        assert!(!g.add_edge("B", "A"));
        assert!(!g.add_edge("A", "B"));
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains_edge("B", "A"));
    }

    #[test]
    fn test_add_edge_requires_both_endpoints() {
        let mut g = Graph::from_edges(["A"], []);
        assert!(!g.add_edge("A", "Z"));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        let mut g = triangle();
        assert!(g.remove_vertex("B"));
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec!["A", "C"]);
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains_edge("A", "C"));
        assert!(g.edges().all(|e| !e.touches("B")));

        assert!(!g.remove_vertex("B"));
    }

    #[test]
    fn test_remove_edge_either_orientation() {
        let mut g = triangle();
        assert!(g.remove_edge("B", "A"));
        assert!(!g.contains_edge("A", "B"));
        assert!(!g.remove_edge("A", "B"));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_remove_edge_keeps_order() {
        let mut g = Graph::from_edges(
            ["A", "B", "C", "D"],
            [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        );
        g.remove_edge("B", "C");
        let edges: Vec<String> = g.edges().map(ToString::to_string).collect();
        assert_eq!(edges, vec!["A-B", "C-D", "D-A"]);
    }

    #[test]
    fn test_clear() {
        let mut g = triangle();
        g.clear();
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_neighbors_and_degree() {
        let mut g = triangle();
        g.add_vertex("D", Position::default());
        g.add_edge("D", "D");
        assert_eq!(g.neighbors("A").unwrap(), vec!["B", "C"]);
        assert_eq!(g.neighbors("C").unwrap(), vec!["B", "A"]);
        assert_eq!(g.degree("D").unwrap(), 0);
        assert!(matches!(
            g.degree("Z"),
            Err(GraphError::VertexNotFound(label)) if label == "Z"
        ));
    }

    #[test]
    fn test_set_position() {
        let mut g = triangle();
        g.set_position("A", Position::new(3.0, 4.0)).unwrap();
        assert_eq!(g.position("A"), Some(Position::new(3.0, 4.0)));
        assert!(g.set_position("Q", Position::default()).is_err());
    }

    #[test]
    fn test_adjacency_matrix() {
        let g = Graph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C")]);
        assert_eq!(
            g.adjacency_matrix(),
            vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]
        );
    }

    #[test]
    fn test_is_tree() {
        let path = Graph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C")]);
        assert!(path.is_tree());
        assert!(!triangle().is_tree());

        // n - 1 edges but a cycle plus an isolated vertex
        let split = Graph::from_edges(
            ["A", "B", "C", "D"],
            [("A", "B"), ("B", "C"), ("C", "A")],
        );
        assert!(!split.is_tree());
        assert!(!Graph::new().is_tree());
    }

    #[test]
    fn test_info_display() {
        let g = Graph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C")]);
        let info = g.info();
        assert_eq!(info.degrees, vec![1, 2, 1]);
        let text = info.to_string();
        assert!(text.contains("Vertices: 3"));
        assert!(text.contains("Edge list: A-B, B-C"));
        assert!(text.contains("B  1  0  1"));
        assert!(text.contains("B: 2"));
    }
}
