use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::model::{Graph, Position};

/// A vertex as stored in a graph file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

/// The on-disk shape of a graph:
///
/// ```json
/// {
///     "vertices": [{ "name": "A", "x": 100, "y": 120 }],
///     "edges": [["A", "B"]]
/// }
/// ```
///
/// Fields the search does not use (edge control points and other rendering
/// details) are ignored on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    #[serde(default)]
    pub vertices: Vec<VertexRecord>,
    #[serde(default)]
    pub edges: Vec<Vec<String>>,
}

impl GraphRecord {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&Graph> for GraphRecord {
    fn from(graph: &Graph) -> Self {
        let vertices = graph
            .vertices()
            .map(|name| {
                let position = graph.position(name).unwrap_or_default();
                VertexRecord {
                    name: name.to_owned(),
                    x: position.x,
                    y: position.y,
                }
            })
            .collect();
        let edges = graph
            .edges()
            .map(|edge| {
                let (a, b) = edge.endpoints();
                vec![a.to_owned(), b.to_owned()]
            })
            .collect();
        Self { vertices, edges }
    }
}

impl TryFrom<GraphRecord> for Graph {
    type Error = GraphError;

    /// Rebuilds a graph. Duplicate vertices and edges collapse as they do in
    /// [`Graph::add_vertex`] and [`Graph::add_edge`]; edge entries that are not
    /// pairs are skipped; an edge naming an unknown vertex is an error.
    fn try_from(record: GraphRecord) -> Result<Self> {
        let mut graph = Graph::new();
        for vertex in record.vertices {
            graph.add_vertex(vertex.name, Position::new(vertex.x, vertex.y));
        }
        for edge in record.edges {
            let [a, b] = edge.as_slice() else {
                log::warn!("skipping edge entry {edge:?}: expected two vertex names");
                continue;
            };
            for name in [a, b] {
                if !graph.contains_vertex(name) {
                    return Err(GraphError::vertex_not_found(name.as_str()));
                }
            }
            graph.add_edge(a, b);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "vertices": [
            {"name": "A", "x": 100, "y": 50},
            {"name": "B", "x": 200, "y": 50},
            {"name": "C", "x": 150, "y": 120}
        ],
        "edges": [["A", "B"], ["B", "C"], ["C", "A"], ["B", "A"], ["A"]],
        "control_points": {}
    }"#;

    #[test]
    fn test_read_sample() {
        let record = GraphRecord::from_json(SAMPLE).unwrap();
        let graph = Graph::try_from(record).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        // duplicate B-A collapses, the one-element entry is skipped
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.position("C"), Some(Position::new(150.0, 120.0)));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let record = GraphRecord::from_json("{}").unwrap();
        assert_eq!(record, GraphRecord::default());
        assert!(Graph::try_from(record).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_endpoint() {
        let record = GraphRecord::from_json(
            r#"{"vertices": [{"name": "A", "x": 0, "y": 0}], "edges": [["A", "Z"]]}"#,
        )
        .unwrap();
        assert!(matches!(
            Graph::try_from(record),
            Err(GraphError::VertexNotFound(name)) if name == "Z"
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GraphRecord::from_json(r#"{"vertices": [{"name": "A"}]}"#),
            Err(GraphError::Json(_))
        ));
    }

    #[test]
    fn test_write_then_read_preserves_graph() {
        let mut graph = Graph::new();
        graph.add_vertex("A", Position::new(1.0, 2.0));
        graph.add_vertex("B", Position::new(3.0, 4.0));
        graph.add_edge("B", "A");

        let text = GraphRecord::from(&graph).to_json_pretty().unwrap();
        assert!(text.contains("\"name\": \"A\""));

        let back = Graph::try_from(GraphRecord::from_json(&text).unwrap()).unwrap();
        assert_eq!(back.vertices().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(back.edges().next().unwrap().endpoints(), ("B", "A"));
        assert_eq!(back.position("B"), Some(Position::new(3.0, 4.0)));
    }
}
