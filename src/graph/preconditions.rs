use thiserror::Error;

use crate::graph::adjacency::Adjacency;
use crate::graph::components::component_groups;
use crate::graph::model::Graph;

/// Why a graph was rejected before any search was attempted.
///
/// The `Display` output is the human-readable reason shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionFailure {
    #[error("needs at least 3 vertices (graph has {count})")]
    TooFewVertices { count: usize },

    #[error("graph is disconnected ({components} components)")]
    Disconnected { components: usize },

    #[error("vertex {vertex} has degree {degree}, less than half of the {vertex_count} vertices")]
    DiracViolation {
        vertex: String,
        degree: usize,
        vertex_count: usize,
    },

    #[error("isolated vertices: {}", .vertices.join(", "))]
    IsolatedVertices { vertices: Vec<String> },
}

/// Checks the necessary conditions for a Hamiltonian cycle, in order: at
/// least 3 vertices, a single connected component, Dirac's degree bound, and
/// no isolated vertices. Stops at the first failure.
///
/// Dirac's bound is sufficient rather than necessary, so a rejection here is
/// an early, explainable answer and not a proof; see
/// [`SearchConfig::with_dirac_gate`](crate::graph::SearchConfig::with_dirac_gate)
/// for searching such graphs anyway.
///
/// # Example
/// ```
/// use hamilton::graph::{check_preconditions, Graph, PreconditionFailure};
///
/// let g = Graph::from_edges(["A", "B", "C", "D"], [("A", "B"), ("C", "D")]);
/// assert_eq!(
///     check_preconditions(&g),
///     Err(PreconditionFailure::Disconnected { components: 2 })
/// );
/// ```
pub fn check_preconditions(graph: &Graph) -> Result<(), PreconditionFailure> {
    check_adjacency(&Adjacency::new(graph), true)
}

pub(crate) fn check_adjacency(
    adjacency: &Adjacency<'_>,
    dirac_gate: bool,
) -> Result<(), PreconditionFailure> {
    let n = adjacency.len();
    if n < 3 {
        return Err(PreconditionFailure::TooFewVertices { count: n });
    }

    let components = component_groups(adjacency, |_| true).len();
    if components > 1 {
        return Err(PreconditionFailure::Disconnected { components });
    }

    if dirac_gate {
        // degree < n / 2, kept in integers
        if let Some(v) = (0..n).find(|&v| 2 * adjacency.degree(v) < n) {
            return Err(PreconditionFailure::DiracViolation {
                vertex: adjacency.label(v).to_owned(),
                degree: adjacency.degree(v),
                vertex_count: n,
            });
        }
    }

    let isolated: Vec<String> = (0..n)
        .filter(|&v| adjacency.degree(v) == 0)
        .map(|v| adjacency.label(v).to_owned())
        .collect();
    if !isolated.is_empty() {
        return Err(PreconditionFailure::IsolatedVertices { vertices: isolated });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_vertices_fail_on_size() {
        let g = Graph::from_edges(["A", "B"], [("A", "B")]);
        assert_eq!(
            check_preconditions(&g),
            Err(PreconditionFailure::TooFewVertices { count: 2 })
        );
        assert_eq!(
            check_preconditions(&Graph::new()),
            Err(PreconditionFailure::TooFewVertices { count: 0 })
        );
    }

    #[test]
    fn test_disconnected() {
        let g = Graph::from_edges(["A", "B", "C", "D"], [("A", "B"), ("C", "D")]);
        let err = check_preconditions(&g).unwrap_err();
        assert_eq!(err, PreconditionFailure::Disconnected { components: 2 });
        assert_eq!(err.to_string(), "graph is disconnected (2 components)");
    }

    #[test]
    fn test_connectivity_checked_before_dirac() {
        // Isolated D would also fail Dirac and the isolated check.
        let g = Graph::from_edges(
            ["A", "B", "C", "D"],
            [("A", "B"), ("B", "C"), ("C", "A")],
        );
        assert!(matches!(
            check_preconditions(&g),
            Err(PreconditionFailure::Disconnected { components: 2 })
        ));
    }

    #[test]
    fn test_dirac_violation_names_vertex() {
        let g = Graph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C")]);
        let err = check_preconditions(&g).unwrap_err();
        assert_eq!(
            err,
            PreconditionFailure::DiracViolation {
                vertex: "A".to_string(),
                degree: 1,
                vertex_count: 3,
            }
        );
        assert_eq!(
            err.to_string(),
            "vertex A has degree 1, less than half of the 3 vertices"
        );
    }

    #[test]
    fn test_dirac_boundary_is_inclusive() {
        // C4: every degree is exactly n / 2.
        let g = Graph::from_edges(
            ["A", "B", "C", "D"],
            [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        );
        assert_eq!(check_preconditions(&g), Ok(()));
    }

    #[test]
    fn test_dirac_gate_off() {
        // C5 fails Dirac (2 < 2.5) but is Hamiltonian.
        let g = Graph::from_edges(
            ["A", "B", "C", "D", "E"],
            [("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"), ("E", "A")],
        );
        let adj = Adjacency::new(&g);
        assert!(matches!(
            check_adjacency(&adj, true),
            Err(PreconditionFailure::DiracViolation { .. })
        ));
        assert_eq!(check_adjacency(&adj, false), Ok(()));
    }

    #[test]
    fn test_complete_graph_passes() {
        let g = Graph::from_edges(
            ["A", "B", "C", "D"],
            [
                ("A", "B"),
                ("A", "C"),
                ("A", "D"),
                ("B", "C"),
                ("B", "D"),
                ("C", "D"),
            ],
        );
        assert!(check_preconditions(&g).is_ok());
    }

    #[test]
    fn test_isolated_vertices_message() {
        let failure = PreconditionFailure::IsolatedVertices {
            vertices: vec!["D".to_string(), "E".to_string()],
        };
        assert_eq!(failure.to_string(), "isolated vertices: D, E");
    }
}
