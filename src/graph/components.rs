use std::collections::VecDeque;

use serde::Serialize;

use crate::graph::adjacency::Adjacency;
use crate::graph::model::Graph;

/// Connected components of an undirected graph.
///
/// Groups are ordered by their earliest vertex, and each group lists its
/// vertices in insertion order, so the result is stable for a given graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Components {
    groups: Vec<Vec<String>>,
}

impl Components {
    pub fn count(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Vec<String>> {
        self.groups
    }

    /// True when there is at most one component. The empty graph counts as
    /// connected.
    pub fn is_connected(&self) -> bool {
        self.groups.len() <= 1
    }
}

/// Partitions the vertices of `graph` into connected components.
///
/// # Example
/// ```
/// use hamilton::graph::{connected_components, Graph};
///
/// let g = Graph::from_edges(["A", "B", "C", "D"], [("A", "B"), ("C", "D")]);
/// let components = connected_components(&g);
/// assert_eq!(components.count(), 2);
/// assert_eq!(components.groups()[1], vec!["C", "D"]);
/// ```
pub fn connected_components(graph: &Graph) -> Components {
    let adjacency = Adjacency::new(graph);
    let groups = component_groups(&adjacency, |_| true)
        .iter()
        .map(|group| adjacency.labels_of(group))
        .collect();
    Components { groups }
}

pub fn count_connected_components(graph: &Graph) -> usize {
    let adjacency = Adjacency::new(graph);
    component_groups(&adjacency, |_| true).len()
}

/// Breadth-first partition of the vertices accepted by `include`, restricted
/// to edges between accepted vertices (the induced subgraph).
pub(crate) fn component_groups<F>(adjacency: &Adjacency<'_>, include: F) -> Vec<Vec<usize>>
where
    F: Fn(usize) -> bool,
{
    let n = adjacency.len();
    let mut seen = vec![false; n];
    let mut groups = Vec::new();
    let mut queue = VecDeque::new();

    for root in 0..n {
        if seen[root] || !include(root) {
            continue;
        }
        seen[root] = true;
        queue.push_back(root);
        let mut group = Vec::new();

        while let Some(u) = queue.pop_front() {
            group.push(u);
            for v in adjacency.neighbors(u) {
                if !seen[v] && include(v) {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }

        group.sort_unstable();
        groups.push(group);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let g = Graph::new();
        let components = connected_components(&g);
        assert_eq!(components.count(), 0);
        assert!(components.is_connected());
    }

    #[test]
    fn test_single_component() {
        let g = Graph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C")]);
        let components = connected_components(&g);
        assert_eq!(components.count(), 1);
        assert_eq!(components.groups(), &[vec!["A", "B", "C"]]);
    }

    #[test]
    fn test_isolated_vertices_are_components() {
        let g = Graph::from_edges(["A", "B", "C", "D"], [("B", "D")]);
        let components = connected_components(&g);
        assert_eq!(
            components.into_groups(),
            vec![vec!["A"], vec!["B", "D"], vec!["C"]]
        );
        assert_eq!(count_connected_components(&g), 3);
    }

    #[test]
    fn test_group_members_in_insertion_order() {
        // BFS from A reaches D before B, but groups list insertion order.
        let g = Graph::from_edges(
            ["A", "B", "C", "D"],
            [("A", "D"), ("D", "C"), ("C", "B")],
        );
        let components = connected_components(&g);
        assert_eq!(components.groups(), &[vec!["A", "B", "C", "D"]]);
    }

    #[test]
    fn test_self_loop_does_not_connect() {
        let g = Graph::from_edges(["A", "B"], [("A", "A")]);
        assert_eq!(count_connected_components(&g), 2);
    }

    #[test]
    fn test_induced_subgraph() {
        // Path A-B-C: removing B splits {A, C}.
        let g = Graph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C")]);
        let adj = Adjacency::new(&g);
        let groups = component_groups(&adj, |v| v != 1);
        assert_eq!(groups, vec![vec![0], vec![2]]);
    }
}
