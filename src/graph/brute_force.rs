use std::iter;
use std::ops::ControlFlow;

use crate::combinatorial::backtracking::try_for_each_permutation;
use crate::graph::adjacency::Adjacency;
use crate::graph::model::Graph;
use crate::graph::trace::{NoTrace, StepKind, StepSink};

/// Finds a Hamiltonian cycle by testing every ordering of the non-start
/// vertices, in lexicographic order of their insertion positions.
///
/// Runs in factorial time. It exists to cross-check the backtracking search
/// on small graphs, not for real use.
///
/// # Example
/// ```
/// use hamilton::graph::{brute_force_hamiltonian_cycle, find_hamiltonian_cycle, Graph};
///
/// let g = Graph::from_edges(
///     ["A", "B", "C", "D"],
///     [("A", "C"), ("C", "B"), ("B", "D"), ("D", "A")],
/// );
/// let cycle = brute_force_hamiltonian_cycle(&g, None).unwrap();
/// assert_eq!(cycle, vec!["A", "C", "B", "D", "A"]);
/// assert!(find_hamiltonian_cycle(&g, None).is_some());
/// ```
pub fn brute_force_hamiltonian_cycle(graph: &Graph, start: Option<&str>) -> Option<Vec<String>> {
    let adjacency = Adjacency::new(graph);
    if adjacency.len() < 3 {
        return None;
    }
    let start = adjacency.resolve_start(start);
    run(&adjacency, start, NoTrace).map(|cycle| adjacency.labels_of(&cycle))
}

/// Tests orderings until one closes into a cycle, reporting each test to
/// `sink`. Returns the closed tour.
pub(crate) fn run<S: StepSink>(
    adjacency: &Adjacency<'_>,
    start: usize,
    mut sink: S,
) -> Option<Vec<usize>> {
    let rest: Vec<usize> = (0..adjacency.len()).filter(|&v| v != start).collect();
    sink.record(
        StepKind::Start,
        || vec![adjacency.label(start).to_owned()],
        || format!("Start at vertex {}", adjacency.label(start)),
    );

    let mut tested = 0usize;
    let found = try_for_each_permutation(&rest, |order| {
        tested += 1;
        let tour: Vec<usize> = iter::once(start)
            .chain(order.iter().copied())
            .chain(iter::once(start))
            .collect();
        sink.record(
            StepKind::TestOrdering,
            || adjacency.labels_of(&tour),
            || format!("Test ordering {}", adjacency.join(&tour)),
        );

        match tour.windows(2).find(|pair| !adjacency.are_adjacent(pair[0], pair[1])) {
            Some(pair) => {
                sink.record(
                    StepKind::OrderingRejected,
                    || adjacency.labels_of(&tour),
                    || {
                        format!(
                            "Reject: no edge {}-{}",
                            adjacency.label(pair[0]),
                            adjacency.label(pair[1])
                        )
                    },
                );
                ControlFlow::Continue(())
            }
            None => {
                sink.record(
                    StepKind::CycleClosed,
                    || adjacency.labels_of(&tour),
                    || format!("Every edge exists: {}", adjacency.join(&tour)),
                );
                ControlFlow::Break(tour)
            }
        }
    });

    if found.is_none() {
        sink.record(StepKind::Exhausted, Vec::new, || {
            format!(
                "Tested all {tested} orderings from {}: no Hamiltonian cycle exists",
                adjacency.label(start)
            )
        });
    }
    found
}
