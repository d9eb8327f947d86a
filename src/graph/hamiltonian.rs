//! Backtracking search for a Hamiltonian cycle: a closed walk that visits every
//! vertex exactly once before returning to its start.
//!
//! The search is depth-first and tries neighbors in adjacency order (edge
//! insertion order), so it returns the *first* cycle under that order, not a
//! canonical one. Branch-and-bound mode prunes candidates that provably cannot
//! lead to a full tour and never changes whether a cycle is found.
//!
//! # Example
//! ```
//! use hamilton::graph::{find_hamiltonian_cycle, Graph};
//!
//! // A 4-node cycle: edges (A-B, B-C, C-D, D-A).
//! let g = Graph::from_edges(
//!     ["A", "B", "C", "D"],
//!     [("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
//! );
//! assert_eq!(
//!     find_hamiltonian_cycle(&g, None),
//!     Some(vec!["A".into(), "B".into(), "C".into(), "D".into(), "A".into()])
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::graph::adjacency::Adjacency;
use crate::graph::brute_force;
use crate::graph::components::component_groups;
use crate::graph::model::Graph;
use crate::graph::preconditions::check_adjacency;
use crate::graph::trace::{NoTrace, SearchResult, StepKind, StepSink, TraceRecorder};

/// Search strategy for the traced search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Plain depth-first backtracking.
    #[default]
    Backtracking,
    /// Backtracking that prunes hopeless candidates before recursing.
    BranchAndBound,
    /// Tests every ordering of the vertices. Factorial; meant as an oracle.
    BruteForce,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [
        SearchMode::Backtracking,
        SearchMode::BranchAndBound,
        SearchMode::BruteForce,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SearchMode::Backtracking => "backtracking",
            SearchMode::BranchAndBound => "branch-and-bound",
            SearchMode::BruteForce => "brute-force",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchMode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        SearchMode::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| {
                GraphError::invalid_input(format!(
                    "unknown search mode {s:?} (expected backtracking, branch-and-bound or brute-force)"
                ))
            })
    }
}

/// Options for [`search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub mode: SearchMode,
    /// Start vertex. `None`, or a label not in the graph, means the first
    /// vertex in insertion order.
    pub start: Option<String>,
    /// Reject graphs that fail Dirac's degree bound without searching.
    pub dirac_gate: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::Backtracking,
            start: None,
            dirac_gate: true,
        }
    }
}

impl SearchConfig {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Turning the gate off makes sparse Hamiltonian graphs (long cycles,
    /// for instance) searchable; the exhaustive search remains exact.
    pub fn with_dirac_gate(mut self, enabled: bool) -> Self {
        self.dirac_gate = enabled;
        self
    }
}

/// Finds a Hamiltonian cycle with plain backtracking and no trace.
///
/// Returns the closed tour (start repeated at the end), or `None` when no
/// cycle exists or the graph has fewer than 3 vertices. No precondition
/// gate is applied; the answer comes from the exhaustive search alone.
pub fn find_hamiltonian_cycle(graph: &Graph, start: Option<&str>) -> Option<Vec<String>> {
    let adjacency = Adjacency::new(graph);
    if adjacency.len() < 3 {
        return None;
    }
    let start = adjacency.resolve_start(start);
    let mut search = Search::new(&adjacency, start, false, NoTrace);
    search.run().map(|cycle| adjacency.labels_of(&cycle))
}

/// Traced search with the default preconditions (Dirac gate on).
///
/// # Example
/// ```
/// use hamilton::graph::{find_hamiltonian_cycle_traced, Graph, SearchMode, StepKind};
///
/// let g = Graph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C"), ("C", "A")]);
/// let result = find_hamiltonian_cycle_traced(&g, Some("A"), SearchMode::BranchAndBound);
/// assert!(result.success);
/// assert_eq!(result.path.unwrap(), vec!["A", "B", "C", "A"]);
/// assert_eq!(result.steps.last().unwrap().kind, StepKind::CycleClosed);
/// ```
pub fn find_hamiltonian_cycle_traced(
    graph: &Graph,
    start: Option<&str>,
    mode: SearchMode,
) -> SearchResult {
    let config = SearchConfig {
        mode,
        start: start.map(str::to_owned),
        ..SearchConfig::default()
    };
    search(graph, &config)
}

/// Runs the traced search described by `config`.
///
/// Degenerate graphs (empty, single vertex, fewer than 3 vertices, or any
/// failed precondition) come back as a failed result with a one- or two-step
/// trace explaining why; no search is run for them.
pub fn search(graph: &Graph, config: &SearchConfig) -> SearchResult {
    let adjacency = Adjacency::new(graph);

    match adjacency.len() {
        0 => return single_step(Vec::new(), "Graph is empty: no vertices to visit"),
        1 => {
            return single_step(
                vec![adjacency.label(0).to_owned()],
                "Graph has a single vertex: no cycle is possible",
            )
        }
        _ => {}
    }
    if let Err(failure) = check_adjacency(&adjacency, config.dirac_gate) {
        log::debug!("search skipped: {failure}");
        return SearchResult::rejected(&failure);
    }

    let start = adjacency.resolve_start(config.start.as_deref());
    log::debug!(
        "{} search from {} over {} vertices",
        config.mode,
        adjacency.label(start),
        adjacency.len()
    );

    let mut recorder = TraceRecorder::new();
    let cycle = match config.mode {
        SearchMode::BruteForce => brute_force::run(&adjacency, start, &mut recorder),
        SearchMode::Backtracking | SearchMode::BranchAndBound => {
            let prune = config.mode == SearchMode::BranchAndBound;
            let mut search = Search::new(&adjacency, start, prune, &mut recorder);
            search.run()
        }
    };

    let result = SearchResult::new(
        cycle.map(|cycle| adjacency.labels_of(&cycle)),
        recorder.into_steps(),
    );
    log::debug!(
        "{} search {} after {} steps",
        config.mode,
        if result.success { "found a cycle" } else { "found no cycle" },
        result.total_steps
    );
    result
}

fn single_step(path: Vec<String>, action: &str) -> SearchResult {
    let mut recorder = TraceRecorder::new();
    recorder.record(StepKind::Rejected, || path, || action.to_string());
    SearchResult::new(None, recorder.into_steps())
}

/// Why branch-and-bound discarded a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prune {
    /// The candidate has no unvisited neighbor to continue through.
    DeadEnd,
    /// The candidate would be last but has no edge back to the start.
    NoClosingEdge,
    /// Placing the candidate splits the unvisited vertices.
    SplitsRemainder { groups: usize },
}

/// State of one search invocation: the path, its visited set, and the sink
/// that receives trace events.
struct Search<'a, 'g, S> {
    adjacency: &'a Adjacency<'g>,
    path: Vec<usize>,
    visited: BitVec,
    prune: bool,
    sink: S,
}

impl<'a, 'g, S: StepSink> Search<'a, 'g, S> {
    fn new(adjacency: &'a Adjacency<'g>, start: usize, prune: bool, sink: S) -> Self {
        let mut visited = bitvec![0; adjacency.len()];
        visited.set(start, true);
        let mut path = Vec::with_capacity(adjacency.len() + 1);
        path.push(start);
        Self {
            adjacency,
            path,
            visited,
            prune,
            sink,
        }
    }

    /// Runs the search to completion, returning the closed tour if one exists.
    fn run(&mut self) -> Option<Vec<usize>> {
        let start = self.path[0];
        let adjacency = self.adjacency;
        self.emit(StepKind::Start, |_| {
            format!("Start at vertex {}", adjacency.label(start))
        });

        if self.extend() {
            return Some(self.path.clone());
        }

        self.sink.record(StepKind::Exhausted, Vec::new, || {
            format!(
                "Tried every option from {}: no Hamiltonian cycle exists",
                adjacency.label(start)
            )
        });
        None
    }

    /// Tries to complete the current path. On success the path is left closed
    /// (start repeated at the end); on failure it is restored to what it was.
    fn extend(&mut self) -> bool {
        let adjacency = self.adjacency;
        let start = self.path[0];
        let current = self.path[self.path.len() - 1];

        if self.path.len() == adjacency.len() {
            self.emit(StepKind::PathComplete, |path| {
                format!(
                    "Visited all {} vertices: {}",
                    adjacency.len(),
                    adjacency.join(path)
                )
            });
            if adjacency.are_adjacent(current, start) {
                self.path.push(start);
                self.emit(StepKind::CycleClosed, |path| {
                    format!(
                        "Edge {}-{} closes the cycle: {}",
                        adjacency.label(current),
                        adjacency.label(start),
                        adjacency.join(path)
                    )
                });
                return true;
            }
            self.emit(StepKind::ClosingEdgeMissing, |_| {
                format!(
                    "No edge from {} back to {}; the path cannot close",
                    adjacency.label(current),
                    adjacency.label(start)
                )
            });
            return false;
        }

        let candidates: Vec<usize> = adjacency
            .neighbors(current)
            .filter(|&v| !self.visited[v])
            .collect();
        if candidates.is_empty() {
            self.emit(StepKind::DeadEnd, |_| {
                format!("No unvisited neighbors left from {}", adjacency.label(current))
            });
            return false;
        }
        self.emit(StepKind::Candidates, |_| {
            format!(
                "From {}, try: {}",
                adjacency.label(current),
                adjacency.join_with(&candidates, ", ")
            )
        });

        for &v in &candidates {
            if self.prune {
                if let Some(reason) = self.prune_reason(v) {
                    log::trace!("pruned {} ({reason:?})", adjacency.label(v));
                    self.emit(StepKind::Prune, |_| describe_prune(adjacency, v, start, reason));
                    continue;
                }
            }

            self.path.push(v);
            self.visited.set(v, true);
            self.emit(StepKind::Advance, |path| {
                format!(
                    "Add {} to the path: {}",
                    adjacency.label(v),
                    adjacency.join(path)
                )
            });

            if self.extend() {
                return true;
            }

            self.path.pop();
            self.visited.set(v, false);
            self.emit(StepKind::Backtrack, |path| {
                format!(
                    "Backtrack: remove {}, back to {}",
                    adjacency.label(v),
                    adjacency.join(path)
                )
            });
        }

        false
    }

    /// Checks a candidate before it is placed. `None` means it is worth
    /// exploring.
    fn prune_reason(&self, v: usize) -> Option<Prune> {
        let adjacency = self.adjacency;
        let start = self.path[0];

        if self.path.len() + 1 == adjacency.len() {
            return (!adjacency.are_adjacent(v, start)).then_some(Prune::NoClosingEdge);
        }

        if !adjacency.neighbors(v).any(|w| !self.visited[w]) {
            return Some(Prune::DeadEnd);
        }

        // The rest of the tour must run through the remaining vertices in one
        // piece, so they have to stay connected without `v`.
        let groups = component_groups(adjacency, |w| w != v && !self.visited[w]).len();
        (groups > 1).then_some(Prune::SplitsRemainder { groups })
    }

    /// Records a step whose snapshot is the current path.
    fn emit<F>(&mut self, kind: StepKind, action: F)
    where
        F: FnOnce(&[usize]) -> String,
    {
        let adjacency = self.adjacency;
        let path = &self.path;
        self.sink
            .record(kind, || adjacency.labels_of(path), || action(path));
    }
}

fn describe_prune(adjacency: &Adjacency<'_>, v: usize, start: usize, reason: Prune) -> String {
    let label = adjacency.label(v);
    match reason {
        Prune::DeadEnd => format!("Prune {label}: it has no unvisited neighbors"),
        Prune::NoClosingEdge => format!(
            "Prune {label}: it would end the path without an edge back to {}",
            adjacency.label(start)
        ),
        Prune::SplitsRemainder { groups } => format!(
            "Prune {label}: placing it splits the unvisited vertices into {groups} groups"
        ),
    }
}
