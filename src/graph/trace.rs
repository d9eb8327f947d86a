use serde::Serialize;

use crate::graph::preconditions::PreconditionFailure;

/// What a [`Step`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// The graph was rejected before searching.
    Rejected,
    /// The search starts from its start vertex.
    Start,
    /// The unvisited neighbors about to be tried at a branching point.
    Candidates,
    /// A candidate was pushed onto the path.
    Advance,
    /// Branch-and-bound discarded a candidate without recursing.
    Prune,
    /// The current vertex has no unvisited neighbor.
    DeadEnd,
    /// The path holds every vertex; the closing edge is checked next.
    PathComplete,
    /// The closing edge exists: the cycle is found.
    CycleClosed,
    /// The path holds every vertex but cannot return to the start.
    ClosingEdgeMissing,
    /// The last vertex was popped off the path.
    Backtrack,
    /// Every option was tried without success.
    Exhausted,
    /// Brute force: a full ordering is about to be tested.
    TestOrdering,
    /// Brute force: the ordering misses an edge.
    OrderingRejected,
}

/// One entry of a search trace.
///
/// `path` is a copy of the search path when the step was recorded; later
/// steps never change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// 1-based position in the trace.
    pub index: usize,
    pub kind: StepKind,
    pub path: Vec<String>,
    pub action: String,
}

/// Receives trace events from a search.
///
/// Both the path snapshot and the description are built lazily, so a sink
/// that drops events costs nothing.
pub(crate) trait StepSink {
    fn record<P, A>(&mut self, kind: StepKind, path: P, action: A)
    where
        P: FnOnce() -> Vec<String>,
        A: FnOnce() -> String;
}

impl<S: StepSink> StepSink for &mut S {
    fn record<P, A>(&mut self, kind: StepKind, path: P, action: A)
    where
        P: FnOnce() -> Vec<String>,
        A: FnOnce() -> String,
    {
        (**self).record(kind, path, action);
    }
}

/// Sink for the untraced fast paths.
pub(crate) struct NoTrace;

impl StepSink for NoTrace {
    #[inline]
    fn record<P, A>(&mut self, _kind: StepKind, _path: P, _action: A)
    where
        P: FnOnce() -> Vec<String>,
        A: FnOnce() -> String,
    {
    }
}

/// Sink that numbers and stores every step.
#[derive(Debug, Default)]
pub(crate) struct TraceRecorder {
    steps: Vec<Step>,
}

impl TraceRecorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl StepSink for TraceRecorder {
    fn record<P, A>(&mut self, kind: StepKind, path: P, action: A)
    where
        P: FnOnce() -> Vec<String>,
        A: FnOnce() -> String,
    {
        self.steps.push(Step {
            index: self.steps.len() + 1,
            kind,
            path: path(),
            action: action(),
        });
    }
}

/// Outcome of a traced search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub success: bool,
    /// The closed tour (first vertex repeated at the end) when `success`.
    pub path: Option<Vec<String>>,
    pub steps: Vec<Step>,
    pub total_steps: usize,
}

impl SearchResult {
    pub(crate) fn new(path: Option<Vec<String>>, steps: Vec<Step>) -> Self {
        Self {
            success: path.is_some(),
            total_steps: steps.len(),
            path,
            steps,
        }
    }

    /// Result for a graph turned away before searching: the reason, then
    /// what it means for the search.
    pub(crate) fn rejected(failure: &PreconditionFailure) -> Self {
        let mut recorder = TraceRecorder::new();
        recorder.record(StepKind::Rejected, Vec::new, || capitalize(&failure.to_string()));
        let consequence = match failure {
            PreconditionFailure::TooFewVertices { .. } => None,
            PreconditionFailure::Disconnected { .. } => {
                Some("A Hamiltonian cycle must reach every vertex; search skipped")
            }
            PreconditionFailure::DiracViolation { .. } => {
                Some("Dirac's condition does not hold; search skipped")
            }
            PreconditionFailure::IsolatedVertices { .. } => {
                Some("A Hamiltonian cycle cannot pass through an isolated vertex; search skipped")
            }
        };
        if let Some(consequence) = consequence {
            recorder.record(StepKind::Rejected, Vec::new, || consequence.to_string());
        }
        Self::new(None, recorder.into_steps())
    }

    /// The discovered cycle, if any.
    pub fn cycle(&self) -> Option<&[String]> {
        self.path.as_deref()
    }

    /// A cursor for stepping through the trace.
    pub fn replay(&self) -> Replay<'_> {
        Replay::new(&self.steps)
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cursor over a recorded trace, for stepping a visualization forward and
/// backward.
///
/// The cursor starts before the first step. Stopping a replay early is just
/// dropping the cursor; the search itself already ran to completion.
///
/// # Example
/// ```
/// use hamilton::graph::{find_hamiltonian_cycle_traced, Graph, SearchMode};
///
/// let g = Graph::from_edges(["A", "B", "C"], [("A", "B"), ("B", "C"), ("C", "A")]);
/// let result = find_hamiltonian_cycle_traced(&g, Some("A"), SearchMode::Backtracking);
///
/// let mut replay = result.replay();
/// assert_eq!(replay.step_forward().unwrap().path, vec!["A"]);
/// replay.seek(result.total_steps - 1);
/// assert!(replay.is_finished());
/// assert_eq!(replay.current().unwrap().path, vec!["A", "B", "C", "A"]);
/// ```
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    steps: &'a [Step],
    position: Option<usize>,
}

impl<'a> Replay<'a> {
    pub fn new(steps: &'a [Step]) -> Self {
        Self {
            steps,
            position: None,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Zero-based position of the current step.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn current(&self) -> Option<&'a Step> {
        self.position.map(|i| &self.steps[i])
    }

    /// Moves to the next step. Stays on the last step once there.
    pub fn step_forward(&mut self) -> Option<&'a Step> {
        let next = self.position.map_or(0, |i| i + 1);
        if next >= self.steps.len() {
            return None;
        }
        self.position = Some(next);
        self.current()
    }

    /// Moves to the previous step. Stays on the first step once there.
    pub fn step_back(&mut self) -> Option<&'a Step> {
        match self.position {
            Some(i) if i > 0 => {
                self.position = Some(i - 1);
                self.current()
            }
            _ => None,
        }
    }

    /// Jumps to the zero-based `position`, clamped to the last step.
    pub fn seek(&mut self, position: usize) -> Option<&'a Step> {
        if self.steps.is_empty() {
            return None;
        }
        self.position = Some(position.min(self.steps.len() - 1));
        self.current()
    }

    pub fn rewind(&mut self) {
        self.position = None;
    }

    pub fn is_finished(&self) -> bool {
        self.position.map_or(self.steps.is_empty(), |i| i + 1 == self.steps.len())
    }

    /// Steps not yet shown.
    pub fn remaining(&self) -> &'a [Step] {
        let shown = self.position.map_or(0, |i| i + 1);
        &self.steps[shown..]
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = &'a Step;

    fn next(&mut self) -> Option<Self::Item> {
        self.step_forward()
    }
}
