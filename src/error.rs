use thiserror::Error;

/// Errors raised at the library boundary.
///
/// Expected search outcomes (empty or disconnected graphs, isolated vertices,
/// a failed degree check) are not errors: they come back as a failed
/// [`SearchResult`](crate::graph::SearchResult) carrying the reason.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("malformed graph record: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn vertex_not_found(label: impl Into<String>) -> Self {
        Self::VertexNotFound(label.into())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
