//! Pipeline error types.

use thiserror::Error;

/// Errors that can occur while setting up a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The options document could not be parsed.
    #[error("invalid pipeline options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Pipeline result type alias.
pub type PipelineResult<T> = Result<T, PipelineError>;
