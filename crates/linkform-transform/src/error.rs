use linkform_model::ModelError;
use thiserror::Error;

/// Failure of one transformation job.
///
/// Every variant is local to its job: the runner records it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("source table not found: {table_id}")]
    SourceNotFound { table_id: String },
    #[error("destination container not found: {container_id}")]
    DestinationNotFound { container_id: String },
    #[error(transparent)]
    MalformedLayout(#[from] ModelError),
}

impl TransformError {
    /// Short name used in summaries and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "SourceNotFound",
            Self::DestinationNotFound { .. } => "DestinationNotFound",
            Self::MalformedLayout(_) => "MalformedLayout",
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
