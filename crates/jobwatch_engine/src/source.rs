use jobwatch_core::{AggregateProgress, EntityId, JobRecord};
use thiserror::Error;

/// Failure while querying one entity's running jobs. Scoped to that entity;
/// the rest of the cycle proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    Http(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Query seam: "list the job executions where parent = entity and
/// status = RUNNING".
#[async_trait::async_trait]
pub trait JobSource: Send + Sync {
    async fn running_jobs(&self, entity: &EntityId) -> Result<Vec<JobRecord>, SourceError>;
}

/// Presentation seam. Called once per entity per cycle, in fetch-completion
/// order, which may differ from the session's entity order. Implementations
/// should be idempotent under repeated identical reports.
pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: &AggregateProgress);
}
