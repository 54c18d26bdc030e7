use std::fmt;

/// Identifier of a tracked parent entity (a biobank universe or a mapping
/// project). Fixed for the lifetime of a polling session.
pub type EntityId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Success,
    Failed,
    Canceled,
}

impl JobStatus {
    /// Only running jobs contribute to aggregate progress.
    pub fn is_running(self) -> bool {
        matches!(self, JobStatus::Running)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "PENDING"),
            JobStatus::Running => write!(f, "RUNNING"),
            JobStatus::Success => write!(f, "SUCCESS"),
            JobStatus::Failed => write!(f, "FAILED"),
            JobStatus::Canceled => write!(f, "CANCELED"),
        }
    }
}

/// One job-execution record as returned by the backend for a single poll.
/// Fetched fresh every cycle and never stored across cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub parent: EntityId,
    pub status: JobStatus,
    pub progress_current: u64,
    pub progress_max: u64,
}
