//! Jobwatch core: job-progress domain model and aggregation.
mod aggregate;
mod types;

pub use aggregate::{aggregate, AggregateProgress};
pub use types::{EntityId, JobRecord, JobStatus};
