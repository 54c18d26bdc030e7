//! Jobwatch engine: polling sessions and job-source IO.
mod poller;
mod rest;
mod source;

pub use poller::{Poller, PollerHandle, PollerSettings};
pub use rest::{EntityKind, RestJobSource, RestSettings};
pub use source::{JobSource, ProgressSink, SourceError};
