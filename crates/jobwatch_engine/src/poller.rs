use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future;
use jobwatch_core::{aggregate, EntityId};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use watch_logging::{watch_debug, watch_info, watch_warn};

use crate::{JobSource, ProgressSink, SourceError};

#[derive(Debug, Clone)]
pub struct PollerSettings {
    /// Pause between cycles. Per-session configuration: the admin pages this
    /// replaces used 2 s for mapping projects and 5 s for biobank universes.
    pub interval: Duration,
    /// Upper bound on a single fetch. `None` leaves the source's own
    /// timeouts in charge.
    pub fetch_timeout: Option<Duration>,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            fetch_timeout: None,
        }
    }
}

/// A polling session over a fixed set of tracked entities.
///
/// Each cycle fetches every entity's running jobs concurrently, reports the
/// aggregate to the sink, and reschedules only while at least one entity is
/// still active (or in an unknown state after a fetch error).
pub struct Poller {
    entities: Vec<EntityId>,
    source: Arc<dyn JobSource>,
    sink: Arc<dyn ProgressSink>,
    settings: PollerSettings,
}

impl Poller {
    /// Duplicate ids are dropped; first-seen order is kept so iteration is
    /// deterministic.
    pub fn new(
        entity_ids: impl IntoIterator<Item = EntityId>,
        source: Arc<dyn JobSource>,
        sink: Arc<dyn ProgressSink>,
        settings: PollerSettings,
    ) -> Self {
        let mut entities: Vec<EntityId> = Vec::new();
        for id in entity_ids {
            if !entities.contains(&id) {
                entities.push(id);
            }
        }
        Self {
            entities,
            source,
            sink,
            settings,
        }
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Spawn the session onto the current runtime.
    pub fn start(self) -> PollerHandle {
        let session_id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_session(self, cancel.clone(), session_id));
        PollerHandle {
            cancel,
            task,
            session_id,
        }
    }
}

/// Sessions get process-unique ids; their log lines carry the id because the
/// poll-cycle stamp alone is last-writer-wins across concurrent sessions.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Control handle for a running session.
pub struct PollerHandle {
    cancel: CancellationToken,
    task: JoinHandle<u64>,
    session_id: u64,
}

impl PollerHandle {
    /// Stop the session. Safe at any time; an in-flight cycle is dropped,
    /// so late fetch results produce no reports and no reschedule.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Await session termination; returns the number of completed cycles.
    pub async fn wait(&mut self) -> u64 {
        (&mut self.task).await.unwrap_or_default()
    }
}

async fn run_session(poller: Poller, cancel: CancellationToken, session_id: u64) -> u64 {
    if poller.entities.is_empty() {
        watch_warn!("session {} started with no tracked entities", session_id);
        return 0;
    }

    let mut completed: u64 = 0;
    loop {
        if cancel.is_cancelled() {
            watch_info!("session {} cancelled", session_id);
            return completed;
        }

        watch_logging::set_poll_cycle(completed + 1);
        let any_active = tokio::select! {
            _ = cancel.cancelled() => {
                watch_info!("session {} cancelled mid-cycle", session_id);
                return completed;
            }
            any_active = run_cycle(&poller) => any_active,
        };
        completed += 1;

        if !any_active {
            watch_info!(
                "session {} complete, all {} tracked entities idle",
                session_id,
                poller.entities.len()
            );
            return completed;
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                watch_info!("session {} cancelled", session_id);
                return completed;
            }
            _ = tokio::time::sleep(poller.settings.interval) => {}
        }
    }
}

/// One fetch-aggregate-report round over every entity. The join is the
/// completion barrier: the reschedule decision is made only after the full
/// fetch set has finished, never from an early arrival.
async fn run_cycle(poller: &Poller) -> bool {
    let checks = poller
        .entities
        .iter()
        .map(|entity| check_entity(poller, entity));
    let results = future::join_all(checks).await;
    results.into_iter().any(|active| active)
}

async fn check_entity(poller: &Poller, entity: &EntityId) -> bool {
    let fetch = poller.source.running_jobs(entity);
    let outcome = match poller.settings.fetch_timeout {
        Some(limit) => match tokio::time::timeout(limit, fetch).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout),
        },
        None => fetch.await,
    };

    match outcome {
        Ok(records) => {
            let progress = aggregate(entity, &records);
            watch_debug!(
                "entity {} at {:.1}% ({} records, active={})",
                entity,
                progress.percent,
                records.len(),
                progress.has_active_jobs
            );
            let active = progress.has_active_jobs;
            poller.sink.report(&progress);
            active
        }
        Err(err) => {
            // Unknown state: keep the session alive so the next cycle retries.
            watch_warn!("fetch failed for entity {}: {}", entity, err);
            true
        }
    }
}
