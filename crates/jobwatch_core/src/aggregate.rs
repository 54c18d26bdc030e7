use crate::{EntityId, JobRecord};

/// Combined percent-complete across all running jobs of one tracked entity.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateProgress {
    pub entity: EntityId,
    /// Always within [0, 100].
    pub percent: f64,
    pub has_active_jobs: bool,
}

impl AggregateProgress {
    fn idle(entity: EntityId) -> Self {
        // An entity without running jobs renders as complete, not as empty.
        Self {
            entity,
            percent: 100.0,
            has_active_jobs: false,
        }
    }
}

/// Fold one entity's job records into an [`AggregateProgress`].
///
/// Non-running records are ignored even if the source returned them; the
/// query filter upstream is not trusted to be exact. A running set whose
/// progress maxima sum to zero reports 0 % rather than dividing by zero.
pub fn aggregate(entity: &EntityId, records: &[JobRecord]) -> AggregateProgress {
    let mut total_current: u64 = 0;
    let mut total_max: u64 = 0;
    let mut running = 0usize;

    for record in records {
        if !record.status.is_running() {
            continue;
        }
        running += 1;
        total_current += record.progress_current;
        total_max += record.progress_max;
    }

    if running == 0 {
        return AggregateProgress::idle(entity.clone());
    }

    let percent = if total_max == 0 {
        0.0
    } else {
        // Records may over-report current past max; clamp either way.
        (100.0 * total_current as f64 / total_max as f64).clamp(0.0, 100.0)
    };

    AggregateProgress {
        entity: entity.clone(),
        percent,
        has_active_jobs: true,
    }
}
