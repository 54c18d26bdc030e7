use jobwatch_core::{aggregate, EntityId, JobRecord, JobStatus};

fn record(parent: &str, status: JobStatus, current: u64, max: u64) -> JobRecord {
    JobRecord {
        parent: parent.to_string(),
        status,
        progress_current: current,
        progress_max: max,
    }
}

#[test]
fn no_running_jobs_reports_idle_at_full_percent() {
    let entity: EntityId = "U2".to_string();

    let empty = aggregate(&entity, &[]);
    assert_eq!(empty.percent, 100.0);
    assert!(!empty.has_active_jobs);
    assert_eq!(empty.entity, entity);

    // Finished records count the same as no records.
    let finished = aggregate(
        &entity,
        &[
            record("U2", JobStatus::Success, 10, 10),
            record("U2", JobStatus::Failed, 3, 10),
        ],
    );
    assert_eq!(finished.percent, 100.0);
    assert!(!finished.has_active_jobs);
}

#[test]
fn running_jobs_sum_counters_across_records() {
    let entity: EntityId = "U1".to_string();
    let progress = aggregate(
        &entity,
        &[
            record("U1", JobStatus::Running, 3, 10),
            record("U1", JobStatus::Running, 1, 10),
        ],
    );

    // 100 * (3 + 1) / (10 + 10)
    assert_eq!(progress.percent, 20.0);
    assert!(progress.has_active_jobs);
}

#[test]
fn non_running_records_do_not_dilute_the_total() {
    let entity: EntityId = "U1".to_string();
    let progress = aggregate(
        &entity,
        &[
            record("U1", JobStatus::Running, 5, 10),
            record("U1", JobStatus::Success, 10, 10),
            record("U1", JobStatus::Pending, 0, 10),
        ],
    );

    assert_eq!(progress.percent, 50.0);
    assert!(progress.has_active_jobs);
}

#[test]
fn zero_progress_max_is_guarded() {
    let entity: EntityId = "U3".to_string();
    let progress = aggregate(&entity, &[record("U3", JobStatus::Running, 7, 0)]);

    assert_eq!(progress.percent, 0.0);
    assert!(progress.has_active_jobs);
}

#[test]
fn over_reported_progress_is_clamped_to_hundred() {
    let entity: EntityId = "U4".to_string();
    let progress = aggregate(&entity, &[record("U4", JobStatus::Running, 15, 10)]);

    assert_eq!(progress.percent, 100.0);
    assert!(progress.has_active_jobs);
}
