use jobwatch_core::AggregateProgress;
use jobwatch_engine::ProgressSink;
use watch_logging::watch_info;

const BAR_WIDTH: usize = 20;

/// Renders each aggregate as a textual bar through the logging facade.
/// Repeated identical reports just repeat the line.
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn report(&self, progress: &AggregateProgress) {
        let state = if progress.has_active_jobs {
            "running"
        } else {
            "idle"
        };
        watch_info!(
            "{} [{}] {:>5.1}% ({})",
            progress.entity,
            bar(progress.percent),
            progress.percent,
            state
        );
    }
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(BAR_WIDTH - filled));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally_and_saturates() {
        assert_eq!(bar(0.0), "-".repeat(20));
        assert_eq!(bar(50.0), format!("{}{}", "#".repeat(10), "-".repeat(10)));
        assert_eq!(bar(100.0), "#".repeat(20));
        assert_eq!(bar(250.0), "#".repeat(20));
    }
}
