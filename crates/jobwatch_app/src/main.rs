mod config;
mod logging;
mod sink;

use std::path::Path;
use std::sync::Arc;

use jobwatch_engine::{Poller, PollerSettings, RestJobSource, RestSettings};
use watch_logging::watch_info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "jobwatch.ron".to_string());
    let config = config::load(Path::new(&config_path))?;
    logging::initialize(&config.log);

    let kind = config.entity_kind();
    let settings = PollerSettings {
        interval: config.interval(&kind),
        fetch_timeout: config.fetch_timeout(),
    };
    let source = Arc::new(RestJobSource::new(
        &config.base_url,
        kind,
        RestSettings::default(),
    )?);

    watch_info!(
        "watching {} entities at {} every {:?}",
        config.entities.len(),
        config.base_url,
        settings.interval
    );

    let poller = Poller::new(
        config.entities,
        source,
        Arc::new(sink::LogProgressSink),
        settings,
    );
    let mut handle = poller.start();

    let cycles = tokio::select! {
        cycles = handle.wait() => cycles,
        _ = tokio::signal::ctrl_c() => {
            watch_info!("interrupt received, cancelling session");
            handle.cancel();
            handle.wait().await
        }
    };

    watch_info!("session ended after {} cycles", cycles);
    Ok(())
}
