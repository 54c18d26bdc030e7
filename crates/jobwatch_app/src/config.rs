use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use jobwatch_engine::EntityKind;
use serde::Deserialize;

/// RON configuration for a watch run.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Backend root, e.g. `http://localhost:8080/`.
    pub base_url: String,
    pub kind: KindConfig,
    /// Ids of the tracked parent entities.
    pub entities: Vec<String>,
    /// Overrides the kind's conventional polling interval.
    #[serde(default)]
    pub interval_ms: Option<u64>,
    #[serde(default)]
    pub fetch_timeout_ms: Option<u64>,
    #[serde(default)]
    pub log: LogSettings,
}

/// Where and how verbosely the runner logs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub file: PathBuf,
    /// Debug-level logging; includes the per-entity aggregate lines.
    pub verbose: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            destination: LogDestination::Both,
            file: PathBuf::from("./jobwatch.log"),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogDestination {
    Terminal,
    File,
    Both,
}

impl LogDestination {
    pub fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    pub fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub enum KindConfig {
    BiobankUniverse,
    MappingProject,
    Custom {
        query_attr: String,
        collection: String,
        interval_ms: u64,
    },
}

impl WatchConfig {
    pub fn entity_kind(&self) -> EntityKind {
        match &self.kind {
            KindConfig::BiobankUniverse => EntityKind::biobank_universe(),
            KindConfig::MappingProject => EntityKind::mapping_project(),
            KindConfig::Custom {
                query_attr,
                collection,
                interval_ms,
            } => EntityKind {
                query_attr: query_attr.clone(),
                collection: collection.clone(),
                default_interval: Duration::from_millis(*interval_ms),
            },
        }
    }

    pub fn interval(&self, kind: &EntityKind) -> Duration {
        self.interval_ms
            .map(Duration::from_millis)
            .unwrap_or(kind.default_interval)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

pub fn load(path: &Path) -> anyhow::Result<WatchConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read config {:?}", path))?;
    let config: WatchConfig =
        ron::from_str(&content).with_context(|| format!("failed to parse config {:?}", path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"(
        base_url: "http://localhost:8080/",
        kind: MappingProject,
        entities: ["P1", "P2"],
        interval_ms: None,
        fetch_timeout_ms: Some(1500),
    )"#;

    #[test]
    fn loads_a_ron_config_and_resolves_the_kind_interval() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write config");

        let config = load(file.path()).expect("load config");
        assert_eq!(config.entities, vec!["P1", "P2"]);

        let kind = config.entity_kind();
        assert_eq!(kind.collection, "MappingServiceJobExecution");
        assert_eq!(config.interval(&kind), Duration::from_secs(2));
        assert_eq!(config.fetch_timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn custom_kind_carries_its_own_query_shape() {
        let raw = r#"(
            base_url: "http://localhost:8080/",
            kind: Custom(query_attr: "job", collection: "AnnotationJobExecution", interval_ms: 3000),
            entities: ["A1"],
            interval_ms: Some(500),
            fetch_timeout_ms: None,
        )"#;

        let config: WatchConfig = ron::from_str(raw).expect("parse");
        let kind = config.entity_kind();
        assert_eq!(kind.query_attr, "job");
        assert_eq!(kind.default_interval, Duration::from_secs(3));
        // Explicit override wins over the kind's convention.
        assert_eq!(config.interval(&kind), Duration::from_millis(500));
    }

    #[test]
    fn omitted_log_section_falls_back_to_both_destinations() {
        let config: WatchConfig = ron::from_str(SAMPLE).expect("parse");

        assert_eq!(config.log, LogSettings::default());
        assert!(config.log.destination.to_terminal());
        assert!(config.log.destination.to_file());
        assert_eq!(config.log.file, PathBuf::from("./jobwatch.log"));
    }

    #[test]
    fn log_section_overrides_destination_and_verbosity() {
        let raw = r#"(
            base_url: "http://localhost:8080/",
            kind: BiobankUniverse,
            entities: ["U1"],
            log: (destination: Terminal, verbose: true),
        )"#;

        let config: WatchConfig = ron::from_str(raw).expect("parse");
        assert!(config.log.verbose);
        assert!(config.log.destination.to_terminal());
        assert!(!config.log.destination.to_file());
        // Unset fields keep their defaults.
        assert_eq!(config.log.file, PathBuf::from("./jobwatch.log"));
    }

    #[test]
    fn missing_config_file_is_an_error_with_the_path() {
        let err = load(Path::new("/nonexistent/jobwatch.ron")).unwrap_err();
        assert!(format!("{err:#}").contains("jobwatch.ron"));
    }
}
