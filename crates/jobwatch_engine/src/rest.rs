use std::time::Duration;

use jobwatch_core::{EntityId, JobRecord, JobStatus};
use serde::Deserialize;
use url::Url;

use crate::{JobSource, SourceError};

/// Which job-execution collection a session watches and how its records
/// point back at the tracked parent. The two admin pages this replaces
/// hard-coded one of these each; here it is configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityKind {
    /// Record attribute holding the parent entity id.
    pub query_attr: String,
    /// REST collection name of the job executions.
    pub collection: String,
    /// Polling interval the consuming page conventionally uses.
    pub default_interval: Duration,
}

impl EntityKind {
    pub fn biobank_universe() -> Self {
        Self {
            query_attr: "universe".to_string(),
            collection: "BiobankUniverseJobExecution".to_string(),
            default_interval: Duration::from_secs(5),
        }
    }

    pub fn mapping_project() -> Self {
        Self {
            query_attr: "mappingProject".to_string(),
            collection: "MappingServiceJobExecution".to_string(),
            default_interval: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RestSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for RestSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// [`JobSource`] over the backend's v2 REST API:
/// `GET {base}/api/v2/{collection}?q={attr}=={id};status==RUNNING`.
#[derive(Debug, Clone)]
pub struct RestJobSource {
    client: reqwest::Client,
    base: Url,
    kind: EntityKind,
}

impl RestJobSource {
    pub fn new(base_url: &str, kind: EntityKind, settings: RestSettings) -> Result<Self, SourceError> {
        let base = Url::parse(base_url).map_err(|err| SourceError::InvalidUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SourceError::Network(err.to_string()))?;
        Ok(Self { client, base, kind })
    }

    fn collection_url(&self, entity: &EntityId) -> Result<Url, SourceError> {
        let mut url = self
            .base
            .join(&format!("api/v2/{}", self.kind.collection))
            .map_err(|err| SourceError::InvalidUrl(err.to_string()))?;
        let query = format!(
            "{}=={};status==RUNNING",
            self.kind.query_attr,
            rsql_quote(entity)
        );
        url.query_pairs_mut().append_pair("q", &query);
        Ok(url)
    }
}

/// RSQL reserved characters (`;`, `==`, ...) in an entity id would split the
/// filter, so the value is always single-quoted with embedded quotes and
/// backslashes escaped.
fn rsql_quote(raw: &str) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('\'');
    for ch in raw.chars() {
        if ch == '\'' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

#[async_trait::async_trait]
impl JobSource for RestJobSource {
    async fn running_jobs(&self, entity: &EntityId) -> Result<Vec<JobRecord>, SourceError> {
        let url = self.collection_url(entity)?;

        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http(status.as_u16()));
        }

        let page: ItemsPage = response.json().await.map_err(|err| {
            if err.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::Decode(err.to_string())
            }
        })?;

        Ok(page
            .items
            .into_iter()
            .map(|item| item.into_record(entity))
            .collect())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        return SourceError::Timeout;
    }
    SourceError::Network(err.to_string())
}

#[derive(Debug, Deserialize)]
struct ItemsPage {
    #[serde(default)]
    items: Vec<WireJob>,
}

#[derive(Debug, Deserialize)]
struct WireJob {
    #[serde(default)]
    status: Option<String>,
    #[serde(rename = "progressInt", default)]
    progress_int: u64,
    #[serde(rename = "progressMax", default)]
    progress_max: u64,
}

impl WireJob {
    fn into_record(self, entity: &EntityId) -> JobRecord {
        JobRecord {
            parent: entity.clone(),
            status: parse_status(self.status.as_deref()),
            progress_current: self.progress_int,
            progress_max: self.progress_max,
        }
    }
}

/// The query already filters on status, so anything the server returns with
/// a missing or unrecognized status is taken at its word as running.
fn parse_status(raw: Option<&str>) -> JobStatus {
    match raw {
        Some("PENDING") => JobStatus::Pending,
        Some("SUCCESS") => JobStatus::Success,
        Some("FAILED") => JobStatus::Failed,
        Some("CANCELED") => JobStatus::Canceled,
        _ => JobStatus::Running,
    }
}
