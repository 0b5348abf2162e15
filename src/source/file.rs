use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;

use super::{RecordKind, RecordSource};
use crate::error::{LensError, Result};

/// Reads each record kind from its own JSON export on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    reports: PathBuf,
    commits: Option<PathBuf>,
    pull_requests: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new(reports: PathBuf) -> Self {
        Self {
            reports,
            commits: None,
            pull_requests: None,
        }
    }

    #[must_use]
    pub fn with_commits(mut self, path: Option<PathBuf>) -> Self {
        self.commits = path;
        self
    }

    #[must_use]
    pub fn with_pull_requests(mut self, path: Option<PathBuf>) -> Self {
        self.pull_requests = path;
        self
    }

    fn path(&self, kind: RecordKind) -> Option<&Path> {
        match kind {
            RecordKind::Reports => Some(self.reports.as_path()),
            RecordKind::Commits => self.commits.as_deref(),
            RecordKind::PullRequests => self.pull_requests.as_deref(),
        }
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch(&self, kind: RecordKind) -> Result<Value> {
        let Some(path) = self.path(kind) else {
            debug!("No file configured for {kind}, using an empty list");
            return Ok(Value::Array(Vec::new()));
        };

        info!("Reading {kind} from: {}", path.display());
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LensError::Source(format!("Failed to read {}: {e}", path.display())))?;

        Ok(serde_json::from_str(&contents)?)
    }
}
