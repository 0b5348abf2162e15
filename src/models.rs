use serde::{Deserialize, Serialize};

/// A status report as supplied by the record source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReport {
    pub id: u64,
    pub title: String,
    pub body_text: Option<String>,
    pub created_at: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReport {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub url: String,
    pub metrics: ReportMetrics,
    pub commit_mentions: Vec<CommitMention>,
    pub pr_mentions: Vec<PrMention>,
    pub insights: Insights,
}

/// Labeled fields recognized in a report body. `None` means the label was not
/// found, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits_today: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_requests: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_issues: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub releases: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitMention {
    pub time: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStatus {
    Merged,
    Open,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrMention {
    pub number: Option<u64>,
    pub status: PrStatus,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attention: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDataset {
    pub total_reports: usize,
    pub date_range: DateRange,
    /// Newest report first.
    pub timeline: Vec<ParsedReport>,
    pub summary: DatasetSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub total_commits: u64,
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    pub avg_commits_per_day: f64,
    #[serde(rename = "avgPRsPerDay")]
    pub avg_prs_per_day: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalCommit {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: String,
    pub url: String,
}

impl CanonicalCommit {
    /// Calendar day of the commit (the part of the timestamp before `T`).
    pub fn day(&self) -> &str {
        self.date.split('T').next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPullRequest {
    pub number: Option<u64>,
    pub title: String,
    pub state: String,
    pub author: String,
    pub created: String,
    pub updated: String,
    pub merged: Option<String>,
    pub url: String,
}

impl CanonicalPullRequest {
    pub fn is_merged(&self) -> bool {
        self.merged.is_some()
    }
}
