use serde::Deserialize;
use serde_json::Value;

use super::{lenient, map_records, record_shape};
use crate::models::RawReport;

/// Status report exported straight from the GitHub issues API.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IssueReport {
    #[serde(deserialize_with = "lenient")]
    number: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    body: Option<String>,
    #[serde(deserialize_with = "lenient")]
    created_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    html_url: Option<String>,
}

/// Status report already in the `{id, title, bodyText, createdAt, url}` form.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PlainReport {
    #[serde(deserialize_with = "lenient")]
    id: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    body_text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    created_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    url: Option<String>,
}

impl From<IssueReport> for RawReport {
    fn from(issue: IssueReport) -> Self {
        Self {
            id: issue.number.unwrap_or_default(),
            title: issue.title.unwrap_or_default(),
            body_text: issue.body,
            created_at: issue.created_at.unwrap_or_default(),
            url: issue.html_url.unwrap_or_default(),
        }
    }
}

impl From<PlainReport> for RawReport {
    fn from(report: PlainReport) -> Self {
        Self {
            id: report.id.unwrap_or_default(),
            title: report.title.unwrap_or_default(),
            body_text: report.body_text,
            created_at: report.created_at.unwrap_or_default(),
            url: report.url.unwrap_or_default(),
        }
    }
}

/// Accepts reports as GitHub issues (`number`, `body`, `created_at`,
/// `html_url`) or in plain form, one `RawReport` per element.
pub fn normalize_reports(records: &Value) -> Vec<RawReport> {
    map_records(records, |value| {
        if value.get("html_url").is_some() || value.get("number").is_some() {
            record_shape::<IssueReport>(value).into()
        } else {
            record_shape::<PlainReport>(value).into()
        }
    })
}
