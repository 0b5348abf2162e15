use serde::Deserialize;
use serde_json::Value;

use super::{has_object, lenient, map_records, record_shape};
use crate::models::CanonicalPullRequest;

const UNKNOWN_AUTHOR: &str = "unknown";
const MISSING_URL: &str = "#";

/// Pull request as returned by the GitHub pulls API.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DetailedPullRequest {
    #[serde(deserialize_with = "lenient")]
    number: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    user: Option<GitHubUser>,
    #[serde(deserialize_with = "lenient")]
    created_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    updated_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    merged_at: Option<String>,
    #[serde(deserialize_with = "lenient")]
    html_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GitHubUser {
    #[serde(deserialize_with = "lenient")]
    login: Option<String>,
}

/// Pull request already flattened by an exporter or mock generator.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlatPullRequest {
    #[serde(deserialize_with = "lenient")]
    number: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    state: Option<String>,
    #[serde(deserialize_with = "lenient")]
    author: Option<String>,
    #[serde(deserialize_with = "lenient")]
    created: Option<String>,
    #[serde(deserialize_with = "lenient")]
    updated: Option<String>,
    #[serde(deserialize_with = "lenient")]
    merged: Option<String>,
    #[serde(deserialize_with = "lenient")]
    url: Option<String>,
}

#[derive(Debug)]
enum RawPullRequest {
    Detailed(DetailedPullRequest),
    Flat(FlatPullRequest),
}

impl RawPullRequest {
    /// A nested `user` object marks the GitHub API shape.
    fn detect(value: &Value) -> Self {
        if has_object(value, "user") {
            Self::Detailed(record_shape(value))
        } else {
            Self::Flat(record_shape(value))
        }
    }

    fn into_canonical(self) -> CanonicalPullRequest {
        match self {
            Self::Detailed(raw) => CanonicalPullRequest {
                number: raw.number,
                title: raw.title.unwrap_or_default(),
                state: raw.state.unwrap_or_default(),
                author: raw
                    .user
                    .and_then(|user| user.login)
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                created: raw.created_at.unwrap_or_default(),
                updated: raw.updated_at.unwrap_or_default(),
                merged: merged_date(raw.merged_at),
                url: non_empty_url(raw.html_url),
            },
            Self::Flat(raw) => CanonicalPullRequest {
                number: raw.number,
                title: raw.title.unwrap_or_default(),
                state: raw.state.unwrap_or_default(),
                author: raw.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                created: raw.created.unwrap_or_default(),
                updated: raw.updated.unwrap_or_default(),
                merged: merged_date(raw.merged),
                url: non_empty_url(raw.url),
            },
        }
    }
}

fn merged_date(merged: Option<String>) -> Option<String> {
    merged.filter(|date| !date.trim().is_empty())
}

fn non_empty_url(url: Option<String>) -> String {
    url.filter(|url| !url.is_empty())
        .unwrap_or_else(|| MISSING_URL.to_string())
}

/// Normalizes pull requests in either the GitHub API shape or the flat shape
/// into one canonical record per input, preserving order.
pub fn normalize_pull_requests(records: &Value) -> Vec<CanonicalPullRequest> {
    map_records(records, |value| RawPullRequest::detect(value).into_canonical())
}
