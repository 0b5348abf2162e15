use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::{has_object, lenient, map_records, record_shape};
use crate::models::CanonicalCommit;

const UNKNOWN_AUTHOR: &str = "unknown";
const MISSING_URL: &str = "#";

/// Commit as returned by the GitHub commits API.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DetailedCommit {
    #[serde(deserialize_with = "lenient")]
    sha: Option<String>,
    #[serde(deserialize_with = "lenient")]
    commit: Option<CommitDetail>,
    #[serde(deserialize_with = "lenient")]
    html_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CommitDetail {
    #[serde(deserialize_with = "lenient")]
    message: Option<String>,
    #[serde(deserialize_with = "lenient")]
    author: Option<CommitSignature>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CommitSignature {
    #[serde(deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    date: Option<String>,
}

/// Commit already flattened by an exporter or mock generator.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FlatCommit {
    #[serde(deserialize_with = "lenient")]
    sha: Option<String>,
    #[serde(deserialize_with = "lenient")]
    message: Option<String>,
    #[serde(deserialize_with = "lenient")]
    author: Option<String>,
    #[serde(deserialize_with = "lenient")]
    date: Option<String>,
    #[serde(deserialize_with = "lenient")]
    url: Option<String>,
}

#[derive(Debug)]
enum RawCommit {
    Detailed(DetailedCommit),
    Flat(FlatCommit),
}

impl RawCommit {
    /// A nested `commit` object marks the GitHub API shape.
    fn detect(value: &Value) -> Self {
        if has_object(value, "commit") {
            Self::Detailed(record_shape(value))
        } else {
            Self::Flat(record_shape(value))
        }
    }

    fn into_canonical(self) -> CanonicalCommit {
        match self {
            Self::Detailed(raw) => {
                let detail = raw.commit.unwrap_or_default();
                let signature = detail.author.unwrap_or_default();
                let message = detail.message.unwrap_or_default();
                let author = signature.name.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
                let date = signature.date.unwrap_or_default();

                CanonicalCommit {
                    sha: raw
                        .sha
                        .unwrap_or_else(|| placeholder_sha(&message, &author, &date)),
                    message,
                    author,
                    date,
                    url: raw.html_url.unwrap_or_else(|| MISSING_URL.to_string()),
                }
            }
            Self::Flat(raw) => {
                let message = raw.message.unwrap_or_default();
                let author = raw.author.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
                let date = raw.date.unwrap_or_default();

                CanonicalCommit {
                    sha: raw
                        .sha
                        .filter(|sha| !sha.is_empty())
                        .unwrap_or_else(|| placeholder_sha(&message, &author, &date)),
                    message,
                    author,
                    date,
                    url: raw
                        .url
                        .filter(|url| !url.is_empty())
                        .unwrap_or_else(|| MISSING_URL.to_string()),
                }
            }
        }
    }
}

/// Short stand-in SHA derived from the commit's content, so the same record
/// always gets the same placeholder.
fn placeholder_sha(message: &str, author: &str, date: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(message.as_bytes());
    hasher.update([0u8]);
    hasher.update(author.as_bytes());
    hasher.update([0u8]);
    hasher.update(date.as_bytes());
    let mut sha = hex::encode(hasher.finalize());
    sha.truncate(7);
    sha
}

/// Normalizes commits in either the GitHub API shape or the flat shape into
/// one canonical record per input, preserving order.
pub fn normalize_commits(records: &Value) -> Vec<CanonicalCommit> {
    map_records(records, |value| RawCommit::detect(value).into_canonical())
}
