use super::AnalyticsInput;
use crate::insights::{CodeChurn, Productivity};
use crate::models::{CanonicalCommit, CanonicalPullRequest, WorkflowDataset};
use crate::stats::{mean, percentage, ratio, round_to_int, round_to_tenth};
use crate::time_utils::days_between;

/// Reports compared on each side of the commit trend.
const TREND_WINDOW: usize = 7;

/// Commit message fragments that mark rework rather than new work.
const CHURN_KEYWORDS: [&str; 4] = ["fix", "refactor", "update", "revert"];

pub fn calculate_productivity(input: &AnalyticsInput<'_>) -> Productivity {
    let summary = &input.dataset.summary;

    Productivity {
        total_commits: summary.total_commits,
        total_prs: summary.total_prs,
        avg_commits_per_day: summary.avg_commits_per_day,
        avg_prs_per_day: summary.avg_prs_per_day,
        commit_trend: commit_trend(input.dataset),
        avg_pr_cycle_time: average_cycle_time(input.pull_requests).map_or(0.0, round_to_tenth),
        code_churn: code_churn(input.commits),
    }
}

/// Percent change of commits in the newest week of reports against the week
/// before it. 0 when the earlier week has no commits.
#[allow(clippy::cast_precision_loss)]
pub(super) fn commit_trend(dataset: &WorkflowDataset) -> i64 {
    let window_total = |skip: usize| -> u64 {
        dataset
            .timeline
            .iter()
            .skip(skip)
            .take(TREND_WINDOW)
            .map(|report| report.metrics.commits_today.unwrap_or(0))
            .sum()
    };

    let recent = window_total(0) as f64;
    let previous = window_total(TREND_WINDOW) as f64;

    if previous == 0.0 {
        return 0;
    }
    round_to_int(ratio(recent - previous, previous) * 100.0)
}

/// Mean days from creation to merge across merged pull requests whose
/// timestamps can be read. `None` when there are none.
pub(super) fn average_cycle_time(pulls: &[CanonicalPullRequest]) -> Option<f64> {
    let cycle_days: Vec<f64> = pulls
        .iter()
        .filter_map(|pr| {
            let merged = pr.merged.as_deref()?;
            days_between(&pr.created, merged)
        })
        .collect();

    if cycle_days.is_empty() {
        None
    } else {
        Some(mean(&cycle_days))
    }
}

fn code_churn(commits: &[CanonicalCommit]) -> CodeChurn {
    let total = commits.iter().filter(|commit| is_churn(&commit.message)).count();

    CodeChurn {
        total,
        percentage: round_to_int(percentage(total, commits.len())),
    }
}

fn is_churn(message: &str) -> bool {
    let message = message.to_lowercase();
    CHURN_KEYWORDS.iter().any(|keyword| message.contains(keyword))
}
