use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::insights::{TimeSeriesPoint, WeeklyVelocity};
use crate::models::{CanonicalCommit, WorkflowDataset};
use crate::time_utils::parse_timestamp;

/// Daily commit counts for the newest `limit` reports, newest first.
pub fn time_series(dataset: &WorkflowDataset, limit: usize) -> Vec<TimeSeriesPoint> {
    dataset
        .timeline
        .iter()
        .take(limit)
        .map(|report| TimeSeriesPoint {
            date: parse_timestamp(&report.date).map_or_else(
                || report.date.clone(),
                |timestamp| timestamp.date_naive().to_string(),
            ),
            value: report.metrics.commits_today.unwrap_or(0),
            label: report.title.clone(),
        })
        .collect()
}

/// Commits per week (weeks start on Monday), oldest week first. Commits whose
/// date cannot be read are left out.
pub fn velocity_trends(commits: &[CanonicalCommit]) -> Vec<WeeklyVelocity> {
    let weeks = commits
        .iter()
        .filter_map(|commit| parse_timestamp(&commit.date))
        .map(|timestamp| week_start(timestamp.date_naive()))
        .fold(BTreeMap::<NaiveDate, usize>::new(), |mut weeks, week| {
            *weeks.entry(week).or_insert(0) += 1;
            weeks
        });

    weeks
        .into_iter()
        .map(|(week, count)| WeeklyVelocity { week, count })
        .collect()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
