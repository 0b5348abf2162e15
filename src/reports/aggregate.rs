use std::cmp::Reverse;

use log::debug;

use super::parser::parse_report;
use crate::models::{DatasetSummary, DateRange, ParsedReport, RawReport, WorkflowDataset};
use crate::stats::{ratio, round_to_tenth};
use crate::time_utils::parse_timestamp;

/// Parses every report and rolls them up into a newest-first timeline.
///
/// Reports without a body are dropped. Reports whose date cannot be parsed
/// sort after all dated ones, keeping their relative order.
pub fn aggregate(reports: &[RawReport]) -> WorkflowDataset {
    let mut timeline: Vec<ParsedReport> = reports
        .iter()
        .filter_map(|report| {
            let parsed = parse_report(report);
            if parsed.is_none() {
                debug!("Dropping report {} without body text", report.id);
            }
            parsed
        })
        .collect();

    timeline.sort_by_cached_key(|report| Reverse(parse_timestamp(&report.date)));

    let date_range = DateRange {
        start: timeline.last().map(|r| r.date.clone()),
        end: timeline.first().map(|r| r.date.clone()),
    };

    WorkflowDataset {
        total_reports: timeline.len(),
        date_range,
        summary: summarize(&timeline),
        timeline,
    }
}

#[allow(clippy::cast_precision_loss)]
fn summarize(timeline: &[ParsedReport]) -> DatasetSummary {
    let total_commits = timeline
        .iter()
        .map(|r| r.metrics.commits_today.unwrap_or(0))
        .sum::<u64>();
    let total_prs = timeline
        .iter()
        .map(|r| r.metrics.pull_requests.unwrap_or(0))
        .sum::<u64>();
    let reports = timeline.len() as f64;

    DatasetSummary {
        total_commits,
        total_prs,
        avg_commits_per_day: round_to_tenth(ratio(total_commits as f64, reports)),
        avg_prs_per_day: round_to_tenth(ratio(total_prs as f64, reports)),
    }
}
