use indexmap::IndexMap;
use log::debug;

use super::productivity::average_cycle_time;
use super::AnalyticsInput;
use crate::insights::{Risk, RiskKind, Severity};

const MIN_DAILY_COMMITS: f64 = 2.0;
const MAX_CYCLE_DAYS: f64 = 7.0;
const MAX_WORKLOAD_RATIO: f64 = 5.0;

type Rule = fn(&AnalyticsInput<'_>) -> Option<Risk>;

/// Evaluated independently, reported in this order.
const RULES: [Rule; 3] = [low_velocity, slow_reviews, workload_imbalance];

pub fn detect_risks(input: &AnalyticsInput<'_>) -> Vec<Risk> {
    let risks: Vec<Risk> = RULES.iter().filter_map(|rule| rule(input)).collect();
    debug!("Risk rules flagged {} of {}", risks.len(), RULES.len());
    risks
}

fn low_velocity(input: &AnalyticsInput<'_>) -> Option<Risk> {
    (input.dataset.summary.avg_commits_per_day < MIN_DAILY_COMMITS).then(|| Risk {
        kind: RiskKind::Velocity,
        severity: Severity::High,
        message: "Low commit velocity detected. Consider reviewing team capacity.".to_string(),
    })
}

fn slow_reviews(input: &AnalyticsInput<'_>) -> Option<Risk> {
    let cycle_days = average_cycle_time(input.pull_requests)?;

    (cycle_days > MAX_CYCLE_DAYS).then(|| Risk {
        kind: RiskKind::CycleTime,
        severity: Severity::Medium,
        message: format!(
            "High PR cycle time ({cycle_days:.1} days). Consider streamlining review process."
        ),
    })
}

#[allow(clippy::cast_precision_loss)]
fn workload_imbalance(input: &AnalyticsInput<'_>) -> Option<Risk> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for commit in input.commits {
        *counts.entry(commit.author.as_str()).or_insert(0) += 1;
    }
    if counts.len() < 2 {
        return None;
    }

    let max = counts.values().copied().max()?;
    let min = counts.values().copied().min()?;

    (max as f64 / min as f64 > MAX_WORKLOAD_RATIO).then(|| Risk {
        kind: RiskKind::Workload,
        severity: Severity::Medium,
        message: "Significant workload imbalance detected. Consider redistributing tasks."
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{commits_by, dataset, pull};
    use super::*;

    fn kinds(risks: &[Risk]) -> Vec<RiskKind> {
        risks.iter().map(|risk| risk.kind).collect()
    }

    #[test]
    fn test_workload_risk_when_ratio_exceeds_five() {
        let dataset = dataset(&[Some(5)], 5.0, 1.0);
        let commits = [commits_by("ada", 10), commits_by("lin", 1)].concat();
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &commits,
            pull_requests: &[],
        };

        let risks = detect_risks(&input);

        assert_eq!(kinds(&risks), vec![RiskKind::Workload]);
        assert_eq!(risks[0].severity, Severity::Medium);
    }

    #[test]
    fn test_no_workload_risk_for_mild_ratio() {
        let dataset = dataset(&[Some(5)], 5.0, 1.0);
        let commits = [commits_by("ada", 3), commits_by("lin", 1)].concat();
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &commits,
            pull_requests: &[],
        };

        assert!(detect_risks(&input).is_empty());
    }

    #[test]
    fn test_single_author_is_never_imbalanced() {
        let dataset = dataset(&[Some(5)], 5.0, 1.0);
        let commits = commits_by("ada", 50);
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &commits,
            pull_requests: &[],
        };

        assert!(workload_imbalance(&input).is_none());
    }

    #[test]
    fn test_all_rules_in_order() {
        let dataset = dataset(&[Some(1)], 1.0, 1.0);
        let commits = [commits_by("ada", 12), commits_by("lin", 2)].concat();
        let pulls = [
            pull("2026-01-01T00:00:00Z", Some("2026-01-11T00:00:00Z")),
            pull("2026-01-01T00:00:00Z", Some("2026-01-06T06:00:00Z")),
        ];
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &commits,
            pull_requests: &pulls,
        };

        let risks = detect_risks(&input);

        assert_eq!(
            kinds(&risks),
            vec![RiskKind::Velocity, RiskKind::CycleTime, RiskKind::Workload]
        );
        assert_eq!(risks[0].severity, Severity::High);
        assert_eq!(
            risks[1].message,
            "High PR cycle time (7.6 days). Consider streamlining review process."
        );
    }

    #[test]
    fn test_open_pulls_do_not_count_toward_cycle_time() {
        let dataset = dataset(&[Some(5)], 5.0, 1.0);
        let pulls = [pull("2020-01-01T00:00:00Z", None)];
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &[],
            pull_requests: &pulls,
        };

        assert!(slow_reviews(&input).is_none());
    }

    #[test]
    fn test_velocity_threshold_is_exclusive() {
        let dataset = dataset(&[Some(2)], 2.0, 1.0);
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &[],
            pull_requests: &[],
        };

        assert!(low_velocity(&input).is_none());
    }
}
