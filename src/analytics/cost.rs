use super::AnalyticsInput;
use crate::config::CostConfig;
use crate::insights::{CostEfficiency, Roi, RoiStatus};
use crate::stats::{ratio, round_to_int};

/// Business value credited to each merged pull request.
const VALUE_PER_FEATURE: u64 = 5000;

#[allow(clippy::cast_precision_loss)]
pub fn calculate_cost_efficiency(input: &AnalyticsInput<'_>, config: &CostConfig) -> CostEfficiency {
    let active_days = input.dataset.timeline.len().max(1) as f64;
    let total_commits = input.dataset.summary.total_commits as f64;
    let merged = input
        .pull_requests
        .iter()
        .filter(|pr| pr.is_merged())
        .count() as u64;

    let daily_cost = ratio(
        config.avg_engineer_cost * f64::from(config.team_size),
        f64::from(config.working_days_per_year),
    );
    let total_cost = daily_cost * active_days;

    let estimated_value = merged * VALUE_PER_FEATURE;
    let roi = ratio(estimated_value as f64 - total_cost, total_cost) * 100.0;

    CostEfficiency {
        total_cost: round_to_int(total_cost),
        cost_per_commit: round_to_int(ratio(total_cost, total_commits)),
        cost_per_feature: round_to_int(ratio(total_cost, merged as f64)),
        efficiency: round_to_int(total_commits / active_days * 10.0),
        roi: Roi {
            estimated_value,
            roi: round_to_int(roi),
            status: roi_status(roi),
        },
    }
}

fn roi_status(roi: f64) -> RoiStatus {
    if roi >= 100.0 {
        RoiStatus::Excellent
    } else if roi >= 50.0 {
        RoiStatus::Good
    } else if roi >= 0.0 {
        RoiStatus::BreakEven
    } else {
        RoiStatus::Negative
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{dataset, pull};
    use super::*;

    fn config(avg_engineer_cost: f64, team_size: u32, working_days_per_year: u32) -> CostConfig {
        CostConfig {
            avg_engineer_cost,
            team_size,
            working_days_per_year,
        }
    }

    #[test]
    fn test_cost_efficiency() {
        // 10 reports, 50 commits, 2 merged PRs
        let dataset = dataset(&[Some(5); 10], 5.0, 0.3);
        let pulls = [
            pull("2026-01-01T00:00:00Z", Some("2026-01-02T00:00:00Z")),
            pull("2026-01-01T00:00:00Z", Some("2026-01-03T00:00:00Z")),
            pull("2026-01-01T00:00:00Z", None),
        ];
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &[],
            pull_requests: &pulls,
        };

        // 100000 * 2 / 250 = 800 per day
        let cost = calculate_cost_efficiency(&input, &config(100_000.0, 2, 250));

        assert_eq!(cost.total_cost, 8000);
        assert_eq!(cost.cost_per_commit, 160);
        assert_eq!(cost.cost_per_feature, 4000);
        assert_eq!(cost.efficiency, 50);
        assert_eq!(
            cost.roi,
            Roi {
                estimated_value: 10_000,
                roi: 25,
                status: RoiStatus::BreakEven,
            }
        );
    }

    #[test]
    fn test_no_commits_or_merges() {
        let dataset = dataset(&[None; 4], 0.0, 0.0);
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &[],
            pull_requests: &[],
        };

        let cost = calculate_cost_efficiency(&input, &CostConfig::default());

        assert_eq!(cost.total_cost, 1600);
        assert_eq!(cost.cost_per_commit, 0);
        assert_eq!(cost.cost_per_feature, 0);
        assert_eq!(cost.efficiency, 0);
        assert_eq!(cost.roi.roi, -100);
        assert_eq!(cost.roi.status, RoiStatus::Negative);
    }

    #[test]
    fn test_zero_working_days_means_zero_cost() {
        let dataset = dataset(&[Some(1)], 1.0, 1.0);
        let pulls = [pull("2026-01-01T00:00:00Z", Some("2026-01-02T00:00:00Z"))];
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &[],
            pull_requests: &pulls,
        };

        let cost = calculate_cost_efficiency(&input, &config(100_000.0, 1, 0));

        assert_eq!(cost.total_cost, 0);
        assert_eq!(cost.roi.roi, 0);
        assert_eq!(cost.roi.status, RoiStatus::BreakEven);
        assert_eq!(cost.roi.estimated_value, 5000);
    }

    #[test]
    fn test_empty_timeline_counts_one_day() {
        let dataset = dataset(&[], 0.0, 0.0);
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &[],
            pull_requests: &[],
        };

        let cost = calculate_cost_efficiency(&input, &CostConfig::default());

        assert_eq!(cost.total_cost, 400);
    }

    #[test]
    fn test_roi_status_thresholds() {
        assert_eq!(roi_status(150.0), RoiStatus::Excellent);
        assert_eq!(roi_status(100.0), RoiStatus::Excellent);
        assert_eq!(roi_status(50.0), RoiStatus::Good);
        assert_eq!(roi_status(0.0), RoiStatus::BreakEven);
        assert_eq!(roi_status(-0.1), RoiStatus::Negative);
    }
}
