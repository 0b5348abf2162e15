mod cost;
mod delivery;
mod forecast;
mod productivity;
mod risks;
mod workforce;

pub use forecast::DEFAULT_TARGET_FEATURES;

use chrono::{DateTime, Utc};
use log::info;

use crate::config::CostConfig;
use crate::insights::{AnalyticsResult, ChartSeries};
use crate::models::{CanonicalCommit, CanonicalPullRequest, WorkflowDataset};
use crate::transform::{time_series, velocity_trends};

/// Number of newest reports shown in history charts.
const HISTORY_WINDOW: usize = 30;

/// Shared read-only inputs of every derivation.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsInput<'a> {
    pub dataset: &'a WorkflowDataset,
    pub commits: &'a [CanonicalCommit],
    pub pull_requests: &'a [CanonicalPullRequest],
}

#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub cost: CostConfig,
    pub target_features: u64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            cost: CostConfig::default(),
            target_features: DEFAULT_TARGET_FEATURES,
        }
    }
}

/// Runs every derivation over the same inputs. None of them reads another's
/// output, so evaluation order does not matter.
pub fn analyze(
    input: &AnalyticsInput<'_>,
    options: &AnalysisOptions,
    now: DateTime<Utc>,
) -> AnalyticsResult {
    let result = AnalyticsResult {
        generated_at: now,
        total_reports: input.dataset.total_reports,
        delivery_health: delivery::calculate_delivery_health(input),
        productivity: productivity::calculate_productivity(input),
        cost_efficiency: cost::calculate_cost_efficiency(input, &options.cost),
        workforce: workforce::calculate_workforce_utilization(input.commits),
        risks: risks::detect_risks(input),
        forecast: forecast::forecast_delivery(
            input.dataset,
            options.target_features,
            now.date_naive(),
        ),
        series: ChartSeries {
            velocity_timeline: time_series(input.dataset, HISTORY_WINDOW),
            weekly_velocity: velocity_trends(input.commits),
            date_range: format!("{} days", input.dataset.timeline.len()),
        },
    };

    info!(
        "Delivery health {} ({:?}), {} risk(s) detected",
        result.delivery_health.overall,
        result.delivery_health.status,
        result.risks.len()
    );

    result
}


#[cfg(test)]
mod tests {
    use super::test_support::{commits_by, dataset, pull};
    use super::*;
    use crate::insights::{Confidence, HealthStatus, RiskKind};
    use crate::models::RawReport;
    use chrono::TimeZone;

    #[test]
    fn test_analyze_composes_all_derivations() {
        let dataset = dataset(&[Some(12); 8], 12.0, 1.0);
        let commits = [commits_by("ada", 6), commits_by("lin", 5)].concat();
        let pulls = [pull("2026-01-01T00:00:00Z", Some("2026-01-02T00:00:00Z"))];
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &commits,
            pull_requests: &pulls,
        };
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();

        let result = analyze(&input, &AnalysisOptions::default(), now);

        assert_eq!(result.generated_at, now);
        assert_eq!(result.total_reports, 8);
        assert_eq!(result.delivery_health.status, HealthStatus::Good);
        assert_eq!(result.workforce.team_size, 2);
        assert!(result.risks.iter().all(|r| r.kind != RiskKind::Velocity));
        assert_eq!(result.forecast.days_to_target, Some(10));
        assert_eq!(result.forecast.confidence, Confidence::High);
        assert_eq!(result.series.velocity_timeline.len(), 8);
        assert_eq!(result.series.date_range, "8 days");
    }

    #[test]
    fn test_analyze_empty_inputs_does_not_panic() {
        let dataset = crate::reports::aggregate(&[]);
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &[],
            pull_requests: &[],
        };

        let result = analyze(&input, &AnalysisOptions::default(), Utc::now());

        assert_eq!(result.delivery_health.overall, 0);
        assert_eq!(result.productivity.avg_pr_cycle_time, 0.0);
        assert_eq!(result.cost_efficiency.cost_per_commit, 0);
        assert_eq!(result.risks.len(), 1);
        assert_eq!(result.forecast.days_to_target, None);
        assert!(result.series.weekly_velocity.is_empty());
    }

    #[test]
    fn test_velocity_risk_after_one_decimal_rounding() {
        // 39 commits over 20 reports averages just under 1.95
        let reports: Vec<RawReport> = (0..20u64)
            .map(|id| RawReport {
                id,
                title: "Daily Repo Status".to_string(),
                body_text: Some(format!("Commits Made Today: {}", if id == 0 { 1 } else { 2 })),
                created_at: format!("2026-01-{:02}T18:00:00Z", id + 1),
                url: String::new(),
            })
            .collect();
        let dataset = crate::reports::aggregate(&reports);
        let input = AnalyticsInput {
            dataset: &dataset,
            commits: &[],
            pull_requests: &[],
        };

        let result = analyze(&input, &AnalysisOptions::default(), Utc::now());

        assert_eq!(result.productivity.avg_commits_per_day, 1.9);
        assert_eq!(result.delivery_health.breakdown.velocity, 19);
        assert_eq!(result.risks[0].kind, RiskKind::Velocity);
    }
}
