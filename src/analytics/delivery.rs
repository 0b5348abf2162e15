use super::productivity::commit_trend;
use super::{AnalyticsInput, HISTORY_WINDOW};
use crate::insights::{DeliveryHealth, HealthBreakdown, HealthStatus};
use crate::stats::{percentage, round_to_int};

const VELOCITY_WEIGHT: f64 = 0.4;
const MERGE_RATE_WEIGHT: f64 = 0.3;
const CONSISTENCY_WEIGHT: f64 = 0.3;

/// Commits per day that earn a full velocity score.
const TARGET_DAILY_COMMITS: f64 = 10.0;
/// Reporting days that earn a full consistency score.
const TARGET_ACTIVE_DAYS: usize = 30;

pub fn calculate_delivery_health(input: &AnalyticsInput<'_>) -> DeliveryHealth {
    let dataset = input.dataset;

    let velocity = (dataset.summary.avg_commits_per_day / TARGET_DAILY_COMMITS * 100.0).min(100.0);
    let merged = input
        .pull_requests
        .iter()
        .filter(|pr| pr.is_merged())
        .count();
    let pr_merge_rate = percentage(merged, input.pull_requests.len());
    let consistency = percentage(dataset.timeline.len(), TARGET_ACTIVE_DAYS).min(100.0);

    let score = velocity * VELOCITY_WEIGHT
        + pr_merge_rate * MERGE_RATE_WEIGHT
        + consistency * CONSISTENCY_WEIGHT;

    DeliveryHealth {
        overall: round_to_int(score),
        breakdown: HealthBreakdown {
            velocity: round_to_int(velocity),
            pr_merge_rate: round_to_int(pr_merge_rate),
            consistency: round_to_int(consistency),
        },
        status: health_status(score),
        history: dataset
            .timeline
            .iter()
            .take(HISTORY_WINDOW)
            .map(|report| report.metrics.commits_today.unwrap_or(0))
            .collect(),
        trend: commit_trend(dataset),
    }
}

fn health_status(score: f64) -> HealthStatus {
    if score >= 80.0 {
        HealthStatus::Excellent
    } else if score >= 60.0 {
        HealthStatus::Good
    } else if score >= 40.0 {
        HealthStatus::Fair
    } else {
        HealthStatus::NeedsAttention
    }
}
