use chrono::{Days, NaiveDate};

use crate::insights::{Confidence, DeliveryForecast};
use crate::models::WorkflowDataset;

pub const DEFAULT_TARGET_FEATURES: u64 = 10;

const HIGH_CONFIDENCE_REPORTS: usize = 7;
const MEDIUM_CONFIDENCE_REPORTS: usize = 3;

/// Projects when `target_features` more pull requests will land at the
/// current daily pull request rate. Without any rate there is no projection.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn forecast_delivery(
    dataset: &WorkflowDataset,
    target_features: u64,
    today: NaiveDate,
) -> DeliveryForecast {
    let velocity = dataset.summary.avg_prs_per_day;

    if velocity <= 0.0 {
        return DeliveryForecast {
            target_features,
            days_to_target: None,
            estimated_date: None,
            confidence: Confidence::Low,
            current_velocity: 0.0,
        };
    }

    let days = (target_features as f64 / velocity).ceil() as u64;
    let confidence = match dataset.timeline.len() {
        n if n >= HIGH_CONFIDENCE_REPORTS => Confidence::High,
        n if n >= MEDIUM_CONFIDENCE_REPORTS => Confidence::Medium,
        _ => Confidence::Low,
    };

    DeliveryForecast {
        target_features,
        days_to_target: Some(days),
        estimated_date: today.checked_add_days(Days::new(days)),
        confidence,
        current_velocity: velocity,
    }
}
