use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResult {
    pub generated_at: DateTime<Utc>,
    pub total_reports: usize,
    pub delivery_health: DeliveryHealth,
    pub productivity: Productivity,
    pub cost_efficiency: CostEfficiency,
    pub workforce: WorkforceUtilization,
    pub risks: Vec<Risk>,
    pub forecast: DeliveryForecast,
    pub series: ChartSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryHealth {
    pub overall: i64,
    pub breakdown: HealthBreakdown,
    pub status: HealthStatus,
    /// `commitsToday` of the newest reports, newest first.
    pub history: Vec<u64>,
    pub trend: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthBreakdown {
    pub velocity: i64,
    pub pr_merge_rate: i64,
    pub consistency: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Productivity {
    pub total_commits: u64,
    #[serde(rename = "totalPRs")]
    pub total_prs: u64,
    pub avg_commits_per_day: f64,
    #[serde(rename = "avgPRsPerDay")]
    pub avg_prs_per_day: f64,
    pub commit_trend: i64,
    #[serde(rename = "avgPRCycleTime")]
    pub avg_pr_cycle_time: f64,
    pub code_churn: CodeChurn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeChurn {
    pub total: usize,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEfficiency {
    pub total_cost: i64,
    pub cost_per_commit: i64,
    pub cost_per_feature: i64,
    pub efficiency: i64,
    pub roi: Roi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roi {
    pub estimated_value: u64,
    pub roi: i64,
    pub status: RoiStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoiStatus {
    Excellent,
    Good,
    #[serde(rename = "Break-even")]
    BreakEven,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkforceUtilization {
    pub contributors: Vec<ContributorMetrics>,
    pub team_size: usize,
    pub total_active_days: usize,
    pub avg_utilization: i64,
    pub workload_distribution: WorkloadDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorMetrics {
    pub name: String,
    pub commits: usize,
    pub active_days: usize,
    pub avg_commits_per_day: f64,
    pub utilization: f64,
}

/// Spread of commits across contributors. `gini` carries the coefficient of
/// variation under the name the dashboard binds to; it is not a Gini index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadDistribution {
    pub balance: WorkloadBalance,
    pub gini: i64,
    pub coefficient_of_variation: i64,
    pub avg_commits: i64,
    pub std_dev: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadBalance {
    Balanced,
    Moderate,
    Imbalanced,
    #[serde(rename = "N/A")]
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskKind {
    Velocity,
    CycleTime,
    Workload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryForecast {
    pub target_features: u64,
    pub days_to_target: Option<u64>,
    pub estimated_date: Option<NaiveDate>,
    pub confidence: Confidence,
    pub current_velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub velocity_timeline: Vec<TimeSeriesPoint>,
    pub weekly_velocity: Vec<WeeklyVelocity>,
    /// Human-readable span, e.g. `"14 days"`.
    pub date_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub value: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyVelocity {
    pub week: NaiveDate,
    pub count: usize,
}
