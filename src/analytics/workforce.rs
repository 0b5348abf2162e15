use std::collections::HashSet;

use indexmap::IndexMap;

use crate::insights::{
    ContributorMetrics, WorkforceUtilization, WorkloadBalance, WorkloadDistribution,
};
use crate::models::CanonicalCommit;
use crate::stats::{mean, ratio, round_to_int, round_to_tenth, std_dev};

/// Active days in the window that count as full utilization.
const FULL_UTILIZATION_DAYS: f64 = 30.0;

#[derive(Default)]
struct AuthorActivity<'a> {
    commits: usize,
    days: HashSet<&'a str>,
}

#[allow(clippy::cast_precision_loss)]
pub fn calculate_workforce_utilization(commits: &[CanonicalCommit]) -> WorkforceUtilization {
    let mut by_author: IndexMap<&str, AuthorActivity> = IndexMap::new();
    for commit in commits {
        let activity = by_author.entry(commit.author.as_str()).or_default();
        activity.commits += 1;
        activity.days.insert(commit.day());
    }

    let mut contributors: Vec<ContributorMetrics> = by_author
        .into_iter()
        .map(|(name, activity)| {
            let active_days = activity.days.len();
            ContributorMetrics {
                name: name.to_string(),
                commits: activity.commits,
                active_days,
                avg_commits_per_day: round_to_tenth(ratio(
                    activity.commits as f64,
                    active_days as f64,
                )),
                utilization: (active_days as f64 / FULL_UTILIZATION_DAYS * 100.0).min(100.0),
            }
        })
        .collect();
    // Stable, so equal counts keep first-seen order
    contributors.sort_by(|a, b| b.commits.cmp(&a.commits));

    let total_active_days = commits
        .iter()
        .map(CanonicalCommit::day)
        .collect::<HashSet<_>>()
        .len();
    let utilizations: Vec<f64> = contributors.iter().map(|c| c.utilization).collect();

    WorkforceUtilization {
        team_size: contributors.len(),
        total_active_days,
        avg_utilization: round_to_int(mean(&utilizations)),
        workload_distribution: workload_distribution(&contributors),
        contributors,
    }
}

#[allow(clippy::cast_precision_loss)]
fn workload_distribution(contributors: &[ContributorMetrics]) -> WorkloadDistribution {
    if contributors.is_empty() {
        return WorkloadDistribution {
            balance: WorkloadBalance::NotApplicable,
            gini: 0,
            coefficient_of_variation: 0,
            avg_commits: 0,
            std_dev: 0,
        };
    }

    let counts: Vec<f64> = contributors.iter().map(|c| c.commits as f64).collect();
    let avg = mean(&counts);
    let deviation = std_dev(&counts);
    let variation = ratio(deviation, avg) * 100.0;

    let balance = if variation < 30.0 {
        WorkloadBalance::Balanced
    } else if variation < 60.0 {
        WorkloadBalance::Moderate
    } else {
        WorkloadBalance::Imbalanced
    };

    WorkloadDistribution {
        balance,
        gini: round_to_int(variation),
        coefficient_of_variation: round_to_int(variation),
        avg_commits: round_to_int(avg),
        std_dev: round_to_int(deviation),
    }
}
