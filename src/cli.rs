use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::analytics::{self, AnalysisOptions, AnalyticsInput, DEFAULT_TARGET_FEATURES};
use crate::config::CostSettings;
use crate::models::RawReport;
use crate::reports::{aggregate, is_status_report, parse_report};
use crate::source::{load_inputs, JsonFileSource, ResponseCache};
use crate::transform::{normalize_commits, normalize_pull_requests, normalize_reports};

#[derive(Parser)]
#[command(name = "deliverylens")]
#[command(version, about = "Delivery analytics from daily repository status reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze exported status reports, commits and pull requests
    Analyze {
        /// JSON array of status reports (GitHub issues or plain form)
        #[arg(short, long)]
        reports: PathBuf,

        /// JSON array of commits (GitHub API or flat form)
        #[arg(short, long)]
        commits: Option<PathBuf>,

        /// JSON array of pull requests (GitHub API or flat form)
        #[arg(short = 'P', long)]
        pulls: Option<PathBuf>,

        /// JSON file with cost model settings
        #[arg(long)]
        cost_config: Option<PathBuf>,

        /// Average annual cost per engineer
        #[arg(long, env = "DELIVERYLENS_ENGINEER_COST")]
        engineer_cost: Option<f64>,

        /// Team size (defaults to the number of commit authors)
        #[arg(long, env = "DELIVERYLENS_TEAM_SIZE")]
        team_size: Option<u32>,

        /// Working days per year
        #[arg(long, env = "DELIVERYLENS_WORKING_DAYS")]
        working_days: Option<u32>,

        /// Number of features the delivery forecast aims for
        #[arg(short, long, default_value_t = DEFAULT_TARGET_FEATURES)]
        target_features: u64,

        /// Keep reports whose title does not mark them as status reports
        #[arg(long, default_value_t = false)]
        all_reports: bool,
    },

    /// Parse a single report body and print the extracted fields
    Parse {
        /// File containing the report body (markdown)
        body: PathBuf,

        /// Report title
        #[arg(long, default_value = "")]
        title: String,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Analyze {
                reports,
                commits,
                pulls,
                cost_config,
                engineer_cost,
                team_size,
                working_days,
                target_features,
                all_reports,
            } => {
                info!("Analyzing status reports from: {}", reports.display());

                let source = JsonFileSource::new(reports.clone())
                    .with_commits(commits.clone())
                    .with_pull_requests(pulls.clone());
                let cache = ResponseCache::default();
                let now = Utc::now();
                let inputs = load_inputs(&source, &cache, now).await?;

                let mut raw_reports = normalize_reports(&inputs.reports);
                if !all_reports {
                    raw_reports.retain(|report| is_status_report(&report.title));
                }
                if raw_reports.is_empty() {
                    warn!("No status reports found, analytics will be empty");
                }

                let dataset = aggregate(&raw_reports);
                let commits = normalize_commits(&inputs.commits);
                let pull_requests = normalize_pull_requests(&inputs.pull_requests);
                info!(
                    "Loaded {} reports, {} commits, {} pull requests",
                    dataset.total_reports,
                    commits.len(),
                    pull_requests.len()
                );

                let file_settings = match cost_config {
                    Some(path) => CostSettings::load(path)?,
                    None => CostSettings::default(),
                };
                let authors = commits
                    .iter()
                    .map(|commit| commit.author.as_str())
                    .collect::<HashSet<_>>()
                    .len();
                let cost = file_settings
                    .overlay(CostSettings {
                        avg_engineer_cost: *engineer_cost,
                        team_size: *team_size,
                        working_days_per_year: *working_days,
                    })
                    .resolve(authors);

                let input = AnalyticsInput {
                    dataset: &dataset,
                    commits: &commits,
                    pull_requests: &pull_requests,
                };
                let options = AnalysisOptions {
                    cost,
                    target_features: *target_features,
                };
                let result = analytics::analyze(&input, &options, now);

                self.emit(&result)
            }
            Commands::Parse { body, title } => {
                info!("Parsing report body from: {}", body.display());

                let report = RawReport {
                    title: title.clone(),
                    body_text: Some(read_body(body)?),
                    ..RawReport::default()
                };
                let Some(parsed) = parse_report(&report) else {
                    bail!("Report body in {} is empty", body.display());
                };

                self.emit(&parsed)
            }
        }
    }

    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let json_output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)?;
            info!("Output written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }
}

fn read_body(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
