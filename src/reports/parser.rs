use std::sync::LazyLock;

use regex::Regex;

use crate::models::{
    CommitMention, Insights, ParsedReport, PrMention, PrStatus, RawReport, ReportMetrics,
};

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("report pattern must compile")
}

// Labeled fields
static REPORT_DATE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Date:\s*([^\n]+)"));
static COMMITS_TODAY: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)Commits Made Today:\s*([0-9]+)"));
static PULL_REQUESTS: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Pull Requests:\s*([0-9]+)"));
static OPEN_ISSUES: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Open Issues:\s*([0-9]+)"));
static RELEASES: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Releases:\s*([0-9]+|None)"));
static PROJECT_STATUS: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Status:\s*([^\n]+)"));

// Section boundaries
static HEADING: LazyLock<Regex> = LazyLock::new(|| pattern(r"\n#"));
static COMMIT_SECTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Latest|Commits"));
static PR_SECTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Pull Requests:"));
static INSIGHTS_SECTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Key Insights"));
static POSITIVE_SECTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)What's Going.*?:"));
static ATTENTION_SECTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Attention Needed"));
static AREAS_OR_ATTENTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Areas|Attention"));
static NEXT_STEPS: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Next Steps"));
static PROJECT_SUMMARY: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)Project Summary"));

// Line records
static COMMIT_LINE: LazyLock<Regex> = LazyLock::new(|| pattern(r"✅.*"));
static PR_LINE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)(?:✅|❌).*?PR.*?#([0-9]+).*"));
static TIME_OF_DAY: LazyLock<Regex> = LazyLock::new(|| pattern(r"([0-9]{1,2}:[0-9]{2})"));
static QUOTED: LazyLock<Regex> = LazyLock::new(|| pattern(r#""([^"]+)""#));
static PR_NUMBER: LazyLock<Regex> = LazyLock::new(|| pattern(r"#([0-9]+)"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| pattern(r"[🔥🎯🎨⚙💾📚🔄🛠📖🏷].*"));

const MERGED_MARK: char = '✅';
const OPEN_MARK: char = '❌';

const STATUS_REPORT_TITLES: [&str; 3] = [
    "[repo-status]",
    "Daily Repository Snapshot",
    "Daily Repo Status",
];

/// Whether a title belongs to a generated status report rather than an
/// ordinary issue.
pub fn is_status_report(title: &str) -> bool {
    STATUS_REPORT_TITLES
        .iter()
        .any(|marker| title.contains(*marker))
}

/// Parses a report body into structured metrics, mentions and insights.
///
/// Returns `None` when the report has no body. Every extractor is independent:
/// a label that cannot be found leaves its field out instead of failing.
pub fn parse_report(report: &RawReport) -> Option<ParsedReport> {
    let body = report.body_text.as_deref().filter(|b| !b.is_empty())?;

    Some(ParsedReport {
        id: report.id,
        title: report.title.clone(),
        date: report.created_at.clone(),
        url: report.url.clone(),
        metrics: extract_metrics(body),
        commit_mentions: extract_commit_mentions(body),
        pr_mentions: extract_pr_mentions(body),
        insights: extract_insights(body),
    })
}

fn extract_metrics(body: &str) -> ReportMetrics {
    ReportMetrics {
        report_date: capture_line(&REPORT_DATE, body),
        commits_today: capture_number(&COMMITS_TODAY, body),
        pull_requests: capture_number(&PULL_REQUESTS, body),
        open_issues: capture_number(&OPEN_ISSUES, body),
        releases: capture_releases(body),
        project_status: capture_line(&PROJECT_STATUS, body),
    }
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn capture_line(re: &Regex, text: &str) -> Option<String> {
    capture(re, text).map(|value| value.trim().to_string())
}

fn capture_number(re: &Regex, text: &str) -> Option<u64> {
    capture(re, text).and_then(|value| value.parse().ok())
}

fn capture_releases(text: &str) -> Option<u64> {
    let value = capture(&RELEASES, text)?;
    if value.eq_ignore_ascii_case("none") {
        Some(0)
    } else {
        value.parse().ok()
    }
}

/// Slices `text` from the first match of `start` up to the earliest match of
/// any `ends` pattern after it, or to the end of the text.
fn section<'a>(text: &'a str, start: &Regex, ends: &[&Regex]) -> Option<&'a str> {
    let found = start.find(text)?;
    let end = ends
        .iter()
        .filter_map(|re| re.find_at(text, found.end()))
        .map(|m| m.start())
        .min()
        .unwrap_or(text.len());

    Some(&text[found.start()..end])
}

fn extract_commit_mentions(body: &str) -> Vec<CommitMention> {
    let Some(commits) = section(body, &COMMIT_SECTION, &[&HEADING]) else {
        return vec![];
    };

    COMMIT_LINE
        .find_iter(commits)
        .map(|line| {
            let line = line.as_str();
            let message = capture(&QUOTED, line).map_or_else(
                || line.replace(MERGED_MARK, "").trim().to_string(),
                str::to_string,
            );

            CommitMention {
                time: capture(&TIME_OF_DAY, line).map(str::to_string),
                message,
            }
        })
        .collect()
}

fn extract_pr_mentions(body: &str) -> Vec<PrMention> {
    let Some(pulls) = section(body, &PR_SECTION, &[&HEADING]) else {
        return vec![];
    };

    PR_LINE
        .find_iter(pulls)
        .map(|line| {
            let line = line.as_str();
            let status = if line.contains(MERGED_MARK) {
                PrStatus::Merged
            } else {
                PrStatus::Open
            };

            PrMention {
                number: capture_number(&PR_NUMBER, line),
                status,
                title: line
                    .replace(&[MERGED_MARK, OPEN_MARK][..], "")
                    .trim()
                    .to_string(),
            }
        })
        .collect()
}

fn extract_insights(body: &str) -> Insights {
    let mut insights = Insights::default();

    if let Some(text) = section(body, &INSIGHTS_SECTION, &[&HEADING, &NEXT_STEPS]) {
        insights.positive =
            section(text, &POSITIVE_SECTION, &[&AREAS_OR_ATTENTION]).map(bullet_points);
        insights.attention = section(text, &ATTENTION_SECTION, &[&HEADING]).map(bullet_points);
    }

    insights.next_steps =
        section(body, &NEXT_STEPS, &[&HEADING, &PROJECT_SUMMARY]).map(bullet_points);

    insights
}

fn bullet_points(text: &str) -> Vec<String> {
    BULLET
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}
