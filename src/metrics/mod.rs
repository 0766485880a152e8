//! Derived dashboard aggregates. Everything here is a pure function over
//! the in-memory entity lists; empty inputs are guarded, nothing can fail.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::core::{Host, Issue, Severity, SeverityRow};

/// Per-tier multiplier applied to the "passed" side of the severity table.
/// Presentation heuristic only: the split is not a measured quantity and the
/// constants carry no business meaning beyond keeping the chart plausible.
const PASS_SCALE: [(Severity, f64); 4] = [
    (Severity::Critical, 0.85),
    (Severity::High, 1.05),
    (Severity::Medium, 1.40),
    (Severity::Low, 0.75),
];

/// Rounded mean of all host scores; 0 for an empty fleet.
pub fn overall_compliance(hosts: &[Host]) -> u32 {
    if hosts.is_empty() {
        return 0;
    }
    let sum: u64 = hosts.iter().map(|h| u64::from(h.score)).sum();
    let mean = sum as f64 / hosts.len() as f64;
    mean.round() as u32
}

/// Sum of per-host critical-failed counts; `None` means "not evaluated"
/// and contributes 0.
pub fn critical_failures(hosts: &[Host]) -> u32 {
    hosts.iter().map(|h| h.critical_failed.unwrap_or(0)).sum()
}

/// Per-severity pass/fail table. Failed is measured (hosts affected across
/// active issues of the tier); passed is the scaled heuristic remainder.
pub fn severity_breakdown(issues: &[Issue], total_endpoints: u32) -> Vec<SeverityRow> {
    Severity::ALL
        .into_iter()
        .map(|severity| {
            let failed: u32 = issues
                .iter()
                .filter(|i| i.severity == severity && i.status.is_active())
                .map(|i| i.hosts_affected)
                .sum();
            let scale = PASS_SCALE
                .iter()
                .find(|(s, _)| *s == severity)
                .map(|(_, scale)| *scale)
                .unwrap_or(1.0);
            let remainder = total_endpoints.saturating_sub(failed);
            let passed = (f64::from(remainder) * scale).round() as u32;
            SeverityRow {
                severity: severity.label().to_string(),
                passed,
                failed,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub score: u32,
}

/// Small repeating wobble added to the interpolated trend so the chart does
/// not render as a straight line. Deliberately deterministic.
const OSCILLATION: [i32; 5] = [0, 2, -1, 1, -2];

/// Synthetic compliance-trend series: `points` (date, score) pairs ending at
/// `end_date`, interpolating linearly from `current_score - 10` up to
/// `current_score`, clamped to 0..=100. Decorative data, not measured
/// history.
pub fn trend_series(current_score: u32, points: usize, end_date: Date) -> Vec<TrendPoint> {
    if points == 0 {
        return Vec::new();
    }
    let current = i64::from(current_score.min(100));
    let start = (current - 10).max(0);
    let span = (points - 1) as i64;

    (0..points)
        .map(|i| {
            // A single-point series is just the current score.
            let interpolated = if span == 0 {
                current
            } else {
                start + (current - start) * i as i64 / span
            };
            let wobble = if i + 1 == points {
                // The series always lands exactly on the current score.
                0
            } else {
                i64::from(OSCILLATION[i % OSCILLATION.len()])
            };
            let score = (interpolated + wobble).clamp(0, 100) as u32;
            let offset = (points - 1 - i) as i64;
            let date = end_date
                .checked_sub(time::Duration::days(offset))
                .unwrap_or(end_date);
            TrendPoint {
                date: format_trend_date(date),
                score,
            }
        })
        .collect()
}

fn format_trend_date(date: Date) -> String {
    let month = match date.month() {
        time::Month::January => "Jan",
        time::Month::February => "Feb",
        time::Month::March => "Mar",
        time::Month::April => "Apr",
        time::Month::May => "May",
        time::Month::June => "Jun",
        time::Month::July => "Jul",
        time::Month::August => "Aug",
        time::Month::September => "Sep",
        time::Month::October => "Oct",
        time::Month::November => "Nov",
        time::Month::December => "Dec",
    };
    format!("{month} {}", date.day())
}

/// Active issues sorted by blast radius, truncated to the top 3. Source
/// order is preserved between equal counts.
pub fn top_failed_controls(issues: &[Issue]) -> Vec<Issue> {
    let mut active: Vec<Issue> = issues
        .iter()
        .filter(|i| i.status.is_active())
        .cloned()
        .collect();
    active.sort_by_key(|i| std::cmp::Reverse(i.hosts_affected));
    active.truncate(3);
    active
}

/// The headline numbers for the dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub overall_compliance: u32,
    pub hosts_scanned: usize,
    pub critical_failures: u32,
    pub open_issues: usize,
}

pub fn dashboard_summary(hosts: &[Host], issues: &[Issue]) -> DashboardSummary {
    DashboardSummary {
        overall_compliance: overall_compliance(hosts),
        hosts_scanned: hosts.len(),
        critical_failures: critical_failures(hosts),
        open_issues: issues.iter().filter(|i| i.status.is_active()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use time::macros::date;

    #[test]
    fn overall_compliance_rounds_the_mean() {
        let hosts = data::hosts();
        // (92+45+88+67+95+78+52+71) / 8 = 73.5 → 74
        assert_eq!(overall_compliance(&hosts), 74);
        assert_eq!(overall_compliance(&[]), 0);
    }

    #[test]
    fn critical_failures_treats_unevaluated_as_zero() {
        let hosts = data::hosts();
        assert_eq!(critical_failures(&hosts), 15);
    }

    #[test]
    fn severity_breakdown_counts_only_active_issues() {
        let rows = severity_breakdown(&data::issues(), data::TOTAL_ENDPOINTS);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].severity, "Critical");
        // CIS-1.3 (23) + PCI-8.2.3 (12), both Open.
        assert_eq!(rows[0].failed, 35);
        // ISO-5.3 (18) + NIST-AC-2 (15); the Resolved CIS-2.1 is excluded.
        assert_eq!(rows[1].failed, 33);
        assert_eq!(rows[2].failed, 6);
        assert_eq!(rows[3].failed, 0);
        for row in &rows {
            assert!(row.passed > 0);
        }
    }

    #[test]
    fn trend_series_spans_minus_ten_to_current() {
        let series = trend_series(82, 10, date!(2025 - 11 - 16));
        assert_eq!(series.len(), 10);
        assert_eq!(series[0].date, "Nov 7");
        assert_eq!(series[9].date, "Nov 16");
        assert_eq!(series[9].score, 82);
        assert!(series.iter().all(|p| p.score <= 100));
        assert!(series[0].score >= 70 && series[0].score <= 74);
    }

    #[test]
    fn trend_series_handles_degenerate_inputs() {
        assert!(trend_series(82, 0, date!(2025 - 11 - 16)).is_empty());
        let single = trend_series(5, 1, date!(2025 - 11 - 16));
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].score, 5);
    }

    #[test]
    fn top_failed_controls_sorts_and_truncates() {
        let top = top_failed_controls(&data::issues());
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].rule_id, "CIS-1.3");
        assert_eq!(top[1].rule_id, "ISO-5.3");
        assert_eq!(top[2].rule_id, "NIST-AC-2");
    }
}
