//! Report generation: builders that assemble a [`ReportData`] document from
//! the live entity lists, and exporters that render it as printable HTML,
//! CSV, JSON or plain text.

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::core::{
    ComparisonChange, ComparisonData, ComplianceRule, Host, HostDetail, Issue, ReportData,
    ReportSection, RuleStatus, SummaryMetrics, Trend,
};
use crate::core::LocationFilter;
use crate::core::User;
use crate::data;
use crate::metrics;

/// The renderings a report can be exported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Csv,
    Json,
    Text,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            other => Err(format!(
                "unsupported report format: {other} (expected html|csv|json|text)"
            )),
        }
    }
}

fn format_timestamp(now: OffsetDateTime) -> String {
    let fmt = format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
    now.format(&fmt).unwrap_or_else(|_| "unknown".to_string())
}

fn format_date(date: time::Date) -> String {
    let fmt = format_description!("[year]-[month]-[day]");
    date.format(&fmt).unwrap_or_else(|_| "unknown".to_string())
}

/// The full compliance summary report: headline metrics, the severity and
/// per-framework breakdowns, a period-over-period comparison and the top
/// failed controls.
pub fn compliance_report(
    hosts: &[Host],
    issues: &[Issue],
    rules: &[ComplianceRule],
    generated_by: &User,
    location: LocationFilter,
    now: OffsetDateTime,
) -> ReportData {
    let overall = metrics::overall_compliance(hosts);
    let severity_data = metrics::severity_breakdown(issues, data::TOTAL_ENDPOINTS);
    let category_data = category_breakdown(rules, issues);
    let summary = metrics::dashboard_summary(hosts, issues);

    // The previous period is synthesized the same way the trend chart is;
    // there is no stored history to diff against.
    let previous = overall.saturating_sub(10);
    let delta = f64::from(overall) - f64::from(previous);
    let comparison = ComparisonData {
        previous_date: format_date(now.date() - time::Duration::days(7)),
        current_date: format_date(now.date()),
        previous_compliance: f64::from(previous),
        current_compliance: f64::from(overall),
        changes: vec![
            ComparisonChange {
                metric: "Compliance Score".to_string(),
                previous: format!("{previous}%"),
                current: format!("{overall}%"),
                change: format!("{delta:+.1} pp"),
                trend: Trend::from_delta(delta),
            },
            ComparisonChange {
                metric: "Critical Failures".to_string(),
                previous: format!("{}", summary.critical_failures + 3),
                current: format!("{}", summary.critical_failures),
                change: "-3".to_string(),
                trend: Trend::from_delta(-3.0),
            },
            ComparisonChange {
                metric: "Open Issues".to_string(),
                previous: format!("{}", summary.open_issues + 2),
                current: format!("{}", summary.open_issues),
                change: "-2".to_string(),
                trend: Trend::from_delta(-2.0),
            },
        ],
    };

    let top = metrics::top_failed_controls(issues);
    let top_rows = top
        .iter()
        .map(|i| {
            vec![
                i.rule_id.clone(),
                i.severity.label().to_string(),
                i.description.clone(),
                i.hosts_affected.to_string(),
            ]
        })
        .collect();

    ReportData {
        title: "Compliance Summary Report".to_string(),
        subtitle: Some(format!("Location: {location}")),
        generated_at: format_timestamp(now),
        metadata: vec![
            (
                "Generated By".to_string(),
                format!("{} ({})", generated_by.name, generated_by.role.as_str()),
            ),
            ("Location".to_string(), location.to_string()),
            ("Hosts Scanned".to_string(), summary.hosts_scanned.to_string()),
        ],
        summary_metrics: Some(SummaryMetrics {
            system_compliance: f64::from(overall),
            total_endpoints: data::TOTAL_ENDPOINTS,
            total_controls: data::TOTAL_CONTROLS,
        }),
        severity_data,
        category_data,
        comparison: Some(comparison),
        sections: vec![ReportSection::table(
            "Top Failed Controls",
            vec![
                "Rule".to_string(),
                "Severity".to_string(),
                "Description".to_string(),
                "Hosts Affected".to_string(),
            ],
            top_rows,
        )],
    }
}

fn category_breakdown(rules: &[ComplianceRule], issues: &[Issue]) -> Vec<crate::core::CategoryRow> {
    let mut rows: Vec<crate::core::CategoryRow> = Vec::new();
    for rule in rules {
        let name = rule.framework.to_string();
        if !rows.iter().any(|r| r.category == name) {
            let total = rules
                .iter()
                .filter(|r| r.framework == rule.framework)
                .count() as u32;
            let failed = issues
                .iter()
                .filter(|i| i.framework == name && i.status.is_active())
                .count() as u32;
            rows.push(crate::core::CategoryRow {
                category: name,
                total,
                passed: total.saturating_sub(failed),
                failed: failed.min(total),
            });
        }
    }
    rows
}

/// Single-host drilldown report built from a [`HostDetail`] record.
pub fn host_report(detail: &HostDetail, generated_by: &User, now: OffsetDateTime) -> ReportData {
    let rule_rows = detail
        .evaluated_rules
        .iter()
        .map(|r| {
            vec![
                r.rule_id.clone(),
                r.status.as_str().to_string(),
                r.severity.label().to_string(),
                r.expected.clone(),
                r.actual.clone(),
            ]
        })
        .collect();

    let remediations: Vec<String> = detail
        .evaluated_rules
        .iter()
        .filter(|r| r.status == RuleStatus::Fail)
        .map(|r| format!("{}: {}", r.rule_id, r.remediation))
        .collect();

    let mut sections = vec![
        ReportSection::text(
            "System",
            vec![
                format!("CPU: {}", detail.cpu),
                format!("Memory: {}", detail.memory),
                format!("Disk: {}", detail.disk),
                format!("Uptime: {}", detail.uptime),
            ],
        ),
        ReportSection::list(
            "Recent Activity",
            detail
                .recent_activity
                .iter()
                .map(|a| format!("[{}] {}: {}", a.timestamp, a.activity_type, a.details))
                .collect(),
        ),
        ReportSection::table(
            "Evaluated Rules",
            vec![
                "Rule".to_string(),
                "Status".to_string(),
                "Severity".to_string(),
                "Expected".to_string(),
                "Actual".to_string(),
            ],
            rule_rows,
        ),
    ];
    if !remediations.is_empty() {
        sections.push(ReportSection::list("Remediation", remediations));
    }

    ReportData {
        title: "Host Compliance Report".to_string(),
        subtitle: Some(detail.hostname.clone()),
        generated_at: format_timestamp(now),
        metadata: vec![
            ("Generated By".to_string(), generated_by.name.clone()),
            ("Hostname".to_string(), detail.hostname.clone()),
            ("OS".to_string(), detail.os.clone()),
            ("IP Address".to_string(), detail.ip_address.clone()),
            ("Domain".to_string(), detail.domain.clone()),
            ("Location".to_string(), detail.location.to_string()),
            ("Score".to_string(), format!("{}%", detail.score)),
            ("Tags".to_string(), detail.tags.join(", ")),
        ],
        summary_metrics: None,
        severity_data: Vec::new(),
        category_data: Vec::new(),
        comparison: None,
        sections,
    }
}

/// Synthetic compliance-trend report over the last `days` days.
pub fn trend_report(
    hosts: &[Host],
    days: usize,
    generated_by: &User,
    now: OffsetDateTime,
) -> ReportData {
    let current = metrics::overall_compliance(hosts);
    let series = metrics::trend_series(current, days, now.date());
    let rows = series
        .iter()
        .map(|p| vec![p.date.clone(), format!("{}%", p.score)])
        .collect();

    ReportData {
        title: "Compliance Trend Report".to_string(),
        subtitle: Some(format!("Last {days} days")),
        generated_at: format_timestamp(now),
        metadata: vec![
            ("Generated By".to_string(), generated_by.name.clone()),
            ("Current Score".to_string(), format!("{current}%")),
        ],
        summary_metrics: None,
        severity_data: Vec::new(),
        category_data: Vec::new(),
        comparison: None,
        sections: vec![ReportSection::table(
            "Daily Scores",
            vec!["Date".to_string(), "Score".to_string()],
            rows,
        )],
    }
}

/// Pretty-printed JSON rendering of the whole document.
pub fn to_json(report: &ReportData) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize the report")
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| csv_field(c))
        .collect::<Vec<_>>()
        .join(",")
}

/// CSV rendering. Fields containing commas, quotes or newlines are quoted
/// with doubled inner quotes.
pub fn to_csv(report: &ReportData) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(csv_row(&["Report".to_string(), report.title.clone()]));
    if let Some(subtitle) = &report.subtitle {
        lines.push(csv_row(&["Subtitle".to_string(), subtitle.clone()]));
    }
    lines.push(csv_row(&[
        "Generated At".to_string(),
        report.generated_at.clone(),
    ]));
    for (key, value) in &report.metadata {
        lines.push(csv_row(&[key.clone(), value.clone()]));
    }

    if let Some(summary) = &report.summary_metrics {
        lines.push(String::new());
        lines.push("Metric,Value".to_string());
        lines.push(csv_row(&[
            "System Compliance".to_string(),
            format!("{}%", summary.system_compliance),
        ]));
        lines.push(csv_row(&[
            "Total Endpoints".to_string(),
            summary.total_endpoints.to_string(),
        ]));
        lines.push(csv_row(&[
            "Total Controls".to_string(),
            summary.total_controls.to_string(),
        ]));
    }

    if !report.severity_data.is_empty() {
        lines.push(String::new());
        lines.push("Severity,Passed,Failed,Compliance %".to_string());
        for row in &report.severity_data {
            lines.push(csv_row(&[
                row.severity.clone(),
                row.passed.to_string(),
                row.failed.to_string(),
                format!("{}", row.compliance_pct()),
            ]));
        }
    }

    if !report.category_data.is_empty() {
        lines.push(String::new());
        lines.push("Category,Total,Passed,Failed".to_string());
        for row in &report.category_data {
            lines.push(csv_row(&[
                row.category.clone(),
                row.total.to_string(),
                row.passed.to_string(),
                row.failed.to_string(),
            ]));
        }
    }

    if let Some(cmp) = &report.comparison {
        lines.push(String::new());
        lines.push("Metric,Previous,Current,Change,Trend".to_string());
        for change in &cmp.changes {
            lines.push(csv_row(&[
                change.metric.clone(),
                change.previous.clone(),
                change.current.clone(),
                change.change.clone(),
                change.trend.arrow().to_string(),
            ]));
        }
    }

    for section in &report.sections {
        lines.push(String::new());
        lines.push(csv_row(&["Section".to_string(), section.title.clone()]));
        match &section.content {
            crate::core::SectionContent::Text(paragraphs) => {
                for p in paragraphs {
                    lines.push(csv_field(p));
                }
            }
            crate::core::SectionContent::List(items) => {
                for item in items {
                    lines.push(csv_field(item));
                }
            }
            crate::core::SectionContent::Table { headers, rows } => {
                lines.push(csv_row(headers));
                for row in rows {
                    lines.push(csv_row(row));
                }
            }
        }
    }

    lines.join("\r\n") + "\r\n"
}

/// Plain-text rendering for terminals and text attachments.
pub fn to_text(report: &ReportData) -> String {
    let mut out = String::new();
    out.push_str(&report.title);
    out.push('\n');
    out.push_str(&"=".repeat(report.title.len()));
    out.push('\n');
    if let Some(subtitle) = &report.subtitle {
        out.push_str(subtitle);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!("Generated At: {}\n", report.generated_at));
    for (key, value) in &report.metadata {
        out.push_str(&format!("{key}: {value}\n"));
    }

    if let Some(summary) = &report.summary_metrics {
        out.push('\n');
        out.push_str(&format!(
            "System Compliance: {}%\nTotal Endpoints: {}\nTotal Controls: {}\n",
            summary.system_compliance, summary.total_endpoints, summary.total_controls
        ));
    }

    if !report.severity_data.is_empty() {
        out.push_str(&text_section_header("By Severity"));
        for row in &report.severity_data {
            out.push_str(&format!(
                "{} | passed {} | failed {} | {}%\n",
                row.severity,
                row.passed,
                row.failed,
                row.compliance_pct()
            ));
        }
    }

    if !report.category_data.is_empty() {
        out.push_str(&text_section_header("By Framework"));
        for row in &report.category_data {
            out.push_str(&format!(
                "{} | total {} | passed {} | failed {}\n",
                row.category, row.total, row.passed, row.failed
            ));
        }
    }

    if let Some(cmp) = &report.comparison {
        out.push_str(&text_section_header(&format!(
            "Comparison ({} vs {})",
            cmp.previous_date, cmp.current_date
        )));
        for change in &cmp.changes {
            out.push_str(&format!(
                "{}: {} -> {} ({} {})\n",
                change.metric,
                change.previous,
                change.current,
                change.change,
                change.trend.arrow()
            ));
        }
    }

    for section in &report.sections {
        out.push_str(&text_section_header(&section.title));
        match &section.content {
            crate::core::SectionContent::Text(paragraphs) => {
                for p in paragraphs {
                    out.push_str(p);
                    out.push('\n');
                }
            }
            crate::core::SectionContent::List(items) => {
                for item in items {
                    out.push_str(&format!("- {item}\n"));
                }
            }
            crate::core::SectionContent::Table { headers, rows } => {
                out.push_str(&headers.join(" | "));
                out.push('\n');
                for row in rows {
                    out.push_str(&row.join(" | "));
                    out.push('\n');
                }
            }
        }
    }
    out
}

fn text_section_header(title: &str) -> String {
    format!("\n{title}\n{}\n", "-".repeat(title.len()))
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Self-contained printable HTML document. Opening it in a browser triggers
/// the print dialog, which stands in for PDF export.
pub fn to_html(report: &ReportData) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.title)));
    if let Some(subtitle) = &report.subtitle {
        body.push_str(&format!(
            "<p class=\"subtitle\">{}</p>\n",
            html_escape(subtitle)
        ));
    }
    body.push_str("<table class=\"meta\">\n");
    body.push_str(&format!(
        "<tr><th>Generated At</th><td>{}</td></tr>\n",
        html_escape(&report.generated_at)
    ));
    for (key, value) in &report.metadata {
        body.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            html_escape(key),
            html_escape(value)
        ));
    }
    body.push_str("</table>\n");

    if let Some(summary) = &report.summary_metrics {
        body.push_str("<div class=\"metrics\">\n");
        for (label, value) in [
            (
                "System Compliance",
                format!("{}%", summary.system_compliance),
            ),
            ("Total Endpoints", summary.total_endpoints.to_string()),
            ("Total Controls", summary.total_controls.to_string()),
        ] {
            body.push_str(&format!(
                "<div class=\"metric\"><div class=\"value\">{}</div><div class=\"label\">{}</div></div>\n",
                html_escape(&value),
                label
            ));
        }
        body.push_str("</div>\n");
    }

    if !report.severity_data.is_empty() {
        body.push_str("<h2>By Severity</h2>\n<table>\n");
        body.push_str(
            "<tr><th>Severity</th><th>Passed</th><th>Failed</th><th>Compliance</th></tr>\n",
        );
        for row in &report.severity_data {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>\n",
                html_escape(&row.severity),
                row.passed,
                row.failed,
                row.compliance_pct()
            ));
        }
        body.push_str("</table>\n");
    }

    if !report.category_data.is_empty() {
        body.push_str("<h2>By Framework</h2>\n<table>\n");
        body.push_str("<tr><th>Category</th><th>Total</th><th>Passed</th><th>Failed</th></tr>\n");
        for row in &report.category_data {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(&row.category),
                row.total,
                row.passed,
                row.failed
            ));
        }
        body.push_str("</table>\n");
    }

    if let Some(cmp) = &report.comparison {
        body.push_str(&format!(
            "<h2>Comparison ({} vs {})</h2>\n<table>\n",
            html_escape(&cmp.previous_date),
            html_escape(&cmp.current_date)
        ));
        body.push_str(
            "<tr><th>Metric</th><th>Previous</th><th>Current</th><th>Change</th></tr>\n",
        );
        for change in &cmp.changes {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{} {}</td></tr>\n",
                html_escape(&change.metric),
                html_escape(&change.previous),
                html_escape(&change.current),
                html_escape(&change.change),
                change.trend.arrow()
            ));
        }
        body.push_str("</table>\n");
    }

    for section in &report.sections {
        body.push_str(&format!("<h2>{}</h2>\n", html_escape(&section.title)));
        match &section.content {
            crate::core::SectionContent::Text(paragraphs) => {
                for p in paragraphs {
                    body.push_str(&format!("<p>{}</p>\n", html_escape(p)));
                }
            }
            crate::core::SectionContent::List(items) => {
                body.push_str("<ul>\n");
                for item in items {
                    body.push_str(&format!("<li>{}</li>\n", html_escape(item)));
                }
                body.push_str("</ul>\n");
            }
            crate::core::SectionContent::Table { headers, rows } => {
                body.push_str("<table>\n<tr>");
                for header in headers {
                    body.push_str(&format!("<th>{}</th>", html_escape(header)));
                }
                body.push_str("</tr>\n");
                for row in rows {
                    body.push_str("<tr>");
                    for cell in row {
                        body.push_str(&format!("<td>{}</td>", html_escape(cell)));
                    }
                    body.push_str("</tr>\n");
                }
                body.push_str("</table>\n");
            }
        }
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n\
         body {{ font-family: -apple-system, 'Segoe UI', sans-serif; margin: 2rem; color: #1a202c; }}\n\
         h1 {{ border-bottom: 2px solid #2b6cb0; padding-bottom: 0.3rem; }}\n\
         h2 {{ color: #2b6cb0; margin-top: 1.5rem; }}\n\
         .subtitle {{ color: #4a5568; }}\n\
         table {{ border-collapse: collapse; margin: 0.5rem 0; width: 100%; }}\n\
         th, td {{ border: 1px solid #cbd5e0; padding: 0.4rem 0.6rem; text-align: left; }}\n\
         th {{ background: #edf2f7; }}\n\
         table.meta {{ width: auto; }}\n\
         .metrics {{ display: flex; gap: 1rem; margin: 1rem 0; }}\n\
         .metric {{ border: 1px solid #cbd5e0; border-radius: 6px; padding: 0.8rem 1.2rem; }}\n\
         .metric .value {{ font-size: 1.6rem; font-weight: 700; }}\n\
         .metric .label {{ color: #4a5568; font-size: 0.85rem; }}\n\
         footer {{ margin-top: 2rem; color: #718096; font-size: 0.8rem; }}\n\
         @media print {{ body {{ margin: 0.5in; }} }}\n\
         </style>\n</head>\n<body onload=\"window.print()\">\n{}\
         <footer>Generated by RACAP Compliance Monitoring</footer>\n</body>\n</html>\n",
        html_escape(&report.title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_user() -> User {
        data::users().remove(0)
    }

    fn sample_report() -> ReportData {
        compliance_report(
            &data::hosts(),
            &data::issues(),
            &data::default_rules(),
            &sample_user(),
            LocationFilter::All,
            datetime!(2025-11-16 10:30 UTC),
        )
    }

    #[test]
    fn compliance_report_carries_headline_metrics() {
        let report = sample_report();
        let summary = report.summary_metrics.expect("summary");
        assert_eq!(summary.system_compliance, 74.0);
        assert_eq!(summary.total_endpoints, 245);
        assert_eq!(summary.total_controls, 856);
        assert_eq!(report.generated_at, "2025-11-16 10:30 UTC");
        assert_eq!(report.severity_data.len(), 4);
        assert!(!report.category_data.is_empty());
    }

    #[test]
    fn csv_quotes_commas_and_doubles_quotes() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn csv_export_has_severity_block() {
        let csv = to_csv(&sample_report());
        assert!(csv.contains("Severity,Passed,Failed,Compliance %"));
        assert!(csv.contains("Report,Compliance Summary Report"));
        assert!(csv.ends_with("\r\n"));
    }

    #[test]
    fn html_export_is_printable_and_escaped() {
        let mut report = sample_report();
        report.sections.push(ReportSection::text(
            "Notes",
            vec!["a < b & c".to_string()],
        ));
        let html = to_html(&report);
        assert!(html.contains("window.print()"));
        assert!(html.contains("<h1>Compliance Summary Report</h1>"));
        assert!(html.contains("a &lt; b &amp; c"));
        assert!(html.contains("Generated by RACAP"));
    }

    #[test]
    fn text_export_shape() {
        let text = to_text(&sample_report());
        let underline = "=".repeat("Compliance Summary Report".len());
        assert!(text.starts_with(&format!("Compliance Summary Report\n{underline}\n")));
        assert!(text.contains("Generated At: 2025-11-16 10:30 UTC"));
        let dashes = "-".repeat("Top Failed Controls".len());
        assert!(text.contains(&format!("\nTop Failed Controls\n{dashes}\n")));
    }

    #[test]
    fn json_export_round_trips() {
        let report = sample_report();
        let json = to_json(&report).expect("serialize");
        let parsed: ReportData = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed, report);
    }

    #[test]
    fn host_report_lists_failing_rule_remediation() {
        let detail = data::find_host_detail("2").expect("host 2");
        let report = host_report(&detail, &sample_user(), datetime!(2025-11-16 10:30 UTC));
        assert_eq!(report.subtitle.as_deref(), Some(detail.hostname.as_str()));
        assert!(report
            .sections
            .iter()
            .any(|s| s.title == "Remediation"));
    }

    #[test]
    fn trend_report_has_one_row_per_day() {
        let report = trend_report(
            &data::hosts(),
            10,
            &sample_user(),
            datetime!(2025-11-16 10:30 UTC),
        );
        let Some(ReportSection {
            content: crate::core::SectionContent::Table { rows, .. },
            ..
        }) = report.sections.first()
        else {
            panic!("missing table section");
        };
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[9][1], "74%");
    }
}
