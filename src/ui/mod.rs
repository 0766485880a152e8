use anyhow::Error;
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

use crate::core::{
    Asset, AuditLogEntry, ComplianceRule, Host, HostDetail, Issue, Location, LocationFilter,
    RuleStatus, Severity, User,
};
use crate::metrics::{DashboardSummary, TrendPoint};

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub color: bool,
    pub stdin_is_tty: bool,
    pub stdout_is_tty: bool,
    pub stderr_is_tty: bool,
    pub max_table_rows: usize,
    pub quiet: bool,
    pub verbose: bool,
}

pub fn eprintln_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "Error:");
    let _ = writeln!(stderr, "  {err}");

    let mut causes = err.chain().skip(1).peekable();
    if causes.peek().is_some() {
        let _ = writeln!(stderr, "Caused by:");
        for cause in causes {
            let _ = writeln!(stderr, "  - {cause}");
        }
    }

    let _ = writeln!(stderr, "Next:");
    let _ = writeln!(stderr, "  - re-run with `--verbose` for more detail");
    let _ = writeln!(
        stderr,
        "  - see `racap --help` for available commands and options"
    );
}

pub fn print_dashboard(
    summary: &DashboardSummary,
    severity_rows: &[crate::core::SeverityRow],
    top_failed: &[Issue],
    trend: &[TrendPoint],
    current_user: &User,
    location: LocationFilter,
    cfg: &UiConfig,
) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let _ = writeln!(
        out,
        "Signed in as {} ({})  location={location}",
        current_user.name,
        current_user.role.as_str()
    );
    let _ = writeln!(
        out,
        "Overall compliance: {}%  hosts scanned: {}  critical failures: {}  open issues: {}",
        summary.overall_compliance,
        summary.hosts_scanned,
        summary.critical_failures,
        summary.open_issues
    );

    if !severity_rows.is_empty() {
        let _ = writeln!(out, "\nBy severity:");
        let headers = ["Severity", "Passed", "Failed", "Compliance"];
        let rows: Vec<Vec<String>> = severity_rows
            .iter()
            .map(|r| {
                vec![
                    color_severity_label(&r.severity, cfg.color),
                    r.passed.to_string(),
                    r.failed.to_string(),
                    format!("{}%", r.compliance_pct()),
                ]
            })
            .collect();
        print_table(&mut out, &headers, &rows);
    }

    if !top_failed.is_empty() {
        let _ = writeln!(out, "\nTop failed controls:");
        for issue in top_failed {
            let sev = format_severity(issue.severity, cfg.color);
            let _ = writeln!(
                out,
                "- {} [{}] {} (hosts affected: {})",
                issue.rule_id, sev, issue.description, issue.hosts_affected
            );
        }
    }

    if !trend.is_empty() {
        let _ = writeln!(out, "\nTrend (last {} days):", trend.len());
        let line = trend
            .iter()
            .map(|p| format!("{} {}%", p.date, p.score))
            .collect::<Vec<_>>()
            .join("  |  ");
        let _ = writeln!(out, "{line}");
    }
}

pub fn print_rules(rules: &[ComplianceRule], cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let total = rules.len();
    let shown = total.min(cfg.max_table_rows.max(1));
    if total > shown {
        let _ = writeln!(out, "Compliance rules ({shown} of {total}):");
    } else {
        let _ = writeln!(out, "Compliance rules ({total}):");
    }

    let headers = [
        "Rule", "Framework", "Severity", "DEL", "MUM", "BLR", "HYD", "Description",
    ];
    let rows: Vec<Vec<String>> = rules
        .iter()
        .take(shown)
        .map(|r| {
            let flag = |loc: Location| {
                if r.locations.get(loc) { "on" } else { "off" }.to_string()
            };
            vec![
                r.code.clone(),
                r.framework.to_string(),
                format_severity(r.severity, cfg.color),
                flag(Location::Del),
                flag(Location::Mum),
                flag(Location::Blr),
                flag(Location::Hyd),
                r.description.clone(),
            ]
        })
        .collect();
    print_table(&mut out, &headers, &rows);
}

pub fn print_hosts(hosts: &[Host], cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let total = hosts.len();
    let shown = total.min(cfg.max_table_rows.max(1));
    if total > shown {
        let _ = writeln!(out, "Hosts ({shown} of {total}):");
    } else {
        let _ = writeln!(out, "Hosts ({total}):");
    }

    let headers = ["Id", "Hostname", "OS", "Score", "Critical Failed", "Last Seen"];
    let rows: Vec<Vec<String>> = hosts
        .iter()
        .take(shown)
        .map(|h| {
            vec![
                h.id.clone(),
                h.hostname.clone(),
                h.os.clone(),
                format_score(h.score, cfg.color),
                h.critical_failed
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                h.last_seen.clone(),
            ]
        })
        .collect();
    print_table(&mut out, &headers, &rows);
}

pub fn print_host_detail(detail: &HostDetail, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}  [{}]", detail.hostname, detail.location);
    let _ = writeln!(
        out,
        "os={}  ip={}  domain={}  score={}",
        detail.os,
        detail.ip_address,
        detail.domain,
        format_score(detail.score, cfg.color)
    );
    let _ = writeln!(
        out,
        "cpu={}  memory={}  disk={}  uptime={}",
        detail.cpu, detail.memory, detail.disk, detail.uptime
    );
    if !detail.tags.is_empty() {
        let _ = writeln!(out, "tags: {}", detail.tags.join(", "));
    }

    if !detail.evaluated_rules.is_empty() {
        let _ = writeln!(out, "\nEvaluated rules:");
        let headers = ["Rule", "Status", "Severity", "Expected", "Actual"];
        let rows: Vec<Vec<String>> = detail
            .evaluated_rules
            .iter()
            .map(|r| {
                vec![
                    r.rule_id.clone(),
                    format_rule_status(r.status, cfg.color),
                    format_severity(r.severity, cfg.color),
                    r.expected.clone(),
                    r.actual.clone(),
                ]
            })
            .collect();
        print_table(&mut out, &headers, &rows);
    }

    if cfg.verbose && !detail.recent_activity.is_empty() {
        let _ = writeln!(out, "\nRecent activity:");
        for activity in &detail.recent_activity {
            let _ = writeln!(
                out,
                "- [{}] {}: {}",
                activity.timestamp, activity.activity_type, activity.details
            );
        }
    }
}

pub fn print_assets(assets: &[Asset], cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let total = assets.len();
    let shown = total.min(cfg.max_table_rows.max(1));
    if total > shown {
        let _ = writeln!(out, "Assets ({shown} of {total}):");
    } else {
        let _ = writeln!(out, "Assets ({total}):");
    }

    let headers = [
        "Asset Id", "Hostname", "Type", "Owner", "Status", "Risk", "Score",
    ];
    let rows: Vec<Vec<String>> = assets
        .iter()
        .take(shown)
        .map(|a| {
            vec![
                a.asset_id.clone(),
                a.hostname.clone(),
                a.asset_type.to_string(),
                a.owner.clone(),
                a.status.to_string(),
                a.risk.to_string(),
                format_score(a.score, cfg.color),
            ]
        })
        .collect();
    print_table(&mut out, &headers, &rows);
}

pub fn print_issues(issues: &[Issue], cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let total = issues.len();
    let shown = total.min(cfg.max_table_rows.max(1));
    if total > shown {
        let _ = writeln!(out, "Issues ({shown} of {total}):");
    } else {
        let _ = writeln!(out, "Issues ({total}):");
    }

    let headers = [
        "Rule", "Severity", "Status", "Hosts", "First Detected", "Description",
    ];
    let rows: Vec<Vec<String>> = issues
        .iter()
        .take(shown)
        .map(|i| {
            vec![
                i.rule_id.clone(),
                format_severity(i.severity, cfg.color),
                i.status.to_string(),
                i.hosts_affected.to_string(),
                i.first_detected.clone(),
                i.description.clone(),
            ]
        })
        .collect();
    print_table(&mut out, &headers, &rows);
}

pub fn print_audit(entries: &[&AuditLogEntry], total: usize, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    if total > entries.len() {
        let _ = writeln!(out, "Audit log ({} of {total} entries, newest first):", entries.len());
    } else {
        let _ = writeln!(out, "Audit log ({total} entries, newest first):");
    }

    for entry in entries {
        let _ = writeln!(
            out,
            "- [{}] {} by {} ({})",
            entry.timestamp, entry.action, entry.user_name, entry.role
        );
        let _ = writeln!(out, "  {}", entry.details);
        if cfg.verbose && !entry.metadata.is_empty() {
            for (key, value) in &entry.metadata {
                let _ = writeln!(out, "  {key}={value}");
            }
        }
    }
}

pub fn print_users(roster: &[User], current: &User, cfg: &UiConfig) {
    if cfg.quiet {
        return;
    }

    let mut out = io::stdout().lock();
    let _ = writeln!(out, "Users:");
    let headers = ["", "Id", "Name", "Role", "Email"];
    let rows: Vec<Vec<String>> = roster
        .iter()
        .map(|u| {
            let marker = if u.id == current.id { "*" } else { "" };
            vec![
                marker.to_string(),
                u.id.clone(),
                u.name.clone(),
                u.role.as_str().to_string(),
                u.email.clone(),
            ]
        })
        .collect();
    print_table(&mut out, &headers, &rows);
}

fn print_table(out: &mut dyn Write, headers: &[&str], rows: &[Vec<String>]) {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| visible_width_ansi(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(visible_width_ansi(cell));
        }
    }

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| pad_end_ansi(h, widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", header_line.trim_end());
    let rule_line = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", rule_line.trim_end());

    for row in rows {
        let line = row
            .iter()
            .enumerate()
            .take(cols)
            .map(|(i, cell)| pad_end_ansi(cell, widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

pub fn format_severity(severity: Severity, color: bool) -> String {
    let s = severity.label();
    if !color {
        return s.to_string();
    }
    let code = match severity {
        Severity::Critical => "31",
        Severity::High => "33",
        Severity::Medium => "36",
        Severity::Low => "90",
    };
    format!("\x1b[{code}m{s}\x1b[0m")
}

fn color_severity_label(label: &str, color: bool) -> String {
    match label.parse::<Severity>() {
        Ok(severity) => format_severity(severity, color),
        Err(_) => label.to_string(),
    }
}

fn format_rule_status(status: RuleStatus, color: bool) -> String {
    let s = status.as_str();
    if !color {
        return s.to_string();
    }
    let code = match status {
        RuleStatus::Pass => "32",
        RuleStatus::Fail => "31",
    };
    format!("\x1b[{code}m{s}\x1b[0m")
}

fn format_score(score: u32, color: bool) -> String {
    let s = format!("{score}%");
    if !color {
        return s;
    }
    let code = if score >= 90 {
        "32"
    } else if score >= 70 {
        "33"
    } else {
        "31"
    };
    format!("\x1b[{code}m{s}\x1b[0m")
}

fn pad_end_ansi(s: &str, width: usize) -> String {
    let w = visible_width_ansi(s);
    if w >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - w))
}

fn visible_width_ansi(s: &str) -> usize {
    let mut width: usize = 0;
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.peek() == Some(&'[') {
                let _ = chars.next();
                for ch2 in chars.by_ref() {
                    if ch2 == 'm' {
                        break;
                    }
                }
                continue;
            }
        }
        width = width.saturating_add(UnicodeWidthChar::width(ch).unwrap_or(0));
    }
    width
}
