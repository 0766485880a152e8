use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::core::{
    AssetRisk, AssetStatus, AssetType, IssueStatus, Location, LocationFilter, Severity,
};
use crate::filter::{AssetFilter, HostFilter, IssueFilter, ScoreRange};
use crate::state::{AppState, GatedOutcome, ToggleOutcome};
use crate::store::FileStore;
use crate::ui::UiConfig;

#[derive(Debug, Parser)]
#[command(
    name = "racap",
    version,
    about = "Role-aware compliance dashboard: hosts, rules, audit trail and report export"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
    #[arg(long, global = true)]
    pub verbose: bool,
    #[arg(long, global = true)]
    pub quiet: bool,
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
    /// Act as this roster user (id or name) for this invocation.
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Dashboard(DashboardArgs),
    Hosts(HostsArgs),
    Assets(AssetsArgs),
    Issues(IssuesArgs),
    Rules(RulesArgs),
    Audit(AuditArgs),
    Report(ReportArgs),
    Rescan(RescanArgs),
    User(UserArgs),
    Ui(UiArgs),
    Completion(CompletionArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    #[arg(long, default_value_t = 10)]
    pub trend_days: usize,
}

#[derive(Debug, Args)]
pub struct HostsArgs {
    #[command(subcommand)]
    pub command: Option<HostsCommand>,

    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub os: Option<String>,
    /// Score bucket: 90-100%, 70-89%, 50-69% or "Below 50%".
    #[arg(long)]
    pub scores: Option<String>,
    /// Glob over the hostname, e.g. "prod-*".
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum HostsCommand {
    Show { id: String },
}

#[derive(Debug, Args)]
pub struct AssetsArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long = "type")]
    pub asset_type: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub risk: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Debug, Args)]
pub struct IssuesArgs {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub severity: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: Option<RulesCommand>,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    List,
    Toggle {
        #[arg(long)]
        rule: String,
        #[arg(long)]
        location: String,
    },
    Reset,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    #[command(subcommand)]
    pub command: Option<AuditCommand>,
}

#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    Show {
        #[arg(long, default_value_t = crate::audit::DISPLAY_COUNT)]
        count: usize,
        /// Only entries recorded by this user name. Distinct from the global
        /// `--user`, which selects who you act as.
        #[arg(long = "by-user")]
        by_user: Option<String>,
        #[arg(long)]
        action: Option<String>,
        /// RFC 3339 timestamp or YYYY-MM-DD date.
        #[arg(long)]
        since: Option<String>,
        #[arg(long)]
        until: Option<String>,
    },
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Clear,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    Compliance {
        #[arg(long, default_value = "html")]
        format: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Host {
        id: String,
        #[arg(long, default_value = "text")]
        format: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Trend {
        #[arg(long, default_value_t = 10)]
        days: usize,
        #[arg(long, default_value = "text")]
        format: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct RescanArgs {
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: Option<UserCommand>,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    Show,
    Switch { query: String },
}

#[derive(Debug, Args)]
pub struct UiArgs {}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    pub shell: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(long)]
    pub show: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let stdin_is_tty = io::stdin().is_terminal();
    let stdout_is_tty = io::stdout().is_terminal();
    let stderr_is_tty = io::stderr().is_terminal();

    let home_dir = std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("environment variable HOME is not set"))?;

    let env_config_path = std::env::var_os("RACAP_CONFIG").map(PathBuf::from);
    let cfg = crate::config::load(
        cli.config.as_deref().or(env_config_path.as_deref()),
        &home_dir,
    )
    .map_err(crate::exit::invalid_args_err)?;

    let color = stdout_is_tty && cfg.ui.color && !cli.no_color;

    let ui_cfg = UiConfig {
        color,
        stdin_is_tty,
        stdout_is_tty,
        stderr_is_tty,
        max_table_rows: cfg.ui.max_table_rows,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| cfg.data.dir.clone());
    let store = FileStore::new(&data_dir);
    let mut state = AppState::load(Box::new(store)).map_err(crate::exit::store_failed_err)?;

    if let Some(query) = cli.user.as_deref().or(cfg.session.default_user.as_deref()) {
        if state.switch_user(query)?.is_none() {
            return Err(crate::exit::invalid_args(format!(
                "unknown user: {query} (use `racap user show` to list the roster)"
            )));
        }
    }

    match cli.command {
        Commands::Dashboard(args) => {
            let hosts = crate::data::hosts();
            let issues = crate::data::issues();
            let summary = crate::metrics::dashboard_summary(&hosts, &issues);
            let severity_rows =
                crate::metrics::severity_breakdown(&issues, crate::data::TOTAL_ENDPOINTS);
            let top = crate::metrics::top_failed_controls(&issues);
            let trend = crate::metrics::trend_series(
                summary.overall_compliance,
                args.trend_days,
                OffsetDateTime::now_utc().date(),
            );

            if cli.json {
                write_json(&serde_json::json!({
                    "summary": summary,
                    "severityData": severity_rows,
                    "topFailedControls": top,
                    "trend": trend,
                }))?;
            } else {
                crate::ui::print_dashboard(
                    &summary,
                    &severity_rows,
                    &top,
                    &trend,
                    state.current_user(),
                    state.selected_location(),
                    &ui_cfg,
                );
            }
        }
        Commands::Hosts(args) => match args.command {
            Some(HostsCommand::Show { id }) => {
                let Some(detail) = crate::data::find_host_detail(&id) else {
                    return Err(crate::exit::not_found(format!(
                        "host not found: {id} (use `racap hosts` to list hosts)"
                    )));
                };
                if cli.json {
                    write_json(&detail)?;
                } else {
                    crate::ui::print_host_detail(&detail, &ui_cfg);
                }
            }
            None => {
                let mut filter = HostFilter::new();
                if let Some(search) = args.search {
                    filter = filter.search(search);
                }
                if let Some(os) = args.os {
                    filter = filter.os(os);
                }
                if let Some(scores) = args.scores {
                    let range = scores
                        .parse::<ScoreRange>()
                        .map_err(crate::exit::invalid_args)?;
                    filter = filter.scores(range);
                }
                if let Some(pattern) = args.pattern {
                    filter = filter
                        .hostname_pattern(&pattern)
                        .map_err(crate::exit::invalid_args_err)?;
                }
                let hosts = filter.apply(&crate::data::hosts());
                if cli.json {
                    write_json(&hosts)?;
                } else {
                    crate::ui::print_hosts(&hosts, &ui_cfg);
                }
            }
        },
        Commands::Assets(args) => {
            let mut filter = AssetFilter::new();
            if let Some(search) = args.search {
                filter = filter.search(search);
            }
            if let Some(asset_type) = args.asset_type {
                let t = asset_type
                    .parse::<AssetType>()
                    .map_err(crate::exit::invalid_args)?;
                filter = filter.asset_type(t);
            }
            if let Some(status) = args.status {
                let s = status
                    .parse::<AssetStatus>()
                    .map_err(crate::exit::invalid_args)?;
                filter = filter.status(s);
            }
            if let Some(risk) = args.risk {
                let r = risk
                    .parse::<AssetRisk>()
                    .map_err(crate::exit::invalid_args)?;
                filter = filter.risk(r);
            }
            if let Some(location) = args.location {
                let loc = location
                    .parse::<Location>()
                    .map_err(crate::exit::invalid_args)?;
                filter = filter.location_code(loc.to_string());
            }
            let assets = filter.apply(&crate::data::assets());
            if cli.json {
                write_json(&assets)?;
            } else {
                crate::ui::print_assets(&assets, &ui_cfg);
            }
        }
        Commands::Issues(args) => {
            let mut filter = IssueFilter::new();
            if let Some(search) = args.search {
                filter = filter.search(search);
            }
            if let Some(severity) = args.severity {
                let s = severity
                    .parse::<Severity>()
                    .map_err(crate::exit::invalid_args)?;
                filter = filter.severity(s);
            }
            if let Some(status) = args.status {
                let s = status
                    .parse::<IssueStatus>()
                    .map_err(crate::exit::invalid_args)?;
                filter = filter.status(s);
            }
            let issues = filter.apply(&crate::data::issues());
            if cli.json {
                write_json(&issues)?;
            } else {
                crate::ui::print_issues(&issues, &ui_cfg);
            }
        }
        Commands::Rules(args) => match args.command.unwrap_or(RulesCommand::List) {
            RulesCommand::List => {
                if cli.json {
                    write_json(&state.rules())?;
                } else {
                    crate::ui::print_rules(state.rules(), &ui_cfg);
                }
            }
            RulesCommand::Toggle { rule, location } => {
                let location = location
                    .parse::<Location>()
                    .map_err(crate::exit::invalid_args)?;
                match state.toggle_rule_location(&rule, location)? {
                    ToggleOutcome::Applied {
                        rule_code,
                        location,
                        new_state,
                        ..
                    } => {
                        if !ui_cfg.quiet {
                            let verb = if new_state { "enabled" } else { "disabled" };
                            println!("{rule_code} {verb} for {location}");
                        }
                    }
                    ToggleOutcome::Denied => {
                        return Err(crate::exit::permission_denied(format!(
                            "{} ({}) is not allowed to manage rules; the attempt was logged",
                            state.current_user().name,
                            state.current_user().role.as_str()
                        )));
                    }
                    ToggleOutcome::NotFound => {
                        return Err(crate::exit::not_found(format!(
                            "rule not found: {rule} (use `racap rules` to list rules)"
                        )));
                    }
                }
            }
            RulesCommand::Reset => match state.reset_compliance_rules()? {
                GatedOutcome::Applied => {
                    if !ui_cfg.quiet {
                        println!("All compliance rules reset to defaults");
                    }
                }
                GatedOutcome::Denied => {
                    return Err(crate::exit::permission_denied(format!(
                        "{} ({}) is not allowed to reset rules",
                        state.current_user().name,
                        state.current_user().role.as_str()
                    )));
                }
            },
        },
        Commands::Audit(args) => {
            match args.command.unwrap_or(AuditCommand::Show {
                count: crate::audit::DISPLAY_COUNT,
                by_user: None,
                action: None,
                since: None,
                until: None,
            }) {
                AuditCommand::Show {
                    count,
                    by_user,
                    action,
                    since,
                    until,
                } => {
                    if !state.has_permission(crate::perm::Capability::CanViewAuditLogs) {
                        return Err(crate::exit::permission_denied(format!(
                            "{} ({}) is not allowed to view the audit log",
                            state.current_user().name,
                            state.current_user().role.as_str()
                        )));
                    }
                    let total = state.audit().len();
                    // Predicates apply to the whole retained log; count only
                    // bounds what is shown.
                    let range = if since.is_some() || until.is_some() {
                        let start = match since.as_deref() {
                            Some(s) => parse_timestamp(s, false)?,
                            None => OffsetDateTime::UNIX_EPOCH,
                        };
                        let end = match until.as_deref() {
                            Some(s) => parse_timestamp(s, true)?,
                            None => OffsetDateTime::now_utc(),
                        };
                        Some((start, end))
                    } else {
                        None
                    };
                    let mut entries =
                        state
                            .audit()
                            .query(by_user.as_deref(), action.as_deref(), range);
                    entries.truncate(count);
                    if cli.json {
                        write_json(&entries)?;
                    } else {
                        crate::ui::print_audit(&entries, total, &ui_cfg);
                    }
                }
                AuditCommand::Export { output } => {
                    if !state.has_permission(crate::perm::Capability::CanExport) {
                        return Err(crate::exit::permission_denied(format!(
                            "{} ({}) is not allowed to export",
                            state.current_user().name,
                            state.current_user().role.as_str()
                        )));
                    }
                    let json = state.audit().export_json()?;
                    write_output(output.as_deref(), &json, &ui_cfg)?;
                }
                AuditCommand::Clear => match state.clear_audit_log()? {
                    GatedOutcome::Applied => {
                        if !ui_cfg.quiet {
                            println!("Audit log cleared");
                        }
                    }
                    GatedOutcome::Denied => {
                        return Err(crate::exit::permission_denied(format!(
                            "{} ({}) is not allowed to clear the audit log",
                            state.current_user().name,
                            state.current_user().role.as_str()
                        )));
                    }
                },
            }
        }
        Commands::Report(args) => {
            let (format, output) = match &args.command {
                ReportCommand::Compliance { format, output }
                | ReportCommand::Host { format, output, .. }
                | ReportCommand::Trend { format, output, .. } => (
                    format
                        .parse::<crate::report::ReportFormat>()
                        .map_err(crate::exit::invalid_args)?,
                    output.clone(),
                ),
            };

            let now = OffsetDateTime::now_utc();
            let (report, name) = match &args.command {
                ReportCommand::Compliance { .. } => (
                    crate::report::compliance_report(
                        &crate::data::hosts(),
                        &crate::data::issues(),
                        state.rules(),
                        state.current_user(),
                        state.selected_location(),
                        now,
                    ),
                    "Compliance Summary Report",
                ),
                ReportCommand::Host { id, .. } => {
                    let Some(detail) = crate::data::find_host_detail(id) else {
                        return Err(crate::exit::not_found(format!(
                            "host not found: {id} (use `racap hosts` to list hosts)"
                        )));
                    };
                    (
                        crate::report::host_report(&detail, state.current_user(), now),
                        "Host Compliance Report",
                    )
                }
                ReportCommand::Trend { days, .. } => (
                    crate::report::trend_report(
                        &crate::data::hosts(),
                        *days,
                        state.current_user(),
                        now,
                    ),
                    "Compliance Trend Report",
                ),
            };

            let mut report = report;
            if !cfg.report.include_metadata {
                report.metadata.clear();
            }

            if state.record_report_generated(name)? == GatedOutcome::Denied {
                return Err(crate::exit::permission_denied(format!(
                    "{} ({}) is not allowed to generate reports",
                    state.current_user().name,
                    state.current_user().role.as_str()
                )));
            }

            run_with_spinner(&ui_cfg, cli.json, "Generating report...", || {
                std::thread::sleep(Duration::from_millis(600));
            });

            let rendered = match format {
                crate::report::ReportFormat::Html => crate::report::to_html(&report),
                crate::report::ReportFormat::Csv => crate::report::to_csv(&report),
                crate::report::ReportFormat::Json => crate::report::to_json(&report)?,
                crate::report::ReportFormat::Text => crate::report::to_text(&report),
            };
            write_output(output.as_deref(), &rendered, &ui_cfg)?;
        }
        Commands::Rescan(args) => {
            if let Some(location) = args.location {
                let filter = location
                    .parse::<LocationFilter>()
                    .map_err(crate::exit::invalid_args)?;
                state.set_selected_location(filter)?;
            }
            match state.record_rescan()? {
                GatedOutcome::Applied => {
                    run_with_spinner(&ui_cfg, cli.json, "Rescanning endpoints...", || {
                        std::thread::sleep(Duration::from_millis(1500));
                    });
                    if !ui_cfg.quiet {
                        println!(
                            "Rescan complete for {} ({} endpoints)",
                            state.selected_location(),
                            crate::data::TOTAL_ENDPOINTS
                        );
                    }
                }
                GatedOutcome::Denied => {
                    return Err(crate::exit::permission_denied(format!(
                        "{} ({}) is not allowed to trigger a rescan",
                        state.current_user().name,
                        state.current_user().role.as_str()
                    )));
                }
            }
        }
        Commands::User(args) => match args.command.unwrap_or(UserCommand::Show) {
            UserCommand::Show => {
                let roster = crate::data::users();
                if cli.json {
                    write_json(&serde_json::json!({
                        "current": state.current_user(),
                        "users": roster,
                    }))?;
                } else {
                    crate::ui::print_users(&roster, state.current_user(), &ui_cfg);
                }
            }
            UserCommand::Switch { query } => {
                let Some(user) = state.switch_user(&query)? else {
                    return Err(crate::exit::invalid_args(format!(
                        "unknown user: {query} (use `racap user show` to list the roster)"
                    )));
                };
                if !ui_cfg.quiet {
                    println!("Now acting as {} ({})", user.name, user.role.as_str());
                }
            }
        },
        Commands::Ui(_args) => {
            if cli.json {
                return Err(crate::exit::invalid_args("ui cannot be combined with --json"));
            }
            if !(ui_cfg.stdin_is_tty && ui_cfg.stdout_is_tty) {
                return Err(crate::exit::invalid_args(
                    "ui requires a TTY (stdin + stdout)",
                ));
            }
            crate::tui::run(state, ui_cfg.color)?;
        }
        Commands::Completion(_args) => {
            let shell = parse_shell(&_args.shell)?;
            let mut cmd = Cli::command();
            let mut out = std::io::stdout().lock();
            clap_complete::generate(shell, &mut cmd, "racap", &mut out);
        }
        Commands::Config(_args) => {
            if _args.show {
                if cli.json {
                    let stdout = std::io::stdout();
                    serde_json::to_writer_pretty(stdout.lock(), &cfg)?;
                } else {
                    println!("{}", toml::to_string_pretty(&cfg)?);
                }
            } else if !ui_cfg.quiet {
                eprintln!("config: use `racap config --show`");
            }
        }
    }

    Ok(())
}

fn run_with_spinner(ui_cfg: &UiConfig, json: bool, message: &str, work: impl FnOnce()) {
    let progress_enabled = ui_cfg.stderr_is_tty && !ui_cfg.quiet && !json;
    let pb = if progress_enabled {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };
    work();
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}

fn write_json<T: serde::Serialize>(value: &T) -> Result<()> {
    use std::io::Write;

    let buf = serde_json::to_vec_pretty(value)?;

    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(&buf) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => return Ok(()),
        Err(err) => return Err(err.into()),
    }
    match stdout.write_all(b"\n") {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn write_output(path: Option<&std::path::Path>, content: &str, ui_cfg: &UiConfig) -> Result<()> {
    use std::io::Write;

    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !ui_cfg.quiet {
                eprintln!("Wrote {}", path.display());
            }
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            match stdout.write_all(content.as_bytes()) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                Err(err) => Err(err.into()),
            }
        }
    }
}

/// Accepts an RFC 3339 timestamp or a bare date. A bare date maps to the
/// start of the day, or the end of it when used as an upper bound.
fn parse_timestamp(s: &str, end_of_day: bool) -> Result<OffsetDateTime> {
    let s = s.trim();
    if let Ok(ts) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(ts);
    }
    let date_fmt = format_description!("[year]-[month]-[day]");
    let date = time::Date::parse(s, &date_fmt).map_err(|_| {
        crate::exit::invalid_args(format!(
            "invalid timestamp: {s} (expected RFC 3339 or YYYY-MM-DD)"
        ))
    })?;
    let time = if end_of_day {
        time::Time::from_hms_nano(23, 59, 59, 999_999_999)
    } else {
        time::Time::from_hms(0, 0, 0)
    }
    .map_err(|e| anyhow::anyhow!("invalid time component: {e}"))?;
    Ok(date.with_time(time).assume_utc())
}

fn parse_shell(s: &str) -> Result<clap_complete::Shell> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        "fish" => Ok(clap_complete::Shell::Fish),
        other => Err(crate::exit::invalid_args(format!(
            "unsupported shell: {other} (expected bash|zsh|fish)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_rule_toggle() {
        let cli = Cli::try_parse_from([
            "racap", "rules", "toggle", "--rule", "CIS-1.3", "--location", "DEL",
        ])
        .expect("parse");
        let Commands::Rules(args) = cli.command else {
            panic!("expected rules subcommand");
        };
        let Some(RulesCommand::Toggle { rule, location }) = args.command else {
            panic!("expected toggle");
        };
        assert_eq!(rule, "CIS-1.3");
        assert_eq!(location, "DEL");
    }

    #[test]
    fn cli_global_flags_apply_anywhere() {
        let cli = Cli::try_parse_from(["racap", "dashboard", "--json", "--user", "3"])
            .expect("parse");
        assert!(cli.json);
        assert_eq!(cli.user.as_deref(), Some("3"));
    }

    #[test]
    fn parse_timestamp_accepts_both_shapes() {
        let ts = parse_timestamp("2025-11-16T10:30:00Z", false).expect("rfc3339");
        assert_eq!(ts.date().to_string(), "2025-11-16");
        let start = parse_timestamp("2025-11-16", false).expect("date");
        let end = parse_timestamp("2025-11-16", true).expect("date");
        assert!(start < end);
        assert!(parse_timestamp("yesterday", false).is_err());
    }

    #[test]
    fn parse_shell_rejects_unknown() {
        assert!(parse_shell("zsh").is_ok());
        assert!(parse_shell("powershell").is_err());
    }
}
