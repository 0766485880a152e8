use std::io;
use std::panic;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};

use crate::core::{Location, Severity};
use crate::state::{AppState, GatedOutcome, ToggleOutcome};

pub fn run(state: AppState, color: bool) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter the alternate screen")?;

    let mut tui = Tui {
        terminal: Terminal::new(CrosstermBackend::new(stdout))
            .context("failed to initialize the terminal")?,
    };
    tui.terminal.clear().ok();

    let res = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        run_app(&mut tui.terminal, state, color)
    }));

    let _ = tui.terminal.show_cursor();
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);

    match res {
        Ok(res) => res,
        Err(_) => Err(anyhow::anyhow!(
            "the TUI panicked (the terminal state should have been restored)"
        )),
    }
}

struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Overview = 0,
    Rules = 1,
    Audit = 2,
    Hosts = 3,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Overview, Tab::Rules, Tab::Audit, Tab::Hosts];

    fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Rules => "Rules",
            Tab::Audit => "Audit",
            Tab::Hosts => "Hosts",
        }
    }

    fn next(self) -> Self {
        match self {
            Tab::Overview => Tab::Rules,
            Tab::Rules => Tab::Audit,
            Tab::Audit => Tab::Hosts,
            Tab::Hosts => Tab::Overview,
        }
    }

    fn prev(self) -> Self {
        match self {
            Tab::Overview => Tab::Hosts,
            Tab::Rules => Tab::Overview,
            Tab::Audit => Tab::Rules,
            Tab::Hosts => Tab::Audit,
        }
    }
}

struct App {
    state: AppState,
    color: bool,
    tab: Tab,
    rules_state: ListState,
    hosts_state: ListState,
    audit_scroll: u16,
    status: Option<String>,
}

impl App {
    fn new(state: AppState, color: bool) -> Self {
        let mut rules_state = ListState::default();
        rules_state.select(Some(0));
        let mut hosts_state = ListState::default();
        hosts_state.select(Some(0));
        Self {
            state,
            color,
            tab: Tab::Overview,
            rules_state,
            hosts_state,
            audit_scroll: 0,
            status: None,
        }
    }

    fn selected_rule_code(&self) -> Option<String> {
        let idx = self.rules_state.selected()?;
        self.state.rules().get(idx).map(|r| r.code.clone())
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: AppState,
    color: bool,
) -> Result<()> {
    let mut app = App::new(state, color);

    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal
            .draw(|f| draw(f, &mut app))
            .context("failed to draw the screen")?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("failed to poll for events")? {
            match event::read().context("failed to read an event")? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && handle_key(&mut app, key)? {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Tab | KeyCode::Right => {
            app.tab = app.tab.next();
            app.status = None;
        }
        KeyCode::BackTab | KeyCode::Left => {
            app.tab = app.tab.prev();
            app.status = None;
        }
        KeyCode::Down | KeyCode::Char('j') => match app.tab {
            Tab::Rules => select_next(&mut app.rules_state, app.state.rules().len()),
            Tab::Hosts => select_next(&mut app.hosts_state, crate::data::hosts().len()),
            Tab::Audit => app.audit_scroll = app.audit_scroll.saturating_add(1),
            Tab::Overview => {}
        },
        KeyCode::Up | KeyCode::Char('k') => match app.tab {
            Tab::Rules => select_prev(&mut app.rules_state),
            Tab::Hosts => select_prev(&mut app.hosts_state),
            Tab::Audit => app.audit_scroll = app.audit_scroll.saturating_sub(1),
            Tab::Overview => {}
        },
        KeyCode::Char(c @ ('1' | '2' | '3' | '4')) if app.tab == Tab::Rules => {
            let location = match c {
                '1' => Location::Del,
                '2' => Location::Mum,
                '3' => Location::Blr,
                _ => Location::Hyd,
            };
            toggle_selected_rule(app, location)?;
        }
        KeyCode::Char('r') if app.tab == Tab::Rules => {
            match app.state.reset_compliance_rules()? {
                GatedOutcome::Applied => {
                    app.status = Some("All rules reset to defaults".to_string());
                }
                GatedOutcome::Denied => {
                    app.status = Some(format!(
                        "Permission denied: {} cannot reset rules",
                        app.state.current_user().role.as_str()
                    ));
                }
            }
        }
        _ => {}
    }

    Ok(false)
}

fn toggle_selected_rule(app: &mut App, location: Location) -> Result<()> {
    let Some(code) = app.selected_rule_code() else {
        return Ok(());
    };
    match app.state.toggle_rule_location(&code, location)? {
        ToggleOutcome::Applied {
            rule_code,
            location,
            new_state,
            ..
        } => {
            let verb = if new_state { "enabled" } else { "disabled" };
            app.status = Some(format!("{rule_code} {verb} for {location}"));
        }
        ToggleOutcome::Denied => {
            app.status = Some(format!(
                "Permission denied: {} cannot manage rules (logged)",
                app.state.current_user().role.as_str()
            ));
        }
        ToggleOutcome::NotFound => {
            app.status = Some(format!("Rule not found: {code}"));
        }
    }
    Ok(())
}

fn select_next(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let next = match state.selected() {
        Some(i) if i + 1 < len => i + 1,
        Some(i) => i,
        None => 0,
    };
    state.select(Some(next));
}

fn select_prev(state: &mut ListState) {
    let prev = state.selected().map(|i| i.saturating_sub(1)).unwrap_or(0);
    state.select(Some(prev));
}

fn draw(f: &mut ratatui::Frame, app: &mut App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_footer(f, chunks[2], app);

    match app.tab {
        Tab::Overview => draw_overview(f, chunks[1], app),
        Tab::Rules => draw_rules(f, chunks[1], app),
        Tab::Audit => draw_audit(f, chunks[1], app),
        Tab::Hosts => draw_hosts(f, chunks[1], app),
    }
}

fn draw_header(f: &mut ratatui::Frame, area: Rect, app: &App) {
    let user = app.state.current_user();
    let line = Line::from(vec![
        Span::styled("racap", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(
            format!("{} ({})", user.name, user.role.as_str()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!("location={}", app.state.selected_location()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab as usize)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area.inner(&ratatui::layout::Margin {
            horizontal: 1,
            vertical: 1,
        }));

    f.render_widget(Block::default().borders(Borders::ALL), area);
    f.render_widget(Paragraph::new(line), inner[0]);
    f.render_widget(tabs, inner[1]);
}

fn draw_footer(f: &mut ratatui::Frame, area: Rect, app: &App) {
    let hint = match app.tab {
        Tab::Rules => "Tab: switch  j/k: select  1-4: toggle DEL/MUM/BLR/HYD  r: reset  q: quit",
        Tab::Audit => "Tab: switch  j/k: scroll  q: quit",
        _ => "Tab: switch  j/k: select  q: quit",
    };
    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];
    if let Some(status) = &app.status {
        lines.insert(
            0,
            Line::from(Span::styled(
                status.clone(),
                Style::default().fg(Color::Yellow),
            )),
        );
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_overview(f: &mut ratatui::Frame, area: Rect, app: &App) {
    let hosts = crate::data::hosts();
    let issues = crate::data::issues();
    let summary = crate::metrics::dashboard_summary(&hosts, &issues);
    let severity_rows = crate::metrics::severity_breakdown(&issues, crate::data::TOTAL_ENDPOINTS);
    let top = crate::metrics::top_failed_controls(&issues);

    let mut lines = vec![
        Line::from(format!(
            "Overall compliance: {}%   hosts scanned: {}   critical failures: {}   open issues: {}",
            summary.overall_compliance,
            summary.hosts_scanned,
            summary.critical_failures,
            summary.open_issues
        )),
        Line::from(""),
        Line::from(Span::styled(
            "By severity",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for row in &severity_rows {
        lines.push(Line::from(format!(
            "  {:<8} passed {:>4}  failed {:>3}  ({}%)",
            row.severity,
            row.passed,
            row.failed,
            row.compliance_pct()
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Top failed controls",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for issue in &top {
        lines.push(Line::from(vec![
            Span::raw("  "),
            severity_span(issue.severity, app.color),
            Span::raw(format!(
                "  {}  {} (hosts affected: {})",
                issue.rule_id, issue.description, issue.hosts_affected
            )),
        ]));
    }

    let w = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Overview"));
    f.render_widget(w, area);
}

fn draw_rules(f: &mut ratatui::Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .state
        .rules()
        .iter()
        .map(|rule| {
            let flag = |loc: Location| if rule.locations.get(loc) { "on " } else { "off" };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<14} ", rule.code)),
                severity_span(rule.severity, app.color),
                Span::raw(format!(
                    "  DEL:{} MUM:{} BLR:{} HYD:{}  {}",
                    flag(Location::Del),
                    flag(Location::Mum),
                    flag(Location::Blr),
                    flag(Location::Hyd),
                    rule.description
                )),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Rules"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.rules_state);
}

fn draw_audit(f: &mut ratatui::Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    for entry in app.state.audit().recent(crate::audit::DISPLAY_COUNT) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", entry.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                entry.action.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" by {} ({})", entry.user_name, entry.role)),
        ]));
        lines.push(Line::from(format!("    {}", entry.details)));
    }

    let title = format!("Audit ({} entries)", app.state.audit().len());
    let w = Paragraph::new(lines)
        .scroll((app.audit_scroll, 0))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(w, area);
}

fn draw_hosts(f: &mut ratatui::Frame, area: Rect, app: &mut App) {
    let hosts = crate::data::hosts();
    let items: Vec<ListItem> = hosts
        .iter()
        .map(|h| {
            let score_style = if !app.color {
                Style::default()
            } else if h.score >= 90 {
                Style::default().fg(Color::Green)
            } else if h.score >= 70 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Red)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<28} {:<14} ", h.hostname, h.os)),
                Span::styled(format!("{:>3}%", h.score), score_style),
                Span::raw(format!(
                    "  critical failed: {}  last seen: {}",
                    h.critical_failed
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    h.last_seen
                )),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Hosts"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.hosts_state);
}

fn severity_span(severity: Severity, color: bool) -> Span<'static> {
    let style = if !color {
        Style::default()
    } else {
        match severity {
            Severity::Critical => Style::default().fg(Color::Red),
            Severity::High => Style::default().fg(Color::Yellow),
            Severity::Medium => Style::default().fg(Color::Cyan),
            Severity::Low => Style::default().fg(Color::DarkGray),
        }
    };
    Span::styled(format!("{:<8}", severity.label()), style)
}
