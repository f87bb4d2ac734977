//! Ratatui-based terminal dashboard.
//!
//! Four tabs mirror the original web dashboard: chat (questions answered by
//! the intent router), explorer (filterable company grid), news (sector
//! filter), and dashboard (sector charts). The "thinking" delay is modelled
//! as a pending question that is answered once the delay has elapsed, so the
//! UI keeps redrawing meanwhile.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Row, Table, Tabs},
    Terminal,
};
use tracing::{debug, info};

use crate::app::pipeline;
use crate::config::Settings;
use crate::data::Dataset;
use crate::domain::{CompanyFilter, CompanyRecord, EngineConfig, RISK_LOW, RISK_MEDIUM, Sentiment};
use crate::error::{AppError, EXIT_RUNTIME};
use crate::io::transcript::{write_transcript, TRANSCRIPT_DIR};
use crate::query::{header_stats, is_high_risk, sector_series, QUICK_QUERIES};
use crate::report::format::{format_header, format_response, NO_MATCHES};
use crate::report::response::Answer;

mod plotters_chart;

use plotters_chart::SectorBarChart;

/// Start the TUI.
pub fn run(dataset: Dataset, config: EngineConfig, settings: &Settings) -> Result<(), AppError> {
    info!(log_file = ?settings.log_file, "starting tui");
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(dataset, config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_RUNTIME, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Chat,
    Explorer,
    News,
    Dashboard,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Chat, Tab::Explorer, Tab::News, Tab::Dashboard];

    fn title(self) -> &'static str {
        match self {
            Tab::Chat => "AI Chat",
            Tab::Explorer => "Data Explorer",
            Tab::News => "News Feed",
            Tab::Dashboard => "Dashboard",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Which series the dashboard chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Metric {
    Companies,
    Revenue,
    AvgGrowth,
}

impl Metric {
    fn next(self) -> Metric {
        match self {
            Metric::Companies => Metric::Revenue,
            Metric::Revenue => Metric::AvgGrowth,
            Metric::AvgGrowth => Metric::Companies,
        }
    }

    fn prev(self) -> Metric {
        match self {
            Metric::Companies => Metric::AvgGrowth,
            Metric::Revenue => Metric::Companies,
            Metric::AvgGrowth => Metric::Revenue,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Metric::Companies => "companies per sector",
            Metric::Revenue => "revenue per sector (₹M)",
            Metric::AvgGrowth => "average growth per sector (%)",
        }
    }
}

/// A question waiting out the thinking delay.
struct Pending {
    query: String,
    asked_at: Instant,
}

struct App {
    dataset: Dataset,
    config: EngineConfig,
    tab: Tab,
    status: String,

    // chat
    input: String,
    history: Vec<Answer>,
    pending: Option<Pending>,
    quick_idx: Option<usize>,
    scroll_back: u16,

    // explorer
    filter: CompanyFilter,
    selected_field: usize,
    sector_options: Vec<String>,
    risk_options: Vec<String>,

    // news
    news_options: Vec<String>,
    news_idx: usize,

    // dashboard
    metric: Metric,
}

impl App {
    fn new(dataset: Dataset, config: EngineConfig) -> Self {
        let with_all = |mut v: Vec<String>| {
            v.insert(0, String::new());
            v
        };
        let sector_options = with_all(dataset.sectors());
        let risk_options = with_all(dataset.risk_levels());
        let news_options = with_all(dataset.news_sectors());
        Self {
            dataset,
            config,
            tab: Tab::Chat,
            status: "Ask about sectors, risk, growth, or markets.".to_string(),
            input: String::new(),
            history: Vec::new(),
            pending: None,
            quick_idx: None,
            scroll_back: 0,
            filter: CompanyFilter::default(),
            selected_field: 0,
            sector_options,
            risk_options,
            news_options,
            news_idx: 0,
            metric: Metric::Companies,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.resolve_pending() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_RUNTIME, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Answer the pending question once its delay is over.
    fn resolve_pending(&mut self) -> bool {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| p.asked_at.elapsed() >= self.config.think_delay);
        if !due {
            return false;
        }
        let Some(p) = self.pending.take() else {
            return false;
        };
        let answer = pipeline::answer(&self.dataset, &p.query, &self.config);
        self.status = format!("intent: {:?}", answer.intent);
        self.history.push(answer);
        self.scroll_back = 0;
        true
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Esc => return true,
            KeyCode::Tab => {
                self.tab = self.tab.next();
                return false;
            }
            KeyCode::BackTab => {
                self.tab = self.tab.prev();
                return false;
            }
            KeyCode::Char('d') if ctrl => {
                self.save_transcript();
                return false;
            }
            _ => {}
        }

        match self.tab {
            Tab::Chat => self.handle_chat_key(key, ctrl),
            Tab::Explorer => self.handle_explorer_key(key.code),
            Tab::News => self.handle_news_key(key.code),
            Tab::Dashboard => self.handle_dashboard_key(key.code),
        }
        false
    }

    fn handle_chat_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('l') if ctrl => {
                self.history.clear();
                self.scroll_back = 0;
                self.status = "Chat cleared.".to_string();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.cycle_quick(true),
            KeyCode::Down => self.cycle_quick(false),
            KeyCode::PageUp => self.scroll_back = self.scroll_back.saturating_add(5),
            KeyCode::PageDown => self.scroll_back = self.scroll_back.saturating_sub(5),
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                self.quick_idx = None;
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        let query = self.input.trim().to_string();
        if query.is_empty() || self.pending.is_some() {
            return;
        }
        debug!(%query, "chat question");
        self.input.clear();
        self.quick_idx = None;
        self.status = "Analyzing data…".to_string();
        self.pending = Some(Pending {
            query,
            asked_at: Instant::now(),
        });
    }

    /// Fill the input with the previous/next quick query.
    fn cycle_quick(&mut self, backwards: bool) {
        let n = QUICK_QUERIES.len();
        let next = match (self.quick_idx, backwards) {
            (None, true) => n - 1,
            (None, false) => 0,
            (Some(i), true) => (i + n - 1) % n,
            (Some(i), false) => (i + 1) % n,
        };
        self.quick_idx = Some(next);
        self.input = QUICK_QUERIES[next].1.to_string();
    }

    fn handle_explorer_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.selected_field = self.selected_field.saturating_sub(1),
            KeyCode::Down => self.selected_field = (self.selected_field + 1).min(2),
            KeyCode::Left => self.cycle_filter(-1),
            KeyCode::Right => self.cycle_filter(1),
            KeyCode::Backspace if self.selected_field == 0 => {
                self.filter.search_text.pop();
            }
            KeyCode::Char(c) if self.selected_field == 0 => self.filter.search_text.push(c),
            _ => {}
        }
    }

    fn cycle_filter(&mut self, delta: isize) {
        match self.selected_field {
            1 => self.filter.sector = cycle(&self.sector_options, &self.filter.sector, delta),
            2 => self.filter.risk_level = cycle(&self.risk_options, &self.filter.risk_level, delta),
            _ => {}
        }
    }

    fn handle_news_key(&mut self, code: KeyCode) {
        let n = self.news_options.len();
        match code {
            KeyCode::Left => self.news_idx = (self.news_idx + n - 1) % n,
            KeyCode::Right => self.news_idx = (self.news_idx + 1) % n,
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left => self.metric = self.metric.prev(),
            KeyCode::Right => self.metric = self.metric.next(),
            _ => {}
        }
    }

    fn save_transcript(&mut self) {
        if self.history.is_empty() {
            self.status = "Nothing to save yet.".to_string();
            return;
        }
        match write_transcript(Path::new(TRANSCRIPT_DIR), &self.history) {
            Ok(path) => self.status = format!("Wrote transcript: {}", path.display()),
            Err(err) => self.status = format!("Transcript write failed: {err}"),
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_tabs(frame, chunks[1]);
        match self.tab {
            Tab::Chat => self.draw_chat(frame, chunks[2]),
            Tab::Explorer => self.draw_explorer(frame, chunks[2]),
            Tab::News => self.draw_news(frame, chunks[2]),
            Tab::Dashboard => self.draw_dashboard(frame, chunks[2]),
        }
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let stats = header_stats(self.dataset.companies());
        let line = Line::from(vec![
            Span::styled("msme", Style::default().fg(Color::Cyan)),
            Span::raw(" MSME market intelligence | "),
            Span::styled(format_header(&stats), Style::default().fg(Color::Gray)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
            .select(self.tab.index())
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(tabs, area);
    }

    fn draw_chat(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let lines = chat_lines(&self.history, self.pending.is_some());
        let block = Block::default().title("Conversation").borders(Borders::ALL);
        let visible = block.inner(chunks[0]).height;
        let bottom = (lines.len() as u16).saturating_sub(visible);
        let offset = bottom.saturating_sub(self.scroll_back);
        let p = Paragraph::new(Text::from(lines)).block(block).scroll((offset, 0));
        frame.render_widget(p, chunks[0]);

        let input = Paragraph::new(format!("{}▏", self.input))
            .block(Block::default().title("Ask (Enter to send, ↑/↓ quick queries)").borders(Borders::ALL));
        frame.render_widget(input, chunks[1]);
    }

    fn draw_explorer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(area);

        let items = vec![
            ListItem::new(format!("Search: {}", self.filter.search_text)),
            ListItem::new(format!("Sector: {}", or_all(&self.filter.sector))),
            ListItem::new(format!("Risk:   {}", or_all(&self.filter.risk_level))),
        ];
        let list = List::new(items)
            .block(Block::default().title("Filters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let rows = pipeline::explore(&self.dataset, &self.filter);
        let block = Block::default()
            .title(format!("Companies ({})", rows.len()))
            .borders(Borders::ALL);
        if rows.is_empty() {
            let msg = Paragraph::new(NO_MATCHES)
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(msg, chunks[1]);
            return;
        }

        let header = Row::new(vec!["Name", "Sector", "Location", "Revenue", "Growth", "Margin", "Staff", "Rating", "Risk"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let body = rows.iter().map(|c| {
            Row::new(vec![
                c.name.clone(),
                c.sector.clone(),
                c.location.clone(),
                format!("₹{}M", c.revenue_2024),
                format!("{}%", c.growth_rate),
                format!("{}%", c.profit_margin),
                c.employee_count.to_string(),
                c.credit_rating.clone(),
                c.risk_level.clone(),
            ])
            .style(Style::default().fg(risk_color(c)))
        });
        let widths = [
            Constraint::Percentage(24),
            Constraint::Percentage(13),
            Constraint::Percentage(18),
            Constraint::Percentage(9),
            Constraint::Percentage(7),
            Constraint::Percentage(7),
            Constraint::Percentage(6),
            Constraint::Percentage(6),
            Constraint::Percentage(10),
        ];
        let table = Table::new(body, widths).header(header).block(block);
        frame.render_widget(table, chunks[1]);
    }

    fn draw_news(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let sector = self.news_options.get(self.news_idx).map(String::as_str).unwrap_or("");
        let articles = pipeline::news_feed(&self.dataset, sector);
        let block = Block::default()
            .title(format!("News: {} ({})  ←/→ sector", or_all(sector), articles.len()))
            .borders(Borders::ALL);

        if articles.is_empty() {
            frame.render_widget(Paragraph::new(NO_MATCHES).block(block), area);
            return;
        }

        let items: Vec<ListItem> = articles
            .iter()
            .map(|n| {
                let tone = match n.sentiment {
                    Sentiment::Positive => Color::Green,
                    Sentiment::Negative => Color::Red,
                    Sentiment::Neutral => Color::Gray,
                };
                ListItem::new(Text::from(vec![
                    Line::from(vec![
                        Span::styled(format!("[{}] ", n.sector), Style::default().fg(Color::Cyan)),
                        Span::raw(format!("{}  ", n.date.format("%d %b %Y"))),
                        Span::styled(n.sentiment.display_name(), Style::default().fg(tone)),
                    ]),
                    Line::from(Span::styled(n.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
                    Line::from(format!("  {}", n.summary)),
                    Line::from(Span::styled(format!("  via {}", n.source), Style::default().fg(Color::Gray))),
                    Line::from(""),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }

    fn draw_dashboard(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let series = sector_series(self.dataset.companies());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(series.len() as u16 + 2)])
            .split(area);

        let block = Block::default()
            .title(format!("{}  ←/→ metric", self.metric.label()))
            .borders(Borders::ALL);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let values: Vec<f64> = series
            .iter()
            .map(|p| match self.metric {
                Metric::Companies => p.count as f64,
                Metric::Revenue => p.total_revenue,
                Metric::AvgGrowth => p.avg_growth,
            })
            .collect();
        let chart = SectorBarChart {
            values: &values,
            as_line: self.metric == Metric::AvgGrowth,
            fmt_y: fmt_axis_y,
        };
        frame.render_widget(chart, inner);

        let legend: Vec<Line> = series
            .iter()
            .zip(&values)
            .enumerate()
            .map(|(i, (p, v))| Line::from(format!("{:>2}. {:<18} {:>10.1}", i + 1, p.sector, v)))
            .collect();
        let p = Paragraph::new(Text::from(legend)).block(Block::default().title("Sectors").borders(Borders::ALL));
        frame.render_widget(p, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.tab {
            Tab::Chat => "Tab switch  Enter ask  ↑/↓ presets  PgUp/PgDn scroll  ^L clear  ^D save  Esc quit",
            Tab::Explorer => "Tab switch  ↑/↓ field  type search  ←/→ sector/risk  ^D save  Esc quit",
            Tab::News => "Tab switch  ←/→ sector  ^D save  Esc quit",
            Tab::Dashboard => "Tab switch  ←/→ metric  ^D save  Esc quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Conversation as display lines (question, answer text, spacer).
fn chat_lines(history: &[Answer], thinking: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if history.is_empty() && !thinking {
        lines.push(Line::from(Span::styled(
            "🤖 Welcome! Ask about companies, sectors, risk, growth, or market data.",
            Style::default().fg(Color::Cyan),
        )));
    }
    for a in history {
        lines.push(Line::from(Span::styled(
            format!("> {}", a.query),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for l in format_response(&a.response).lines() {
            lines.push(Line::from(l.to_string()));
        }
        lines.push(Line::from(""));
    }
    if thinking {
        lines.push(Line::from(Span::styled(
            "🤖 Analyzing data…",
            Style::default().fg(Color::Yellow),
        )));
    }
    lines
}

/// Step through `options` from the current value, wrapping around.
fn cycle(options: &[String], current: &str, delta: isize) -> String {
    if options.is_empty() {
        return String::new();
    }
    let n = options.len() as isize;
    let pos = options.iter().position(|o| o == current).unwrap_or(0) as isize;
    let next = (pos + delta).rem_euclid(n) as usize;
    options[next].clone()
}

fn or_all(value: &str) -> &str {
    if value.is_empty() { "All" } else { value }
}

/// Row colour follows the risk report's buckets.
fn risk_color(c: &CompanyRecord) -> Color {
    match c.risk_level.as_str() {
        RISK_LOW => Color::Green,
        RISK_MEDIUM => Color::Yellow,
        _ if is_high_risk(c) => Color::Red,
        _ => Color::Gray,
    }
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.0}")
}
