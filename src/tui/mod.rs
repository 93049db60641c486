//! Ratatui-based terminal UI.
//!
//! The TUI lets the user pick up to three series, edit the display window, and
//! toggle a secondary y-axis. Fetching runs on the background `FetchWorker`; the
//! UI only sends requests and applies the newest response.

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::align::clip;
use crate::app::pipeline::{BundleRequest, resolve_specs};
use crate::app::worker::{FetchResponse, FetchWorker};
use crate::data::{FredClient, NBER_RECESSIONS};
use crate::domain::{DashboardConfig, DateWindow, MAX_SERIES, MergedBundle, PRESETS, SeriesSpec};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{ChartLine, OverlayPlottersChart};

const SERIES_COLORS: [(u8, u8, u8); MAX_SERIES] = [
    (37, 99, 235),  // blue
    (16, 185, 129), // emerald
    (249, 115, 22), // orange
];

const SHADE: Color = Color::Rgb(51, 65, 85);

/// Start the TUI.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    // Resolve the client before taking over the terminal so a missing key is
    // reported as a normal error.
    let client = FredClient::from_env()?;
    let worker = FetchWorker::spawn(client);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::provider(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config, worker)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::provider(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::provider(format!("Failed to enter alternate screen: {e}")));
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

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    NoSeries,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowField {
    From,
    To,
}

struct App {
    config: DashboardConfig,
    slots: [Option<SeriesSpec>; MAX_SERIES],
    worker: FetchWorker,
    bundle: Option<MergedBundle>,
    phase: Phase,
    editing: Option<WindowField>,
    input: String,
    status: String,
}

impl App {
    fn new(config: DashboardConfig, worker: FetchWorker) -> Result<Self, AppError> {
        let mut slots: [Option<SeriesSpec>; MAX_SERIES] = Default::default();
        for (slot, spec) in slots.iter_mut().zip(&config.series) {
            *slot = Some(spec.clone());
        }
        if config.series.is_empty() {
            slots[0] = Some(SeriesSpec::plain("UNRATE"));
        }

        let mut app = Self {
            config,
            slots,
            worker,
            bundle: None,
            phase: Phase::NoSeries,
            editing: None,
            input: String::new(),
            status: String::new(),
        };
        app.request_fetch()?;
        Ok(app)
    }

    fn selected(&self) -> Vec<SeriesSpec> {
        self.slots.iter().flatten().cloned().collect()
    }

    fn request_fetch(&mut self) -> Result<(), AppError> {
        self.config.series = self.selected();
        let seq = self.worker.submit(BundleRequest::from_config(&self.config))?;
        if self.config.series.is_empty() {
            self.phase = Phase::NoSeries;
            self.bundle = None;
            self.status = "No series selected.".to_string();
        } else {
            self.phase = Phase::Loading;
            self.status = format!("Fetching FRED data (request #{seq})...");
        }
        Ok(())
    }

    fn apply_response(&mut self, resp: FetchResponse) {
        match resp.result {
            Ok(bundle) => {
                self.phase = if bundle.series.is_empty() { Phase::NoSeries } else { Phase::Ready };
                self.status = format!("Loaded {} series, {} dates.", bundle.series.len(), bundle.dates.len());
                self.bundle = Some(bundle);
            }
            Err(err) => {
                self.status = format!("Fetch failed: {err}");
                self.phase = Phase::Failed(err.message().to_string());
                self.bundle = None;
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if let Some(resp) = self.worker.poll() {
                self.apply_response(resp);
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::provider(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::provider(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::provider(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
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

    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        if let Some(field) = self.editing {
            self.handle_window_edit(field, code);
            return Ok(false);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char(c @ '1'..='3') => {
                let slot = (c as u8 - b'1') as usize;
                self.slots[slot] = next_preset(self.slots[slot].as_ref());
                self.request_fetch()?;
            }
            KeyCode::Char('a') => {
                self.config.dual_axis = !self.config.dual_axis;
                self.status = format!("dual axis: {}", if self.config.dual_axis { "on" } else { "off" });
            }
            KeyCode::Char('r') => self.request_fetch()?,
            KeyCode::Char('[') => self.begin_edit(WindowField::From),
            KeyCode::Char(']') => self.begin_edit(WindowField::To),
            KeyCode::Char('c') => {
                self.config.window = Default::default();
                self.status = "Window cleared.".to_string();
            }
            _ => {}
        }

        Ok(false)
    }

    fn begin_edit(&mut self, field: WindowField) {
        self.editing = Some(field);
        self.input = match field {
            WindowField::From => self.config.window.min_date.clone(),
            WindowField::To => self.config.window.max_date.clone(),
        }
        .unwrap_or_default();
        self.status = "Editing date (YYYY-MM-DD, empty = open). Enter to apply, Esc to cancel.".to_string();
    }

    fn handle_window_edit(&mut self, field: WindowField, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = None;
                match apply_window_input(&mut self.config.window, field, &self.input) {
                    Ok(()) => self.status = format!("window: {}", self.config.window),
                    Err(msg) => self.status = msg,
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                if self.input.len() < 10 {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("fo", Style::default().fg(Color::Cyan)),
            Span::raw(" - FRED series overlay"),
        ]));

        let (positions, selected) = slot_positions(&self.slots);
        for (k, slot) in self.slots.iter().enumerate() {
            // Colour and axis follow the series' place in the bundle, not the slot.
            let swatch = match positions[k] {
                Some(pos) => {
                    let (r, g, b) = SERIES_COLORS[pos % SERIES_COLORS.len()];
                    Color::Rgb(r, g, b)
                }
                None => Color::DarkGray,
            };
            let label = match slot {
                Some(spec) => {
                    let title = self
                        .bundle
                        .as_ref()
                        .and_then(|bundle| bundle.series.iter().find(|s| s.id == spec.key()))
                        .map(|s| format!("{} [{}]", s.title, s.units.as_deref().unwrap_or("-")))
                        .unwrap_or_else(|| spec.preset_label().unwrap_or("").to_string());
                    let right = positions[k].is_some_and(|pos| on_secondary_axis(pos, selected, self.config.dual_axis));
                    let axis = if right { " (right)" } else { "" };
                    format!("{}{axis}  {title}", spec.key())
                }
                None => "-".to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", k + 1), Style::default().fg(Color::Black).bg(swatch)),
                Span::raw(" "),
                Span::styled(label, Style::default().fg(Color::Gray)),
            ]));
        }

        let editing = match self.editing {
            Some(WindowField::From) => format!(" | editing from: {}_", self.input),
            Some(WindowField::To) => format!(" | editing to: {}_", self.input),
            None => String::new(),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "window: {} | dual axis: {}{editing}",
                self.config.window,
                if self.config.dual_axis { "on" } else { "off" },
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = if self.phase == Phase::Loading && self.bundle.is_some() {
            "Overlay (refreshing)"
        } else {
            "Overlay"
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let message = match (&self.phase, &self.bundle) {
            (Phase::NoSeries, _) => Some(("Choose at least one series (press 1-3).".to_string(), Color::Yellow)),
            (Phase::Failed(msg), _) => Some((msg.clone(), Color::Red)),
            (Phase::Loading, None) => {
                Some(("Fetching data from FRED for the selected series...".to_string(), Color::Yellow))
            }
            _ => None,
        };
        if let Some((text, color)) = message {
            frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), inner);
            return;
        }

        let Some(bundle) = &self.bundle else {
            return;
        };
        let visible = clip(bundle, &self.config.window);
        if visible.is_empty() {
            let msg = Paragraph::new("No observations in the selected window (press c to clear).")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let data = chart_data(&visible, self.config.dual_axis);
        let (chart_rect, insets) = chart_layout(inner, data.y2_bounds.is_some());
        let widget = OverlayPlottersChart {
            dates: &visible.dates,
            lines: &data.lines,
            recessions: NBER_RECESSIONS,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            y2_bounds: data.y2_bounds,
            shade: SHADE,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &visible.dates, &data);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "1/2/3 series  [ from  ] to  c clear  a dual axis  r refetch  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Bundle index of each slot's series, plus the number of distinct series.
///
/// Repeated specs collapse onto their first occurrence, as they do when the
/// bundle is built.
fn slot_positions(slots: &[Option<SeriesSpec>; MAX_SERIES]) -> ([Option<usize>; MAX_SERIES], usize) {
    let selected: Vec<SeriesSpec> = slots.iter().flatten().cloned().collect();
    let order = resolve_specs(&selected).unwrap_or(selected);
    let positions = slots
        .each_ref()
        .map(|slot| slot.as_ref().and_then(|spec| order.iter().position(|o| o == spec)));
    (positions, order.len())
}

/// Whether bundle series `k` of `len` is drawn against the right-hand axis.
fn on_secondary_axis(k: usize, len: usize, dual_axis: bool) -> bool {
    dual_axis && k == 1 && len > 1
}

/// Cycle a slot through `none -> presets... -> none`.
fn next_preset(current: Option<&SeriesSpec>) -> Option<SeriesSpec> {
    let specs: Vec<SeriesSpec> = PRESETS.iter().filter_map(|p| p.spec.parse().ok()).collect();
    let next = match current.and_then(|c| specs.iter().position(|s| s == c)) {
        Some(i) => i + 1,
        None => 0,
    };
    specs.get(next).cloned()
}

/// Apply an edited window bound, keeping `min <= max` by pulling the other bound along.
fn apply_window_input(window: &mut DateWindow, field: WindowField, input: &str) -> Result<(), String> {
    let trimmed = input.trim();
    let value = if trimmed.is_empty() {
        None
    } else {
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date '{trimmed}': {e}"))?;
        Some(date.to_string())
    };

    match field {
        WindowField::From => {
            if let Some(v) = &value {
                if window.max_date.as_deref().is_some_and(|max| max < v.as_str()) {
                    window.max_date = Some(v.clone());
                }
            }
            window.min_date = value;
        }
        WindowField::To => {
            if let Some(v) = &value {
                if window.min_date.as_deref().is_some_and(|min| min > v.as_str()) {
                    window.min_date = Some(v.clone());
                }
            }
            window.max_date = value;
        }
    }
    Ok(())
}

/// Everything the chart widget needs, derived from the visible bundle.
struct ChartData {
    lines: Vec<ChartLine>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    y2_bounds: Option<[f64; 2]>,
}

fn chart_data(visible: &MergedBundle, dual_axis: bool) -> ChartData {
    let n = visible.dates.len();
    let x_bounds = if n > 1 { [0.0, (n - 1) as f64] } else { [-0.5, 0.5] };
    let secondary = |k: usize| on_secondary_axis(k, visible.series.len(), dual_axis);

    let lines = visible
        .series
        .iter()
        .enumerate()
        .map(|(k, s)| {
            let (r, g, b) = SERIES_COLORS[k % SERIES_COLORS.len()];
            ChartLine {
                points: s
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
                    .collect(),
                color: RGBColor(r, g, b),
                secondary: secondary(k),
            }
        })
        .collect::<Vec<_>>();

    let bounds_for = |want_secondary: bool| -> Option<[f64; 2]> {
        let (lo, hi) = lines
            .iter()
            .filter(|l| l.secondary == want_secondary)
            .flat_map(|l| l.points.iter().map(|&(_, y)| y))
            .fold(None, |acc: Option<(f64, f64)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })?;
        Some(pad_bounds(lo, hi))
    };

    let y_bounds = bounds_for(false).unwrap_or([0.0, 1.0]);
    let y2_bounds = if lines.iter().any(|l| l.secondary) {
        Some(bounds_for(true).unwrap_or([0.0, 1.0]))
    } else {
        None
    };

    ChartData {
        lines,
        x_bounds,
        y_bounds,
        y2_bounds,
    }
}

fn pad_bounds(lo: f64, hi: f64) -> [f64; 2] {
    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.05 } else { lo.abs().max(1.0) * 0.05 };
    [lo - pad, hi + pad]
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect, dual_axis: bool) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 9,
        right: if dual_axis { 9 } else { 2 },
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 20 || inner.height <= insets.top + insets.bottom + 6 {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    dates: &[String],
    data: &ChartData,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    // X: date labels at evenly spaced label indices.
    let y = chart.y + chart.height;
    if y < inner.y + inner.height {
        let n = dates.len();
        let tick_count = ticks.min(n);
        for t in 0..tick_count {
            let u = if tick_count > 1 { t as f64 / (tick_count - 1) as f64 } else { 0.5 };
            let idx = ((n.saturating_sub(1)) as f64 * u).round() as usize;
            let label = dates[idx].clone();
            let label_len = label.len() as u16;
            let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let start = x
                .saturating_sub(label_len / 2)
                .clamp(inner.x, (inner.x + inner.width).saturating_sub(label_len));
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
        }
    }

    // Y: left axis, and the right axis when a series uses it.
    let mut axes = vec![(data.y_bounds, false)];
    if let Some(b) = data.y2_bounds {
        axes.push((b, true));
    }
    for (bounds, right) in axes {
        for i in 0..ticks {
            let u = i as f64 / (ticks as f64 - 1.0);
            let y_val = bounds[0] + u * (bounds[1] - bounds[0]);
            let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
            let label = fmt_axis_y(y_val);
            let label_len = label.len() as u16;
            let start = if right {
                chart.x + chart.width + 1
            } else {
                (inner.x + insets.left.saturating_sub(1)).saturating_sub(label_len)
            };
            if start < inner.x || start + label_len > inner.x + inner.width {
                continue;
            }
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
        }
    }

    let legend = Paragraph::new("shaded: NBER recessions")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::DIM));
    let legend_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if legend_rect.y < inner.y + inner.height {
        frame.render_widget(legend, legend_rect);
    }
}

fn fmt_axis_y(v: f64) -> String {
    let a = v.abs();
    if a >= 100_000.0 {
        format!("{:.0}k", v / 1000.0)
    } else if a >= 100.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BundleSeries;

    fn series(id: &str, values: Vec<Option<f64>>) -> BundleSeries {
        BundleSeries {
            id: id.into(),
            title: id.into(),
            units: None,
            frequency: None,
            values,
        }
    }

    fn assert_close(got: [f64; 2], want: [f64; 2]) {
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-9, "got {got:?}, want {want:?}");
        }
    }

    #[test]
    fn chart_data_splits_axes_and_drops_missing_points() {
        let visible = MergedBundle {
            dates: vec!["2020-01-01".into(), "2020-02-01".into(), "2020-03-01".into()],
            series: vec![
                series("UNRATE", vec![Some(3.0), None, Some(5.0)]),
                series("GDP", vec![Some(100.0), Some(200.0), None]),
            ],
        };

        let single = chart_data(&visible, false);
        assert_eq!(single.x_bounds, [0.0, 2.0]);
        assert!(single.y2_bounds.is_none());
        assert_eq!(single.lines[0].points, [(0.0, 3.0), (2.0, 5.0)]);
        assert_close(single.y_bounds, [3.0 - 9.85, 200.0 + 9.85]);

        let dual = chart_data(&visible, true);
        assert!(dual.lines[1].secondary);
        assert_close(dual.y_bounds, [2.9, 5.1]);
        assert_close(dual.y2_bounds.unwrap(), [95.0, 205.0]);
    }

    #[test]
    fn single_date_is_centered() {
        let visible = MergedBundle {
            dates: vec!["2020-01-01".into()],
            series: vec![series("UNRATE", vec![Some(3.0)])],
        };
        assert_eq!(chart_data(&visible, false).x_bounds, [-0.5, 0.5]);
    }

    #[test]
    fn window_edit_pulls_other_bound_along() {
        let mut w = DateWindow::new(Some("2000-01-01".into()), Some("2005-01-01".into()));
        apply_window_input(&mut w, WindowField::From, "2010-01-01").unwrap();
        assert_eq!(w, DateWindow::new(Some("2010-01-01".into()), Some("2010-01-01".into())));

        apply_window_input(&mut w, WindowField::To, "1999-06-01").unwrap();
        assert_eq!(w, DateWindow::new(Some("1999-06-01".into()), Some("1999-06-01".into())));

        apply_window_input(&mut w, WindowField::To, "").unwrap();
        assert_eq!(w.max_date, None);

        assert!(apply_window_input(&mut w, WindowField::From, "2020-02-30").is_err());
        assert_eq!(w.min_date.as_deref(), Some("1999-06-01"));
    }

    #[test]
    fn preset_cycle_wraps_through_none() {
        let first = next_preset(None).unwrap();
        assert_eq!(first.key(), PRESETS[0].spec);

        let last: SeriesSpec = PRESETS[PRESETS.len() - 1].spec.parse().unwrap();
        assert_eq!(next_preset(Some(&last)), None);

        // A custom id is not in the catalog; cycling restarts at the first preset.
        let custom = SeriesSpec::plain("T10Y2Y");
        assert_eq!(next_preset(Some(&custom)), Some(first));
    }

    #[test]
    fn header_positions_follow_bundle_order() {
        let gdp = SeriesSpec::plain("GDP");
        let unrate = SeriesSpec::plain("UNRATE");

        // An empty middle slot does not shift colours: UNRATE is the second bundle series.
        let (positions, len) = slot_positions(&[Some(gdp.clone()), None, Some(unrate.clone())]);
        assert_eq!(positions, [Some(0), None, Some(1)]);
        assert_eq!(len, 2);
        assert!(on_secondary_axis(1, len, true));

        // A repeated spec shares its first occurrence's position.
        let (positions, len) = slot_positions(&[Some(gdp.clone()), Some(gdp), Some(unrate)]);
        assert_eq!(positions, [Some(0), Some(0), Some(1)]);
        assert_eq!(len, 2);
        assert!(!on_secondary_axis(positions[1].unwrap(), len, true));
        assert!(on_secondary_axis(positions[2].unwrap(), len, true));
    }
}
