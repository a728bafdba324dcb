mod app;

pub use app::run;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Table};
use ratatui::Frame;

use crate::refresh::{DashboardState, RefreshStatus};
use crate::scheduler::RefreshScheduler;
use crate::view;

const COLUMN_WIDTHS: [Constraint; view::COLUMN_COUNT] = [
    Constraint::Length(5),  // ID
    Constraint::Length(19), // Timestamp
    Constraint::Length(6),  // Cars
    Constraint::Length(6),  // Trucks
    Constraint::Length(6),  // Buses
    Constraint::Length(11), // Motorcycles
    Constraint::Length(6),  // Total
    Constraint::Length(9),  // Avg Speed
    Constraint::Length(10), // Congestion
    Constraint::Length(8),  // Lane Occ
    Constraint::Length(7),  // Density
];

/// Draw the whole dashboard: live table on top, status line, then the two
/// analytics charts side by side.
pub fn render(frame: &mut Frame, state: &DashboardState, scheduler: &RefreshScheduler) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(frame.area());

    render_table(frame, chunks[0], state);
    render_status(frame, chunks[1], state, scheduler);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    render_distribution(frame, charts[0], state);
    render_trend(frame, charts[1], state);
}

fn render_table(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let header = Row::new(view::COLUMNS).style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = state
        .table
        .rows()
        .iter()
        .map(|cells| Row::new(cells.iter().cloned()))
        .collect();

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL).title("Live Traffic Data"));

    frame.render_widget(table, area);
}

fn render_status(frame: &mut Frame, area: Rect, state: &DashboardState, scheduler: &RefreshScheduler) {
    let color = match state.status {
        RefreshStatus::Updated { .. } => Color::Green,
        RefreshStatus::NoData => Color::Yellow,
        RefreshStatus::Failed(_) => Color::Red,
        _ => Color::Blue,
    };
    let text = format!(
        "{}   [r] Refresh Now   [a] {}   [q] Quit",
        state.status.text(),
        scheduler.label()
    );
    frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
}

fn render_distribution(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Vehicle Type Distribution");

    if state.distribution.is_empty() {
        frame.render_widget(Paragraph::new("No data").block(block), area);
        return;
    }

    let bar_width = (area.width.saturating_sub(24)).max(4) as usize;
    let lines: Vec<Line> = state
        .distribution
        .slices()
        .iter()
        .map(|slice| {
            Line::from(format!(
                "{:<12} {} {:>5.1}%",
                slice.label,
                percent_bar(slice.percent, bar_width),
                slice.percent
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_trend(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Traffic Trends Over Time");

    if state.trend.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let speeds = state.trend.speeds_scaled();
    let [speed_lo, speed_hi] = state.trend.speed_bounds();
    let [total_lo, total_hi] = state.trend.total_bounds();

    let datasets = vec![
        Dataset::default()
            .name("Total Vehicles")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(state.trend.totals()),
        Dataset::default()
            .name(format!("Avg Speed ({speed_lo:.0}..{speed_hi:.0})"))
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&speeds),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(state.trend.x_bounds())
                .labels(state.trend.x_labels().to_vec()),
        )
        .y_axis(
            Axis::default()
                .title("Vehicle Count")
                .bounds(state.trend.total_bounds())
                .labels([format!("{total_lo:.0}"), format!("{total_hi:.0}")]),
        );

    frame.render_widget(chart, area);
}

/// Fixed-width horizontal bar for a percentage, filled left to right.
fn percent_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
