//! Ticket history chart.
//!
//! Binds the sample buffer to a ratatui line chart with fixed axes: X is the
//! sample position 1..C, Y is tickets remaining in [0, 50] with a tick step
//! of 5. The panel holds one data series that `redraw` replaces in place;
//! the chart is never re-created per frame. `redraw` before `init` is a
//! deliberate no-op.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use ticketwatch_core::HISTORY_CAPACITY;

/// Upper bound of the Y axis.
const Y_AXIS_MAX: u32 = 50;

/// Tick step of the Y axis.
const Y_AXIS_STEP: u32 = 5;

/// Line chart over the ticket history.
pub struct ChartPanel {
    points: Option<Vec<(f64, f64)>>,
    x_labels: Vec<String>,
    y_labels: Vec<String>,
}

impl Default for ChartPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartPanel {
    /// Create an unconstructed panel. Nothing is drawn until `init` seeds
    /// the series.
    pub fn new() -> Self {
        Self {
            points: None,
            x_labels: (1..=HISTORY_CAPACITY).map(|i| i.to_string()).collect(),
            y_labels: (0..=Y_AXIS_MAX)
                .step_by(Y_AXIS_STEP as usize)
                .map(|v| v.to_string())
                .collect(),
        }
    }

    /// Construct the chart series from the buffer's seed snapshot.
    pub fn init(&mut self, snapshot: &[u32]) {
        self.points = Some(to_points(snapshot));
    }

    /// Whether `init` has run.
    pub fn is_initialized(&self) -> bool {
        self.points.is_some()
    }

    /// Replace the data series with the current snapshot, in place.
    /// No-op if the chart has not been constructed yet.
    pub fn redraw(&mut self, snapshot: &[u32]) {
        if let Some(points) = &mut self.points {
            *points = to_points(snapshot);
        }
    }

    /// Current series, for tests.
    pub fn series(&self) -> Option<&[(f64, f64)]> {
        self.points.as_deref()
    }

    /// Render the chart. `remaining`/`sold_out` feed the title; `has_data`
    /// distinguishes the zero-filled seed from real samples.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        remaining: u32,
        sold_out: bool,
        has_data: bool,
    ) {
        let title = if !has_data {
            " Tickets Remaining (waiting for data) ".to_string()
        } else if sold_out {
            " Tickets Remaining: 0 [SOLD OUT] ".to_string()
        } else {
            format!(" Tickets Remaining: {remaining} ")
        };
        let title_style = if sold_out && has_data {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(title, title_style));

        let Some(points) = &self.points else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let dataset = Dataset::default()
            .name("tickets")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .title("Time")
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([1.0, HISTORY_CAPACITY as f64])
                    .labels(self.x_labels.clone()),
            )
            .y_axis(
                Axis::default()
                    .title("Tickets")
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, Y_AXIS_MAX as f64])
                    .labels(self.y_labels.clone()),
            );

        frame.render_widget(chart, area);
    }
}

/// Map a snapshot to chart points, X starting at 1.
fn to_points(snapshot: &[u32]) -> Vec<(f64, f64)> {
    snapshot
        .iter()
        .enumerate()
        .map(|(i, &v)| ((i + 1) as f64, f64::from(v)))
        .collect()
}
