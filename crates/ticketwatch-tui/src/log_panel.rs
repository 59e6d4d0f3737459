//! Remote log tail.
//!
//! The displayed list is fully replaced on every applied poll tick; there is
//! no diffing, no dedup, and no size cap. Stale ticks (sequence at or below
//! the highest applied) are discarded, and a dropped tick leaves the previous
//! lines on screen.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// View state for the remote log.
#[derive(Debug, Default)]
pub struct LogView {
    lines: Vec<String>,
    last_seq: u64,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed lines with a freshly fetched set. Returns true
    /// if applied, false if the tick was stale.
    pub fn replace(&mut self, seq: u64, lines: Vec<String>) -> bool {
        if seq <= self.last_seq {
            tracing::debug!(seq, last_seq = self.last_seq, "stale log result discarded");
            return false;
        }
        self.last_seq = seq;
        self.lines = lines;
        true
    }

    /// Currently displayed lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether any log fetch has been applied yet.
    pub fn has_data(&self) -> bool {
        self.last_seq > 0
    }

    /// Render the log tail: the newest lines that fit the area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Simulation Log ");

        let inner_height = area.height.saturating_sub(2) as usize;
        let text: Vec<Line> = if self.has_data() {
            let skip = self.lines.len().saturating_sub(inner_height);
            self.lines[skip..]
                .iter()
                .map(|l| Line::from(l.as_str()))
                .collect()
        } else {
            vec![Line::styled(
                "Waiting for log data...",
                Style::default().fg(Color::DarkGray),
            )]
        };

        frame.render_widget(Paragraph::new(text).block(block), area);
    }
}
