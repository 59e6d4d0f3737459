//! Operator controls: numeric parameter forms and run-state display.
//!
//! The dashboard form carries the six vendor/customer fields; the configure
//! view carries the four one-shot pool settings. Field values are digit
//! strings edited in place; an empty or zero field simply fails the
//! dispatcher's strictly-positive validation, so no parsing errors can
//! surface here.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use ticketwatch_client::ControlState;
use ticketwatch_core::params::{
    CustomerRates, CustomerStartParams, PoolConfigParams, VendorRates, VendorStartParams,
};

/// Maximum digits per field; enough for any sane simulation parameter.
const MAX_FIELD_DIGITS: usize = 6;

/// A vertical list of labeled numeric fields with one selected for editing.
#[derive(Debug)]
pub struct NumericForm {
    labels: &'static [&'static str],
    values: Vec<String>,
    selected: usize,
}

impl NumericForm {
    fn new(labels: &'static [&'static str]) -> Self {
        Self {
            labels,
            values: vec![String::new(); labels.len()],
            selected: 0,
        }
    }

    /// Move selection to the previous field, wrapping.
    pub fn select_prev(&mut self) {
        self.selected = if self.selected == 0 {
            self.labels.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Move selection to the next field, wrapping.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.labels.len();
    }

    /// Append a digit to the selected field.
    pub fn push_digit(&mut self, c: char) {
        debug_assert!(c.is_ascii_digit());
        let value = &mut self.values[self.selected];
        if value.len() < MAX_FIELD_DIGITS {
            value.push(c);
        }
    }

    /// Delete the last digit of the selected field.
    pub fn backspace(&mut self) {
        self.values[self.selected].pop();
    }

    /// Numeric value of a field; empty parses as zero, which the dispatcher
    /// rejects as non-positive.
    pub fn value(&self, index: usize) -> u32 {
        self.values[index].parse().unwrap_or(0)
    }

    /// Index of the selected field.
    pub fn selected(&self) -> usize {
        self.selected
    }

    fn field_line(&self, index: usize) -> Line<'_> {
        let marker = if index == self.selected { "> " } else { "  " };
        let value = if self.values[index].is_empty() {
            "0"
        } else {
            &self.values[index]
        };
        let value_style = if index == self.selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{:<22}", self.labels[index]),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(value.to_string(), value_style),
        ])
    }
}

// Dashboard form field indices.
const VENDOR_COUNT: usize = 0;
const TICKET_RELEASE_RATE: usize = 1;
const TICKETS_PER_RELEASE: usize = 2;
const CUSTOMER_COUNT: usize = 3;
const CUSTOMER_RETRIEVAL_RATE: usize = 4;
const TICKETS_PER_PURCHASE: usize = 5;

const DASHBOARD_LABELS: &[&str] = &[
    "Vendor count",
    "Ticket release rate",
    "Tickets per release",
    "Customer count",
    "Retrieval rate",
    "Tickets per purchase",
];

/// The vendor/customer control surface on the dashboard.
#[derive(Debug)]
pub struct ControlPanel {
    pub form: NumericForm,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            form: NumericForm::new(DASHBOARD_LABELS),
        }
    }

    pub fn vendor_start_params(&self) -> VendorStartParams {
        VendorStartParams {
            vendor_count: self.form.value(VENDOR_COUNT),
            ticket_release_rate: self.form.value(TICKET_RELEASE_RATE),
            tickets_per_release: self.form.value(TICKETS_PER_RELEASE),
        }
    }

    pub fn customer_start_params(&self) -> CustomerStartParams {
        CustomerStartParams {
            customer_count: self.form.value(CUSTOMER_COUNT),
            customer_retrieval_rate: self.form.value(CUSTOMER_RETRIEVAL_RATE),
            tickets_per_purchase: self.form.value(TICKETS_PER_PURCHASE),
        }
    }

    pub fn vendor_rates(&self) -> VendorRates {
        VendorRates {
            ticket_release_rate: self.form.value(TICKET_RELEASE_RATE),
            tickets_per_release: self.form.value(TICKETS_PER_RELEASE),
        }
    }

    pub fn customer_rates(&self) -> CustomerRates {
        CustomerRates {
            customer_retrieval_rate: self.form.value(CUSTOMER_RETRIEVAL_RATE),
            tickets_per_purchase: self.form.value(TICKETS_PER_PURCHASE),
        }
    }

    /// Render the control form with run-state badges and the current error.
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &ControlState) {
        let mut lines = Vec::new();

        lines.push(section_line("Vendors", state.vendor_running()));
        for i in VENDOR_COUNT..=TICKETS_PER_RELEASE {
            lines.push(self.form.field_line(i));
        }
        lines.push(Line::raw(""));
        lines.push(section_line("Customers", state.customer_running()));
        for i in CUSTOMER_COUNT..=TICKETS_PER_PURCHASE {
            lines.push(self.form.field_line(i));
        }

        if !state.error().is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                state.error().to_string(),
                Style::default().fg(Color::Red),
            ));
        }

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Controls "),
        );
        frame.render_widget(panel, area);
    }
}

fn section_line(name: &'static str, running: bool) -> Line<'static> {
    let (badge, style) = if running {
        ("[RUNNING]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("[stopped]", Style::default().fg(Color::DarkGray))
    };
    Line::from(vec![
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(badge, style),
    ])
}

// Configure form field indices.
const TOTAL_TICKETS: usize = 0;
const CFG_RELEASE_RATE: usize = 1;
const CFG_RETRIEVAL_RATE: usize = 2;
const MAX_TICKET_CAPACITY: usize = 3;

const CONFIGURE_LABELS: &[&str] = &[
    "Total tickets",
    "Ticket release rate",
    "Retrieval rate",
    "Max ticket capacity",
];

/// The one-shot pool configuration form.
#[derive(Debug)]
pub struct ConfigureForm {
    pub form: NumericForm,
}

impl Default for ConfigureForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigureForm {
    pub fn new() -> Self {
        Self {
            form: NumericForm::new(CONFIGURE_LABELS),
        }
    }

    pub fn pool_config_params(&self) -> PoolConfigParams {
        PoolConfigParams {
            total_tickets: self.form.value(TOTAL_TICKETS),
            ticket_release_rate: self.form.value(CFG_RELEASE_RATE),
            customer_retrieval_rate: self.form.value(CFG_RETRIEVAL_RATE),
            max_ticket_capacity: self.form.value(MAX_TICKET_CAPACITY),
        }
    }

    /// Render the configuration form.
    pub fn render(&self, frame: &mut Frame, area: Rect, error: &str) {
        let mut lines = vec![
            Line::styled(
                "Initial pool configuration",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
        ];
        for i in 0..CONFIGURE_LABELS.len() {
            lines.push(self.form.field_line(i));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Press Enter to apply",
            Style::default().fg(Color::DarkGray),
        ));

        if !error.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            ));
        }

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Configure Pool "),
        );
        frame.render_widget(panel, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_editing() {
        let mut panel = ControlPanel::new();
        panel.form.push_digit('2');
        assert_eq!(panel.form.value(VENDOR_COUNT), 2);

        panel.form.select_next();
        panel.form.push_digit('5');
        panel.form.push_digit('0');
        assert_eq!(panel.form.value(TICKET_RELEASE_RATE), 50);

        panel.form.backspace();
        assert_eq!(panel.form.value(TICKET_RELEASE_RATE), 5);
    }

    #[test]
    fn test_empty_field_is_zero() {
        let panel = ControlPanel::new();
        assert_eq!(panel.form.value(VENDOR_COUNT), 0);
        assert!(!panel.vendor_start_params().is_valid());
    }

    #[test]
    fn test_selection_wraps() {
        let mut panel = ControlPanel::new();
        panel.form.select_prev();
        assert_eq!(panel.form.selected(), DASHBOARD_LABELS.len() - 1);
        panel.form.select_next();
        assert_eq!(panel.form.selected(), 0);
    }

    #[test]
    fn test_digit_cap() {
        let mut panel = ControlPanel::new();
        for _ in 0..10 {
            panel.form.push_digit('9');
        }
        assert_eq!(panel.form.value(VENDOR_COUNT), 999_999);
    }

    #[test]
    fn test_params_read_from_fields() {
        let mut panel = ControlPanel::new();
        let digits = ['2', '5', '3', '4', '6', '1'];
        for (i, d) in digits.iter().enumerate() {
            panel.form.push_digit(*d);
            if i < digits.len() - 1 {
                panel.form.select_next();
            }
        }
        assert_eq!(
            panel.vendor_start_params(),
            VendorStartParams {
                vendor_count: 2,
                ticket_release_rate: 5,
                tickets_per_release: 3,
            }
        );
        assert_eq!(
            panel.customer_rates(),
            CustomerRates {
                customer_retrieval_rate: 6,
                tickets_per_purchase: 1,
            }
        );
    }

    #[test]
    fn test_configure_form_params() {
        let mut form = ConfigureForm::new();
        form.form.push_digit('9');
        form.form.select_next();
        form.form.push_digit('5');
        assert_eq!(form.pool_config_params().total_tickets, 9);
        assert_eq!(form.pool_config_params().ticket_release_rate, 5);
        assert!(!form.pool_config_params().is_valid());
    }
}
