//! Main application state and logic for the ticketwatch TUI.
//!
//! The `App` owns every mutable structure: the ticket history, the log view,
//! the optimistic control state, and the chart. Poller and dispatcher tasks
//! only send events over channels; the frame loop drains them, so each
//! structure has exactly one writer.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use ticketwatch_client::{
    Command, CommandKind, CommandOutcome, Dispatcher, PollEvent, Poller, PoolClient,
};
use ticketwatch_core::{ClientConfig, TicketHistory};

use crate::chart_panel::ChartPanel;
use crate::control_panel::{ConfigureForm, ControlPanel};
use crate::event::{AppEvent, InputHandler};
use crate::log_panel::LogView;
use crate::view::View;

/// Result type for app operations.
pub type AppResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Frame pacing (20 FPS is plenty for a 500ms poll cadence).
const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Minimum redraw cadence so the header clock stays current.
const CLOCK_REDRAW_INTERVAL: Duration = Duration::from_secs(1);

/// Main application state.
pub struct App {
    /// Current active view
    view: View,
    /// Input handler for key events
    input_handler: InputHandler,
    /// Whether the app should quit
    should_quit: bool,
    /// Dirty flag - whether UI needs redraw
    dirty: bool,
    /// Last draw time, for the clock redraw floor
    last_draw: Instant,
    /// Applied ticket samples and sold-out state
    history: TicketHistory,
    /// Line chart bound to the history
    chart: ChartPanel,
    /// Remote log tail
    logs: LogView,
    /// Vendor/customer control form
    controls: ControlPanel,
    /// One-shot pool configuration form
    configure: ConfigureForm,
    /// Command dispatcher with optimistic run state
    dispatcher: Dispatcher,
    /// Status poll schedule
    status_poller: Poller,
    /// Log poll schedule
    log_poller: Poller,
    /// Poll results from both pollers
    poll_rx: UnboundedReceiver<PollEvent>,
    /// Command completions from the dispatcher's tasks
    outcome_rx: UnboundedReceiver<CommandOutcome>,
    /// Transient status message for the footer
    status_message: Option<String>,
    /// Server URL shown in the header
    server_url: String,
}

impl App {
    /// Create the app and start both pollers against the configured server.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = Arc::new(PoolClient::new(
            config.base_url(),
            Duration::from_secs(config.request_timeout_secs),
        )?);

        let (poll_tx, poll_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let status_poller = Poller::status(
            Arc::clone(&client),
            Duration::from_millis(config.status_interval_ms),
            poll_tx.clone(),
        );
        let log_poller = Poller::logs(
            Arc::clone(&client),
            Duration::from_millis(config.log_interval_ms),
            poll_tx,
        );
        let dispatcher = Dispatcher::new(client, outcome_tx);

        let history = TicketHistory::new();
        let mut chart = ChartPanel::new();
        chart.init(&history.snapshot());

        Ok(Self {
            view: View::default(),
            input_handler: InputHandler::new(),
            should_quit: false,
            dirty: true,
            last_draw: Instant::now(),
            history,
            chart,
            logs: LogView::new(),
            controls: ControlPanel::new(),
            configure: ConfigureForm::new(),
            dispatcher,
            status_poller,
            log_poller,
            poll_rx,
            outcome_rx,
            status_message: None,
            server_url: config.base_url().to_string(),
        })
    }

    /// Returns the current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Returns whether the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The vendor/customer control form.
    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn take_dirty(&mut self) -> bool {
        let dirty = self.dirty;
        self.dirty = false;
        dirty
    }

    /// Apply one poll result, honoring the latest-wins sequence gate.
    pub fn apply_poll_event(&mut self, event: PollEvent) {
        match event {
            PollEvent::Status { seq, remaining } => {
                if self.history.apply(seq, remaining) {
                    self.chart.redraw(&self.history.snapshot());
                    self.mark_dirty();
                }
            }
            PollEvent::Logs { seq, lines } => {
                if self.logs.replace(seq, lines) {
                    self.mark_dirty();
                }
            }
        }
    }

    /// Apply one command completion.
    pub fn apply_outcome(&mut self, outcome: &CommandOutcome) {
        if outcome.kind == CommandKind::Configure && outcome.result.is_ok() {
            self.status_message = Some("Configuration applied successfully!".to_string());
        }
        self.dispatcher.apply(outcome);
        self.mark_dirty();
    }

    /// Drain pending poll results and command completions.
    fn drain_channels(&mut self) {
        while let Ok(event) = self.poll_rx.try_recv() {
            self.apply_poll_event(event);
        }
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(&outcome);
        }
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let event = self.input_handler.handle_key(key, self.view);
        self.handle_app_event(event);
    }

    /// Handle an application event.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SwitchView(view) => {
                if self.view != view {
                    self.view = view;
                    self.mark_dirty();
                }
            }
            AppEvent::NextView => {
                self.view = self.view.next();
                self.mark_dirty();
            }
            AppEvent::PrevView => {
                self.view = self.view.prev();
                self.mark_dirty();
            }
            AppEvent::Quit | AppEvent::ForceQuit => self.should_quit = true,
            AppEvent::FieldPrev => {
                self.active_form_mut().select_prev();
                self.mark_dirty();
            }
            AppEvent::FieldNext => {
                self.active_form_mut().select_next();
                self.mark_dirty();
            }
            AppEvent::Digit(c) => {
                self.active_form_mut().push_digit(c);
                self.mark_dirty();
            }
            AppEvent::Backspace => {
                self.active_form_mut().backspace();
                self.mark_dirty();
            }
            AppEvent::Command(kind) => self.dispatch_command(kind),
            AppEvent::None => {}
        }
    }

    fn active_form_mut(&mut self) -> &mut crate::control_panel::NumericForm {
        match self.view {
            View::Dashboard => &mut self.controls.form,
            View::Configure => &mut self.configure.form,
        }
    }

    /// Build the command for an action from the current form values and
    /// dispatch it. Validation failures surface through the control state.
    fn dispatch_command(&mut self, kind: CommandKind) {
        let command = match kind {
            CommandKind::StartVendors => Command::StartVendors(self.controls.vendor_start_params()),
            CommandKind::StopVendors => Command::StopVendors,
            CommandKind::StartCustomers => {
                Command::StartCustomers(self.controls.customer_start_params())
            }
            CommandKind::StopCustomers => Command::StopCustomers,
            CommandKind::AddVendor => Command::AddVendor(self.controls.vendor_rates()),
            CommandKind::RemoveVendor => Command::RemoveVendor,
            CommandKind::AddCustomer => Command::AddCustomer(self.controls.customer_rates()),
            CommandKind::RemoveCustomer => Command::RemoveCustomer,
            CommandKind::Configure => Command::Configure(self.configure.pool_config_params()),
        };
        self.dispatcher.dispatch(command);
        self.mark_dirty();
    }

    /// Stop both pollers. Idempotent; also runs from Drop via the pollers'
    /// own handles.
    pub fn shutdown(&mut self) {
        self.status_poller.stop();
        self.log_poller.stop();
    }

    /// Run the main application loop.
    pub fn run(&mut self) -> AppResult<()> {
        // Setup terminal
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal);

        self.shutdown();

        // Restore terminal
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result
    }

    /// The inner event loop with frame pacing.
    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> AppResult<()> {
        while !self.should_quit {
            let frame_start = Instant::now();

            self.drain_channels();

            let needs_redraw =
                self.take_dirty() || self.last_draw.elapsed() >= CLOCK_REDRAW_INTERVAL;
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.last_draw = Instant::now();
            }

            let elapsed = frame_start.elapsed();
            let timeout = FRAME_DURATION.saturating_sub(elapsed);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key);
                }
            }
        }
        Ok(())
    }

    /// Draw the UI.
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Content
                Constraint::Length(2), // Footer
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        match self.view {
            View::Dashboard => self.draw_dashboard(frame, chunks[1]),
            View::Configure => {
                let error = self.dispatcher.state().error().to_string();
                self.configure.render(frame, chunks[1], &error);
            }
        }
        self.draw_footer(frame, chunks[2]);
    }

    /// Draw the header: title, server, clock, and pool status.
    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" ticketwatch - {} ", self.view.title());
        let clock = chrono::Local::now().format("%H:%M:%S").to_string();

        let (status_text, status_style) = if !self.history.has_data() {
            (
                "[connecting...]".to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else if self.history.sold_out() {
            (
                "[SOLD OUT]".to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        } else {
            (
                format!("[{} tickets]", self.history.remaining()),
                Style::default().fg(Color::Green),
            )
        };

        let right_len = self.server_url.len() + 2 + clock.len() + 2 + status_text.len();
        let spacing = (area.width as usize).saturating_sub(title.len() + right_len + 2);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(spacing)),
            Span::styled(self.server_url.clone(), Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(clock, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(status_text, status_style),
        ]))
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(header, area);
    }

    /// Draw the dashboard: chart on top, controls and log tail below.
    fn draw_dashboard(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Min(12)])
            .split(area);

        self.chart.render(
            frame,
            rows[0],
            self.history.remaining(),
            self.history.sold_out(),
            self.history.has_data(),
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(20)])
            .split(rows[1]);

        self.controls.render(frame, columns[0], self.dispatcher.state());
        self.logs.render(frame, columns[1]);
    }

    /// Draw the footer: transient status message or hotkey hints.
    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(message) = &self.status_message {
            Line::styled(message.clone(), Style::default().fg(Color::Green))
        } else {
            let hotkey = Style::default().fg(Color::Yellow);
            Line::from(vec![
                Span::styled("[v/V]", hotkey),
                Span::raw("start/stop vendors "),
                Span::styled("[c/C]", hotkey),
                Span::raw("start/stop customers "),
                Span::styled("[+/-]", hotkey),
                Span::raw("add/rm vendor "),
                Span::styled("[>/<]", hotkey),
                Span::raw("add/rm customer "),
                Span::styled("[Tab]", hotkey),
                Span::raw("view "),
                Span::styled("[q]", hotkey),
                Span::raw("quit"),
            ])
        };

        let footer = Paragraph::new(line)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP));
        frame.render_widget(footer, area);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}
