//! Integration tests rendering the full app into a test backend and
//! inspecting the buffer contents.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use ticketwatch_client::{CommandKind, CommandOutcome, PollEvent};
use ticketwatch_core::ClientConfig;

use crate::app::App;
use crate::event::AppEvent;
use crate::view::View;

fn test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(120, 40);
    Terminal::new(backend).unwrap()
}

fn test_app() -> App {
    // Nothing listens on this port; poll fetches fail and emit no events,
    // which is exactly the dropped-tick path.
    let config = ClientConfig {
        server_url: "http://127.0.0.1:9".to_string(),
        ..ClientConfig::default()
    };
    App::new(&config).unwrap()
}

fn render_app(app: &mut App, terminal: &mut Terminal<TestBackend>) -> String {
    terminal.draw(|frame| app.draw(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut content = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            content.push_str(buffer[(x, y)].symbol());
        }
        content.push('\n');
    }
    content
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[tokio::test]
async fn test_dashboard_renders_all_panels() {
    let mut app = test_app();
    let mut terminal = test_terminal();
    let content = render_app(&mut app, &mut terminal);

    assert!(content.contains("ticketwatch - Dashboard"));
    assert!(content.contains("Tickets Remaining"));
    assert!(content.contains("Controls"));
    assert!(content.contains("Simulation Log"));
    assert!(content.contains("Waiting for log data..."));
    assert!(content.contains("[connecting...]"));
    assert!(content.contains("Vendors"));
    assert!(content.contains("Customers"));
}

#[tokio::test]
async fn test_status_event_updates_header_and_chart_title() {
    let mut app = test_app();
    let mut terminal = test_terminal();

    app.apply_poll_event(PollEvent::Status {
        seq: 1,
        remaining: 42,
    });
    let content = render_app(&mut app, &mut terminal);

    assert!(content.contains("Tickets Remaining: 42"));
    assert!(content.contains("[42 tickets]"));
    assert!(!content.contains("[connecting...]"));
}

#[tokio::test]
async fn test_sold_out_badge() {
    let mut app = test_app();
    let mut terminal = test_terminal();

    app.apply_poll_event(PollEvent::Status {
        seq: 1,
        remaining: 0,
    });
    let content = render_app(&mut app, &mut terminal);

    assert!(content.contains("[SOLD OUT]"));
}

#[tokio::test]
async fn test_stale_status_event_is_ignored() {
    let mut app = test_app();
    let mut terminal = test_terminal();

    app.apply_poll_event(PollEvent::Status {
        seq: 5,
        remaining: 30,
    });
    app.apply_poll_event(PollEvent::Status {
        seq: 4,
        remaining: 7,
    });
    let content = render_app(&mut app, &mut terminal);

    assert!(content.contains("Tickets Remaining: 30"));
    assert!(!content.contains("Tickets Remaining: 7"));
}

#[tokio::test]
async fn test_log_event_renders_lines() {
    let mut app = test_app();
    let mut terminal = test_terminal();

    app.apply_poll_event(PollEvent::Logs {
        seq: 1,
        lines: vec![
            "Vendor-1 released 5 tickets".to_string(),
            "Customer-2 purchased 1 ticket".to_string(),
        ],
    });
    let content = render_app(&mut app, &mut terminal);

    assert!(content.contains("Vendor-1 released 5 tickets"));
    assert!(content.contains("Customer-2 purchased 1 ticket"));
    assert!(!content.contains("Waiting for log data..."));
}

#[tokio::test]
async fn test_start_outcome_flips_run_badge() {
    let mut app = test_app();
    let mut terminal = test_terminal();

    app.apply_outcome(&CommandOutcome {
        kind: CommandKind::StartVendors,
        result: Ok(()),
    });
    let content = render_app(&mut app, &mut terminal);

    assert!(content.contains("[RUNNING]"));
}

#[tokio::test]
async fn test_invalid_start_shows_fixed_error() {
    let mut app = test_app();
    let mut terminal = test_terminal();

    // All fields default to zero, so the start is rejected locally.
    app.handle_key_event(key(KeyCode::Char('v')));
    let content = render_app(&mut app, &mut terminal);

    assert!(content.contains("Please specify valid values for vendors and ticket release rate."));
    assert!(content.contains("[stopped]"));
}

#[tokio::test]
async fn test_configure_success_message_in_footer() {
    let mut app = test_app();
    let mut terminal = test_terminal();

    app.apply_outcome(&CommandOutcome {
        kind: CommandKind::Configure,
        result: Ok(()),
    });
    let content = render_app(&mut app, &mut terminal);

    assert!(content.contains("Configuration applied successfully!"));
}

#[tokio::test]
async fn test_tab_switches_view_and_esc_returns() {
    let mut app = test_app();
    let mut terminal = test_terminal();
    assert_eq!(app.view(), View::Dashboard);

    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.view(), View::Configure);
    let content = render_app(&mut app, &mut terminal);
    assert!(content.contains("Configure Pool"));
    assert!(content.contains("Press Enter to apply"));

    app.handle_key_event(key(KeyCode::Esc));
    assert_eq!(app.view(), View::Dashboard);
}

#[tokio::test]
async fn test_digit_editing_updates_form() {
    let mut app = test_app();
    let mut terminal = test_terminal();

    app.handle_app_event(AppEvent::Digit('3'));
    app.handle_app_event(AppEvent::Digit('7'));
    assert_eq!(app.controls().vendor_start_params().vendor_count, 37);

    app.handle_app_event(AppEvent::Backspace);
    assert_eq!(app.controls().vendor_start_params().vendor_count, 3);

    let content = render_app(&mut app, &mut terminal);
    assert!(content.contains("Vendor count"));
}

#[tokio::test]
async fn test_quit_events() {
    let mut app = test_app();
    assert!(!app.should_quit());
    app.handle_app_event(AppEvent::Quit);
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_shutdown_is_idempotent() {
    let mut app = test_app();
    app.shutdown();
    app.shutdown();
}
