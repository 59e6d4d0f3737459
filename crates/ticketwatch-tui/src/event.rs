//! Event handling for the ticketwatch TUI.
//!
//! Converts key events into application events. Digits and backspace always
//! edit the selected form field; letters are command hotkeys, so the two
//! never collide.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use ticketwatch_client::CommandKind;

use crate::view::View;

/// Application-level events that can trigger state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Switch to a specific view
    SwitchView(View),
    /// Cycle to the next view
    NextView,
    /// Cycle to the previous view
    PrevView,
    /// Request application quit
    Quit,
    /// Force quit (Ctrl+C)
    ForceQuit,
    /// Select the previous form field
    FieldPrev,
    /// Select the next form field
    FieldNext,
    /// Append a digit to the selected field
    Digit(char),
    /// Delete the last digit of the selected field
    Backspace,
    /// Dispatch a command against the remote control surface
    Command(CommandKind),
    /// No action needed
    None,
}

/// Input handler for converting key events to app events.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Create a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Handle a key event in the context of the current view.
    pub fn handle_key(&self, key: KeyEvent, view: View) -> AppEvent {
        // Ctrl+C always force quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppEvent::ForceQuit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => AppEvent::Quit,

            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    AppEvent::PrevView
                } else {
                    AppEvent::NextView
                }
            }
            KeyCode::BackTab => AppEvent::PrevView,
            KeyCode::Esc => AppEvent::SwitchView(View::Dashboard),

            // Form field editing
            KeyCode::Up => AppEvent::FieldPrev,
            KeyCode::Down => AppEvent::FieldNext,
            KeyCode::Char(c) if c.is_ascii_digit() => AppEvent::Digit(c),
            KeyCode::Backspace => AppEvent::Backspace,

            // Configure view submits with Enter
            KeyCode::Enter if view == View::Configure => {
                AppEvent::Command(CommandKind::Configure)
            }

            // Command hotkeys, dashboard only
            KeyCode::Char('v') if view == View::Dashboard => {
                AppEvent::Command(CommandKind::StartVendors)
            }
            KeyCode::Char('V') if view == View::Dashboard => {
                AppEvent::Command(CommandKind::StopVendors)
            }
            KeyCode::Char('c') if view == View::Dashboard => {
                AppEvent::Command(CommandKind::StartCustomers)
            }
            KeyCode::Char('C') if view == View::Dashboard => {
                AppEvent::Command(CommandKind::StopCustomers)
            }
            KeyCode::Char('+') if view == View::Dashboard => {
                AppEvent::Command(CommandKind::AddVendor)
            }
            KeyCode::Char('-') if view == View::Dashboard => {
                AppEvent::Command(CommandKind::RemoveVendor)
            }
            KeyCode::Char('>') if view == View::Dashboard => {
                AppEvent::Command(CommandKind::AddCustomer)
            }
            KeyCode::Char('<') if view == View::Dashboard => {
                AppEvent::Command(CommandKind::RemoveCustomer)
            }

            _ => AppEvent::None,
        }
    }
}
