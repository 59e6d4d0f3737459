//! Terminal dashboard for the remote ticket pool simulation.
//!
//! Renders the ticket history chart, the simulation log tail, and the
//! vendor/customer control surface, and drives the background pollers and
//! the command dispatcher.

pub mod app;
pub mod chart_panel;
pub mod control_panel;
pub mod event;
pub mod log_panel;
pub mod view;

#[cfg(test)]
mod integration_tests;

pub use app::{App, AppResult};
pub use event::AppEvent;
pub use view::View;
