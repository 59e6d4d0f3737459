//! # ticketwatch-client
//!
//! Remote communication layer for the ticketwatch dashboard:
//! - [`PoolClient`] - one typed method per endpoint of the ticket service
//! - [`Poller`] - timer-driven status and log polling with sequence tags
//! - [`Dispatcher`] - validated, fire-and-forget command dispatch with
//!   optimistic run state
//!
//! All state observed here is remote; this crate never blocks the caller and
//! absorbs its own poll failures.

pub mod api;
pub mod dispatcher;
pub mod error;
pub mod poller;

// Re-export main types for convenience
pub use api::{PoolClient, parse_status};
pub use dispatcher::{Command, CommandKind, CommandOutcome, ControlState, Dispatcher};
pub use error::{ClientError, Result};
pub use poller::{PollEvent, Poller, split_log_lines};
