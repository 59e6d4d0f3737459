//! Command dispatcher with local validation and optimistic run state.
//!
//! One operator action becomes exactly one outbound command. Parameters are
//! validated before anything touches the network; an invalid action sets the
//! error message and dispatches nothing. Dispatch is fire-and-forget: the
//! request runs on a detached task and its [`CommandOutcome`] arrives over a
//! channel whenever the response does, in arrival order, with no fencing.
//!
//! The running flags are optimistic: they reflect the last command this
//! client believes succeeded and are never reconciled against polled status.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use ticketwatch_core::params::{
    CustomerRates, CustomerStartParams, PoolConfigParams, VendorRates, VendorStartParams,
};

use crate::api::PoolClient;
use crate::error::ClientError;

/// A discrete operator action against the remote control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartVendors(VendorStartParams),
    StopVendors,
    StartCustomers(CustomerStartParams),
    StopCustomers,
    AddVendor(VendorRates),
    RemoveVendor,
    AddCustomer(CustomerRates),
    RemoveCustomer,
    Configure(PoolConfigParams),
}

/// Command identity, used to route outcomes back to state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    StartVendors,
    StopVendors,
    StartCustomers,
    StopCustomers,
    AddVendor,
    RemoveVendor,
    AddCustomer,
    RemoveCustomer,
    Configure,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::StartVendors(_) => CommandKind::StartVendors,
            Command::StopVendors => CommandKind::StopVendors,
            Command::StartCustomers(_) => CommandKind::StartCustomers,
            Command::StopCustomers => CommandKind::StopCustomers,
            Command::AddVendor(_) => CommandKind::AddVendor,
            Command::RemoveVendor => CommandKind::RemoveVendor,
            Command::AddCustomer(_) => CommandKind::AddCustomer,
            Command::RemoveCustomer => CommandKind::RemoveCustomer,
            Command::Configure(_) => CommandKind::Configure,
        }
    }

    /// Local pre-validation: every required numeric field strictly positive.
    /// Stop/remove commands carry no fields and are always valid.
    fn is_valid(&self) -> bool {
        match self {
            Command::StartVendors(p) => p.is_valid(),
            Command::StartCustomers(p) => p.is_valid(),
            Command::AddVendor(p) => p.is_valid(),
            Command::AddCustomer(p) => p.is_valid(),
            Command::Configure(p) => p.is_valid(),
            Command::StopVendors
            | Command::StopCustomers
            | Command::RemoveVendor
            | Command::RemoveCustomer => true,
        }
    }
}

impl CommandKind {
    /// Fixed message shown when local validation rejects the action.
    fn validation_message(self) -> &'static str {
        match self {
            CommandKind::StartVendors => {
                "Please specify valid values for vendors and ticket release rate."
            }
            CommandKind::StartCustomers => {
                "Please specify valid values for customers and retrieval rate."
            }
            CommandKind::AddVendor => {
                "Please specify valid values for ticket release rate and tickets per release."
            }
            CommandKind::AddCustomer => {
                "Please specify valid values for customer retrieval rate and tickets per purchase."
            }
            CommandKind::Configure => "All fields should have positive values.",
            CommandKind::StopVendors
            | CommandKind::StopCustomers
            | CommandKind::RemoveVendor
            | CommandKind::RemoveCustomer => "",
        }
    }

    /// Fixed message shown when the remote command fails.
    fn failure_message(self) -> &'static str {
        match self {
            CommandKind::StartVendors => "Failed to start vendor threads. Please try again.",
            CommandKind::StopVendors => "Failed to stop vendor threads. Please try again.",
            CommandKind::StartCustomers => "Failed to start customer threads. Please try again.",
            CommandKind::StopCustomers => "Failed to stop customer threads. Please try again.",
            CommandKind::AddVendor => "Failed to add vendor. Please try again.",
            CommandKind::RemoveVendor => "Failed to remove vendor. Please try again.",
            CommandKind::AddCustomer => "Failed to add customer. Please try again.",
            CommandKind::RemoveCustomer => "Failed to remove customer. Please try again.",
            CommandKind::Configure => {
                "An error occurred while configuring the ticket pool. Please try again."
            }
        }
    }
}

/// Completion of a dispatched command, delivered in arrival order.
#[derive(Debug)]
pub struct CommandOutcome {
    pub kind: CommandKind,
    pub result: Result<(), ClientError>,
}

/// Optimistic local reflection of remote run state.
///
/// Advisory only: it may be stale if a command partially failed remotely
/// after a network-visible success, or if another client changed the remote
/// state. One current error string; the latest failure wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    vendor_running: bool,
    customer_running: bool,
    error: String,
}

impl ControlState {
    pub fn vendor_running(&self) -> bool {
        self.vendor_running
    }

    pub fn customer_running(&self) -> bool {
        self.customer_running
    }

    /// Current error message; empty when the last action succeeded.
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Apply one command completion: flag transitions on start/stop success,
    /// error message set on failure and cleared on success. Failures never
    /// touch the flags.
    fn apply(&mut self, outcome: &CommandOutcome) {
        match &outcome.result {
            Ok(()) => {
                match outcome.kind {
                    CommandKind::StartVendors => self.vendor_running = true,
                    CommandKind::StopVendors => self.vendor_running = false,
                    CommandKind::StartCustomers => self.customer_running = true,
                    CommandKind::StopCustomers => self.customer_running = false,
                    // Add/remove/configure carry no flag transition
                    _ => {}
                }
                self.error.clear();
                debug!(kind = ?outcome.kind, "command succeeded");
            }
            Err(e) => {
                self.error = outcome.kind.failure_message().to_string();
                warn!(kind = ?outcome.kind, error = %e, "command failed");
            }
        }
    }
}

/// Validates operator actions and issues one remote command per action.
pub struct Dispatcher {
    client: Arc<PoolClient>,
    outcome_tx: UnboundedSender<CommandOutcome>,
    state: ControlState,
}

impl Dispatcher {
    /// Create a dispatcher sending completions to `outcome_tx`.
    pub fn new(client: Arc<PoolClient>, outcome_tx: UnboundedSender<CommandOutcome>) -> Self {
        Self {
            client,
            outcome_tx,
            state: ControlState::default(),
        }
    }

    /// Current optimistic state.
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Dispatch one command. Returns false if it was rejected locally, in
    /// which case the error message is set and nothing was sent.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let kind = command.kind();
        if !command.is_valid() {
            self.state.error = kind.validation_message().to_string();
            warn!(kind = ?kind, "command rejected by local validation");
            return false;
        }

        self.state.error.clear();
        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = match command {
                Command::StartVendors(p) => client.start_vendor_threads(&p).await,
                Command::StopVendors => client.stop_vendor_threads().await,
                Command::StartCustomers(p) => client.start_customer_threads(&p).await,
                Command::StopCustomers => client.stop_customer_threads().await,
                Command::AddVendor(p) => client.add_vendor(&p).await,
                Command::RemoveVendor => client.remove_vendor().await,
                Command::AddCustomer(p) => client.add_customer(&p).await,
                Command::RemoveCustomer => client.remove_customer().await,
                Command::Configure(p) => client.configure(&p).await,
            };
            let _ = tx.send(CommandOutcome { kind, result });
        });
        true
    }

    /// Apply a completion received from the outcome channel.
    pub fn apply(&mut self, outcome: &CommandOutcome) {
        self.state.apply(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(kind: CommandKind, ok: bool) -> CommandOutcome {
        CommandOutcome {
            kind,
            result: if ok {
                Ok(())
            } else {
                Err(ClientError::RemoteStatus {
                    action: "test",
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                })
            },
        }
    }

    #[test]
    fn test_start_stop_transitions() {
        let mut state = ControlState::default();
        assert!(!state.vendor_running());

        state.apply(&outcome(CommandKind::StartVendors, true));
        assert!(state.vendor_running());
        assert!(state.error().is_empty());

        state.apply(&outcome(CommandKind::StopVendors, true));
        assert!(!state.vendor_running());

        state.apply(&outcome(CommandKind::StartCustomers, true));
        assert!(state.customer_running());
        state.apply(&outcome(CommandKind::StopCustomers, true));
        assert!(!state.customer_running());
    }

    #[test]
    fn test_failure_leaves_flags_unchanged() {
        let mut state = ControlState::default();
        state.apply(&outcome(CommandKind::StartVendors, true));

        state.apply(&outcome(CommandKind::StopVendors, false));
        assert!(state.vendor_running(), "failed stop must not clear the flag");
        assert_eq!(
            state.error(),
            "Failed to stop vendor threads. Please try again."
        );
    }

    #[test]
    fn test_add_remove_carry_no_flag_transition() {
        let mut state = ControlState::default();
        state.apply(&outcome(CommandKind::AddVendor, true));
        assert!(!state.vendor_running());
        assert!(state.error().is_empty());

        state.apply(&outcome(CommandKind::RemoveCustomer, false));
        assert!(!state.customer_running());
        assert_eq!(state.error(), "Failed to remove customer. Please try again.");
    }

    #[test]
    fn test_latest_failure_wins() {
        let mut state = ControlState::default();
        state.apply(&outcome(CommandKind::AddVendor, false));
        state.apply(&outcome(CommandKind::RemoveVendor, false));
        assert_eq!(state.error(), "Failed to remove vendor. Please try again.");

        // Success clears the message
        state.apply(&outcome(CommandKind::AddVendor, true));
        assert!(state.error().is_empty());
    }

    #[test]
    fn test_command_validity() {
        let bad = Command::StartVendors(VendorStartParams {
            vendor_count: 0,
            ticket_release_rate: 5,
            tickets_per_release: 5,
        });
        assert!(!bad.is_valid());
        assert!(Command::StopVendors.is_valid());
        assert!(Command::RemoveCustomer.is_valid());
    }
}
