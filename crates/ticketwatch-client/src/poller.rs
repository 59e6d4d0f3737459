//! Timer-driven pollers for remote status and logs.
//!
//! Each poller owns a repeating tokio interval task. A tick issues its fetch
//! as a detached task and does not await it, so a slow response never delays
//! the cadence and two fetches may be in flight at once. Every request is
//! tagged with a monotonically increasing sequence number; the consumer
//! (`TicketHistory`, `LogView`) applies a result only if its sequence number
//! is the highest seen, so stale completions lose.
//!
//! A failed tick (transport error or malformed body) is dropped silently:
//! logged at DEBUG, nothing sent, previous state untouched.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::api::PoolClient;

/// One applied-or-droppable poll result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    /// Parsed "tickets remaining" sample.
    Status { seq: u64, remaining: u32 },
    /// Full remote log, already split on line breaks.
    Logs { seq: u64, lines: Vec<String> },
}

/// Handle to a running poller task.
///
/// `stop` is idempotent and guarantees no further fetch is scheduled after it
/// returns; fetches already in flight run to completion and their results are
/// left to the consumer's sequence gate. Dropping the handle stops the task.
pub struct Poller {
    task: Option<JoinHandle<()>>,
}

impl Poller {
    /// Start polling `GET /api/tickets/status` every `period`, beginning
    /// immediately.
    pub fn status(client: Arc<PoolClient>, period: Duration, tx: UnboundedSender<PollEvent>) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut seq: u64 = 0;
            loop {
                ticker.tick().await;
                seq += 1;
                let client = Arc::clone(&client);
                let tx = tx.clone();
                // Fetch without awaiting so ticks can overlap
                tokio::spawn(async move {
                    match client.status().await {
                        Ok(remaining) => {
                            let _ = tx.send(PollEvent::Status { seq, remaining });
                        }
                        Err(e) => debug!(seq, error = %e, "status tick dropped"),
                    }
                });
            }
        });
        Self { task: Some(task) }
    }

    /// Start polling `GET /api/tickets/logs` every `period`, beginning
    /// immediately.
    pub fn logs(client: Arc<PoolClient>, period: Duration, tx: UnboundedSender<PollEvent>) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut seq: u64 = 0;
            loop {
                ticker.tick().await;
                seq += 1;
                let client = Arc::clone(&client);
                let tx = tx.clone();
                tokio::spawn(async move {
                    match client.logs().await {
                        Ok(text) => {
                            let lines = split_log_lines(&text);
                            let _ = tx.send(PollEvent::Logs { seq, lines });
                        }
                        Err(e) => debug!(seq, error = %e, "log tick dropped"),
                    }
                });
            }
        });
        Self { task: Some(task) }
    }

    /// Cancel the schedule. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("poller stopped");
        }
    }

    /// Whether the poller has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.task.is_none()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Split a log blob into display lines. The whole list replaces the previous
/// one on every tick; an empty blob yields a single empty line.
pub fn split_log_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_lines() {
        assert_eq!(split_log_lines("a\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_log_lines(""), vec![""]);
        assert_eq!(split_log_lines("one line"), vec!["one line"]);
        assert_eq!(split_log_lines("trailing\n"), vec!["trailing", ""]);
    }
}
