//! # ticketwatch-core
//!
//! Core types, errors, and utilities for the ticketwatch dashboard.
//!
//! This crate provides:
//! - [`CoreError`] - Error types for setup and configuration
//! - [`logging`] - Tracing setup and log directory helpers
//! - [`config`] - The `~/.ticketwatch/config.yaml` client configuration
//! - [`history`] - The fixed-capacity ticket sample buffer behind the chart
//! - [`params`] - Validated command parameters for the remote control surface

pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod params;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{CoreError, Result};
pub use history::{HISTORY_CAPACITY, SampleBuffer, TicketHistory};
pub use logging::{LogGuard, init_logging};
pub use params::{
    CustomerRates, CustomerStartParams, PoolConfigParams, VendorRates, VendorStartParams,
};
