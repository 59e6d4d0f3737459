//! HTTP client for the remote ticket service.
//!
//! [`PoolClient`] exposes one typed method per endpoint of the remote control
//! surface. All parameters are query-string-encoded integers, all POST bodies
//! are empty, and success is any non-error HTTP status. The status endpoint
//! returns a text body of the fixed shape `"<label>: <integer>"`.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use ticketwatch_core::params::{
    CustomerRates, CustomerStartParams, PoolConfigParams, VendorRates, VendorStartParams,
};

use crate::error::{ClientError, Result};

/// Client for the remote ticket pool service.
pub struct PoolClient {
    http: reqwest::Client,
    base_url: String,
}

impl PoolClient {
    /// Create a client against the given base URL with a request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One-shot pool configuration.
    pub async fn configure(&self, params: &PoolConfigParams) -> Result<()> {
        self.post("configure", Some(params)).await
    }

    /// Start vendor threads on the remote simulation.
    pub async fn start_vendor_threads(&self, params: &VendorStartParams) -> Result<()> {
        self.post("startVendorThreads", Some(params)).await
    }

    /// Stop all vendor threads.
    pub async fn stop_vendor_threads(&self) -> Result<()> {
        self.post::<()>("stopVendorThreads", None).await
    }

    /// Start customer threads on the remote simulation.
    pub async fn start_customer_threads(&self, params: &CustomerStartParams) -> Result<()> {
        self.post("startCustomerThreads", Some(params)).await
    }

    /// Stop all customer threads.
    pub async fn stop_customer_threads(&self) -> Result<()> {
        self.post::<()>("stopCustomerThreads", None).await
    }

    /// Add one vendor thread.
    pub async fn add_vendor(&self, params: &VendorRates) -> Result<()> {
        self.post("addVendor", Some(params)).await
    }

    /// Remove one vendor thread.
    pub async fn remove_vendor(&self) -> Result<()> {
        self.post::<()>("removeVendor", None).await
    }

    /// Add one customer thread.
    pub async fn add_customer(&self, params: &CustomerRates) -> Result<()> {
        self.post("addCustomer", Some(params)).await
    }

    /// Remove one customer thread.
    pub async fn remove_customer(&self) -> Result<()> {
        self.post::<()>("removeCustomer", None).await
    }

    /// Fetch the current "tickets remaining" count.
    pub async fn status(&self) -> Result<u32> {
        let url = self.url("status");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::RemoteStatus {
                action: "status",
                status: response.status(),
            });
        }
        let body = response.text().await?;
        parse_status(&body)
    }

    /// Fetch the full remote log as one text blob.
    pub async fn logs(&self) -> Result<String> {
        let url = self.url("logs");
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::RemoteStatus {
                action: "logs",
                status: response.status(),
            });
        }
        Ok(response.text().await?)
    }

    fn url(&self, action: &str) -> String {
        format!("{}/api/tickets/{}", self.base_url, action)
    }

    /// Issue a command POST with an empty body and optional query parameters.
    async fn post<P: Serialize>(&self, action: &'static str, params: Option<&P>) -> Result<()> {
        let url = self.url(action);
        debug!(action, "dispatching command");

        let mut request = self.http.post(&url);
        if let Some(params) = params {
            request = request.query(params);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClientError::RemoteStatus {
                action,
                status: response.status(),
            });
        }
        Ok(())
    }
}

/// Parse a status body of the shape `"<label>: <integer>"`.
///
/// Split on the first `:`, trim, parse a non-negative integer. Anything else
/// is malformed and the caller drops the tick.
pub fn parse_status(body: &str) -> Result<u32> {
    let malformed = || ClientError::MalformedStatus {
        body: body.to_string(),
    };
    let (_, value) = body.split_once(':').ok_or_else(malformed)?;
    value.trim().parse::<u32>().map_err(|_| malformed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_well_formed() {
        assert_eq!(parse_status("Tickets remaining: 7").unwrap(), 7);
        assert_eq!(parse_status("Tickets remaining: 0").unwrap(), 0);
        assert_eq!(parse_status("Tickets remaining:50").unwrap(), 50);
    }

    #[test]
    fn test_parse_status_malformed() {
        assert!(parse_status("garbage").is_err());
        assert!(parse_status("Tickets remaining: many").is_err());
        assert!(parse_status("Tickets remaining: -3").is_err());
        assert!(parse_status("").is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = PoolClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("status"), "http://localhost:8080/api/tickets/status");
    }
}
