//! Command parameters for the remote control surface.
//!
//! Every remote command carries query-string-encoded integers; the structs
//! here serialize with the wire's camelCase names. Validation is strictly
//! local: a command whose required fields are not all strictly positive is
//! never dispatched.

use serde::Serialize;

/// Parameters for `startVendorThreads`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorStartParams {
    pub vendor_count: u32,
    pub ticket_release_rate: u32,
    pub tickets_per_release: u32,
}

impl VendorStartParams {
    /// All required fields strictly positive.
    pub fn is_valid(&self) -> bool {
        self.vendor_count > 0 && self.ticket_release_rate > 0 && self.tickets_per_release > 0
    }
}

/// Parameters for `startCustomerThreads`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStartParams {
    pub customer_count: u32,
    pub customer_retrieval_rate: u32,
    pub tickets_per_purchase: u32,
}

impl CustomerStartParams {
    /// All required fields strictly positive.
    pub fn is_valid(&self) -> bool {
        self.customer_count > 0 && self.customer_retrieval_rate > 0 && self.tickets_per_purchase > 0
    }
}

/// Parameters for `addVendor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRates {
    pub ticket_release_rate: u32,
    pub tickets_per_release: u32,
}

impl VendorRates {
    /// All required fields strictly positive.
    pub fn is_valid(&self) -> bool {
        self.ticket_release_rate > 0 && self.tickets_per_release > 0
    }
}

/// Parameters for `addCustomer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRates {
    pub customer_retrieval_rate: u32,
    pub tickets_per_purchase: u32,
}

impl CustomerRates {
    /// All required fields strictly positive.
    pub fn is_valid(&self) -> bool {
        self.customer_retrieval_rate > 0 && self.tickets_per_purchase > 0
    }
}

/// Parameters for the one-shot `configure` submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolConfigParams {
    pub total_tickets: u32,
    pub ticket_release_rate: u32,
    pub customer_retrieval_rate: u32,
    pub max_ticket_capacity: u32,
}

impl PoolConfigParams {
    /// All required fields strictly positive.
    pub fn is_valid(&self) -> bool {
        self.total_tickets > 0
            && self.ticket_release_rate > 0
            && self.customer_retrieval_rate > 0
            && self.max_ticket_capacity > 0
    }
}
