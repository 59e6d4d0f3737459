//! HTTP-level tests for [`PoolClient`] against a mock ticket service.

use std::time::Duration;

use ticketwatch_client::api::PoolClient;
use ticketwatch_client::error::ClientError;
use ticketwatch_core::params::{
    CustomerRates, CustomerStartParams, PoolConfigParams, VendorStartParams,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PoolClient {
    PoolClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_status_parses_remaining_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Tickets remaining: 42"))
        .mount(&server)
        .await;

    let remaining = client_for(&server).status().await.unwrap();
    assert_eq!(remaining, 42);
}

#[tokio::test]
async fn test_status_malformed_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("garbage"))
        .mount(&server)
        .await;

    let err = client_for(&server).status().await.unwrap_err();
    assert!(matches!(err, ClientError::MalformedStatus { .. }));
}

#[tokio::test]
async fn test_status_http_error_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).status().await.unwrap_err();
    assert!(matches!(err, ClientError::RemoteStatus { .. }));
}

#[tokio::test]
async fn test_logs_returns_full_blob() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("vendor released 5\ncustomer bought 2"))
        .mount(&server)
        .await;

    let blob = client_for(&server).logs().await.unwrap();
    assert_eq!(blob, "vendor released 5\ncustomer bought 2");
}

#[tokio::test]
async fn test_start_vendor_threads_encodes_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/startVendorThreads"))
        .and(query_param("vendorCount", "2"))
        .and(query_param("ticketReleaseRate", "5"))
        .and(query_param("ticketsPerRelease", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let params = VendorStartParams {
        vendor_count: 2,
        ticket_release_rate: 5,
        tickets_per_release: 3,
    };
    client_for(&server)
        .start_vendor_threads(&params)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_start_customer_threads_encodes_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/startCustomerThreads"))
        .and(query_param("customerCount", "4"))
        .and(query_param("customerRetrievalRate", "2"))
        .and(query_param("ticketsPerPurchase", "1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let params = CustomerStartParams {
        customer_count: 4,
        customer_retrieval_rate: 2,
        tickets_per_purchase: 1,
    };
    client_for(&server)
        .start_customer_threads(&params)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_customer_encodes_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/addCustomer"))
        .and(query_param("customerRetrievalRate", "7"))
        .and(query_param("ticketsPerPurchase", "2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let params = CustomerRates {
        customer_retrieval_rate: 7,
        tickets_per_purchase: 2,
    };
    client_for(&server).add_customer(&params).await.unwrap();
}

#[tokio::test]
async fn test_stop_and_remove_have_no_query() {
    let server = MockServer::start().await;
    for action in [
        "stopVendorThreads",
        "stopCustomerThreads",
        "removeVendor",
        "removeCustomer",
    ] {
        Mock::given(method("POST"))
            .and(path(format!("/api/tickets/{action}")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    client.stop_vendor_threads().await.unwrap();
    client.stop_customer_threads().await.unwrap();
    client.remove_vendor().await.unwrap();
    client.remove_customer().await.unwrap();
}

#[tokio::test]
async fn test_configure_encodes_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/configure"))
        .and(query_param("totalTickets", "100"))
        .and(query_param("ticketReleaseRate", "5"))
        .and(query_param("customerRetrievalRate", "5"))
        .and(query_param("maxTicketCapacity", "50"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let params = PoolConfigParams {
        total_tickets: 100,
        ticket_release_rate: 5,
        customer_retrieval_rate: 5,
        max_ticket_capacity: 50,
    };
    client_for(&server).configure(&params).await.unwrap();
}

#[tokio::test]
async fn test_command_failure_is_remote_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tickets/stopVendorThreads"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).stop_vendor_threads().await.unwrap_err();
    match err {
        ClientError::RemoteStatus { action, status } => {
            assert_eq!(action, "stopVendorThreads");
            assert_eq!(status.as_u16(), 500);
        }
        other => panic!("unexpected error: {other}"),
    }
}
