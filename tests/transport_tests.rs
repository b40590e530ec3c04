//! Integration tests for custom transports.
//!
//! These tests plug in-process [`Transport`] implementations into the client
//! to verify request construction and failure propagation without a network.

use std::sync::{Arc, Mutex};

use aem_headless::clients::{
    CredentialsMode, HttpMethod, Transport, TransportError, TransportRequest, TransportResponse,
};
use aem_headless::{
    ApiError, Auth, ExecutionContext, HeadlessClient, HeadlessConfig, RequestOptions, ServiceUrl,
};
use async_trait::async_trait;
use serde_json::{json, Map};
use tokio_test::{assert_err, assert_ok};

/// Fails every request before a response exists.
struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        Err(TransportError::other("ConnectionRefused", "connection refused"))
    }
}

/// Answers with `{"data": <request body>}` and records every request.
#[derive(Default)]
struct EchoTransport {
    requests: Mutex<Vec<TransportRequest>>,
}

impl EchoTransport {
    fn last_request(&self) -> TransportRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for EchoTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let body = json!({ "data": request.body }).to_string();
        self.requests.lock().unwrap().push(request);
        Ok(TransportResponse::new(200, body))
    }
}

fn failing_client() -> HeadlessClient {
    HeadlessClient::with_transport(HeadlessConfig::default(), Arc::new(FailingTransport))
}

fn echo_client(config: HeadlessConfig) -> (HeadlessClient, Arc<EchoTransport>) {
    let transport = Arc::new(EchoTransport::default());
    let client = HeadlessClient::with_transport(config, transport.clone());
    (client, transport)
}

fn assert_transport_failure(error: &ApiError) {
    assert_eq!(error.name, "ConnectionRefused");
    assert_eq!(error.message, "connection refused");
    assert_eq!(error.status, None);
}

// ============================================================================
// Failure Propagation Tests
// ============================================================================

#[tokio::test]
async fn test_every_operation_rejects_when_transport_fails() {
    let client = failing_client();
    let options = RequestOptions::default;

    let error = assert_err!(client.post_query("{ a }", options()).await);
    assert_transport_failure(&error);

    let error = assert_err!(
        client
            .post_query_with_variables("{ a }", json!({}), options())
            .await
    );
    assert_transport_failure(&error);

    let error = assert_err!(client.save_query("{ a }", "site/q", options()).await);
    assert_transport_failure(&error);

    let error = assert_err!(client.get_query("site/q", options()).await);
    assert_transport_failure(&error);

    let error = assert_err!(
        client
            .get_query_with_variables("site/q", &Map::new(), options())
            .await
    );
    assert_transport_failure(&error);

    let error = assert_err!(client.list_queries(options()).await);
    assert_transport_failure(&error);
}

#[tokio::test]
async fn test_empty_query_rejects_when_transport_fails() {
    let client = failing_client();
    let error = assert_err!(client.post_query("", RequestOptions::default()).await);
    assert_transport_failure(&error);
}

#[tokio::test]
async fn test_normalized_transport_error_passes_through() {
    struct ApiFailure;

    #[async_trait]
    impl Transport for ApiFailure {
        async fn send(
            &self,
            _request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            Err(ApiError::new("Aborted", "abort", None, "request aborted", json!({ "id": 7 })).into())
        }
    }

    let client = HeadlessClient::with_transport(HeadlessConfig::default(), Arc::new(ApiFailure));
    let error = assert_err!(client.list_queries(RequestOptions::default()).await);

    assert_eq!(
        error,
        ApiError::new("Aborted", "abort", None, "request aborted", json!({ "id": 7 }))
    );
}

// ============================================================================
// Request Construction Tests
// ============================================================================

#[tokio::test]
async fn test_echo_transport_returns_input() {
    let (client, _transport) = echo_client(HeadlessConfig::default());

    let data = assert_ok!(client.post_query("{ a }", RequestOptions::default()).await);

    assert_eq!(data, json!({ "data": json!({ "query": "{ a }" }).to_string() }));
}

#[tokio::test]
async fn test_server_context_joins_service_url() {
    let config = HeadlessConfig::builder()
        .service_url(ServiceUrl::new("https://publish.example.com/").unwrap())
        .endpoint("/content/graphql/global/endpoint.json")
        .build()
        .unwrap();
    let (client, transport) = echo_client(config);

    assert_ok!(client.post_query("{ a }", RequestOptions::default()).await);

    let request = transport.last_request();
    assert_eq!(
        request.url,
        "https://publish.example.com/content/graphql/global/endpoint.json"
    );
    assert_eq!(request.method, HttpMethod::Post);
}

#[tokio::test]
async fn test_browser_like_context_keeps_relative_endpoint() {
    let config = HeadlessConfig::builder()
        .context(ExecutionContext::BrowserLike)
        .build()
        .unwrap();
    let (client, transport) = echo_client(config);

    assert_ok!(client.get_query("wknd/q", RequestOptions::default()).await);

    let request = transport.last_request();
    assert_eq!(request.url, "graphql/execute.json/wknd/q");
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_save_query_sends_raw_query_with_put() {
    let (client, transport) = echo_client(HeadlessConfig::default());

    assert_ok!(
        client
            .save_query("{ a }", "wknd/q", RequestOptions::default())
            .await
    );

    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.url, "http://localhost:4503/graphql/persist.json/wknd/q");
    assert_eq!(request.body.as_deref(), Some("{ a }"));
}

#[tokio::test]
async fn test_auth_sets_header_and_credentials_mode() {
    let config = HeadlessConfig::builder()
        .auth(Auth::bearer("abc").unwrap())
        .build()
        .unwrap();
    let (client, transport) = echo_client(config);

    assert_ok!(client.list_queries(RequestOptions::default()).await);

    let request = transport.last_request();
    assert_eq!(
        request.headers.get("Authorization").map(String::as_str),
        Some("Bearer abc")
    );
    assert_eq!(
        request.headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(request.credentials, Some(CredentialsMode::Include));
}

#[tokio::test]
async fn test_caller_options_replace_computed_values() {
    let config = HeadlessConfig::builder()
        .auth(Auth::bearer("abc").unwrap())
        .build()
        .unwrap();
    let (client, transport) = echo_client(config);

    let options = RequestOptions::builder()
        .method(HttpMethod::Delete)
        .header("X-Only", "1")
        .body("override")
        .credentials(CredentialsMode::Omit)
        .build();
    assert_ok!(client.save_query("{ a }", "wknd/q", options).await);

    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.headers.get("X-Only").map(String::as_str), Some("1"));
    assert_eq!(request.body.as_deref(), Some("override"));
    assert_eq!(request.credentials, Some(CredentialsMode::Omit));
}

#[test]
fn test_client_runs_on_blocking_runtime() {
    let (client, transport) = echo_client(HeadlessConfig::default());

    let result = tokio_test::block_on(client.list_queries(RequestOptions::default()));

    assert_ok!(result);
    assert_eq!(transport.last_request().url, "http://localhost:4503/graphql/list.json");
}
