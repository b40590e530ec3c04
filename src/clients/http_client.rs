//! Request dispatcher for headless GraphQL endpoints.
//!
//! This module provides the [`HttpClient`] type, which turns an endpoint, a
//! body and per-call [`RequestOptions`] into exactly one transport call and
//! returns the parsed JSON body or a normalized [`ApiError`].

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Url;

use crate::clients::errors::{normalize_response, ApiError};
use crate::clients::http_request::{
    set_header, CredentialsMode, RequestOptions, TransportRequest,
};
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::{Auth, HeadlessConfig};
use crate::error::ConfigError;

/// Request dispatcher.
///
/// The client handles:
/// - URL resolution (absolute endpoints as-is, relative ones joined to the service URL)
/// - Default headers, including `Content-Type` and `Authorization`
/// - Per-call overrides, where the caller always wins
/// - Error normalization into [`ApiError`]
///
/// No retries, no caching: every call is exactly one transport exchange.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use aem_headless::clients::{HttpClient, RequestOptions};
/// use aem_headless::HeadlessConfig;
///
/// let client = HttpClient::new(HeadlessConfig::default())?;
/// let data = client
///     .dispatch("content/graphql/endpoint.gql", r#"{"query":"{ a }"}"#, RequestOptions::default(), None)
///     .await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    config: HeadlessConfig,
    transport: Arc<dyn Transport>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Creates a dispatcher backed by a [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying HTTP client
    /// cannot be created.
    pub fn new(config: HeadlessConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_transport(config, Arc::new(ReqwestTransport::new()?)))
    }

    /// Creates a dispatcher backed by a custom transport.
    #[must_use]
    pub fn with_transport(config: HeadlessConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &HeadlessConfig {
        &self.config
    }

    /// Resolves an endpoint reference to the URL the transport will use.
    ///
    /// An endpoint that parses as an absolute URL with a non-empty host is
    /// returned unchanged. Anything else is appended to the host prefix of
    /// the execution context: the service URL (joined with exactly one `/`)
    /// or, in a browser-like context, nothing.
    #[must_use]
    pub fn resolve_url(&self, endpoint: &str) -> String {
        let is_absolute = Url::parse(endpoint)
            .ok()
            .and_then(|url| url.host_str().map(|host| !host.is_empty()))
            .unwrap_or(false);
        if is_absolute {
            return endpoint.to_string();
        }

        let prefix = self
            .config
            .context()
            .host_prefix(self.config.service_url());
        if prefix.is_empty() {
            return endpoint.to_string();
        }
        format!(
            "{}/{}",
            prefix.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Computes the headers sent when the caller does not override them.
    ///
    /// `Content-Type: application/json`, then the configured default headers,
    /// then `Authorization` if a credential is present. Header names compare
    /// case-insensitively and a later entry replaces an earlier one.
    #[must_use]
    pub fn default_headers(&self, auth: Option<&Auth>) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        set_header(
            &mut headers,
            "Content-Type".to_string(),
            "application/json".to_string(),
        );
        for (key, value) in self.config.headers() {
            set_header(&mut headers, key.clone(), value.clone());
        }
        if let Some(auth) = auth {
            set_header(&mut headers, "Authorization".to_string(), auth.header_value());
        }
        headers
    }

    /// Builds the transport request for a call without sending it.
    ///
    /// `auth` falls back to the configured credential. Every option the
    /// caller sets replaces the computed value.
    #[must_use]
    pub fn build_request(
        &self,
        endpoint: &str,
        body: &str,
        options: RequestOptions,
        auth: Option<&Auth>,
    ) -> TransportRequest {
        let auth = auth.or_else(|| self.config.auth());
        if options.headers.is_some() {
            tracing::debug!("Caller headers replace the computed header set");
        }

        let computed_body = (!body.is_empty()).then(|| body.to_string());
        let computed_credentials = auth.map(|_| CredentialsMode::Include);

        TransportRequest {
            method: options.method.unwrap_or_default(),
            url: self.resolve_url(endpoint),
            headers: options
                .headers
                .unwrap_or_else(|| self.default_headers(auth)),
            body: options.body.or(computed_body),
            credentials: options.credentials.or(computed_credentials),
        }
    }

    /// Sends one request and returns the parsed JSON body.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Absolute URL or path relative to the service URL
    /// * `body` - Request body; empty means no body
    /// * `options` - Per-call overrides (method defaults to `POST`)
    /// * `auth` - Credential for this call; defaults to the configured one
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures, non-2xx responses and
    /// bodies that are not valid JSON.
    pub async fn dispatch(
        &self,
        endpoint: &str,
        body: &str,
        options: RequestOptions,
        auth: Option<&Auth>,
    ) -> Result<serde_json::Value, ApiError> {
        let request = self.build_request(endpoint, body, options, auth);
        tracing::debug!(method = %request.method, url = %request.url, "Dispatching request");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(ApiError::from)?;

        normalize_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::TransportError;
    use crate::clients::http_request::HttpMethod;
    use crate::clients::http_response::TransportResponse;
    use crate::config::{ExecutionContext, ServiceUrl};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requests and replies with a fixed result.
    struct RecordingTransport {
        requests: Mutex<Vec<TransportRequest>>,
        reply: fn() -> Result<TransportResponse, TransportError>,
    }

    impl RecordingTransport {
        fn new(reply: fn() -> Result<TransportResponse, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn last(&self) -> TransportRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            (self.reply)()
        }
    }

    fn ok_reply() -> Result<TransportResponse, TransportError> {
        Ok(TransportResponse::new(200, r#"{"data":{}}"#))
    }

    fn config() -> HeadlessConfig {
        HeadlessConfig::builder()
            .service_url(ServiceUrl::new("https://publish.example.com").unwrap())
            .build()
            .unwrap()
    }

    fn client_with(config: HeadlessConfig) -> HttpClient {
        HttpClient::with_transport(config, RecordingTransport::new(ok_reply))
    }

    #[test]
    fn test_resolve_url_keeps_absolute_url() {
        let client = client_with(config());
        assert_eq!(
            client.resolve_url("https://other.example.com/graphql"),
            "https://other.example.com/graphql"
        );
    }

    #[test]
    fn test_resolve_url_joins_relative_path_with_one_slash() {
        let client = client_with(config());
        assert_eq!(
            client.resolve_url("graphql/list.json"),
            "https://publish.example.com/graphql/list.json"
        );
        assert_eq!(
            client.resolve_url("/graphql/list.json"),
            "https://publish.example.com/graphql/list.json"
        );
    }

    #[test]
    fn test_resolve_url_handles_service_url_with_trailing_slash() {
        let config = HeadlessConfig::builder()
            .service_url(ServiceUrl::new("https://publish.example.com/").unwrap())
            .build()
            .unwrap();
        let client = client_with(config);
        assert_eq!(
            client.resolve_url("content/graphql/endpoint.gql"),
            "https://publish.example.com/content/graphql/endpoint.gql"
        );
    }

    #[test]
    fn test_resolve_url_treats_hostless_url_as_relative() {
        let client = client_with(config());
        // Parses as a URL with scheme "content" but no host
        assert_eq!(
            client.resolve_url("content:graphql"),
            "https://publish.example.com/content:graphql"
        );
    }

    #[test]
    fn test_resolve_url_in_browser_like_context_has_no_prefix() {
        let config = HeadlessConfig::builder()
            .service_url(ServiceUrl::new("https://publish.example.com").unwrap())
            .context(ExecutionContext::BrowserLike)
            .build()
            .unwrap();
        let client = client_with(config);
        assert_eq!(client.resolve_url("graphql/list.json"), "graphql/list.json");
        assert_eq!(
            client.resolve_url("https://cdn.example.com/x"),
            "https://cdn.example.com/x"
        );
    }

    #[test]
    fn test_default_headers_without_auth() {
        let client = client_with(config());
        let headers = client.default_headers(None);
        assert_eq!(
            headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert!(!headers.contains_key("Authorization"));
    }

    #[test]
    fn test_default_headers_include_configured_headers() {
        let config = HeadlessConfig::builder()
            .header("X-Api-Key", "key-1")
            .build()
            .unwrap();
        let client = client_with(config);
        assert_eq!(
            client.default_headers(None).get("X-Api-Key"),
            Some(&"key-1".to_string())
        );
    }

    #[test]
    fn test_default_headers_collapse_names_differing_in_case() {
        let config = HeadlessConfig::builder()
            .header("content-type", "application/graphql")
            .header("authorization", "Token configured")
            .auth(Auth::bearer("t").unwrap())
            .build()
            .unwrap();
        let client = client_with(config);

        let headers = client.default_headers(client.config().auth());
        let mut names: Vec<&str> = headers.keys().map(String::as_str).collect();
        names.sort_unstable();

        assert_eq!(names, ["Authorization", "content-type"]);
        assert_eq!(
            headers.get("content-type"),
            Some(&"application/graphql".to_string())
        );
        assert_eq!(headers.get("Authorization"), Some(&"Bearer t".to_string()));
    }

    #[test]
    fn test_build_request_defaults() {
        let client = client_with(config());
        let request = client.build_request("graphql/list.json", "", RequestOptions::default(), None);

        assert_eq!(request.method, HttpMethod::Post);
        assert!(request.body.is_none());
        assert!(request.credentials.is_none());
        assert!(!request.headers.contains_key("Authorization"));
    }

    #[test]
    fn test_build_request_uses_configured_auth() {
        let config = HeadlessConfig::builder()
            .auth(Auth::basic("admin", "admin").unwrap())
            .build()
            .unwrap();
        let client = client_with(config);
        let request = client.build_request("x", "body", RequestOptions::default(), None);

        assert_eq!(
            request.headers.get("Authorization"),
            Some(&"Basic YWRtaW46YWRtaW4=".to_string())
        );
        assert_eq!(request.credentials, Some(CredentialsMode::Include));
        assert_eq!(request.body.as_deref(), Some("body"));
    }

    #[test]
    fn test_build_request_per_call_auth_wins_over_configured() {
        let config = HeadlessConfig::builder()
            .auth(Auth::basic("admin", "admin").unwrap())
            .build()
            .unwrap();
        let client = client_with(config);
        let per_call = Auth::bearer("call-token").unwrap();
        let request = client.build_request("x", "", RequestOptions::default(), Some(&per_call));

        assert_eq!(
            request.headers.get("Authorization"),
            Some(&"Bearer call-token".to_string())
        );
    }

    #[test]
    fn test_build_request_caller_options_win() {
        let config = HeadlessConfig::builder()
            .auth(Auth::bearer("t").unwrap())
            .build()
            .unwrap();
        let client = client_with(config);
        let options = RequestOptions::builder()
            .method(HttpMethod::Delete)
            .header("X-Only", "1")
            .body("override")
            .credentials(CredentialsMode::Omit)
            .build();

        let request = client.build_request("x", "computed", options, None);

        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.body.as_deref(), Some("override"));
        assert_eq!(request.credentials, Some(CredentialsMode::Omit));
        // Caller headers replace the computed set entirely
        assert_eq!(request.headers.len(), 1);
        assert!(!request.headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_dispatch_sends_exactly_one_request() {
        let transport = RecordingTransport::new(ok_reply);
        let client = HttpClient::with_transport(config(), transport.clone());

        let value = client
            .dispatch("graphql/list.json", "", RequestOptions::default(), None)
            .await
            .unwrap();

        assert_eq!(value, serde_json::json!({"data": {}}));
        assert_eq!(transport.requests.lock().unwrap().len(), 1);
        assert_eq!(
            transport.last().url,
            "https://publish.example.com/graphql/list.json"
        );
    }

    #[tokio::test]
    async fn test_dispatch_normalizes_transport_failure() {
        fn fail() -> Result<TransportResponse, TransportError> {
            Err(TransportError::other("FetchError", "connection refused"))
        }
        let client = HttpClient::with_transport(config(), RecordingTransport::new(fail));

        let error = client
            .dispatch("x", "", RequestOptions::default(), None)
            .await
            .unwrap_err();

        assert_eq!(error.name, "FetchError");
        assert_eq!(error.status, None);
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
