//! Headless client implementation.
//!
//! This module provides the [`HeadlessClient`] type with the ad-hoc and
//! persisted query operations.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpClient, HttpMethod, RequestOptions, Transport};
use crate::config::HeadlessConfig;
use crate::error::ConfigError;

/// Client for a headless content GraphQL endpoint.
///
/// Each operation supplies an endpoint, a verb and a body to the underlying
/// [`HttpClient`]. A `method` set in the caller's [`RequestOptions`] wins over
/// the operation's own verb.
///
/// # Thread Safety
///
/// `HeadlessClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use aem_headless::{Auth, HeadlessClient, HeadlessConfig, RequestOptions, ServiceUrl};
///
/// let config = HeadlessConfig::builder()
///     .service_url(ServiceUrl::new("https://publish.example.com").unwrap())
///     .endpoint("content/cq:graphql/wknd/endpoint.json")
///     .auth(Auth::bearer("token").unwrap())
///     .build()
///     .unwrap();
///
/// let client = HeadlessClient::new(config)?;
///
/// let data = client
///     .post_query("{ adventureList { items { title } } }", RequestOptions::default())
///     .await?;
/// println!("{}", data["data"]);
/// ```
#[derive(Clone, Debug)]
pub struct HeadlessClient {
    http_client: HttpClient,
}

// Verify HeadlessClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HeadlessClient>();
};

impl HeadlessClient {
    /// Creates a client backed by the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be created.
    pub fn new(config: HeadlessConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
        })
    }

    /// Creates a client backed by a custom transport.
    #[must_use]
    pub fn with_transport(config: HeadlessConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            http_client: HttpClient::with_transport(config, transport),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &HeadlessConfig {
        self.http_client.config()
    }

    /// Returns the underlying dispatcher, e.g. for calls with a per-call credential.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Executes an ad-hoc query against the configured GraphQL endpoint.
    ///
    /// Sends `POST {endpoint}` with body `{"query": query}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails for any reason.
    pub async fn post_query(&self, query: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let body = serde_json::json!({ "query": query });
        self.send_query(&body, options).await
    }

    /// Executes an ad-hoc query with variables.
    ///
    /// Sends `POST {endpoint}` with body `{"query": query, "variables": variables}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails for any reason.
    pub async fn post_query_with_variables(
        &self,
        query: &str,
        variables: Value,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let body = serde_json::json!({ "query": query, "variables": variables });
        self.send_query(&body, options).await
    }

    /// Persists a query under `path` (e.g. `"wknd/adventures-all"`).
    ///
    /// Sends `PUT {persist}/{path}` with the raw query text as the body.
    /// The server rejects a path that is already in use.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails for any reason.
    pub async fn save_query(
        &self,
        query: &str,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let endpoint = join_path(&self.config().actions().persist, path);
        self.http_client
            .dispatch(&endpoint, query, options.or_method(HttpMethod::Put), None)
            .await
    }

    /// Executes the persisted query stored under `path`.
    ///
    /// Sends `GET {execute}/{path}` with no body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails for any reason.
    pub async fn get_query(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let endpoint = join_path(&self.config().actions().execute, path);
        self.http_client
            .dispatch(&endpoint, "", options.or_method(HttpMethod::Get), None)
            .await
    }

    /// Executes a persisted query with variables.
    ///
    /// Variables are appended to the path as `;name=value` segments with
    /// URL-encoded names and values. String values are sent as-is; other
    /// values are JSON-encoded first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails for any reason.
    pub async fn get_query_with_variables(
        &self,
        path: &str,
        variables: &Map<String, Value>,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let endpoint = join_path(
            &self.config().actions().execute,
            &persisted_query_path(path, variables),
        );
        self.http_client
            .dispatch(&endpoint, "", options.or_method(HttpMethod::Get), None)
            .await
    }

    /// Lists the persisted queries.
    ///
    /// Sends `GET {list}` with no body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails for any reason.
    pub async fn list_queries(&self, options: RequestOptions) -> Result<Value, ApiError> {
        let endpoint = self.config().actions().list.clone();
        self.http_client
            .dispatch(&endpoint, "", options.or_method(HttpMethod::Get), None)
            .await
    }

    async fn send_query(&self, body: &Value, options: RequestOptions) -> Result<Value, ApiError> {
        let endpoint = self.config().endpoint().to_string();
        self.http_client
            .dispatch(&endpoint, &body.to_string(), options.or_method(HttpMethod::Post), None)
            .await
    }
}

fn join_path(root: &str, path: &str) -> String {
    format!(
        "{}/{}",
        root.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Appends `;name=value` variable segments to a persisted query path.
#[must_use]
pub fn persisted_query_path(path: &str, variables: &Map<String, Value>) -> String {
    let mut result = path.to_string();
    for (name, value) in variables {
        let raw = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        result.push(';');
        result.push_str(&urlencoding::encode(name));
        result.push('=');
        result.push_str(&urlencoding::encode(&raw));
    }
    result
}
