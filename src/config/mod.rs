//! Configuration types for the headless client SDK.
//!
//! This module provides the configuration used to initialize a
//! [`HeadlessClient`](crate::HeadlessClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HeadlessConfig`]: The immutable configuration held by a client
//! - [`HeadlessConfigBuilder`]: A builder for constructing [`HeadlessConfig`] instances
//! - [`ServiceUrl`]: A validated content host URL
//! - [`Auth`]: A bearer token or basic auth credential with masked debug output
//! - [`GraphqlActions`]: Path roots for the persisted query actions
//! - [`ExecutionContext`]: Whether relative endpoints get the service URL prefix
//!
//! # Example
//!
//! ```rust
//! use aem_headless::{Auth, HeadlessConfig, ServiceUrl};
//!
//! let config = HeadlessConfig::builder()
//!     .service_url(ServiceUrl::new("https://publish.example.com").unwrap())
//!     .endpoint("content/cq:graphql/wknd/endpoint.json")
//!     .auth(Auth::bearer("token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.endpoint(), "content/cq:graphql/wknd/endpoint.json");
//! ```

mod newtypes;

pub use newtypes::{Auth, ServiceUrl};

use std::collections::HashMap;

use reqwest::header::{HeaderName, HeaderValue};

use crate::clients::set_header;
use crate::error::ConfigError;

/// Default content host used when no service URL is configured.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:4503";

/// Default GraphQL endpoint path, relative to the service URL.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "content/graphql/endpoint.gql";

/// Path roots for the persisted query actions.
///
/// Each operation appends its own suffix: `{persist}/{path}`,
/// `{execute}/{path}` and `{list}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphqlActions {
    /// Root for creating persisted queries (PUT).
    pub persist: String,
    /// Root for executing persisted queries (GET).
    pub execute: String,
    /// Path for listing persisted queries (GET).
    pub list: String,
}

impl Default for GraphqlActions {
    fn default() -> Self {
        Self {
            persist: "graphql/persist.json".to_string(),
            execute: "graphql/execute.json".to_string(),
            list: "graphql/list.json".to_string(),
        }
    }
}

/// The environment the client runs in.
///
/// In a browser-like context requests go to the page origin, so relative
/// endpoints are used as-is. Everywhere else they are prefixed with the
/// configured service URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Server or CLI process; relative endpoints are joined to the service URL.
    #[default]
    Server,
    /// Same-origin context; relative endpoints are not prefixed.
    BrowserLike,
}

impl ExecutionContext {
    /// Returns the prefix prepended to relative endpoints.
    #[must_use]
    pub fn host_prefix<'a>(&self, service_url: &'a ServiceUrl) -> &'a str {
        match self {
            Self::Server => service_url.as_ref(),
            Self::BrowserLike => "",
        }
    }
}

/// Configuration for the headless client.
///
/// Set once at construction and read-only afterwards.
///
/// # Thread Safety
///
/// `HeadlessConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct HeadlessConfig {
    service_url: ServiceUrl,
    endpoint: String,
    auth: Option<Auth>,
    headers: HashMap<String, String>,
    actions: GraphqlActions,
    context: ExecutionContext,
}

impl HeadlessConfig {
    /// Creates a new builder for constructing a `HeadlessConfig`.
    #[must_use]
    pub fn builder() -> HeadlessConfigBuilder {
        HeadlessConfigBuilder::new()
    }

    /// Returns the service URL.
    #[must_use]
    pub const fn service_url(&self) -> &ServiceUrl {
        &self.service_url
    }

    /// Returns the GraphQL endpoint used for ad-hoc queries.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the default credential, if configured.
    #[must_use]
    pub const fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    /// Returns the headers added to every request.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the persisted query action paths.
    #[must_use]
    pub const fn actions(&self) -> &GraphqlActions {
        &self.actions
    }

    /// Returns the execution context.
    #[must_use]
    pub const fn context(&self) -> ExecutionContext {
        self.context
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            service_url: ServiceUrl::default(),
            endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            auth: None,
            headers: HashMap::new(),
            actions: GraphqlActions::default(),
            context: ExecutionContext::default(),
        }
    }
}

// Verify HeadlessConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HeadlessConfig>();
};

/// Builder for constructing [`HeadlessConfig`] instances.
///
/// # Defaults
///
/// - `service_url`: [`DEFAULT_SERVICE_URL`]
/// - `endpoint`: [`DEFAULT_GRAPHQL_ENDPOINT`]
/// - `auth`: `None`
/// - `headers`: empty
/// - `actions`: [`GraphqlActions::default`]
/// - `context`: [`ExecutionContext::Server`]
///
/// # Example
///
/// ```rust
/// use aem_headless::{ExecutionContext, HeadlessConfig, ServiceUrl};
///
/// let config = HeadlessConfig::builder()
///     .service_url(ServiceUrl::new("https://publish.example.com").unwrap())
///     .header("X-Api-Key", "abc")
///     .context(ExecutionContext::BrowserLike)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.headers().get("X-Api-Key"), Some(&"abc".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct HeadlessConfigBuilder {
    service_url: Option<ServiceUrl>,
    endpoint: Option<String>,
    auth: Option<Auth>,
    headers: HashMap<String, String>,
    actions: Option<GraphqlActions>,
    context: Option<ExecutionContext>,
}

impl HeadlessConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the service URL.
    #[must_use]
    pub fn service_url(mut self, url: ServiceUrl) -> Self {
        self.service_url = Some(url);
        self
    }

    /// Sets the GraphQL endpoint, absolute or relative to the service URL.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the default credential used when a call supplies none.
    #[must_use]
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Adds a header sent with every request.
    ///
    /// Replaces an earlier header whose name differs only in case.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(&mut self.headers, name.into(), value.into());
        self
    }

    /// Overrides the persisted query action paths.
    #[must_use]
    pub fn actions(mut self, actions: GraphqlActions) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Sets the execution context.
    #[must_use]
    pub const fn context(mut self, context: ExecutionContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Builds the [`HeadlessConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyEndpoint`] if the endpoint was set to an
    /// empty string, or [`ConfigError::InvalidHeader`] if a default header
    /// is not a valid HTTP header.
    pub fn build(self) -> Result<HeadlessConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_GRAPHQL_ENDPOINT.to_string());
        if endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }

        for (name, value) in &self.headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(ConfigError::InvalidHeader {
                    name: name.clone(),
                    reason: "name contains invalid characters",
                });
            }
            if HeaderValue::from_str(value).is_err() {
                return Err(ConfigError::InvalidHeader {
                    name: name.clone(),
                    reason: "value contains invalid characters",
                });
            }
        }

        Ok(HeadlessConfig {
            service_url: self.service_url.unwrap_or_default(),
            endpoint,
            auth: self.auth,
            headers: self.headers,
            actions: self.actions.unwrap_or_default(),
            context: self.context.unwrap_or_default(),
        })
    }
}
