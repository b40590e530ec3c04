//! The transport seam between the dispatcher and the network.
//!
//! A [`Transport`] takes a fully resolved [`TransportRequest`] and returns the
//! raw [`TransportResponse`], whatever its status. Anything that prevents a
//! response from being obtained is a [`TransportError`]; a body that cannot
//! be read after the status line arrived is [`TransportError::Body`].
//!
//! [`ReqwestTransport`] is the default implementation. Custom transports are
//! useful for tests, instrumentation, or non-HTTP routing.
//!
//! # Example
//!
//! ```rust
//! use aem_headless::clients::{Transport, TransportError, TransportRequest, TransportResponse};
//! use async_trait::async_trait;
//!
//! /// Answers every request with an empty `data` object.
//! struct StaticTransport;
//!
//! #[async_trait]
//! impl Transport for StaticTransport {
//!     async fn send(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
//!         Ok(TransportResponse::new(200, r#"{"data":{}}"#))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::TransportRequest;
use crate::clients::http_response::TransportResponse;
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends a resolved request and returns the raw response.
///
/// Implementations must issue exactly one exchange per call and must not
/// retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no HTTP response could be obtained,
    /// or [`TransportError::Body`] with the status when the body could not
    /// be read. Non-2xx responses are not errors at this layer.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// [`Transport`] backed by a [`reqwest::Client`].
///
/// [`CredentialsMode`](crate::clients::CredentialsMode) is not read here.
/// Cookies are sent only when the wrapped client has a cookie store, so pass
/// one through [`ReqwestTransport::from_client`] when credentials must be
/// included.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a rustls-backed client.
    ///
    /// Requests carry a `User-Agent` of `aem-headless-client/<version>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the client cannot be created
    /// (e.g., TLS initialization failure).
    pub fn new() -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("aem-headless-client/{SDK_VERSION}"))
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Wraps an existing client (custom timeouts, proxies, cookie store, ...).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.as_reqwest(), &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let res = builder.send().await?;

        let status = res.status().as_u16();
        let mut response = TransportResponse::new(status, "");
        for (name, value) in res.headers() {
            response = response.with_header(name.as_str(), value.to_str().unwrap_or_default());
        }
        response.body = res
            .text()
            .await
            .map_err(|source| TransportError::Body { status, source })?;

        Ok(response)
    }
}
