//! Request types for the headless client SDK.
//!
//! This module provides [`RequestOptions`] (the per-call overrides a caller
//! passes to any operation) and [`TransportRequest`] (the fully resolved
//! request handed to a [`Transport`](crate::clients::Transport)).

use std::collections::HashMap;
use std::fmt;

/// HTTP methods used by the headless endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for fetching and listing persisted queries.
    Get,
    /// HTTP POST method for ad-hoc queries (the default).
    #[default]
    Post,
    /// HTTP PUT method for creating persisted queries.
    Put,
    /// HTTP DELETE method.
    Delete,
}

impl HttpMethod {
    /// Returns the equivalent [`reqwest::Method`].
    #[must_use]
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Whether the transport should send ambient credentials (cookies).
///
/// Transports without a notion of ambient credentials may ignore this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialsMode {
    /// Never send ambient credentials.
    Omit,
    /// Send ambient credentials to the same origin only.
    SameOrigin,
    /// Always send ambient credentials.
    Include,
}

/// Per-call overrides for a request.
///
/// Every field that is set replaces the value the dispatcher would otherwise
/// compute. In particular, `headers` replaces the computed header set as a
/// whole, including `Content-Type` and `Authorization`.
///
/// # Example
///
/// ```rust
/// use aem_headless::clients::{HttpMethod, RequestOptions};
///
/// let options = RequestOptions::builder()
///     .method(HttpMethod::Get)
///     .header("Accept", "application/json")
///     .build();
///
/// assert_eq!(options.method, Some(HttpMethod::Get));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Overrides the default verb.
    pub method: Option<HttpMethod>,
    /// Replaces the computed headers.
    pub headers: Option<HashMap<String, String>>,
    /// Replaces the computed body.
    pub body: Option<String>,
    /// Replaces the computed credentials mode.
    pub credentials: Option<CredentialsMode>,
}

impl RequestOptions {
    /// Creates a new builder for constructing `RequestOptions`.
    #[must_use]
    pub fn builder() -> RequestOptionsBuilder {
        RequestOptionsBuilder::default()
    }

    /// Returns options whose only override is the given method.
    #[must_use]
    pub fn with_method(method: HttpMethod) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    /// Sets `method` only when the caller left it unset.
    ///
    /// Used by the public operations to supply their implied verb while
    /// letting an explicit caller choice win.
    #[must_use]
    pub fn or_method(mut self, method: HttpMethod) -> Self {
        self.method.get_or_insert(method);
        self
    }
}

/// Builder for constructing [`RequestOptions`] instances.
#[derive(Debug, Default)]
pub struct RequestOptionsBuilder {
    options: RequestOptions,
}

impl RequestOptionsBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.options.method = Some(method);
        self
    }

    /// Sets all headers at once.
    ///
    /// Names differing only in case collapse into one entry.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        let mut normalized = HashMap::with_capacity(headers.len());
        for (key, value) in headers {
            set_header(&mut normalized, key, value);
        }
        self.options.headers = Some(normalized);
        self
    }

    /// Adds a single header, replacing any header with the same name in
    /// any letter case.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        set_header(
            self.options.headers.get_or_insert_with(HashMap::new),
            key.into(),
            value.into(),
        );
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.options.body = Some(body.into());
        self
    }

    /// Sets the credentials mode.
    #[must_use]
    pub const fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.options.credentials = Some(credentials);
        self
    }

    /// Builds the [`RequestOptions`].
    #[must_use]
    pub fn build(self) -> RequestOptions {
        self.options
    }
}

/// Inserts a header, first removing any entry whose name matches
/// case-insensitively. The later name and value win.
pub(crate) fn set_header(headers: &mut HashMap<String, String>, name: String, value: String) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
    headers.insert(name, value);
}

/// A fully resolved request, ready for a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The resolved URL (absolute, unless the context is browser-like).
    pub url: String,
    /// Headers to send.
    pub headers: HashMap<String, String>,
    /// The request body, if any.
    pub body: Option<String>,
    /// The credentials mode, if one was set.
    pub credentials: Option<CredentialsMode>,
}
