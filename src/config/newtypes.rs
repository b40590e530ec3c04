//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around the service URL and the
//! request credential. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use base64::prelude::*;
use reqwest::header::HeaderValue;
use reqwest::Url;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated service URL (the content host all relative endpoints hang off).
///
/// The URL must be absolute and carry a non-empty host.
///
/// # Serialization
///
/// `ServiceUrl` serializes to and deserializes from the plain URL string:
///
/// ```rust
/// use aem_headless::ServiceUrl;
///
/// let url = ServiceUrl::new("https://publish.example.com").unwrap();
/// let json = serde_json::to_string(&url).unwrap();
/// assert_eq!(json, r#""https://publish.example.com""#);
/// ```
///
/// # Example
///
/// ```rust
/// use aem_headless::ServiceUrl;
///
/// let url = ServiceUrl::new("https://publish.example.com/").unwrap();
/// assert_eq!(url.host_name(), "publish.example.com");
/// assert_eq!(url.as_ref(), "https://publish.example.com/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceUrl {
    url: String,
    host: String,
}

impl ServiceUrl {
    /// Creates a new validated service URL.
    ///
    /// Surrounding whitespace is trimmed; everything else is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidServiceUrl`] if the value does not parse
    /// as an absolute URL or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();

        let host = Url::parse(&url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string))
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ConfigError::InvalidServiceUrl { url: url.clone() })?;

        Ok(Self { url, host })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.host
    }
}

impl Default for ServiceUrl {
    /// Returns [`DEFAULT_SERVICE_URL`](super::DEFAULT_SERVICE_URL).
    fn default() -> Self {
        Self {
            url: super::DEFAULT_SERVICE_URL.to_string(),
            host: "localhost".to_string(),
        }
    }
}

impl AsRef<str> for ServiceUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ServiceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl Serialize for ServiceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for ServiceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[derive(Clone, PartialEq, Eq)]
enum Credential {
    Bearer(String),
    Basic { username: String, password: String },
}

/// A request credential, either a bearer token or a username/password pair.
///
/// The credential is turned into an `Authorization` header value via
/// [`Auth::header_value`]:
///
/// - bearer token → `Bearer <token>`
/// - username/password → `Basic base64(username:password)`
///
/// # Security
///
/// The `Debug` implementation masks secrets. Basic credentials show only
/// the username.
///
/// # Example
///
/// ```rust
/// use aem_headless::Auth;
///
/// let auth = Auth::basic("admin", "admin").unwrap();
/// assert_eq!(auth.header_value(), "Basic YWRtaW46YWRtaW4=");
/// assert_eq!(format!("{auth:?}"), "Auth::Basic(admin:*****)");
///
/// let auth = Auth::bearer("token-123").unwrap();
/// assert_eq!(auth.header_value(), "Bearer token-123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Auth(Credential);

impl Auth {
    /// Creates a bearer token credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is empty, or
    /// [`ConfigError::InvalidHeader`] if it cannot be sent in an
    /// `Authorization` header (e.g., it contains a newline).
    pub fn bearer(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        if HeaderValue::from_str(&token).is_err() {
            return Err(ConfigError::InvalidHeader {
                name: "Authorization".to_string(),
                reason: "token contains invalid characters",
            });
        }
        Ok(Self(Credential::Bearer(token)))
    }

    /// Creates a basic auth credential from a username/password pair.
    ///
    /// The password may be empty; the username may not. Both are base64
    /// encoded, so any characters are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the username is empty.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(Credential::Basic {
            username,
            password: password.into(),
        }))
    }

    /// Returns `true` for username/password credentials.
    #[must_use]
    pub const fn is_basic(&self) -> bool {
        matches!(self.0, Credential::Basic { .. })
    }

    /// Returns the `Authorization` header value for this credential.
    #[must_use]
    pub fn header_value(&self) -> String {
        match &self.0 {
            Credential::Bearer(token) => format!("Bearer {token}"),
            Credential::Basic { username, password } => {
                let encoded = BASE64_STANDARD.encode(format!("{username}:{password}"));
                format!("Basic {encoded}")
            }
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Credential::Bearer(_) => f.write_str("Auth::Bearer(*****)"),
            Credential::Basic { username, .. } => write!(f, "Auth::Basic({username}:*****)"),
        }
    }
}
