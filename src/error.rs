//! Error types for the headless client SDK.
//!
//! This module contains the configuration error type. Request-time errors
//! live in [`crate::clients`] and are normalized into
//! [`ApiError`](crate::clients::ApiError).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use aem_headless::{Auth, ConfigError};
//!
//! let result = Auth::bearer("");
//! assert!(matches!(result, Err(ConfigError::EmptyToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Service URL is not an absolute URL with a host.
    #[error("Invalid service URL '{url}'. Please provide an absolute URL with scheme and host (e.g., 'https://author.example.com').")]
    InvalidServiceUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// GraphQL endpoint path cannot be empty.
    #[error("GraphQL endpoint cannot be empty. Please provide a path such as 'content/graphql/endpoint.gql'.")]
    EmptyEndpoint,

    /// Bearer token cannot be empty.
    #[error("Bearer token cannot be empty. Please provide a valid access token.")]
    EmptyToken,

    /// Basic auth username cannot be empty.
    #[error("Username cannot be empty. Please provide a valid username for basic authentication.")]
    EmptyUsername,

    /// A default header has an invalid name or value.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The header name that was provided.
        name: String,
        /// Why the header was rejected.
        reason: &'static str,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// The reason reported by the HTTP library.
        reason: String,
    },
}
