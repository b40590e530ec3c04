//! Request pipeline for headless content GraphQL endpoints.
//!
//! This module provides the dispatcher, the transport seam, and the error
//! normalization every operation goes through.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HeadlessClient`]: The public operations (ad-hoc and persisted queries)
//! - [`HttpClient`]: The dispatcher (URL resolution, headers, one transport call)
//! - [`RequestOptions`]: Per-call overrides; the caller always wins
//! - [`Transport`]: The network seam, with [`ReqwestTransport`] as default
//! - [`ApiError`]: The uniform error returned by every operation
//! - [`ParsedErrorBody`]: Classification of error response bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use aem_headless::clients::{HeadlessClient, RequestOptions};
//! use aem_headless::HeadlessConfig;
//!
//! let client = HeadlessClient::new(HeadlessConfig::default())?;
//!
//! match client.list_queries(RequestOptions::default()).await {
//!     Ok(list) => println!("{list}"),
//!     Err(e) if e.is_network_failure() => println!("Network error: {}", e.message),
//!     Err(e) => println!("{} ({:?}): {}", e.name, e.status, e.message),
//! }
//! ```

mod errors;
pub mod headless;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{ApiError, ParsedErrorBody, TransportError};
pub use headless::HeadlessClient;
pub use http_client::HttpClient;
pub(crate) use http_request::set_header;
pub use http_request::{
    CredentialsMode, HttpMethod, RequestOptions, RequestOptionsBuilder, TransportRequest,
};
pub use http_response::TransportResponse;
pub use transport::{ReqwestTransport, Transport, SDK_VERSION};
