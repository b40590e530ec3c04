//! # AEM Headless Client
//!
//! A Rust SDK for headless content GraphQL endpoints: ad-hoc queries and
//! persisted query creation, listing and execution over HTTP.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`HeadlessConfig`] and [`HeadlessConfigBuilder`]
//! - Bearer token and basic auth credentials via [`Auth`]
//! - The public operations on [`HeadlessClient`]
//! - A request dispatcher with absolute/relative URL resolution
//! - One uniform error type, [`ApiError`], for every failure
//! - A pluggable [`Transport`] with a reqwest-backed default
//!
//! The query string is opaque: there is no query parsing, schema awareness
//! or result caching.
//!
//! ## Quick Start
//!
//! ```rust
//! use aem_headless::{Auth, HeadlessConfig, ServiceUrl};
//!
//! let config = HeadlessConfig::builder()
//!     .service_url(ServiceUrl::new("https://publish.example.com").unwrap())
//!     .endpoint("content/cq:graphql/wknd/endpoint.json")
//!     .auth(Auth::basic("admin", "admin").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use aem_headless::{HeadlessClient, HeadlessConfig, RequestOptions};
//!
//! let client = HeadlessClient::new(HeadlessConfig::default())?;
//!
//! // Ad-hoc query
//! let data = client.post_query("{ adventureList { items { title } } }", RequestOptions::default()).await?;
//!
//! // Persist, then execute by path
//! client.save_query("{ adventureList { items { title } } }", "wknd/adventures", RequestOptions::default()).await?;
//! let data = client.get_query("wknd/adventures", RequestOptions::default()).await?;
//!
//! // List persisted queries
//! let list = client.list_queries(RequestOptions::default()).await?;
//! ```
//!
//! ## Errors
//!
//! Every operation returns `Result<serde_json::Value, ApiError>`. Network
//! failures, non-2xx responses and bodies that are not valid JSON all come
//! back as an [`ApiError`] with `name`, `type`, `status`, `message` and
//! `details`; `status` is `None` when no response was received.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **One call, one request**: No retries or caching in the SDK

pub mod clients;
pub mod config;
pub mod error;

pub use config::{
    Auth, ExecutionContext, GraphqlActions, HeadlessConfig, HeadlessConfigBuilder, ServiceUrl,
    DEFAULT_GRAPHQL_ENDPOINT, DEFAULT_SERVICE_URL,
};
pub use error::ConfigError;

pub use clients::{
    ApiError, CredentialsMode, HeadlessClient, HttpClient, HttpMethod, ParsedErrorBody,
    ReqwestTransport, RequestOptions, RequestOptionsBuilder, Transport, TransportError,
    TransportRequest, TransportResponse,
};
