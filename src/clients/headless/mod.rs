//! Ad-hoc and persisted query operations.
//!
//! # Overview
//!
//! [`HeadlessClient`] exposes the public operations. Each one forwards to the
//! [`HttpClient`](crate::clients::HttpClient) dispatcher with a pre-built
//! endpoint, verb and body:
//!
//! | operation | verb | endpoint |
//! |---|---|---|
//! | [`post_query`](HeadlessClient::post_query) | POST | configured GraphQL endpoint |
//! | [`post_query_with_variables`](HeadlessClient::post_query_with_variables) | POST | configured GraphQL endpoint |
//! | [`save_query`](HeadlessClient::save_query) | PUT | `{persist}/{path}` |
//! | [`get_query`](HeadlessClient::get_query) | GET | `{execute}/{path}` |
//! | [`get_query_with_variables`](HeadlessClient::get_query_with_variables) | GET | `{execute}/{path};name=value...` |
//! | [`list_queries`](HeadlessClient::list_queries) | GET | `{list}` |
//!
//! A `method` in the caller's options always wins, so
//! `list_queries(RequestOptions::with_method(HttpMethod::Post))` sends a POST.
//!
//! # Errors
//!
//! Every operation returns [`ApiError`](crate::clients::ApiError) on failure.
//! GraphQL errors returned with HTTP 200 are part of the resolved body and
//! are not turned into errors.

mod client;

pub use client::{persisted_query_path, HeadlessClient};
