//! Request-time error types and error normalization.
//!
//! Every failed call surfaces as one [`ApiError`] carrying
//! `{name, type, status, message, details}`, whatever went wrong:
//!
//! | failure | `status` | fields taken from |
//! |---|---|---|
//! | transport failure, no response | `None` | the transport error |
//! | non-2xx, JSON error body | HTTP status | `error` or `errors[0]` in the body |
//! | non-2xx, body not JSON | HTTP status | the JSON parse failure |
//! | 2xx, body not JSON | HTTP status | the JSON parse failure |
//! | body could not be read | HTTP status | the read failure |
//!
//! A [`TransportError::Api`] is passed through unchanged, so code that
//! already produced an [`ApiError`] inside a custom transport keeps it.
//!
//! # Example
//!
//! ```rust
//! use aem_headless::clients::{ApiError, TransportError};
//!
//! let error: ApiError = TransportError::other("AbortError", "request aborted").into();
//! assert_eq!(error.name, "AbortError");
//! assert_eq!(error.status, None);
//!
//! let json = serde_json::to_value(&error).unwrap();
//! assert_eq!(json["status"], "");
//! ```

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::clients::http_response::TransportResponse;

/// Name used for structured upstream errors that carry no name of their own.
const UPSTREAM_ERROR_NAME: &str = "GraphQLError";

/// Name used for non-2xx JSON bodies with no recognizable error fields.
const RESPONSE_ERROR_NAME: &str = "ResponseError";

/// Name used for response bodies that are not valid JSON.
const PARSE_ERROR_NAME: &str = "JsonParseError";

/// Name used for transport failures that never reached the server.
const NETWORK_ERROR_NAME: &str = "NetworkError";

/// The uniform error returned by every operation.
///
/// # Serialization
///
/// Serializes to an object with exactly the keys `name`, `type`, `status`,
/// `message` and `details`. `status` is the HTTP status code, or the empty
/// string when no response was received.
///
/// ```rust
/// use aem_headless::clients::ApiError;
/// use serde_json::json;
///
/// let error = ApiError::new("GraphQLError", "ValidationError", Some(400), "bad query", json!(null));
/// assert_eq!(
///     serde_json::to_value(&error).unwrap(),
///     json!({
///         "name": "GraphQLError",
///         "type": "ValidationError",
///         "status": 400,
///         "message": "bad query",
///         "details": null
///     })
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq, Serialize)]
#[error("{name}: {message}")]
pub struct ApiError {
    /// Error name.
    pub name: String,
    /// Error type or classification.
    #[serde(rename = "type")]
    pub error_type: String,
    /// HTTP status code; `None` when no response was received.
    #[serde(serialize_with = "serialize_status")]
    pub status: Option<u16>,
    /// Human-readable message.
    pub message: String,
    /// Any additional structured information.
    pub details: Value,
}

fn serialize_status<S>(status: &Option<u16>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match status {
        Some(code) => serializer.serialize_u16(*code),
        None => serializer.serialize_str(""),
    }
}

impl ApiError {
    /// Creates a new `ApiError`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        error_type: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            name: name.into(),
            error_type: error_type.into(),
            status,
            message: message.into(),
            details,
        }
    }

    /// Returns `true` if the failure happened before any HTTP response existed.
    #[must_use]
    pub const fn is_network_failure(&self) -> bool {
        self.status.is_none()
    }

    /// Builds the error for a body that failed JSON parsing.
    #[must_use]
    pub fn from_parse_error(error: &serde_json::Error, status: u16) -> Self {
        let error_type = match error.classify() {
            serde_json::error::Category::Io => "io",
            serde_json::error::Category::Syntax => "syntax",
            serde_json::error::Category::Data => "data",
            serde_json::error::Category::Eof => "eof",
        };
        Self::new(
            PARSE_ERROR_NAME,
            error_type,
            Some(status),
            error.to_string(),
            serde_json::json!({ "line": error.line(), "column": error.column() }),
        )
    }

    /// Builds the error for a response whose body could not be read.
    ///
    /// The body never becomes JSON, so this takes the parse failure path
    /// with type `io` and keeps the HTTP status.
    fn from_body_error(error: &reqwest::Error, status: u16) -> Self {
        Self::new(
            PARSE_ERROR_NAME,
            "io",
            Some(status),
            error.to_string(),
            url_details(error),
        )
    }

    fn from_network_error(error: &reqwest::Error) -> Self {
        let error_type = if error.is_timeout() {
            "timeout"
        } else if error.is_connect() {
            "connect"
        } else if error.is_builder() {
            "builder"
        } else if error.is_redirect() {
            "redirect"
        } else if error.is_body() {
            "body"
        } else if error.is_decode() {
            "decode"
        } else if error.is_request() {
            "request"
        } else {
            "system"
        };
        Self::new(
            NETWORK_ERROR_NAME,
            error_type,
            None,
            error.to_string(),
            url_details(error),
        )
    }
}

fn url_details(error: &reqwest::Error) -> Value {
    error
        .url()
        .map_or(Value::Null, |url| serde_json::json!({ "url": url.as_str() }))
}

/// A failure reported by a [`Transport`](crate::clients::Transport) before
/// any HTTP response was obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    /// An already-normalized error, passed through unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Network or connection error from the HTTP library.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The status line arrived but the body could not be read.
    #[error("Failed to read response body (status {status}): {source}")]
    Body {
        /// The HTTP status of the response.
        status: u16,
        /// The error reported while reading the body.
        #[source]
        source: reqwest::Error,
    },

    /// Any other failure, described by its own fields.
    #[error("{name}: {message}")]
    Other {
        /// Error name.
        name: String,
        /// Error type.
        error_type: String,
        /// Human-readable message.
        message: String,
        /// Additional structured information.
        details: Value,
    },
}

impl TransportError {
    /// Creates an [`TransportError::Other`] with an empty type and no details.
    #[must_use]
    pub fn other(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            name: name.into(),
            error_type: String::new(),
            message: message.into(),
            details: Value::Null,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Api(error) => error,
            TransportError::Network(error) => Self::from_network_error(&error),
            TransportError::Body { status, source } => Self::from_body_error(&source, status),
            TransportError::Other {
                name,
                error_type,
                message,
                details,
            } => Self::new(name, error_type, None, message, details),
        }
    }
}

/// The shape of an error response body.
#[derive(Debug)]
pub enum ParsedErrorBody {
    /// `{"error": ...}`; takes precedence over `errors`.
    StructuredSingle(Value),
    /// `{"errors": [first, ...]}`; holds the first entry.
    StructuredList(Value),
    /// Valid JSON with neither `error` nor a non-empty `errors` array.
    Unrecognized(Value),
    /// The body is not valid JSON.
    Unparseable(serde_json::Error),
}

impl ParsedErrorBody {
    /// Classifies a raw response body.
    #[must_use]
    pub fn decode(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(error) => Self::Unparseable(error),
        }
    }

    /// Classifies an already-parsed response body.
    #[must_use]
    pub fn from_value(mut value: Value) -> Self {
        if let Some(error) = value.get_mut("error").filter(|e| !e.is_null()) {
            return Self::StructuredSingle(error.take());
        }
        let first = value
            .get_mut("errors")
            .and_then(Value::as_array_mut)
            .filter(|errors| !errors.is_empty())
            .map(|errors| errors.swap_remove(0));
        match first {
            Some(error) => Self::StructuredList(error),
            None => Self::Unrecognized(value),
        }
    }

    /// Maps the body onto an [`ApiError`] for the given HTTP status.
    #[must_use]
    pub fn into_api_error(self, status: u16) -> ApiError {
        match self {
            Self::StructuredSingle(error) | Self::StructuredList(error) => {
                structured_error(error, status)
            }
            Self::Unrecognized(body) => ApiError::new(
                RESPONSE_ERROR_NAME,
                "",
                Some(status),
                format!("Request failed with status {status}"),
                body,
            ),
            Self::Unparseable(error) => ApiError::from_parse_error(&error, status),
        }
    }
}

fn structured_error(error: Value, status: u16) -> ApiError {
    let Value::Object(object) = error else {
        // `{"error": "Not found"}` and friends
        let message = as_text(&error).unwrap_or_default();
        return ApiError::new(UPSTREAM_ERROR_NAME, "", Some(status), message, error);
    };

    let field = |key: &str| object.get(key).and_then(as_text);
    let classification = object
        .get("extensions")
        .and_then(|extensions| extensions.get("classification"))
        .and_then(as_text);

    let error_type = field("errorType")
        .or_else(|| field("type"))
        .or(classification)
        .or_else(|| field("name"))
        .unwrap_or_default();
    let name = field("name")
        .or_else(|| field("errorType"))
        .or_else(|| field("type"))
        .unwrap_or_else(|| UPSTREAM_ERROR_NAME.to_string());
    let message = field("message").unwrap_or_default();
    let details = object
        .get("details")
        .cloned()
        .unwrap_or_else(|| Value::Object(object.clone()));

    ApiError::new(name, error_type, Some(status), message, details)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Turns a transport response into the parsed body or a normalized error.
pub(crate) fn normalize_response(response: &TransportResponse) -> Result<Value, ApiError> {
    let status = response.status;

    if response.is_ok() {
        return response.json().map_err(|error| {
            tracing::warn!(status, %error, "Response body is not valid JSON");
            ApiError::from_parse_error(&error, status)
        });
    }

    let error = ParsedErrorBody::decode(&response.body).into_api_error(status);
    tracing::warn!(
        status,
        name = %error.name,
        request_id = response.request_id().unwrap_or_default(),
        "Request failed: {}",
        error.message
    );
    Err(error)
}
