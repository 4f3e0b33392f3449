use crate::{error, handler};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Location` header name.
pub const LOCATION: &str = "Location";
/// Media type of every non-empty body.
pub const APPLICATION_JSON: &str = "application/json";

/// Envelope returned by every handler.
///
/// ```rust
/// use dynamodb_books::response::Response;
///
/// let response = Response::error("no request body provided", None);
/// assert_eq!(response.status_code, 400);
/// assert_eq!(response.body.as_deref(), Some(r#"{"Reason":"no request body provided"}"#));
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code.
    pub status_code: u16,
    /// JSON-encoded payload, absent for `204 No Content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Response headers, in insertion order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
}

fn json_headers() -> IndexMap<String, String> {
    IndexMap::from([(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())])
}

impl Response {
    /// A JSON payload with the given status code.
    pub fn json<T: Serialize + ?Sized>(status_code: u16, payload: &T) -> error::Result<Self> {
        let body = serde_json::to_string(payload)?;
        let response = Self {
            status_code,
            body: Some(body),
            headers: json_headers(),
        };
        Ok(response)
    }

    /// `200 OK` carrying `payload`.
    pub fn ok<T: Serialize + ?Sized>(payload: &T) -> error::Result<Self> {
        Self::json(200, payload)
    }

    /// `201 Created` carrying `payload`, pointing at `location`.
    pub fn created<T: Serialize + ?Sized>(location: &str, payload: &T) -> error::Result<Self> {
        let mut response = Self::json(201, payload)?;
        response
            .headers
            .insert(LOCATION.to_string(), location.to_string());
        Ok(response)
    }

    /// `204 No Content`.
    pub fn no_content() -> Self {
        Self {
            status_code: 204,
            ..Default::default()
        }
    }

    /// Error envelope `{"Reason": message}`, status 400 unless given.
    pub fn error(message: &str, status_code: Option<u16>) -> Self {
        Self {
            status_code: status_code.unwrap_or(400),
            body: Some(json!({ "Reason": message }).to_string()),
            headers: json_headers(),
        }
    }

    /// Generic `500` for failures that must not leak details to the caller.
    pub fn default_failure(operation: handler::Operation) -> Self {
        Self::error(operation.failure_message(), Some(500))
    }

    /// Error envelope for a handler failure.
    ///
    /// Client errors carry their message; server errors fall back to
    /// [`Response::default_failure`].
    pub fn from_error(operation: handler::Operation, error: &error::Error) -> Self {
        if error.is_client_error() {
            Self::error(&error.to_string(), Some(error.status_code()))
        } else {
            Self::default_failure(operation)
        }
    }
}
