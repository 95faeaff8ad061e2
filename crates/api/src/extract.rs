//! Request extractors shared by the tree handlers.
//!
//! - [`Caller`] -- the caller identifier from the `user_id` header.
//! - [`JsonObject`] -- a request body that must be a JSON object.

use arbor_core::error::CoreError;
use arbor_core::tree::FieldError;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Header carrying the caller identifier.
pub const CALLER_HEADER: &str = "user_id";

/// The caller identity, taken verbatim from the `user_id` header.
///
/// The value is trusted as-is; there is no verification. A missing, empty
/// or non-ASCII header rejects the request with 400 before any other
/// extractor runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub String);

impl Caller {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Caller(v.to_string()))
            .ok_or(AppError::MissingCaller)
    }
}

/// A JSON object body.
///
/// Unlike `axum::Json`, malformed JSON and non-object bodies are reported
/// as validation failures (422) and no `Content-Type` is required. A body
/// that cannot be buffered keeps the status axum gives it (413 over the
/// default 2 MB limit) but uses the JSON error body.
#[derive(Debug, Clone)]
pub struct JsonObject(pub Map<String, Value>);

impl<S: Send + Sync> FromRequest<S> for JsonObject {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        parse_json_object(&bytes).map(JsonObject)
    }
}

/// Parse raw body bytes as a JSON object, failing with a validation error.
fn parse_json_object(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    parse_object(bytes)
        .map_err(|field_error| AppError::Core(CoreError::Validation(vec![field_error])))
}

fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, FieldError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(FieldError::new("body", "must be a JSON object")),
        Err(e) => Err(FieldError::new("body", format!("invalid JSON: {e}"))),
    }
}
