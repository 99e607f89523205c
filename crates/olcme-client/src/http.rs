//! Shared HTTP response helpers.
//!
//! Centralizes the status check (non-success -> [`ApiError::Status`]) and the
//! body decoding rules so the endpoint methods only build requests.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. On failure the error message is
/// the body text, or `HTTP <status>` when the body is empty.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        body
    };
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Read a success body as JSON. An empty body becomes `null`.
pub async fn read_json(resp: reqwest::Response) -> Result<Value, ApiError> {
    let text = resp.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Convert a decoded body into `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
