use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON error envelope shared by every endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Short human-readable summary.
    pub error: String,
    /// HTTP status code.
    pub code: u16,
    /// RFC3339 timestamp.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Individual messages, e.g. every failed validation rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, status: StatusCode) -> Self {
        Self {
            error: error.into(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_id: None,
            errors: Vec::new(),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Outermost fault boundary: a panicking handler becomes a sanitized 500.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    ErrorResponse::new("Internal server error", StatusCode::INTERNAL_SERVER_ERROR).into_response()
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ErrorResponse {
    ErrorResponse::new("Not found", StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_and_skips_empty_fields() {
        let body = ErrorResponse::new("Conflict", StatusCode::CONFLICT).with_request_id("abc");
        let v = serde_json::to_value(&body).unwrap();

        assert_eq!(v["error"], "Conflict");
        assert_eq!(v["code"], 409);
        assert_eq!(v["requestId"], "abc");
        assert!(v.get("errors").is_none());
    }

    #[test]
    fn keeps_every_message() {
        let body = ErrorResponse::new("Validation failed", StatusCode::BAD_REQUEST)
            .with_errors(vec!["a".into(), "b".into()]);
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["errors"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn panic_payload_is_not_exposed() {
        let resp = handle_panic(Box::new("secret stack detail".to_string()));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
