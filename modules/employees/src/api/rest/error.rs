use api_ingress::ErrorResponse;
use axum::http::StatusCode;

use crate::domain::error::DomainError;

/// Helper to build an [`ErrorResponse`] with less boilerplate.
pub fn from_parts(
    status: StatusCode,
    error: impl Into<String>,
    errors: Vec<String>,
    request_id: Option<&str>,
) -> ErrorResponse {
    let body = ErrorResponse::new(error, status).with_errors(errors);
    match request_id {
        Some(id) => body.with_request_id(id),
        None => body,
    }
}

/// Map a domain error to the JSON error envelope.
pub fn map_domain_error(e: &DomainError, request_id: Option<&str>) -> ErrorResponse {
    match e {
        DomainError::Validation { messages } => from_parts(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            messages.clone(),
            request_id,
        ),
        DomainError::DuplicateNirc { .. } => {
            from_parts(StatusCode::CONFLICT, e.to_string(), Vec::new(), request_id)
        }
        DomainError::StorageUnavailable => {
            tracing::error!("Employee storage is not configured");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage is not configured",
                Vec::new(),
                request_id,
            )
        }
        DomainError::Storage { .. } => {
            // Full cause stays in the log.
            tracing::error!(error = ?e, "Storage error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal storage error occurred",
                Vec::new(),
                request_id,
            )
        }
    }
}
