use api_ingress::{ErrorResponse, XRequestId};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};

use crate::api::rest::error::from_parts;

/// `Json<T>` with rejections rendered as [`ErrorResponse`]:
/// a missing or non-JSON `Content-Type` is 415, a malformed body is 400.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ErrorResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = req.extensions().get::<XRequestId>().map(|r| r.0.clone());
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(map_rejection(rejection, request_id.as_deref())),
        }
    }
}

fn map_rejection(rejection: JsonRejection, request_id: Option<&str>) -> ErrorResponse {
    let (status, summary) = match &rejection {
        JsonRejection::MissingJsonContentType(_) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Content-Type must be application/json",
        ),
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            (StatusCode::BAD_REQUEST, "Invalid JSON body")
        }
        other => (other.status(), "Unreadable request body"),
    };
    tracing::debug!(status = status.as_u16(), error = %rejection.body_text(), "Rejected request body");
    from_parts(status, summary, vec![rejection.body_text()], request_id)
}
