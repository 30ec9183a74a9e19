use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct UiAssets;

/// The single-page directory UI.
pub async fn index() -> Response {
    match UiAssets::get("index.html") {
        Some(content) => Html(content.data.into_owned()).into_response(),
        None => {
            tracing::error!("index.html is missing from the embedded assets");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub async fn serve_asset(Path(file): Path<String>) -> Result<impl IntoResponse, StatusCode> {
    match UiAssets::get(&file) {
        Some(content) => {
            let mime_type = content_type_for(&file);
            let body = content.data.into_owned();
            Ok(([(header::CONTENT_TYPE, mime_type)], body))
        }
        None => {
            tracing::warn!("UI asset not found: {}", file);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

fn content_type_for(file: &str) -> &'static str {
    match file.rsplit('.').next().unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}
