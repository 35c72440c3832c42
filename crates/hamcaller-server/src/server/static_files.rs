use axum::{
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "web"]
struct WebAssets;

/// Serve the embedded page and its assets
pub async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Unknown API routes get a JSON 404 rather than the page
    if path.starts_with("api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "message": "Not found", "type": "not_found" } })),
        )
            .into_response();
    }

    if !path.is_empty() {
        if let Some(content) = <WebAssets as Embed>::get(path) {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            return (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response();
        }
    }

    match <WebAssets as Embed>::get("index.html") {
        Some(content) => Html(String::from_utf8_lossy(&content.data).to_string()).into_response(),
        None => Html(FALLBACK_HTML).into_response(),
    }
}

const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>HamCaller</title></head>
<body>
    <h1>HamCaller</h1>
    <p>The web page was not embedded in this build. POST a JSON body
    <code>{"transcript": "..."}</code> to <code>/detect</code>.</p>
</body>
</html>
"#;
