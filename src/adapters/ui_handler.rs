use axum::{
    http::{header, StatusCode, Uri},
    response::IntoResponse,
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "ui/dist"]
struct Asset;

pub struct UIHandler;

impl UIHandler {
    pub async fn serve(uri: Uri) -> impl IntoResponse {
        let path = match uri.path().trim_start_matches('/') {
            "" => "index.html",
            path => path,
        };

        if let Some(content) = Asset::get(path) {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            return ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response();
        }

        // Client-side routes such as /topic/:topic_name/request-schema
        match Asset::get("index.html") {
            Some(content) => (
                [(header::CONTENT_TYPE, mime_guess::mime::TEXT_HTML_UTF_8.as_ref())],
                content.data,
            )
                .into_response(),
            None => {
                tracing::warn!("UI bundle missing, build ui/ with trunk before serving {}", path);
                (StatusCode::NOT_FOUND, "404 Not Found").into_response()
            }
        }
    }
}
