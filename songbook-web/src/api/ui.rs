//! Static asset serving

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const SONGBOOK_CSS: &str = include_str!("../../ui/songbook.css");

/// GET /static/songbook.css
pub async fn serve_songbook_css() -> Response {
    (
        StatusCode::OK,
        [("content-type", "text/css")],
        SONGBOOK_CSS,
    )
        .into_response()
}
