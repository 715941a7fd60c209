//! HTTP mapping for service errors

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::error;

use crate::pages::render_error;

/// Handler error: wraps [`songbook_common::Error`] and renders it as a page
#[derive(Debug)]
pub struct WebError(pub songbook_common::Error);

impl<E> From<E> for WebError
where
    E: Into<songbook_common::Error>,
{
    fn from(err: E) -> Self {
        WebError(err.into())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        use songbook_common::Error;

        let (status, heading, detail) = match self.0 {
            Error::AuthenticationRequired => return Redirect::to("/login").into_response(),
            Error::AccessDenied(msg) => (StatusCode::FORBIDDEN, "Access Denied", msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg),
            Error::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "Something went wrong while handling the request.".to_string(),
                )
            }
        };

        (status, Html(render_error(heading, &detail))).into_response()
    }
}

/// Result type for HTTP handlers
pub type WebResult<T> = Result<T, WebError>;
