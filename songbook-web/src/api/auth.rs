//! Session cookie handling, login/logout and the session middleware
//!
//! The session token lives in the `songbook_session` cookie. The middleware
//! resolves it to a [`Principal`] and stores that in the request extensions;
//! handlers receive it with `Extension<Principal>`.

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use songbook_common::auth::{self, LOGIN_FAILED_MESSAGE};
use songbook_common::{Error, Principal};
use tracing::debug;

use crate::error::WebResult;
use crate::pages::render_login;
use crate::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "songbook_session";

/// Extract the session token from the request's Cookie headers
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    )
}

fn cleared_session_cookie() -> String {
    session_cookie("", 0)
}

/// Session middleware
///
/// Requests without a valid, unexpired session are redirected to `/login`.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> WebResult<Response> {
    let Some(token) = session_token(request.headers()) else {
        debug!("No session cookie on {}", request.uri().path());
        return Err(Error::AuthenticationRequired.into());
    };

    let Some(principal) = auth::resolve_session(&state.db, &token).await? else {
        debug!("Unknown or expired session on {}", request.uri().path());
        return Err(Error::AuthenticationRequired.into());
    };

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Login form fields. Both are optional so that a partial form renders the
/// failure message instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// GET /login
pub async fn login_page() -> Html<String> {
    Html(render_login(None))
}

/// POST /login
///
/// Success sets the session cookie and redirects to the catalog. Failure
/// redisplays the form with the flash message.
pub async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> WebResult<Response> {
    let username = form.username.unwrap_or_default();
    let password = form.password.unwrap_or_default();

    let session = auth::login(&state.db, username.trim(), &password, state.config.session_ttl()).await?;

    match session {
        Some((_principal, token)) => {
            let cookie = session_cookie(&token, state.config.session_ttl().num_seconds());
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response())
        }
        None => Ok(Html(render_login(Some(LOGIN_FAILED_MESSAGE))).into_response()),
    }
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    axum::Extension(principal): axum::Extension<Principal>,
    headers: HeaderMap,
) -> WebResult<Response> {
    if let Some(token) = session_token(&headers) {
        auth::end_session(&state.db, &token).await?;
    }
    debug!("'{}' logged out", principal.username);

    Ok(([(SET_COOKIE, cleared_session_cookie())], Redirect::to("/login")).into_response())
}
