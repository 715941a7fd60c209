//! Credential checks and session records
//!
//! Passwords are stored as bcrypt hashes (salted, cost-configurable).
//! Sessions are rows keyed by a random UUIDv4 token with unix-second
//! timestamps. The web layer carries the token in a cookie and resolves it
//! to a [`Principal`] per request.
//!
//! This module has no HTTP framework dependencies.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::models::{Principal, User};
use crate::{Error, Result};

/// Flash message shown when a login attempt fails
pub const LOGIN_FAILED_MESSAGE: &str = "LOGIN FAILED: CHECK CREDENTIALS";

/// Hash a password with bcrypt at the given cost
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

/// Look up a user by name and verify the password.
///
/// Returns `None` for an unknown username or a wrong password.
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> Result<Option<User>> {
    let user: Option<User> = sqlx::query_as(
        "SELECT id, username, password_hash, role FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user.filter(|u| verify_password(password, &u.password_hash)))
}

/// Create a session row for a user and return its token.
///
/// Fails with [`Error::Config`] when `ttl` pushes the expiry past the
/// representable date range.
pub async fn create_session(pool: &SqlitePool, user_id: i64, ttl: Duration) -> Result<String> {
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(ttl)
        .ok_or_else(|| Error::Config(format!("session lifetime {} is out of range", ttl)))?;
    let token = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(now.timestamp())
        .bind(expires_at.timestamp())
        .execute(pool)
        .await?;

    Ok(token)
}

/// Verify credentials and open a session.
///
/// Returns the principal and its session token, or `None` when the
/// credentials don't match.
pub async fn login(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    ttl: Duration,
) -> Result<Option<(Principal, String)>> {
    let Some(user) = authenticate(pool, username, password).await? else {
        info!("Login failed for '{}'", username);
        return Ok(None);
    };

    let token = create_session(pool, user.id, ttl).await?;
    info!("User '{}' logged in ({})", user.username, user.role.as_str());

    Ok(Some((Principal::from(&user), token)))
}

/// Resolve a session token to its principal. Expired or unknown tokens yield `None`.
pub async fn resolve_session(pool: &SqlitePool, token: &str) -> Result<Option<Principal>> {
    let principal = sqlx::query_as::<_, Principal>(
        r#"
        SELECT u.id AS user_id, u.username, u.role
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ? AND s.expires_at > ?
        "#,
    )
    .bind(token)
    .bind(Utc::now().timestamp())
    .fetch_optional(pool)
    .await?;

    Ok(principal)
}

/// Delete a session (logout). Unknown tokens are ignored.
pub async fn end_session(pool: &SqlitePool, token: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    debug!("Ended session ({} row(s) removed)", result.rows_affected());
    Ok(())
}

/// Remove every expired session. Returns the number removed.
pub async fn purge_expired_sessions(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(Utc::now().timestamp())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
