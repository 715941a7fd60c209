//! Shared fixtures for songbook-common integration tests

#![allow(dead_code)]

use songbook_common::db::{init_database, seed_default_accounts};
use songbook_common::{Principal, Role};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Lowest bcrypt cost, keeps seeding fast
pub const TEST_COST: u32 = 4;

/// Fresh seeded database in a temp directory. Keep the `TempDir` alive for the
/// duration of the test.
pub async fn seeded_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = init_database(&dir.path().join("songbook.db"))
        .await
        .expect("Database initialization failed");
    seed_default_accounts(&pool, TEST_COST)
        .await
        .expect("Seeding failed");
    (pool, dir)
}

pub async fn principal(pool: &SqlitePool, username: &str) -> Principal {
    sqlx::query_as::<_, Principal>(
        "SELECT id AS user_id, username, role FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("User should exist")
}

pub async fn boss(pool: &SqlitePool) -> Principal {
    let p = principal(pool, "boss").await;
    assert_eq!(p.role, Role::Admin);
    p
}

pub async fn student(pool: &SqlitePool) -> Principal {
    let p = principal(pool, "student").await;
    assert_eq!(p.role, Role::User);
    p
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Count query failed")
}
