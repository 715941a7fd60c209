//! Song catalog
//!
//! The catalog is global. Reads are open to any principal; writes require
//! the admin role and fail with [`Error::AccessDenied`] otherwise.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::models::{Principal, Song};
use crate::{Error, Result};

fn require_admin(principal: &Principal, action: &str) -> Result<()> {
    if principal.is_admin() {
        Ok(())
    } else {
        warn!("'{}' denied: {} requires admin", principal.username, action);
        Err(Error::AccessDenied(format!("{} requires the admin role", action)))
    }
}

/// Treat absent and whitespace-only fields alike
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// All songs in store order
pub async fn list_songs(pool: &SqlitePool) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>("SELECT id, title, artist FROM songs ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(songs)
}

/// Total number of songs in the catalog
pub async fn count_songs(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

pub async fn get_song(pool: &SqlitePool, id: i64) -> Result<Song> {
    sqlx::query_as::<_, Song>("SELECT id, title, artist FROM songs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("song {}", id)))
}

/// Add a song. Returns `None` without touching the store when title or
/// artist is missing.
pub async fn add_song(
    pool: &SqlitePool,
    principal: &Principal,
    title: Option<&str>,
    artist: Option<&str>,
) -> Result<Option<Song>> {
    require_admin(principal, "adding songs")?;

    let (Some(title), Some(artist)) = (non_blank(title), non_blank(artist)) else {
        return Ok(None);
    };

    let id = sqlx::query("INSERT INTO songs (title, artist) VALUES (?, ?)")
        .bind(title)
        .bind(artist)
        .execute(pool)
        .await?
        .last_insert_rowid();

    info!("'{}' added song {} ({} - {})", principal.username, id, artist, title);

    Ok(Some(Song {
        id,
        title: title.to_string(),
        artist: artist.to_string(),
    }))
}

/// Delete a song and every playlist item referencing it
pub async fn delete_song(pool: &SqlitePool, principal: &Principal, id: i64) -> Result<()> {
    require_admin(principal, "deleting songs")?;

    let mut tx = pool.begin().await?;

    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM songs WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(Error::NotFound(format!("song {}", id)));
    }

    let items = sqlx::query("DELETE FROM playlist_items WHERE song_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("'{}' deleted song {} ({} playlist item(s) removed)", principal.username, id, items);
    Ok(())
}

/// Delete every playlist item and every song
pub async fn clear_all_songs(pool: &SqlitePool, principal: &Principal) -> Result<()> {
    require_admin(principal, "clearing the catalog")?;

    let mut tx = pool.begin().await?;

    let items = sqlx::query("DELETE FROM playlist_items")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let songs = sqlx::query("DELETE FROM songs")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    info!(
        "'{}' cleared the catalog ({} song(s), {} playlist item(s))",
        principal.username, songs, items
    );
    Ok(())
}
