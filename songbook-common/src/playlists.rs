//! Personal playlists
//!
//! Every playlist belongs to one user. Viewing, editing and deleting a
//! playlist or any of its items requires the caller to be its owner.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{info, warn};

use crate::catalog::non_blank;
use crate::db::models::{Playlist, PlaylistDetail, PlaylistEntry, PlaylistItem, Principal};
use crate::{Error, Result};

async fn fetch_playlist<'e, E>(executor: E, id: i64) -> Result<Playlist>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Playlist>("SELECT id, name, owner_id FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| Error::NotFound(format!("playlist {}", id)))
}

fn require_owner(principal: &Principal, playlist: &Playlist) -> Result<()> {
    if playlist.owner_id == principal.user_id {
        Ok(())
    } else {
        warn!(
            "'{}' denied access to playlist {} owned by user {}",
            principal.username, playlist.id, playlist.owner_id
        );
        Err(Error::AccessDenied(format!("playlist {} belongs to another user", playlist.id)))
    }
}

/// Load a playlist inside a transaction and check ownership
async fn owned_playlist(
    tx: &mut Transaction<'_, Sqlite>,
    principal: &Principal,
    id: i64,
) -> Result<Playlist> {
    let playlist = fetch_playlist(&mut **tx, id).await?;
    require_owner(principal, &playlist)?;
    Ok(playlist)
}

/// Create a playlist owned by the caller. A blank name is a no-op.
pub async fn create_playlist(
    pool: &SqlitePool,
    principal: &Principal,
    name: Option<&str>,
) -> Result<Option<Playlist>> {
    let Some(name) = non_blank(name) else {
        return Ok(None);
    };

    let id = sqlx::query("INSERT INTO playlists (name, owner_id) VALUES (?, ?)")
        .bind(name)
        .bind(principal.user_id)
        .execute(pool)
        .await?
        .last_insert_rowid();

    info!("'{}' created playlist {} ({})", principal.username, id, name);

    Ok(Some(Playlist {
        id,
        name: name.to_string(),
        owner_id: principal.user_id,
    }))
}

/// Playlists owned by the caller, oldest first
pub async fn list_my_playlists(pool: &SqlitePool, principal: &Principal) -> Result<Vec<Playlist>> {
    let playlists = sqlx::query_as::<_, Playlist>(
        "SELECT id, name, owner_id FROM playlists WHERE owner_id = ? ORDER BY id",
    )
    .bind(principal.user_id)
    .fetch_all(pool)
    .await?;

    Ok(playlists)
}

/// A playlist and its songs. Only the owner may view it.
pub async fn view_playlist(pool: &SqlitePool, principal: &Principal, id: i64) -> Result<PlaylistDetail> {
    let playlist = fetch_playlist(pool, id).await?;
    require_owner(principal, &playlist)?;

    let entries = sqlx::query_as::<_, PlaylistEntry>(
        r#"
        SELECT pi.id AS item_id, s.id AS song_id, s.title, s.artist
        FROM playlist_items pi
        JOIN songs s ON s.id = pi.song_id
        WHERE pi.playlist_id = ?
        ORDER BY pi.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(PlaylistDetail { playlist, entries })
}

/// Add a song to one of the caller's playlists.
///
/// Missing ids are a no-op. The same song may be added more than once.
pub async fn add_item(
    pool: &SqlitePool,
    principal: &Principal,
    song_id: Option<i64>,
    playlist_id: Option<i64>,
) -> Result<Option<PlaylistItem>> {
    let (Some(song_id), Some(playlist_id)) = (song_id, playlist_id) else {
        return Ok(None);
    };

    let mut tx = pool.begin().await?;

    owned_playlist(&mut tx, principal, playlist_id).await?;

    let song: Option<i64> = sqlx::query_scalar("SELECT id FROM songs WHERE id = ?")
        .bind(song_id)
        .fetch_optional(&mut *tx)
        .await?;
    if song.is_none() {
        return Err(Error::NotFound(format!("song {}", song_id)));
    }

    let id = sqlx::query("INSERT INTO playlist_items (playlist_id, song_id) VALUES (?, ?)")
        .bind(playlist_id)
        .bind(song_id)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    tx.commit().await?;

    info!("'{}' added song {} to playlist {}", principal.username, song_id, playlist_id);

    Ok(Some(PlaylistItem {
        id,
        playlist_id,
        song_id,
    }))
}

/// Remove one item from one of the caller's playlists.
///
/// Returns the id of the playlist the item belonged to.
pub async fn remove_item(pool: &SqlitePool, principal: &Principal, item_id: i64) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let item = sqlx::query_as::<_, PlaylistItem>(
        "SELECT id, playlist_id, song_id FROM playlist_items WHERE id = ?",
    )
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| Error::NotFound(format!("playlist item {}", item_id)))?;

    owned_playlist(&mut tx, principal, item.playlist_id).await?;

    sqlx::query("DELETE FROM playlist_items WHERE id = ?")
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("'{}' removed item {} from playlist {}", principal.username, item_id, item.playlist_id);
    Ok(item.playlist_id)
}

/// Delete one of the caller's playlists together with its items
pub async fn delete_playlist(pool: &SqlitePool, principal: &Principal, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    owned_playlist(&mut tx, principal, id).await?;

    let items = sqlx::query("DELETE FROM playlist_items WHERE playlist_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!("'{}' deleted playlist {} ({} item(s))", principal.username, id, items);
    Ok(())
}
