//! Playlist routes

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use songbook_common::{catalog, playlists, Principal};

use crate::api::parse_number;
use crate::error::WebResult;
use crate::pages::{render_collections, render_playlist, PageContext};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistForm {
    pub playlist_name: Option<String>,
}

/// Ids arrive as strings so that a blank field is a no-op rather than a
/// rejected form
#[derive(Debug, Deserialize)]
pub struct AddToPlaylistForm {
    pub song_id: Option<String>,
    pub playlist_id: Option<String>,
}

/// Parse an optional form id. Blank means absent; anything else must be an integer.
fn parse_id(field: &str, value: Option<&str>) -> WebResult<Option<i64>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_number(field, raw).map(Some),
    }
}

/// POST /create_playlist
pub async fn create_playlist(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Form(form): Form<CreatePlaylistForm>,
) -> WebResult<Redirect> {
    playlists::create_playlist(&state.db, &principal, form.playlist_name.as_deref()).await?;
    Ok(Redirect::to("/my_collections"))
}

/// GET /my_collections
pub async fn my_collections(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> WebResult<Html<String>> {
    let my_playlists = playlists::list_my_playlists(&state.db, &principal).await?;
    let ctx = PageContext {
        principal: &principal,
        total_songs: catalog::count_songs(&state.db).await?,
    };

    Ok(Html(render_collections(&ctx, &my_playlists)))
}

/// POST /add_to_playlist
pub async fn add_to_playlist(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Form(form): Form<AddToPlaylistForm>,
) -> WebResult<Redirect> {
    let song_id = parse_id("song_id", form.song_id.as_deref())?;
    let playlist_id = parse_id("playlist_id", form.playlist_id.as_deref())?;

    playlists::add_item(&state.db, &principal, song_id, playlist_id).await?;
    Ok(Redirect::to("/"))
}

/// GET /playlist/:id
pub async fn view_playlist(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> WebResult<Html<String>> {
    let id = parse_number("playlist id", &id)?;
    let detail = playlists::view_playlist(&state.db, &principal, id).await?;
    let ctx = PageContext {
        principal: &principal,
        total_songs: catalog::count_songs(&state.db).await?,
    };

    Ok(Html(render_playlist(&ctx, &detail)))
}

/// GET /remove_item/:id
///
/// Redirects back to the playlist the item belonged to
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(item_id): Path<String>,
) -> WebResult<Redirect> {
    let item_id = parse_number("item id", &item_id)?;
    let playlist_id = playlists::remove_item(&state.db, &principal, item_id).await?;
    Ok(Redirect::to(&format!("/playlist/{}", playlist_id)))
}

/// GET /delete_playlist/:id
pub async fn delete_playlist(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> WebResult<Redirect> {
    let id = parse_number("playlist id", &id)?;
    playlists::delete_playlist(&state.db, &principal, id).await?;
    Ok(Redirect::to("/my_collections"))
}
