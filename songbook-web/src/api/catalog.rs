//! Catalog routes: main page and admin song management

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use songbook_common::{catalog, playlists, Principal};

use crate::api::parse_number;
use crate::error::WebResult;
use crate::pages::{render_index, PageContext};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddSongForm {
    pub title: Option<String>,
    pub artist: Option<String>,
}

/// GET /
///
/// All songs plus the caller's playlists
pub async fn index(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> WebResult<Html<String>> {
    let songs = catalog::list_songs(&state.db).await?;
    let my_playlists = playlists::list_my_playlists(&state.db, &principal).await?;

    let ctx = PageContext {
        principal: &principal,
        total_songs: songs.len() as i64,
    };

    Ok(Html(render_index(&ctx, &songs, &my_playlists)))
}

/// POST /add
pub async fn add_song(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Form(form): Form<AddSongForm>,
) -> WebResult<Redirect> {
    catalog::add_song(
        &state.db,
        &principal,
        form.title.as_deref(),
        form.artist.as_deref(),
    )
    .await?;

    Ok(Redirect::to("/"))
}

/// GET /delete/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> WebResult<Redirect> {
    let id = parse_number("song id", &id)?;
    catalog::delete_song(&state.db, &principal, id).await?;
    Ok(Redirect::to("/"))
}

/// GET /clear_all
pub async fn clear_all(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> WebResult<Redirect> {
    catalog::clear_all_songs(&state.db, &principal).await?;
    Ok(Redirect::to("/"))
}
