//! HTTP handlers for songbook-web

use songbook_common::Error;

use crate::error::WebResult;

pub mod auth;
pub mod catalog;
pub mod health;
pub mod playlists;
pub mod ui;

pub use auth::{login_page, login_submit, logout, require_session};
pub use catalog::{add_song, clear_all, delete_song, index};
pub use health::health_routes;
pub use playlists::{
    add_to_playlist, create_playlist, delete_playlist, my_collections, remove_item, view_playlist,
};
pub use ui::serve_songbook_css;

/// Parse a numeric id from a path segment or form field
pub(crate) fn parse_number(field: &str, raw: &str) -> WebResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidInput(format!("{} must be a number", field)).into())
}
