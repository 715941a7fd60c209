//! Catalog page: every song plus the caller's playlists

use songbook_common::db::{Playlist, Song};

use super::{escape_html, layout, PageContext};

fn playlist_options(playlists: &[Playlist]) -> String {
    playlists
        .iter()
        .map(|p| format!(r#"<option value="{}">{}</option>"#, p.id, escape_html(&p.name)))
        .collect()
}

fn song_row(ctx: &PageContext<'_>, song: &Song, options: &str) -> String {
    let add_form = if options.is_empty() {
        String::new()
    } else {
        format!(
            r#"<form class="inline" method="post" action="/add_to_playlist">
                <input type="hidden" name="song_id" value="{id}">
                <select name="playlist_id">{options}</select>
                <button type="submit">Add</button>
            </form>"#,
            id = song.id,
            options = options,
        )
    };

    let delete_link = if ctx.principal.is_admin() {
        format!(r#"<a class="button danger" href="/delete/{}">Delete</a>"#, song.id)
    } else {
        String::new()
    };

    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape_html(&song.title),
        escape_html(&song.artist),
        add_form,
        delete_link,
    )
}

/// Main page
pub fn render_index(ctx: &PageContext<'_>, songs: &[Song], playlists: &[Playlist]) -> String {
    let options = playlist_options(playlists);

    let admin_panel = if ctx.principal.is_admin() {
        r#"<h2>Add a song</h2>
<form method="post" action="/add">
    <input type="text" name="title" placeholder="Title">
    <input type="text" name="artist" placeholder="Artist">
    <button type="submit">Add song</button>
    <a class="button danger" href="/clear_all">Clear catalog</a>
</form>"#
    } else {
        ""
    };

    let songs_table = if songs.is_empty() {
        r#"<p class="empty">The catalog is empty.</p>"#.to_string()
    } else {
        let rows: String = songs.iter().map(|s| song_row(ctx, s, &options)).collect();
        format!(
            "<table>\n<tr><th>Title</th><th>Artist</th><th>Playlist</th><th></th></tr>\n{}\n</table>",
            rows
        )
    };

    let playlist_list = if playlists.is_empty() {
        r#"<p class="empty">No playlists yet. Create one under <a href="/my_collections">My Collections</a>.</p>"#
            .to_string()
    } else {
        let items: String = playlists
            .iter()
            .map(|p| format!(r#"<li><a href="/playlist/{}">{}</a></li>"#, p.id, escape_html(&p.name)))
            .collect();
        format!("<ul>{}</ul>", items)
    };

    let content = format!(
        "{admin_panel}\n<h2>Catalog</h2>\n{songs_table}\n<h2>My playlists</h2>\n{playlist_list}"
    );

    layout(ctx, "Catalog", &content)
}
