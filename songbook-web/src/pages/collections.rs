//! My Collections page

use songbook_common::db::Playlist;

use super::{escape_html, layout, PageContext};

pub fn render_collections(ctx: &PageContext<'_>, playlists: &[Playlist]) -> String {
    let list = if playlists.is_empty() {
        r#"<p class="empty">You have no playlists.</p>"#.to_string()
    } else {
        let rows: String = playlists
            .iter()
            .map(|p| {
                format!(
                    r#"<tr><td><a href="/playlist/{id}">{name}</a></td><td><a class="button danger" href="/delete_playlist/{id}">Delete</a></td></tr>"#,
                    id = p.id,
                    name = escape_html(&p.name),
                )
            })
            .collect();
        format!("<table>\n{}\n</table>", rows)
    };

    let content = format!(
        r#"<h2>New playlist</h2>
<form method="post" action="/create_playlist">
    <input type="text" name="playlist_name" placeholder="Playlist name">
    <button type="submit">Create</button>
</form>
<h2>My Collections</h2>
{list}"#
    );

    layout(ctx, "My Collections", &content)
}
