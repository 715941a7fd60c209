//! Playlist detail page

use songbook_common::db::PlaylistDetail;

use super::{escape_html, layout, PageContext};

pub fn render_playlist(ctx: &PageContext<'_>, detail: &PlaylistDetail) -> String {
    let entries = if detail.entries.is_empty() {
        r#"<p class="empty">This playlist is empty.</p>"#.to_string()
    } else {
        let rows: String = detail
            .entries
            .iter()
            .map(|e| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td><a class="button danger" href="/remove_item/{}">Remove</a></td></tr>"#,
                    escape_html(&e.title),
                    escape_html(&e.artist),
                    e.item_id,
                )
            })
            .collect();
        format!(
            "<table>\n<tr><th>Title</th><th>Artist</th><th></th></tr>\n{}\n</table>",
            rows
        )
    };

    let content = format!(
        r#"<h2>{name}</h2>
<p class="subtitle">{count} item(s) in this playlist</p>
{entries}
<p>
    <a class="button" href="/my_collections">Back</a>
    <a class="button danger" href="/delete_playlist/{id}">Delete playlist</a>
</p>"#,
        name = escape_html(&detail.playlist.name),
        count = detail.entries.len(),
        entries = entries,
        id = detail.playlist.id,
    );

    layout(ctx, &detail.playlist.name, &content)
}
