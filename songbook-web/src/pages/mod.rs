//! Server-rendered HTML pages
//!
//! Pages are plain `format!` templates around a shared layout. Every piece of
//! user-supplied text passes through [`escape_html`] before it is embedded.

mod catalog;
mod collections;
mod error;
mod login;
mod playlist;

pub use catalog::render_index;
pub use collections::render_collections;
pub use error::render_error;
pub use login::render_login;
pub use playlist::render_playlist;

use songbook_common::Principal;

/// Per-request data shown in every page header
pub struct PageContext<'a> {
    pub principal: &'a Principal,
    pub total_songs: i64,
}

/// Escape text for safe inclusion in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap page content in the document shell without a navigation header
fn document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Songbook</title>
    <link rel="stylesheet" href="/static/songbook.css">
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
        body = body,
    )
}

/// Wrap page content in the document shell with the logged-in header
fn layout(ctx: &PageContext<'_>, title: &str, content: &str) -> String {
    let role_badge = if ctx.principal.is_admin() { " (admin)" } else { "" };

    let body = format!(
        r#"<header>
    <div class="header-content">
        <div>
            <h1>Songbook</h1>
            <p class="subtitle">Signed in as {username}{role_badge} &middot; {total} song(s) in catalog</p>
        </div>
        <nav>
            <a href="/">Catalog</a>
            <a href="/my_collections">My Collections</a>
            <a href="/logout">Logout</a>
        </nav>
    </div>
</header>
<div class="content">
{content}
</div>"#,
        username = escape_html(&ctx.principal.username),
        role_badge = role_badge,
        total = ctx.total_songs,
        content = content,
    );

    document(title, &body)
}
