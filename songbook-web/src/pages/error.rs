//! Error page

use super::{document, escape_html};

pub fn render_error(heading: &str, detail: &str) -> String {
    let body = format!(
        r#"<div class="content">
    <h1>{}</h1>
    <p>{}</p>
    <p><a class="button" href="/">Back to catalog</a></p>
</div>"#,
        escape_html(heading),
        escape_html(detail),
    );

    document(heading, &body)
}
