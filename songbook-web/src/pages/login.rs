//! Login form

use super::{document, escape_html};

/// Login form, optionally with a flash message above it
pub fn render_login(flash: Option<&str>) -> String {
    let flash = flash
        .map(|message| format!(r#"<div class="flash">{}</div>"#, escape_html(message)))
        .unwrap_or_default();

    let body = format!(
        r#"<div class="login-box">
    <h1>Songbook</h1>
    <h2>Sign in</h2>
    {flash}
    <form method="post" action="/login">
        <input type="text" name="username" placeholder="Username" autofocus required>
        <input type="password" name="password" placeholder="Password" required>
        <button type="submit">Login</button>
    </form>
</div>"#
    );

    document("Login", &body)
}
