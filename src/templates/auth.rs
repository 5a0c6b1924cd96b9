use crate::{authentication::AuthUser, data_formats::FormErrors};

use super::{escape, field_errors, layout};

pub fn signup(viewer: Option<&AuthUser>, username: &str, errors: &FormErrors) -> String {
    let content = format!(
        r#"<h1>Sign up</h1>
{non_field}
<form method="post" action="/auth/signup/">
<label for="id_username">Username</label>
<input type="text" name="username" id="id_username" maxlength="150" value="{username}" required>
{username_errors}
<label for="id_password1">Password</label>
<input type="password" name="password1" id="id_password1" required>
{password1_errors}
<label for="id_password2">Password confirmation</label>
<input type="password" name="password2" id="id_password2" required>
{password2_errors}
<button type="submit">Sign up</button>
</form>"#,
        non_field = field_errors(errors, FormErrors::NON_FIELD),
        username = escape(username),
        username_errors = field_errors(errors, "username"),
        password1_errors = field_errors(errors, "password1"),
        password2_errors = field_errors(errors, "password2"),
    );
    layout("Sign up", viewer, &content)
}

pub fn login(
    viewer: Option<&AuthUser>,
    username: &str,
    next: Option<&str>,
    errors: &FormErrors,
) -> String {
    let next_input = next
        .map(|next| format!(r#"<input type="hidden" name="next" value="{}">"#, escape(next)))
        .unwrap_or_default();
    let content = format!(
        r#"<h1>Log in</h1>
{non_field}
<form method="post" action="/auth/login/">
{next_input}
<label for="id_username">Username</label>
<input type="text" name="username" id="id_username" value="{username}" required>
<label for="id_password">Password</label>
<input type="password" name="password" id="id_password" required>
<button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/auth/signup/">Sign up</a></p>"#,
        non_field = field_errors(errors, FormErrors::NON_FIELD),
        username = escape(username),
    );
    layout("Log in", viewer, &content)
}

pub fn logged_out() -> String {
    layout(
        "Logged out",
        None,
        r#"<h1>You have been logged out</h1><a href="/auth/login/">Log in again</a>"#,
    )
}
