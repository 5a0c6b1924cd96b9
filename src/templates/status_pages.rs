use crate::{authentication::AuthUser, urls};

use super::{escape, layout};

pub fn not_found(viewer: Option<&AuthUser>, path: Option<&str>) -> String {
    let detail = match path {
        Some(path) => format!("<p>The page <code>{}</code> does not exist.</p>", escape(path)),
        None => "<p>The page you requested does not exist.</p>".to_string(),
    };
    layout(
        "Page not found",
        viewer,
        &format!(
            r#"<h1>Page not found</h1>{detail}<a href="{}">Go to the home page</a>"#,
            urls::index_url()
        ),
    )
}

pub fn bad_request() -> String {
    layout(
        "Bad request",
        None,
        "<h1>Bad request</h1><p>The submitted data could not be read.</p>",
    )
}

pub fn server_error() -> String {
    layout(
        "Server error",
        None,
        "<h1>Server error</h1><p>Something went wrong on our side. Please try again later.</p>",
    )
}
