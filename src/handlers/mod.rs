mod auth;
mod follow;
mod posts;

pub use auth::*;
pub use follow::*;
pub use posts::*;

use axum::{
    http::{StatusCode, Uri},
    response::Html,
};

use crate::{authentication::MaybeUser, errors::RequestError, templates};

// ----------------- Helper Handlers -----------------
pub async fn not_found(MaybeUser(viewer): MaybeUser, uri: Uri) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(templates::status_pages::not_found(
            viewer.as_ref(),
            Some(uri.path()),
        )),
    )
}

/// Ids that are not integers name no post, same as ids that do not exist.
fn parse_id(raw: &str) -> Result<i64, RequestError> {
    raw.parse().map_err(|_| RequestError::NotFound)
}
