use axum::{
    extract::{Path, Query},
    response::{Html, Redirect},
    Extension,
};
use tracing::{debug, info};

use crate::{
    authentication::AuthUser,
    data_formats::PageQuery,
    db_helpers::{
        follow_user_in_db, get_user_by_username, list_posts_in_db, unfollow_user_in_db,
        PostFilter,
    },
    errors::RequestError,
    models::User,
    templates, urls, SharedState,
};

// ----------------- Follow Handlers -----------------

pub async fn follow_index(
    user: AuthUser,
    Extension(state): Extension<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, RequestError> {
    let filter = PostFilter {
        followed_by: Some(user.id),
        ..Default::default()
    };
    let page = list_posts_in_db(&state.pool, filter, query.page.as_deref()).await?;
    Ok(Html(templates::posts::follow_index(Some(&user), &page)))
}

/// Following yourself is silently ignored, as is following someone twice.
pub async fn profile_follow(
    user: AuthUser,
    Extension(state): Extension<SharedState>,
    Path(username): Path<String>,
) -> Result<Redirect, RequestError> {
    let author = find_author(&state, &username).await?;
    if author.id == user.id {
        debug!("{} tried to follow themselves", user.username);
    } else if follow_user_in_db(&state.pool, user.id, author.id).await? {
        info!("{} now follows {}", user.username, author.username);
    }
    Ok(Redirect::to(&urls::profile_url(&author.username)))
}

pub async fn profile_unfollow(
    user: AuthUser,
    Extension(state): Extension<SharedState>,
    Path(username): Path<String>,
) -> Result<Redirect, RequestError> {
    let author = find_author(&state, &username).await?;
    if unfollow_user_in_db(&state.pool, user.id, author.id).await? {
        info!("{} no longer follows {}", user.username, author.username);
    }
    Ok(Redirect::to(&urls::profile_url(&author.username)))
}

async fn find_author(state: &SharedState, username: &str) -> Result<User, RequestError> {
    get_user_by_username(&state.pool, username)
        .await?
        .ok_or(RequestError::NotFound)
}
