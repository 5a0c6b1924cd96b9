use axum::{
    extract::{Multipart, Path, Query},
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use tracing::{debug, info};

use crate::{
    authentication::{AuthUser, MaybeUser},
    cache::page_cache_key,
    data_formats::{CommentRequest, FormErrors, FormValidate, PageQuery, PostRequest},
    db_helpers::{
        add_comment_to_post_in_db, count_posts_by_author_in_db, create_post_in_db,
        get_comments_for_post_in_db, get_follow_in_db, get_group_by_slug_in_db,
        get_post_by_id_in_db, get_user_by_username, list_groups_in_db, list_posts_in_db,
        update_post_in_db, PostFilter,
    },
    errors::RequestError,
    media::save_upload,
    models::Post,
    templates::{self, posts::PostFormView},
    urls, SharedState,
};

use super::parse_id;

type HtmlResult = Result<Html<String>, RequestError>;

// ----------------- Listing Handlers -----------------

/// The only cached page: a fresh render is stored and then replayed
/// unchanged until the entry expires or the cache is cleared.
pub async fn index(
    MaybeUser(viewer): MaybeUser,
    Extension(state): Extension<SharedState>,
    uri: Uri,
    Query(query): Query<PageQuery>,
) -> HtmlResult {
    let key = page_cache_key(&uri, viewer.as_ref().map(|user| user.id));
    if let Some(body) = state.page_cache.get(&key) {
        debug!("Serving {key} from the page cache");
        return Ok(Html(body));
    }

    let page = list_posts_in_db(&state.pool, PostFilter::default(), query.page.as_deref()).await?;
    let body = templates::posts::index(viewer.as_ref(), &page);
    state.page_cache.insert(key, body.clone());
    Ok(Html(body))
}

pub async fn group_posts(
    MaybeUser(viewer): MaybeUser,
    Extension(state): Extension<SharedState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> HtmlResult {
    let group = get_group_by_slug_in_db(&state.pool, &slug)
        .await?
        .ok_or(RequestError::NotFound)?;
    let filter = PostFilter {
        group_id: Some(group.id),
        ..Default::default()
    };
    let page = list_posts_in_db(&state.pool, filter, query.page.as_deref()).await?;
    Ok(Html(templates::posts::group_list(
        viewer.as_ref(),
        &group,
        &page,
    )))
}

pub async fn profile(
    MaybeUser(viewer): MaybeUser,
    Extension(state): Extension<SharedState>,
    Path(username): Path<String>,
    Query(query): Query<PageQuery>,
) -> HtmlResult {
    let author = get_user_by_username(&state.pool, &username)
        .await?
        .ok_or(RequestError::NotFound)?;
    let filter = PostFilter {
        author_id: Some(author.id),
        ..Default::default()
    };
    let page = list_posts_in_db(&state.pool, filter, query.page.as_deref()).await?;
    let following = match &viewer {
        Some(viewer) if viewer.id != author.id => get_follow_in_db(&state.pool, viewer.id, author.id)
            .await?
            .is_some(),
        _ => false,
    };
    Ok(Html(templates::posts::profile(
        viewer.as_ref(),
        &author,
        &page,
        following,
    )))
}

pub async fn post_detail(
    MaybeUser(viewer): MaybeUser,
    Extension(state): Extension<SharedState>,
    Path(post_id): Path<String>,
) -> HtmlResult {
    let post = find_post(&state, &post_id).await?;
    let author_posts = count_posts_by_author_in_db(&state.pool, post.author_id).await?;
    let comments = get_comments_for_post_in_db(&state.pool, post.id).await?;
    Ok(Html(templates::posts::post_detail(
        viewer.as_ref(),
        &post,
        author_posts,
        &comments,
    )))
}

// ----------------- Post Form Handlers -----------------

pub async fn post_create_form(user: AuthUser, Extension(state): Extension<SharedState>) -> HtmlResult {
    let groups = list_groups_in_db(&state.pool).await?;
    let form = PostFormView {
        post_id: None,
        text: "",
        group_id: None,
        groups: &groups,
        errors: &FormErrors::default(),
    };
    Ok(Html(templates::posts::post_form(Some(&user), &form)))
}

pub async fn post_create(
    user: AuthUser,
    Extension(state): Extension<SharedState>,
    multipart: Multipart,
) -> Result<Response, RequestError> {
    let request = PostRequest::from_multipart(multipart).await?;
    let groups = list_groups_in_db(&state.pool).await?;
    let errors = request.validate_with_groups(&groups);
    if !errors.is_empty() {
        debug!("Rejected new post from {}: {errors}", user.username);
        let form = PostFormView {
            post_id: None,
            text: &request.text,
            group_id: request.group_id(),
            groups: &groups,
            errors: &errors,
        };
        return Ok(Html(templates::posts::post_form(Some(&user), &form)).into_response());
    }

    let image = match &request.image {
        Some(image) => Some(save_upload(&state.config.media_root, image).await?),
        None => None,
    };
    let post_id = create_post_in_db(
        &state.pool,
        user.id,
        &request.text,
        request.group_id(),
        image.as_deref(),
    )
    .await?;
    info!("{} created post {post_id}", user.username);

    Ok(Redirect::to(&urls::profile_url(&user.username)).into_response())
}

pub async fn post_edit_form(
    user: AuthUser,
    Extension(state): Extension<SharedState>,
    Path(post_id): Path<String>,
) -> HtmlResult {
    let post = find_post(&state, &post_id).await?;
    if post.author_id != user.id {
        return Err(RequestError::NotAuthor(post.id));
    }
    let groups = list_groups_in_db(&state.pool).await?;
    let form = PostFormView {
        post_id: Some(post.id),
        text: &post.text,
        group_id: post.group_id,
        groups: &groups,
        errors: &FormErrors::default(),
    };
    Ok(Html(templates::posts::post_form(Some(&user), &form)))
}

pub async fn post_edit(
    user: AuthUser,
    Extension(state): Extension<SharedState>,
    Path(post_id): Path<String>,
    multipart: Multipart,
) -> Result<Response, RequestError> {
    let post = find_post(&state, &post_id).await?;
    if post.author_id != user.id {
        return Err(RequestError::NotAuthor(post.id));
    }

    let request = PostRequest::from_multipart(multipart).await?;
    let groups = list_groups_in_db(&state.pool).await?;
    let errors = request.validate_with_groups(&groups);
    if !errors.is_empty() {
        debug!("Rejected edit of post {} by {}: {errors}", post.id, user.username);
        let form = PostFormView {
            post_id: Some(post.id),
            text: &request.text,
            group_id: request.group_id(),
            groups: &groups,
            errors: &errors,
        };
        return Ok(Html(templates::posts::post_form(Some(&user), &form)).into_response());
    }

    let image = match &request.image {
        Some(image) => Some(save_upload(&state.config.media_root, image).await?),
        None => None,
    };
    update_post_in_db(
        &state.pool,
        post.id,
        user.id,
        &request.text,
        request.group_id(),
        image.as_deref(),
    )
    .await?;
    info!("{} edited post {}", user.username, post.id);

    Ok(Redirect::to(&urls::post_detail_url(post.id)).into_response())
}

// ----------------- Comment Handlers -----------------

/// Blank comments are dropped; the visitor lands on the post either way.
pub async fn add_comment(
    user: AuthUser,
    Extension(state): Extension<SharedState>,
    Path(post_id): Path<String>,
    Form(request): Form<CommentRequest>,
) -> Result<Redirect, RequestError> {
    let post = find_post(&state, &post_id).await?;
    if request.form_errors().is_empty() {
        let comment_id =
            add_comment_to_post_in_db(&state.pool, user.id, post.id, &request.text).await?;
        info!("{} commented on post {} ({comment_id})", user.username, post.id);
    }
    Ok(Redirect::to(&urls::post_detail_url(post.id)))
}

async fn find_post(state: &SharedState, raw_id: &str) -> Result<Post, RequestError> {
    get_post_by_id_in_db(&state.pool, parse_id(raw_id)?)
        .await?
        .ok_or(RequestError::NotFound)
}
