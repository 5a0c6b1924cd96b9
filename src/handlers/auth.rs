use axum::{
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::CookieJar;
use tracing::{error, info};

use crate::{
    authentication::{
        expired_session_cookie, get_jwt_token, hash_password_argon2, session_cookie,
        verify_password_argon2, MaybeUser,
    },
    data_formats::{FormErrors, FormValidate, LoginRequest, NextQuery, SignupRequest},
    db_helpers::{get_user_by_username, insert_user},
    errors::RequestError,
    templates, urls, SharedState,
};

const USERNAME_TAKEN: &str = "A user with that username already exists.";
const BAD_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

// ----------------- User Handlers -----------------

pub async fn signup_form(MaybeUser(viewer): MaybeUser) -> Html<String> {
    Html(templates::auth::signup(
        viewer.as_ref(),
        "",
        &FormErrors::default(),
    ))
}

pub async fn signup(
    Extension(state): Extension<SharedState>,
    jar: CookieJar,
    Form(request): Form<SignupRequest>,
) -> Result<Response, RequestError> {
    let username = request.username.as_str();
    let mut errors = request.form_errors();
    if errors.is_empty() && get_user_by_username(&state.pool, username).await?.is_some() {
        errors.add("username", USERNAME_TAKEN);
    }
    if !errors.is_empty() {
        return Ok(Html(templates::auth::signup(None, username, &errors)).into_response());
    }

    let password_hash = hash_password_argon2(request.password1)
        .await
        .map_err(|e| {
            error!("Could not hash password: {e:#}");
            RequestError::ServerError
        })?;

    let user = match insert_user(&state.pool, username, &password_hash).await {
        Ok(user) => user,
        Err(e) if e.is_unique_violation() => {
            errors.add("username", USERNAME_TAKEN);
            return Ok(Html(templates::auth::signup(None, username, &errors)).into_response());
        }
        Err(e) => return Err(e),
    };
    info!("Registered user {} ({})", user.username, user.id);

    let token = issue_token(&state, user.id)?;
    Ok((jar.add(session_cookie(token)), Redirect::to(&urls::index_url())).into_response())
}

pub async fn login_form(
    MaybeUser(viewer): MaybeUser,
    Query(NextQuery { next }): Query<NextQuery>,
) -> Html<String> {
    Html(templates::auth::login(
        viewer.as_ref(),
        "",
        next.as_deref(),
        &FormErrors::default(),
    ))
}

pub async fn login(
    Extension(state): Extension<SharedState>,
    jar: CookieJar,
    Form(LoginRequest {
        username,
        password,
        next,
    }): Form<LoginRequest>,
) -> Result<Response, RequestError> {
    let user = get_user_by_username(&state.pool, &username).await?;
    let verified = match &user {
        Some(user) => verify_password_argon2(password, &user.password)
            .await
            .map_err(|e| {
                error!("Could not verify password: {e:#}");
                RequestError::ServerError
            })?,
        None => false,
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            let mut errors = FormErrors::default();
            errors.add(FormErrors::NON_FIELD, BAD_CREDENTIALS);
            return Ok(Html(templates::auth::login(
                None,
                &username,
                next.as_deref(),
                &errors,
            ))
            .into_response());
        }
    };
    info!("{} logged in", user.username);

    let token = issue_token(&state, user.id)?;
    let target = next
        .filter(|next| urls::is_safe_redirect(next))
        .unwrap_or_else(urls::index_url);
    Ok((jar.add(session_cookie(token)), Redirect::to(&target)).into_response())
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(expired_session_cookie()),
        Html(templates::auth::logged_out()),
    )
}

fn issue_token(state: &SharedState, user_id: i64) -> Result<String, RequestError> {
    get_jwt_token(user_id, &state.config.jwt_secret).map_err(|e| {
        error!("Could not issue token: {e:#}");
        RequestError::ServerError
    })
}
