use anyhow::{Context, Result};
use argon2::PasswordVerifier;
use argon2::{password_hash::SaltString, Argon2, PasswordHash};
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::{db_helpers::get_user_by_id, errors::RequestError, SharedState};

const JWT_EXPIRY_DURATION: time::Duration = time::Duration::days(90);
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize)]
struct AuthClaim {
    id: i64,
    exp: i64,
}

/// A logged-in visitor.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// The visitor, if the request carries a valid token for an existing user.
pub struct MaybeUser(pub Option<AuthUser>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request_parts(
        parts: &mut Parts,
        _: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let state = parts
            .extensions
            .get::<SharedState>()
            .cloned()
            .ok_or(RequestError::ServerError)?;

        let token = match extract_token(&parts.headers) {
            Some(token) => token,
            None => return Ok(MaybeUser(None)),
        };

        let id = match verify_jwt_token(&token, &state.config.jwt_secret) {
            Ok(id) => id,
            Err(e) => {
                debug!("Ignoring invalid token: {e}");
                return Ok(MaybeUser(None));
            }
        };

        let user = get_user_by_id(&state.pool, id).await?;
        Ok(MaybeUser(user.map(|user| AuthUser {
            id: user.id,
            username: user.username,
        })))
    }
}

/// Rejects anonymous visitors with a redirect to the login page.
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = RequestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        match MaybeUser::from_request_parts(parts, state).await? {
            MaybeUser(Some(user)) => Ok(user),
            MaybeUser(None) => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|path| path.as_str().to_owned())
                    .unwrap_or_else(|| parts.uri.path().to_owned());
                Err(RequestError::AuthenticationRequired(next))
            }
        }
    }
}

/// Browsers send the session cookie; scripted clients may use the header.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(header) = headers.get("Authorization") {
        if let Some(token) = header
            .to_str()
            .ok()
            .and_then(|header| header.strip_prefix("Token "))
        {
            return Some(token.to_string());
        }
    }
    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn expired_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::named(TOKEN_COOKIE);
    cookie.set_path("/");
    cookie
}

pub fn get_jwt_token(id: i64, jwt_secret: &str) -> Result<String> {
    let expiry_date = OffsetDateTime::now_utc() + JWT_EXPIRY_DURATION;
    let claim = AuthClaim {
        id,
        exp: expiry_date.unix_timestamp(),
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claim,
        &jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .context("Failed to generate jwt token")
}

pub fn verify_jwt_token(token: &str, jwt_secret: &str) -> Result<i64> {
    let token_data = jsonwebtoken::decode::<AuthClaim>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(jwt_secret.as_ref()),
        &jsonwebtoken::Validation::default(),
    )
    .context("Failed to verify jwt token")?;
    let claim = token_data.claims;
    if claim.exp < OffsetDateTime::now_utc().unix_timestamp() {
        anyhow::bail!("Token expired");
    }
    Ok(claim.id)
}

pub async fn verify_password_argon2(password: String, hash: &str) -> Result<bool> {
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || {
        let hash = match PasswordHash::new(hash.as_str()) {
            Ok(hash) => hash,
            // Accounts created without a usable password never match.
            Err(_) => return Ok(false),
        };
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok())
    })
    .await
    .context("Failed to verify password")?
}

pub async fn hash_password_argon2(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(rand::thread_rng());
        let hash = PasswordHash::generate(Argon2::default(), password, salt.as_salt())
            .map_err(|_| anyhow::anyhow!("Failed to hash password"))?;
        Ok(hash.to_string())
    })
    .await
    .context("Failed to hash password")?
}
