use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::{templates, urls};

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Not Found")]
    NotFound,
    /// Carries the path the visitor asked for, so login can send them back.
    #[error("Authentication required to access {0}")]
    AuthenticationRequired(String),
    #[error("Only the author can edit post {0}")]
    NotAuthor(i64),
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("Internal Server Error")]
    ServerError,
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        match self {
            RequestError::NotFound => (
                StatusCode::NOT_FOUND,
                Html(templates::status_pages::not_found(None, None)),
            )
                .into_response(),
            RequestError::AuthenticationRequired(next) => {
                Redirect::to(&urls::login_url(&next)).into_response()
            }
            RequestError::NotAuthor(post_id) => {
                Redirect::to(&urls::post_detail_url(post_id)).into_response()
            }
            RequestError::MalformedPayload(message) => {
                warn!("Rejected malformed payload: {message}");
                (
                    StatusCode::BAD_REQUEST,
                    Html(templates::status_pages::bad_request()),
                )
                    .into_response()
            }
            RequestError::ServerError
            | RequestError::DatabaseError(_)
            | RequestError::IoError(_) => {
                error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(templates::status_pages::server_error()),
                )
                    .into_response()
            }
        }
    }
}

impl RequestError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            RequestError::DatabaseError(sqlx::Error::Database(e)) => {
                e.message().contains("UNIQUE constraint failed")
            }
            _ => false,
        }
    }
}
