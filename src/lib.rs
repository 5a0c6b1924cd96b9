pub mod authentication;
pub mod cache;
pub mod config;
pub mod data_formats;
pub mod db_helpers;
mod errors;
mod handlers;
mod media;
pub mod models;
pub mod pagination;
mod templates;
pub mod urls;

use anyhow::Context;
pub use anyhow::Result;
use axum::{routing::*, Extension, Router};
use handlers::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

pub use cache::PageCache;
pub use config::Config;
pub use errors::RequestError;

/// Everything a request handler can reach.
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub page_cache: PageCache,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> SharedState {
        let page_cache = PageCache::new(config.index_cache_ttl);
        Arc::new(AppState {
            pool,
            config,
            page_cache,
        })
    }
}

pub async fn run_app(config: Config) -> Result<()> {
    let db = init_db(&config.database_url).await?;
    let listener = TcpListener::bind(config.bind_address)
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    listener.set_nonblocking(true)?;
    info!("Server started on {}", config.bind_address);
    let state = AppState::new(db, config);
    axum::Server::from_tcp(listener)?
        .serve(make_router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

/// Serves `state` on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    listener.set_nonblocking(true)?;
    axum::Server::from_tcp(listener)?
        .serve(make_router(state).into_make_service())
        .await?;
    Ok(())
}

pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        info!("Creating database {}", db_url);
        Sqlite::create_database(db_url)
            .await
            .with_context(|| format!("Failed to create database {db_url}"))?;
    } else {
        info!("Database already exists");
    }
    let pool = SqlitePool::connect(db_url).await?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    info!("Running Migrations");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations completed");
    Ok(())
}

pub fn get_random_free_port() -> Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Could not get a free port")?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}

pub fn make_router(state: SharedState) -> Router {
    let media = ServeDir::new(&state.config.media_root);
    Router::new()
        .route("/", get(index))
        .route("/group/:slug/", get(group_posts))
        .route("/profile/:username/", get(profile))
        .route("/profile/:username/follow/", get(profile_follow))
        .route("/profile/:username/unfollow/", get(profile_unfollow))
        .route("/posts/:post_id/", get(post_detail))
        .route("/posts/:post_id/edit/", get(post_edit_form).post(post_edit))
        .route("/posts/:post_id/comment/", post(add_comment))
        .route("/create/", get(post_create_form).post(post_create))
        .route("/follow/", get(follow_index))
        .route("/auth/signup/", get(signup_form).post(signup))
        .route("/auth/login/", get(login_form).post(login))
        .route("/auth/logout/", get(logout))
        .nest_service("/media", media)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}
