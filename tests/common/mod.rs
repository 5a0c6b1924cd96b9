#![allow(dead_code)]

use std::{path::PathBuf, time::Duration};

use reqwest::{header, redirect::Policy, Client, Response};
use sqlx::{sqlite::SqlitePoolOptions, Sqlite};
use yatube::{
    authentication::get_jwt_token,
    data_formats::GroupRequest,
    db_helpers::{create_group_in_db, create_post_in_db, insert_user},
    get_random_free_port,
    models::{Group, User},
    AppState, Config, SharedState,
};

pub const JWT_SECRET: &str = "test-secret";

pub const SMALL_GIF: &[u8] = b"\x47\x49\x46\x38\x39\x61\x02\x00\x01\x00\x80\x00\x00\x00\x00\x00\
    \xFF\xFF\xFF\x21\xF9\x04\x00\x00\x00\x00\x00\x2C\x00\x00\x00\x00\
    \x02\x00\x01\x00\x00\x02\x02\x0C\x0A\x00\x3B";

const POST_MARKER: &str = r#"<article class="post">"#;

pub struct TestApp {
    pub address: String,
    pub state: SharedState,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.state.config.media_root);
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_cache_ttl(Duration::from_secs(20)).await
}

pub async fn spawn_app_with_cache_ttl(index_cache_ttl: Duration) -> TestApp {
    // One connection: every connection to `sqlite::memory:` is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    yatube::migrate(&pool).await.expect("Failed to migrate");

    let media_root: PathBuf =
        std::env::temp_dir().join(format!("yatube-media-{}", rand::random::<u64>()));
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        bind_address: "127.0.0.1:0".parse().unwrap(),
        media_root,
        index_cache_ttl,
    };
    let state = AppState::new(pool, config);

    let (listener, addr) = get_random_free_port().expect("Failed to bind");
    tokio::spawn(yatube::serve(listener, state.clone()));

    TestApp {
        address: format!("http://{addr}"),
        state,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// An anonymous client that reports redirects instead of following them.
    pub fn guest(&self) -> Client {
        Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap()
    }

    pub fn client_for(&self, user: &User) -> Client {
        let token = get_jwt_token(user.id, JWT_SECRET).unwrap();
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Token {token}").parse().unwrap(),
        );
        Client::builder()
            .redirect(Policy::none())
            .default_headers(headers)
            .build()
            .unwrap()
    }

    pub async fn get(&self, client: &Client, path: &str) -> Response {
        client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn get_html(&self, client: &Client, path: &str) -> String {
        let response = self.get(client, path).await;
        assert_eq!(response.status(), 200, "GET {path}");
        response.text().await.unwrap()
    }

    /// Users made here have no usable password; tests log them in by token.
    pub async fn create_user(&self, username: &str) -> User {
        insert_user(&self.state.pool, username, "!").await.unwrap()
    }

    pub async fn create_group(&self, title: &str, slug: &str, description: &str) -> Group {
        let request = GroupRequest {
            title: title.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
        };
        create_group_in_db(&self.state.pool, request).await.unwrap()
    }

    pub async fn create_post(&self, author: &User, text: &str, group: Option<&Group>) -> i64 {
        create_post_in_db(
            &self.state.pool,
            author.id,
            text,
            group.map(|group| group.id),
            None,
        )
        .await
        .unwrap()
    }

    pub async fn count(&self, table: &str) -> i64 {
        let (count,) = sqlx::query_as::<Sqlite, (i64,)>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.state.pool)
            .await
            .unwrap();
        count
    }
}

pub fn location(response: &Response) -> &str {
    assert!(
        response.status().is_redirection(),
        "expected a redirect, got {}",
        response.status()
    );
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect without Location")
}

/// Number of post cards rendered on a page.
pub fn posts_on_page(html: &str) -> usize {
    html.matches(POST_MARKER).count()
}
