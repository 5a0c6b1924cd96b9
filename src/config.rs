use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_address: SocketAddr,
    /// Directory uploaded images are written to and served from under `/media`.
    pub media_root: PathBuf,
    /// How long a rendered index page is served from the page cache.
    pub index_cache_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            bind_address: try_load("BIND_ADDRESS", "127.0.0.1:3001")?,
            media_root: try_load("MEDIA_ROOT", "media")?,
            index_cache_ttl: Duration::from_secs(try_load("INDEX_CACHE_SECONDS", "20")?),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid {key} value {value:?}: {e}"))
}
