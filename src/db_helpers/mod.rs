use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::User};

mod comment_helpers;
mod group_helpers;
mod post_helpers;
mod profile_helpers;
mod user_helpers;

pub use comment_helpers::*;
pub use group_helpers::*;
pub use post_helpers::*;
pub use profile_helpers::*;
pub use user_helpers::*;

const USER_QUERY: &str = r#"
        SELECT id, username, password, created_at FROM users
"#;

// ----------------- Helper Functions -----------------

pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, RequestError> {
    let query = format!("{USER_QUERY} WHERE username = ?1");
    let result = sqlx::query_as::<Sqlite, User>(&query)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, RequestError> {
    let query = format!("{USER_QUERY} WHERE id = ?1");
    let result = sqlx::query_as::<Sqlite, User>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}
