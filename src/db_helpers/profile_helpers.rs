use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::Follow};

pub async fn get_follow_in_db(
    pool: &SqlitePool,
    user_id: i64,
    author_id: i64,
) -> Result<Option<Follow>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Follow>(
        r#"
        SELECT id, user_id, author_id FROM follows WHERE user_id = ?1 AND author_id = ?2
        "#,
    )
    .bind(user_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;
    Ok(result)
}

/// Returns `false` when the edge already existed.
pub async fn follow_user_in_db(
    pool: &SqlitePool,
    user_id: i64,
    author_id: i64,
) -> Result<bool, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        INSERT INTO follows (user_id, author_id)
        VALUES (?1, ?2)
        ON CONFLICT (user_id, author_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(author_id)
    .execute(&mut tx)
    .await?;
    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

/// Returns `false` when there was no edge to delete.
pub async fn unfollow_user_in_db(
    pool: &SqlitePool,
    user_id: i64,
    author_id: i64,
) -> Result<bool, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        DELETE FROM follows WHERE user_id = ?1 AND author_id = ?2
        "#,
    )
    .bind(user_id)
    .bind(author_id)
    .execute(&mut tx)
    .await?;
    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}
