use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};

use crate::{errors::RequestError, models::Comment};

pub async fn add_comment_to_post_in_db(
    pool: &SqlitePool,
    author_id: i64,
    post_id: i64,
    text: &str,
) -> Result<i64, RequestError> {
    let mut tx = pool.begin().await?;
    let (id,) = sqlx::query_as::<Sqlite, (i64,)>(
        r#"
        INSERT INTO comments (text, post_id, author_id, created)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id
        "#,
    )
    .bind(text)
    .bind(post_id)
    .bind(author_id)
    .bind(Utc::now())
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(id)
}

/// Oldest first, so a thread reads top to bottom.
pub async fn get_comments_for_post_in_db(
    pool: &SqlitePool,
    post_id: i64,
) -> Result<Vec<Comment>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Comment>(
        r#"
        SELECT comments.id          AS id,
               comments.text        AS text,
               comments.post_id     AS post_id,
               comments.author_id   AS author_id,
               users.username       AS author_username,
               comments.created     AS created
          FROM comments
          JOIN users ON users.id = comments.author_id
         WHERE comments.post_id = ?1
         ORDER BY comments.created, comments.id
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;
    Ok(result)
}
