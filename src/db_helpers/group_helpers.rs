use sqlx::{Sqlite, SqlitePool};

use crate::{data_formats::GroupRequest, errors::RequestError, models::Group};

pub async fn get_group_by_slug_in_db(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<Group>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Group>(
        r#"
        SELECT id, title, slug, description FROM post_groups WHERE slug = ?1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;
    Ok(result)
}

pub async fn list_groups_in_db(pool: &SqlitePool) -> Result<Vec<Group>, RequestError> {
    let result = sqlx::query_as::<Sqlite, Group>(
        r#"
        SELECT id, title, slug, description FROM post_groups ORDER BY title, id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(result)
}

pub async fn create_group_in_db(
    pool: &SqlitePool,
    GroupRequest {
        title,
        slug,
        description,
    }: GroupRequest,
) -> Result<Group, RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query_as::<Sqlite, Group>(
        r#"
        INSERT INTO post_groups (title, slug, description)
        VALUES (?1, ?2, ?3)
        RETURNING id, title, slug, description
        "#,
    )
    .bind(title.trim())
    .bind(slug.trim())
    .bind(description.trim())
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(result)
}
