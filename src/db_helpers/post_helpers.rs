use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};

use crate::{
    errors::RequestError,
    models::Post,
    pagination::{Page, Paginator, POSTS_PER_PAGE},
};

const POST_QUERY: &str = r#"
            SELECT posts.id             AS id,
                   posts.text           AS text,
                   posts.pub_date       AS pub_date,
                   posts.image          AS image,
                   posts.author_id      AS author_id,
                   users.username       AS author_username,
                   posts.group_id       AS group_id,
                   post_groups.title    AS group_title,
                   post_groups.slug     AS group_slug
              FROM posts
              JOIN users
                ON users.id = posts.author_id
         LEFT JOIN post_groups
                ON post_groups.id = posts.group_id
"#;

const POST_FILTER: &str = r#"
             WHERE ( posts.group_id = ?1
                    OR ?1 IS NULL )
               AND ( posts.author_id = ?2
                    OR ?2 IS NULL )
               AND ( posts.author_id IN (SELECT follows.author_id
                                           FROM follows
                                          WHERE follows.user_id = ?3)
                    OR ?3 IS NULL )
"#;

/// Which posts a listing shows. Unset fields do not filter.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostFilter {
    pub group_id: Option<i64>,
    pub author_id: Option<i64>,
    /// Only posts by authors this user follows.
    pub followed_by: Option<i64>,
}

/// One page of posts, newest first.
pub async fn list_posts_in_db(
    pool: &SqlitePool,
    PostFilter {
        group_id,
        author_id,
        followed_by,
    }: PostFilter,
    page: Option<&str>,
) -> Result<Page<Post>, RequestError> {
    let count_query = format!("SELECT COUNT(*) FROM posts {POST_FILTER}");
    let (count,) = sqlx::query_as::<Sqlite, (i64,)>(&count_query)
        .bind(group_id)
        .bind(author_id)
        .bind(followed_by)
        .fetch_one(pool)
        .await?;

    let paginator = Paginator::new(count, POSTS_PER_PAGE);
    let number = paginator.page_number(page);

    let query = format!(
        "{POST_QUERY} {POST_FILTER} ORDER BY posts.pub_date DESC, posts.id DESC LIMIT ?4 OFFSET ?5"
    );
    let posts = sqlx::query_as::<Sqlite, Post>(&query)
        .bind(group_id)
        .bind(author_id)
        .bind(followed_by)
        .bind(paginator.limit())
        .bind(paginator.offset(number))
        .fetch_all(pool)
        .await?;

    Ok(paginator.page(number, posts))
}

pub async fn get_post_by_id_in_db(
    pool: &SqlitePool,
    post_id: i64,
) -> Result<Option<Post>, RequestError> {
    let query = format!("{POST_QUERY} WHERE posts.id = ?1");
    let result = sqlx::query_as::<Sqlite, Post>(&query)
        .bind(post_id)
        .fetch_optional(pool)
        .await?;
    Ok(result)
}

pub async fn count_posts_by_author_in_db(
    pool: &SqlitePool,
    author_id: i64,
) -> Result<i64, RequestError> {
    let (count,) =
        sqlx::query_as::<Sqlite, (i64,)>("SELECT COUNT(*) FROM posts WHERE author_id = ?1")
            .bind(author_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn create_post_in_db(
    pool: &SqlitePool,
    author_id: i64,
    text: &str,
    group_id: Option<i64>,
    image: Option<&str>,
) -> Result<i64, RequestError> {
    let mut tx = pool.begin().await?;
    let (id,) = sqlx::query_as::<Sqlite, (i64,)>(
        r#"
        INSERT INTO posts (text, pub_date, author_id, group_id, image)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id
        "#,
    )
    .bind(text)
    .bind(Utc::now())
    .bind(author_id)
    .bind(group_id)
    .bind(image)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(id)
}

/// Rewrites text and group; the image only changes when a new one is given.
/// Nothing is touched unless `author_id` owns the post.
pub async fn update_post_in_db(
    pool: &SqlitePool,
    post_id: i64,
    author_id: i64,
    text: &str,
    group_id: Option<i64>,
    image: Option<&str>,
) -> Result<(), RequestError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        UPDATE posts
           SET text = ?1,
               group_id = ?2,
               image = COALESCE(?3, image)
         WHERE id = ?4 AND author_id = ?5
        "#,
    )
    .bind(text)
    .bind(group_id)
    .bind(image)
    .bind(post_id)
    .bind(author_id)
    .execute(&mut tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RequestError::NotAuthor(post_id));
    }

    tx.commit().await?;
    Ok(())
}
