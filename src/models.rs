use std::fmt;

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A post joined with its author's username and, when set, its group.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image: Option<String>,
    pub author_id: i64,
    pub author_username: String,
    pub group_id: Option<i64>,
    pub group_title: Option<String>,
    pub group_slug: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub post_id: i64,
    pub author_id: i64,
    pub author_username: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Follow {
    pub id: i64,
    pub user_id: i64,
    pub author_id: i64,
}

const POST_PREVIEW_CHARS: usize = 15;

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.text.chars().take(POST_PREVIEW_CHARS).collect();
        f.write_str(&preview)
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(text: &str) -> Post {
        Post {
            id: 1,
            text: text.to_string(),
            pub_date: Utc::now(),
            image: None,
            author_id: 1,
            author_username: "auth".to_string(),
            group_id: None,
            group_title: None,
            group_slug: None,
        }
    }

    #[test]
    fn post_displays_first_fifteen_characters() {
        let post = post("A test post about learning how to test");
        assert_eq!(post.to_string(), "A test post abo");
    }

    #[test]
    fn post_preview_counts_characters_not_bytes() {
        let post = post("Тестовый пост про изучение тестов");
        assert_eq!(post.to_string(), "Тестовый пост п");
    }

    #[test]
    fn group_displays_title() {
        let group = Group {
            id: 1,
            title: "Test group".to_string(),
            slug: "test-slug".to_string(),
            description: "Test description".to_string(),
        };
        assert_eq!(group.to_string(), "Test group");
    }
}
