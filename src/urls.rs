//! Reverse routing: builds the paths the router matches.

fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

pub fn index_url() -> String {
    "/".to_string()
}

pub fn group_url(slug: &str) -> String {
    format!("/group/{}/", encode_segment(slug))
}

pub fn profile_url(username: &str) -> String {
    format!("/profile/{}/", encode_segment(username))
}

pub fn follow_url(username: &str) -> String {
    format!("/profile/{}/follow/", encode_segment(username))
}

pub fn unfollow_url(username: &str) -> String {
    format!("/profile/{}/unfollow/", encode_segment(username))
}

pub fn post_detail_url(post_id: i64) -> String {
    format!("/posts/{post_id}/")
}

pub fn post_edit_url(post_id: i64) -> String {
    format!("/posts/{post_id}/edit/")
}

pub fn add_comment_url(post_id: i64) -> String {
    format!("/posts/{post_id}/comment/")
}

pub fn media_url(path: &str) -> String {
    format!("/media/{path}")
}

/// `next` keeps its slashes readable; everything else is percent-encoded.
pub fn login_url(next: &str) -> String {
    format!(
        "/auth/login/?next={}",
        urlencoding::encode(next).replace("%2F", "/")
    )
}

/// Only local absolute paths are followed after login.
pub fn is_safe_redirect(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//") && !next.starts_with("/\\")
}
