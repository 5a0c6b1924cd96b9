//! HTML pages. Every piece of user-supplied text goes through [`escape`].

pub mod auth;
pub mod posts;
pub mod status_pages;

use std::fmt::Write;

use crate::{
    authentication::AuthUser, data_formats::FormErrors, models::Post, pagination::Page, urls,
};

const SITE_NAME: &str = "Yatube";

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Blank-line separated paragraphs, single newlines as `<br>`.
pub fn linebreaks(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| format!("<p>{}</p>", escape(paragraph).replace('\n', "<br>")))
        .collect()
}

pub(crate) fn layout(title: &str, viewer: Option<&AuthUser>, content: &str) -> String {
    let mut nav = String::new();
    let _ = write!(nav, r#"<a href="{}">Home</a>"#, urls::index_url());
    match viewer {
        Some(user) => {
            let _ = write!(
                nav,
                r#" <a href="/follow/">Following</a> <a href="/create/">New post</a> <a href="{}">{}</a> <a href="/auth/logout/">Log out</a>"#,
                escape(&urls::profile_url(&user.username)),
                escape(&user.username),
            );
        }
        None => {
            nav.push_str(r#" <a href="/auth/login/">Log in</a> <a href="/auth/signup/">Sign up</a>"#);
        }
    }
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<header><nav><strong>{SITE_NAME}</strong> {nav}</nav></header>
<main>
{content}
</main>
<footer><p>&copy; {SITE_NAME}</p></footer>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub(crate) fn post_card(post: &Post, show_group_link: bool) -> String {
    let mut card = String::from(r#"<article class="post">"#);
    let _ = write!(
        card,
        r#"<ul><li>Author: <a href="{}">{}</a></li><li>Published: {}</li></ul>"#,
        escape(&urls::profile_url(&post.author_username)),
        escape(&post.author_username),
        post.pub_date.format("%d %b %Y"),
    );
    if let Some(image) = &post.image {
        let _ = write!(
            card,
            r#"<img class="post-image" src="{}" alt="">"#,
            escape(&urls::media_url(image))
        );
    }
    card.push_str(&linebreaks(&post.text));
    let _ = write!(
        card,
        r#"<a href="{}">details</a>"#,
        urls::post_detail_url(post.id)
    );
    if show_group_link {
        if let (Some(slug), Some(title)) = (&post.group_slug, &post.group_title) {
            let _ = write!(
                card,
                r#" <a href="{}">all posts of the group {}</a>"#,
                escape(&urls::group_url(slug)),
                escape(title)
            );
        }
    }
    card.push_str("</article>");
    card
}

pub(crate) fn post_list(page: &Page<Post>, show_group_link: bool, base: &str) -> String {
    let mut html = String::new();
    for post in &page.items {
        html.push_str(&post_card(post, show_group_link));
        html.push_str("<hr>");
    }
    html.push_str(&paginator(page, base));
    html
}

fn paginator<T>(page: &Page<T>, base: &str) -> String {
    if page.num_pages <= 1 {
        return String::new();
    }
    let link = |number: i64, label: &str| {
        format!(
            r#"<a class="page-link" href="{}?page={number}">{label}</a>"#,
            escape(base)
        )
    };
    let mut html = String::from(r#"<nav class="pagination">"#);
    if page.has_previous() {
        html.push_str(&link(1, "First"));
        html.push_str(&link(page.number - 1, "Previous"));
    }
    let _ = write!(
        html,
        r#"<span class="current">Page {} of {}</span>"#,
        page.number, page.num_pages
    );
    if page.has_next() {
        html.push_str(&link(page.number + 1, "Next"));
        html.push_str(&link(page.num_pages, "Last"));
    }
    html.push_str("</nav>");
    html
}

pub(crate) fn field_errors(errors: &FormErrors, field: &str) -> String {
    let messages = errors.get(field);
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|message| format!("<li>{}</li>", escape(message)))
        .collect();
    format!(r#"<ul class="errorlist">{items}</ul>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
    }

    #[test]
    fn linebreaks_builds_paragraphs() {
        assert_eq!(
            linebreaks("one\ntwo\r\n\r\n<three>"),
            "<p>one<br>two</p><p>&lt;three&gt;</p>"
        );
    }

    #[test]
    fn single_page_has_no_paginator() {
        let page = Page::<Post> {
            items: vec![],
            number: 1,
            num_pages: 1,
            count: 0,
        };
        assert_eq!(paginator(&page, "/"), "");
    }
}
