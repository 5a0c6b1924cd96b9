use std::fmt::Write;

use crate::{
    authentication::AuthUser,
    data_formats::{
        FormErrors, COMMENT_TEXT_HELP, COMMENT_TEXT_LABEL, POST_GROUP_HELP, POST_GROUP_LABEL,
        POST_IMAGE_LABEL, POST_TEXT_HELP, POST_TEXT_LABEL,
    },
    models::{Comment, Group, Post, User},
    pagination::Page,
    urls,
};

use super::{escape, field_errors, layout, linebreaks, post_list};

pub fn index(viewer: Option<&AuthUser>, page: &Page<Post>) -> String {
    let content = format!(
        "<h1>Latest updates on the site</h1>{}",
        post_list(page, true, &urls::index_url())
    );
    layout("Latest updates on the site", viewer, &content)
}

pub fn follow_index(viewer: Option<&AuthUser>, page: &Page<Post>) -> String {
    let body = if page.is_empty() {
        "<p>The authors you follow have not posted anything yet.</p>".to_string()
    } else {
        post_list(page, true, "/follow/")
    };
    let content = format!("<h1>Posts by authors you follow</h1>{body}");
    layout("Posts by authors you follow", viewer, &content)
}

pub fn group_list(viewer: Option<&AuthUser>, group: &Group, page: &Page<Post>) -> String {
    let content = format!(
        "<h1>{}</h1><p>{}</p>{}",
        escape(&group.title),
        escape(&group.description),
        post_list(page, false, &urls::group_url(&group.slug))
    );
    layout(&format!("Group posts {group}"), viewer, &content)
}

pub fn profile(
    viewer: Option<&AuthUser>,
    author: &User,
    page: &Page<Post>,
    following: bool,
) -> String {
    let mut content = format!(
        "<h1>All posts of user {}</h1><h3>Total posts: {}</h3>",
        escape(&author.username),
        page.count
    );
    if let Some(viewer) = viewer {
        if viewer.id != author.id {
            if following {
                let _ = write!(
                    content,
                    r#"<a class="unfollow" href="{}">Unfollow</a>"#,
                    escape(&urls::unfollow_url(&author.username))
                );
            } else {
                let _ = write!(
                    content,
                    r#"<a class="follow" href="{}">Follow</a>"#,
                    escape(&urls::follow_url(&author.username))
                );
            }
        }
    }
    content.push_str(&post_list(page, true, &urls::profile_url(&author.username)));
    layout(
        &format!("Profile of {}", author.username),
        viewer,
        &content,
    )
}

pub fn post_detail(
    viewer: Option<&AuthUser>,
    post: &Post,
    author_posts: i64,
    comments: &[Comment],
) -> String {
    let mut content = String::from(r#"<div class="post-detail"><aside><ul>"#);
    let _ = write!(
        content,
        "<li>Published: {}</li>",
        post.pub_date.format("%d %b %Y")
    );
    if let (Some(slug), Some(title)) = (&post.group_slug, &post.group_title) {
        let _ = write!(
            content,
            r#"<li>Group: {} <a href="{}">all posts of the group</a></li>"#,
            escape(title),
            escape(&urls::group_url(slug))
        );
    }
    let _ = write!(
        content,
        r#"<li>Author: {author}</li><li>Total posts by the author: {author_posts}</li><li><a href="{profile}">all posts of the user</a></li></ul></aside>"#,
        author = escape(&post.author_username),
        profile = escape(&urls::profile_url(&post.author_username)),
    );

    content.push_str(r#"<article class="post">"#);
    if let Some(image) = &post.image {
        let _ = write!(
            content,
            r#"<img class="post-image" src="{}" alt="">"#,
            escape(&urls::media_url(image))
        );
    }
    content.push_str(&linebreaks(&post.text));
    content.push_str("</article>");

    if viewer.map(|viewer| viewer.id) == Some(post.author_id) {
        let _ = write!(
            content,
            r#"<a class="edit" href="{}">edit post</a>"#,
            urls::post_edit_url(post.id)
        );
    }

    if viewer.is_some() {
        let _ = write!(
            content,
            r#"<section class="comment-form"><h5>Add a comment:</h5>
<form method="post" action="{action}">
<label for="id_text">{label}</label>
<textarea name="text" id="id_text" required></textarea>
<small>{help}</small>
<button type="submit">Send</button>
</form></section>"#,
            action = urls::add_comment_url(post.id),
            label = COMMENT_TEXT_LABEL,
            help = COMMENT_TEXT_HELP,
        );
    }

    content.push_str(r#"<section class="comments">"#);
    for comment in comments {
        let _ = write!(
            content,
            r#"<div class="comment"><h5><a href="{}">{}</a></h5><p>{}</p></div>"#,
            escape(&urls::profile_url(&comment.author_username)),
            escape(&comment.author_username),
            escape(&comment.to_string()),
        );
    }
    content.push_str("</section></div>");

    layout(&format!("Post {post}"), viewer, &content)
}

/// What the shared create/edit form shows.
pub struct PostFormView<'a> {
    /// Set when editing an existing post.
    pub post_id: Option<i64>,
    pub text: &'a str,
    pub group_id: Option<i64>,
    pub groups: &'a [Group],
    pub errors: &'a FormErrors,
}

pub fn post_form(viewer: Option<&AuthUser>, form: &PostFormView<'_>) -> String {
    let (heading, action, button) = match form.post_id {
        Some(post_id) => ("Edit post", urls::post_edit_url(post_id), "Save"),
        None => ("New post", "/create/".to_string(), "Add"),
    };

    let mut options = String::from(r#"<option value="">---------</option>"#);
    for group in form.groups {
        let selected = if form.group_id == Some(group.id) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            options,
            r#"<option value="{}"{selected}>{}</option>"#,
            group.id,
            escape(&group.title)
        );
    }

    let content = format!(
        r#"<h1>{heading}</h1>
{non_field}
<form method="post" enctype="multipart/form-data" action="{action}">
<label for="id_text">{text_label}</label>
<textarea name="text" id="id_text" required>{text}</textarea>
<small>{text_help}</small>
{text_errors}
<label for="id_group">{group_label}</label>
<select name="group" id="id_group">{options}</select>
<small>{group_help}</small>
{group_errors}
<label for="id_image">{image_label}</label>
<input type="file" name="image" id="id_image" accept="image/*">
{image_errors}
<button type="submit">{button}</button>
</form>"#,
        non_field = field_errors(form.errors, FormErrors::NON_FIELD),
        text_label = POST_TEXT_LABEL,
        text = escape(form.text),
        text_help = POST_TEXT_HELP,
        text_errors = field_errors(form.errors, "text"),
        group_label = POST_GROUP_LABEL,
        group_help = POST_GROUP_HELP,
        group_errors = field_errors(form.errors, "group"),
        image_label = POST_IMAGE_LABEL,
        image_errors = field_errors(form.errors, "image"),
    );
    layout(heading, viewer, &content)
}
