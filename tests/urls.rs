mod common;

use common::{location, spawn_app};

#[tokio::test]
async fn public_pages_are_available_to_guests() {
    let app = spawn_app().await;
    let user = app.create_user("auth").await;
    app.create_group("Heading", "test-slug", "Group description")
        .await;
    let post_id = app.create_post(&user, "Test text", None).await;
    let guest = app.guest();

    for path in [
        "/".to_string(),
        "/group/test-slug/".to_string(),
        "/profile/auth/".to_string(),
        format!("/posts/{post_id}/"),
    ] {
        let response = app.get(&guest, &path).await;
        assert_eq!(response.status(), 200, "GET {path}");
    }
}

#[tokio::test]
async fn unknown_url_renders_custom_not_found_page() {
    let app = spawn_app().await;
    let response = app.get(&app.guest(), "/unexisting_page/").await;
    assert_eq!(response.status(), 404);
    let body = response.text().await.unwrap();
    assert!(body.contains("<h1>Page not found</h1>"));
    assert!(body.contains("/unexisting_page/"));
}

#[tokio::test]
async fn unknown_objects_are_not_found() {
    let app = spawn_app().await;
    let guest = app.guest();
    for path in [
        "/group/missing/",
        "/profile/nobody/",
        "/posts/999/",
        "/posts/not-a-number/",
    ] {
        let response = app.get(&guest, path).await;
        assert_eq!(response.status(), 404, "GET {path}");
        assert!(response.text().await.unwrap().contains("Page not found"));
    }
}

#[tokio::test]
async fn create_page_is_available_to_authorized_user() {
    let app = spawn_app().await;
    let user = app.create_user("auth").await;
    let html = app.get_html(&app.client_for(&user), "/create/").await;
    assert!(html.contains("<h1>New post</h1>"));
    assert!(html.contains(r#"name="text""#));
    assert!(html.contains(r#"name="group""#));
}

#[tokio::test]
async fn edit_page_is_available_to_author() {
    let app = spawn_app().await;
    let author = app.create_user("edit").await;
    let group = app.create_group("Heading", "test-slug", "desc").await;
    let post_id = app.create_post(&author, "edit", Some(&group)).await;

    let html = app
        .get_html(&app.client_for(&author), &format!("/posts/{post_id}/edit/"))
        .await;
    assert!(html.contains("<h1>Edit post</h1>"));
    assert!(html.contains(">edit</textarea>"));
    assert!(html.contains(&format!(r#"<option value="{}" selected>"#, group.id)));
}

#[tokio::test]
async fn create_redirects_anonymous_to_login() {
    let app = spawn_app().await;
    let response = app.get(&app.guest(), "/create/").await;
    assert_eq!(location(&response), "/auth/login/?next=/create/");
}

#[tokio::test]
async fn edit_redirects_anonymous_to_login_even_for_missing_post() {
    let app = spawn_app().await;
    let response = app.get(&app.guest(), "/posts/1/edit/").await;
    assert_eq!(location(&response), "/auth/login/?next=/posts/1/edit/");
}

#[tokio::test]
async fn feed_redirects_anonymous_to_login() {
    let app = spawn_app().await;
    let response = app.get(&app.guest(), "/follow/").await;
    assert_eq!(location(&response), "/auth/login/?next=/follow/");
}

#[tokio::test]
async fn invalid_token_is_treated_as_anonymous() {
    let app = spawn_app().await;
    let response = app
        .guest()
        .get(app.url("/create/"))
        .header("Authorization", "Token not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(location(&response), "/auth/login/?next=/create/");
}
