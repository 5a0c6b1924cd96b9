mod common;

use common::{posts_on_page, spawn_app, TestApp};
use yatube::pagination::POSTS_PER_PAGE;

const TOTAL_POSTS: usize = 13;
const PER_PAGE: usize = POSTS_PER_PAGE as usize;

async fn seeded_app() -> (TestApp, reqwest::Client) {
    let app = spawn_app().await;
    let user = app.create_user("paginator_user").await;
    let group = app
        .create_group("paginator-group", "paginator-slug", "paginator-description")
        .await;
    for n in 0..TOTAL_POSTS {
        app.create_post(&user, &format!("paginator-text {n}"), Some(&group))
            .await;
    }
    let client = app.client_for(&user);
    (app, client)
}

const LISTINGS: [&str; 3] = ["/", "/group/paginator-slug/", "/profile/paginator_user/"];

#[tokio::test]
async fn first_page_holds_ten_posts() {
    let (app, client) = seeded_app().await;
    for path in LISTINGS {
        let html = app.get_html(&client, path).await;
        assert_eq!(posts_on_page(&html), PER_PAGE, "GET {path}");
        assert!(html.contains("Page 1 of 2"), "GET {path}");
    }
}

#[tokio::test]
async fn second_page_holds_the_rest() {
    let (app, client) = seeded_app().await;
    for path in LISTINGS {
        let html = app.get_html(&client, &format!("{path}?page=2")).await;
        assert_eq!(
            posts_on_page(&html),
            TOTAL_POSTS - PER_PAGE,
            "GET {path}?page=2"
        );
    }
}

#[tokio::test]
async fn newest_post_comes_first() {
    let (app, client) = seeded_app().await;
    let html = app.get_html(&client, "/group/paginator-slug/").await;
    let newest = html.find("paginator-text 12").unwrap();
    let older = html.find("paginator-text 11").unwrap();
    assert!(newest < older);
    assert!(!html.contains("paginator-text 2<"));
}

#[tokio::test]
async fn out_of_range_page_shows_the_last_one() {
    let (app, client) = seeded_app().await;
    let html = app.get_html(&client, "/profile/paginator_user/?page=99").await;
    assert_eq!(posts_on_page(&html), TOTAL_POSTS - PER_PAGE);
}

#[tokio::test]
async fn non_numeric_page_shows_the_first_one() {
    let (app, client) = seeded_app().await;
    let html = app.get_html(&client, "/group/paginator-slug/?page=abc").await;
    assert_eq!(posts_on_page(&html), PER_PAGE);
}

#[tokio::test]
async fn empty_listing_renders_one_page() {
    let app = spawn_app().await;
    app.create_group("empty", "empty-slug", "nothing here").await;
    let html = app.get_html(&app.guest(), "/group/empty-slug/?page=3").await;
    assert_eq!(posts_on_page(&html), 0);
}

#[tokio::test]
async fn page_number_beyond_i64_shows_the_last_one() {
    let (app, client) = seeded_app().await;
    let html = app
        .get_html(&client, "/group/paginator-slug/?page=99999999999999999999")
        .await;
    assert_eq!(posts_on_page(&html), TOTAL_POSTS - PER_PAGE);
}
