mod common;

use axum::http::StatusCode;
use common::{body_json, location, texts, TestApp};
use time::{Duration, OffsetDateTime};

#[tokio::test]
async fn following_twice_creates_one_edge() {
    let app = TestApp::new().await;
    let user = app.user("follower").await;
    let author = app.user("author").await;

    for _ in 0..2 {
        let response = app.get("/profile/author/follow/", Some(&user)).await;
        assert_eq!(location(&response), "/profile/author/");
    }

    assert_eq!(app.store.followed_author_ids(user.id).await.unwrap(), vec![author.id]);
}

#[tokio::test]
async fn profile_reports_following() {
    let app = TestApp::new().await;
    let user = app.user("follower").await;
    app.user("author").await;

    let before = body_json(app.get("/profile/author/", Some(&user)).await).await;
    assert_eq!(before["following"], false);

    app.get("/profile/author/follow/", Some(&user)).await;

    let after = body_json(app.get("/profile/author/", Some(&user)).await).await;
    assert_eq!(after["following"], true);
    assert_eq!(after["author"]["username"], "author");

    let anonymous = body_json(app.get("/profile/author/", None).await).await;
    assert_eq!(anonymous["following"], false);
}

#[tokio::test]
async fn unfollow_needs_an_existing_edge() {
    let app = TestApp::new().await;
    let user = app.user("follower").await;
    app.user("author").await;

    let response = app.get("/profile/author/unfollow/", Some(&user)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.get("/profile/author/follow/", Some(&user)).await;
    let response = app.get("/profile/author/unfollow/", Some(&user)).await;
    assert_eq!(location(&response), "/profile/author/");
    assert!(app.store.followed_author_ids(user.id).await.unwrap().is_empty());

    let response = app.get("/profile/author/unfollow/", Some(&user)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn following_unknown_user_is_not_found() {
    let app = TestApp::new().await;
    let user = app.user("follower").await;

    let response = app.get("/profile/ghost/follow/", Some(&user)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = app.get("/profile/ghost/unfollow/", Some(&user)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn following_oneself_is_ignored() {
    let app = TestApp::new().await;
    let user = app.user("narcissus").await;

    let response = app.get("/profile/narcissus/follow/", Some(&user)).await;
    assert_eq!(location(&response), "/profile/narcissus/");
    assert!(app.store.followed_author_ids(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn follow_feed_merges_followed_authors_newest_first() {
    let app = TestApp::new().await;
    let viewer = app.user("viewer").await;
    let a = app.user("a").await;
    let b = app.user("b").await;
    let stranger = app.user("stranger").await;

    let t3 = OffsetDateTime::now_utc() - Duration::hours(1);
    let t2 = t3 + Duration::minutes(5);
    let t1 = t2 + Duration::minutes(5);
    app.post_at(&a, "t1", t1).await;
    app.post_at(&a, "t3", t3).await;
    app.post_at(&b, "t2", t2).await;
    app.post_at(&stranger, "not followed", t1).await;

    let empty = body_json(app.get("/follow/", Some(&viewer)).await).await;
    assert!(texts(&empty).is_empty());

    app.get("/profile/a/follow/", Some(&viewer)).await;
    app.get("/profile/b/follow/", Some(&viewer)).await;

    let feed = body_json(app.get("/follow/", Some(&viewer)).await).await;
    assert_eq!(texts(&feed), ["t1", "t2", "t3"]);
    assert_eq!(feed["page_obj"]["count"], 3);

    let author_feed = body_json(app.get("/follow/", Some(&a)).await).await;
    assert!(texts(&author_feed).is_empty());
}

#[tokio::test]
async fn follow_feed_is_paginated() {
    let app = TestApp::new().await;
    let viewer = app.user("viewer").await;
    let author = app.user("author").await;
    let start = OffsetDateTime::now_utc() - Duration::hours(1);
    for i in 1..=12 {
        app.post_at(&author, &format!("post {i}"), start + Duration::seconds(i)).await;
    }
    app.get("/profile/author/follow/", Some(&viewer)).await;

    let first = body_json(app.get("/follow/", Some(&viewer)).await).await;
    assert_eq!(texts(&first).len(), 10);
    let second = body_json(app.get("/follow/?page=2", Some(&viewer)).await).await;
    assert_eq!(texts(&second), ["post 2", "post 1"]);
}
