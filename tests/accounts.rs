mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use common::{location, TestApp, PASSWORD};
use serde_json::json;
use tower::ServiceExt;

fn session_cookie(response: &Response) -> String {
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn get_with_cookie(app: &TestApp, uri: &str, cookie: &str) -> Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn signup_opens_a_session() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/auth/signup/",
            None,
            json!({
                "username": "newbie",
                "email": "Newbie@Example.com",
                "first_name": "Лев",
                "last_name": "Толстой",
                "password": "long password",
            }),
        )
        .await;
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response);
    assert!(cookie.starts_with("session="));

    let account = app.store.account_by_username("newbie").await.unwrap().unwrap();
    assert_eq!(account.email, "newbie@example.com");
    assert_ne!(account.password, "long password");

    let response = get_with_cookie(&app, "/create/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn signup_rejects_bad_input() {
    let app = TestApp::new().await;
    app.user("taken").await;

    let response = app
        .post_json(
            "/auth/signup/",
            None,
            json!({ "username": "taken", "email": "nope", "password": "short" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value =
        serde_json::from_slice(&common::body_bytes(response).await).unwrap();
    for field in ["username", "email", "password"] {
        assert!(body["errors"][field].is_array(), "{field}");
    }
}

#[tokio::test]
async fn login_redirects_to_next() {
    let app = TestApp::new().await;
    let user = app.user("auth").await;

    let response = app
        .post_json(
            "/auth/login/",
            None,
            json!({ "username": "auth", "password": "wrong", "next": "/create/" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_json(
            "/auth/login/",
            None,
            json!({ "username": "auth", "password": PASSWORD, "next": "/create/" }),
        )
        .await;
    assert_eq!(location(&response), "/create/");
    assert_eq!(session_cookie(&response), format!("session={}", user.token));

    let response = app
        .post_json(
            "/auth/login/",
            None,
            json!({ "username": "auth", "password": PASSWORD, "next": "https://elsewhere.example/" }),
        )
        .await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn login_form_echoes_next() {
    let app = TestApp::new().await;

    let form = common::body_json(app.get("/auth/login/?next=%2Ffollow%2F", None).await).await;
    assert_eq!(form["next"], "/follow/");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = TestApp::new().await;
    let user = app.user("auth").await;

    let response = app.get("/auth/logout/", Some(&user)).await;
    assert_eq!(location(&response), "/");
    assert_eq!(session_cookie(&response), "session=");

    let response = app.get("/follow/", Some(&user)).await;
    assert_eq!(location(&response), "/auth/login/?next=%2Ffollow%2F");

    let response = app
        .post_json(
            "/auth/login/",
            None,
            json!({ "username": "auth", "password": PASSWORD }),
        )
        .await;
    let cookie = session_cookie(&response);
    assert_ne!(cookie, format!("session={}", user.token));
    let response = get_with_cookie(&app, "/follow/", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_session_is_anonymous() {
    let app = TestApp::new().await;

    let response = get_with_cookie(&app, "/create/", "session=forged").await;
    assert!(location(&response).starts_with("/auth/login/"));
}
