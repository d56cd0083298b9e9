#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use postboard::{
    config::Config,
    models::{
        account::NewAccount,
        group::{Group, NewGroup},
        post::NewPost,
    },
    routes::router,
    store::Store,
    utils::{
        register::{generate_session_token, hash_password},
        timeline_cache::{MemoryTimelineCache, NoopTimelineCache, TimelineCache},
    },
    AppState,
};
use serde_json::Value;
use tempfile::TempDir;
use time::OffsetDateTime;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct horse";

pub struct TestApp {
    pub router: Router,
    pub store: Store,
    pub timeline_cache: Arc<dyn TimelineCache>,
    pub media_root: TempDir,
}

pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_cache_ttl(Duration::from_secs(20)).await
    }

    pub async fn with_cache_ttl(home_cache_ttl: Duration) -> Self {
        Self::build(home_cache_ttl, None).await
    }

    pub async fn without_cache() -> Self {
        Self::build(Duration::from_secs(20), Some(Arc::new(NoopTimelineCache))).await
    }

    async fn build(home_cache_ttl: Duration, cache: Option<Arc<dyn TimelineCache>>) -> Self {
        let store = Store::in_memory().await.unwrap();
        let media_root = tempfile::tempdir().unwrap();
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            media_root: media_root.path().to_path_buf(),
            home_cache_ttl,
            ..Config::default()
        };

        let timeline_cache =
            cache.unwrap_or_else(|| Arc::new(MemoryTimelineCache::new()) as Arc<dyn TimelineCache>);
        let state = AppState::new(store.clone(), config).with_timeline_cache(timeline_cache.clone());

        Self {
            router: router(state),
            store,
            timeline_cache,
            media_root,
        }
    }

    pub async fn user(&self, username: &str) -> TestUser {
        let token = generate_session_token();
        let account = self
            .store
            .create_account(NewAccount {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                first_name: String::new(),
                last_name: String::new(),
                password: hash_password(PASSWORD),
                token: token.clone(),
            })
            .await
            .unwrap();

        TestUser {
            id: account.id,
            username: account.username,
            token,
        }
    }

    pub async fn group(&self, slug: &str) -> Group {
        self.store
            .create_group(NewGroup {
                title: format!("Группа {slug}"),
                slug: slug.to_string(),
                description: "Тестовое описание".to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn post(&self, author: &TestUser, text: &str) -> i64 {
        self.store
            .create_post(NewPost::new(author.id, text))
            .await
            .unwrap()
    }

    pub async fn post_at(&self, author: &TestUser, text: &str, pub_date: OffsetDateTime) -> i64 {
        let mut post = NewPost::new(author.id, text);
        post.pub_date = pub_date;
        self.store.create_post(post).await.unwrap()
    }

    pub async fn get(&self, uri: &str, user: Option<&TestUser>) -> Response {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(user) = user {
            request = request.header(header::COOKIE, format!("session={}", user.token));
        }

        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_json(&self, uri: &str, user: Option<&TestUser>, body: Value) -> Response {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            request = request.header(header::COOKIE, format!("session={}", user.token));
        }

        self.router
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    hyper::body::to_bytes(response.into_body())
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[header::LOCATION].to_str().unwrap()
}

pub fn texts(page: &Value) -> Vec<String> {
    page["page_obj"]["object_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["text"].as_str().unwrap().to_string())
        .collect()
}
