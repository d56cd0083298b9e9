pub mod add_comment_route;
pub mod edit_post_route;
pub mod follow_index_route;
pub mod follow_user_route;
pub mod group_posts_route;
pub mod index_route;
pub mod login_route;
pub mod post_detail_route;
pub mod profile_route;
pub mod publish_post;
pub mod register_route;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::Cookie;
use hyper::{header::HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::{
    extractors::auth_extractor::SESSION_COOKIE, middleware::logger_middleware::logger_middleware,
    utils::app_error::AppError, AppState,
};

use add_comment_route::add_comment_route;
use edit_post_route::{edit_post_form_route, edit_post_route};
use follow_index_route::follow_index_route;
use follow_user_route::{follow_user_route, unfollow_user_route};
use group_posts_route::group_posts_route;
use index_route::index_route;
use login_route::{login_form_route, login_route, logout_route};
use post_detail_route::post_detail_route;
use profile_route::profile_route;
use publish_post::{publish_post_form_route, publish_post_route};
use register_route::register_route;

pub fn profile_url(username: &str) -> String {
    format!("/profile/{}/", urlencoding::encode(username))
}

pub fn post_detail_url(post_id: i64) -> String {
    format!("/posts/{post_id}/")
}

pub(crate) fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish()
}

async fn not_found_route() -> AppError {
    AppError::not_found_error("Page introuvable.")
}

fn cors_layer(front_url: &str) -> Option<CorsLayer> {
    match front_url.parse::<HeaderValue>() {
        Ok(origin) => Some(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_origin(origin),
        ),
        Err(e) => {
            warn!("Ignoring invalid FRONT_URL `{front_url}` : {e}");
            None
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let cors = app_state.config.front_url.as_deref().and_then(cors_layer);

    let router = Router::new()
        .route("/", get(index_route))
        .route("/group/:slug/", get(group_posts_route))
        .route("/profile/:username/", get(profile_route))
        .route("/profile/:username/follow/", get(follow_user_route))
        .route("/profile/:username/unfollow/", get(unfollow_user_route))
        .route("/posts/:post_id/", get(post_detail_route))
        .route(
            "/posts/:post_id/edit/",
            get(edit_post_form_route).post(edit_post_route),
        )
        .route("/posts/:post_id/comment/", post(add_comment_route))
        .route(
            "/create/",
            get(publish_post_form_route).post(publish_post_route),
        )
        .route("/follow/", get(follow_index_route))
        .route("/auth/signup/", post(register_route))
        .route("/auth/login/", get(login_form_route).post(login_route))
        .route("/auth/logout/", get(logout_route))
        .fallback(not_found_route)
        .layer(axum_middleware::from_fn(logger_middleware));

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(Arc::new(app_state))
}
