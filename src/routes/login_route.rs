use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use axum_extra::extract::CookieJar;
use tracing::{info, warn};

use crate::{
    extractors::auth_extractor::AuthUser,
    structs::login_user::{LoginForm, LoginUser, NextParams},
    utils::{
        app_error::AppError,
        register::{generate_session_token, hash_password, safe_redirect_target},
    },
    AppState,
};

use super::session_cookie;

pub async fn login_form_route(Query(params): Query<NextParams>) -> Json<LoginForm> {
    Json(LoginForm { next: params.next })
}

pub async fn login_route(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(login_user): Json<LoginUser>,
) -> Result<(CookieJar, Redirect), AppError> {
    let username = login_user.username.trim();
    let password = hash_password(&login_user.password);

    let Some(account) = app_state
        .store
        .account_by_credentials(username, &password)
        .await?
    else {
        warn!("Failed login for @{username}");
        return Err(AppError::field_error("__all__", "Identifiants invalides."));
    };

    info!("User @{} logged in", account.username);

    let target = safe_redirect_target(login_user.next.as_deref());
    Ok((jar.add(session_cookie(account.token)), Redirect::to(&target)))
}

/// Drops the cookie and rotates the stored token so the old session is dead
/// everywhere.
pub async fn logout_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(auth_user) = auth_user {
        app_state
            .store
            .rotate_token(auth_user.id, &generate_session_token())
            .await?;
        info!("User @{} logged out", auth_user.username);
    }

    Ok((jar.remove(session_cookie(String::new())), Redirect::to("/")))
}
