use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::{info, warn};

use crate::{
    extractors::auth_extractor::LoggedUser, models::account::Account,
    utils::app_error::AppError, AppState,
};

use super::profile_url;

async fn target_author(app_state: &AppState, username: &str) -> Result<Account, AppError> {
    app_state
        .store
        .account_by_username(username)
        .await?
        .ok_or_else(|| {
            warn!("Unknown user @{username}");
            AppError::not_found_error("Utilisateur introuvable.")
        })
}

/// Following twice, or following oneself, changes nothing.
pub async fn follow_user_route(
    State(app_state): State<Arc<AppState>>,
    LoggedUser(auth_user): LoggedUser,
    Path(username): Path<String>,
) -> Result<Redirect, AppError> {
    let author = target_author(&app_state, &username).await?;

    if app_state.store.follow(auth_user.id, author.id).await? {
        info!("User @{} now follows @{}", auth_user.username, author.username);
    }

    Ok(Redirect::to(&profile_url(&author.username)))
}

pub async fn unfollow_user_route(
    State(app_state): State<Arc<AppState>>,
    LoggedUser(auth_user): LoggedUser,
    Path(username): Path<String>,
) -> Result<Redirect, AppError> {
    let author = target_author(&app_state, &username).await?;

    if !app_state.store.unfollow(auth_user.id, author.id).await? {
        warn!(
            "User @{} tried to unfollow @{} without following",
            auth_user.username, author.username
        );
        return Err(AppError::not_found_error("Abonnement introuvable."));
    }

    info!("User @{} unfollowed @{}", auth_user.username, author.username);

    Ok(Redirect::to(&profile_url(&author.username)))
}
