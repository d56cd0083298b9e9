use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::warn;

use crate::{
    extractors::auth_extractor::AuthUser,
    models::post::PostFilter,
    structs::pages::ProfilePage,
    utils::{
        app_error::AppError,
        pagination::{PageWindow, PaginationParams},
    },
    AppState,
};

pub async fn profile_route(
    State(app_state): State<Arc<AppState>>,
    AuthUser(auth_user): AuthUser,
    Path(username): Path<String>,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Json<ProfilePage>, AppError> {
    let Some(author) = app_state.store.account_by_username(&username).await? else {
        warn!("Unknown user @{username}");
        return Err(AppError::not_found_error("Utilisateur introuvable."));
    };

    let following = match auth_user {
        Some(auth_user) => app_state.store.is_following(auth_user.id, author.id).await?,
        None => false,
    };

    let window = PageWindow::new(app_state.config.page_size, pagination_params.page_number());
    let page_obj = app_state
        .store
        .page_posts(PostFilter::Author(author.id), window)
        .await?;

    Ok(Json(ProfilePage {
        author: author.into(),
        following,
        page_obj,
    }))
}
