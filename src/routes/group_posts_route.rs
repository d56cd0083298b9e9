use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::warn;

use crate::{
    models::post::PostFilter,
    structs::pages::GroupPage,
    utils::{
        app_error::AppError,
        pagination::{PageWindow, PaginationParams},
    },
    AppState,
};

pub async fn group_posts_route(
    State(app_state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Json<GroupPage>, AppError> {
    let Some(group) = app_state.store.group_by_slug(&slug).await? else {
        warn!("Unknown group `{slug}`");
        return Err(AppError::not_found_error("Groupe introuvable."));
    };

    let window = PageWindow::new(app_state.config.page_size, pagination_params.page_number());
    let page_obj = app_state
        .store
        .page_posts(PostFilter::Group(group.id), window)
        .await?;

    Ok(Json(GroupPage { group, page_obj }))
}
