use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::warn;

use crate::{structs::pages::PostDetailPage, utils::app_error::AppError, AppState};

pub async fn post_detail_route(
    State(app_state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostDetailPage>, AppError> {
    let Some(current_post) = app_state.store.post_by_id(post_id).await? else {
        warn!("Unknown post {post_id}");
        return Err(AppError::not_found_error("Post introuvable."));
    };

    let comments = app_state.store.comments_for_post(post_id).await?;

    Ok(Json(PostDetailPage {
        current_post,
        comments,
    }))
}
