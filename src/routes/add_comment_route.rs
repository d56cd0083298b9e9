use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use tracing::{info, warn};

use crate::{
    extractors::auth_extractor::LoggedUser,
    models::comment::NewComment,
    structs::comment::CommentInput,
    utils::{app_error::AppError, post::check_comment_input},
    AppState,
};

use super::post_detail_url;

pub async fn add_comment_route(
    State(app_state): State<Arc<AppState>>,
    LoggedUser(auth_user): LoggedUser,
    Path(post_id): Path<i64>,
    Json(comment): Json<CommentInput>,
) -> Result<Redirect, AppError> {
    if app_state.store.post_by_id(post_id).await?.is_none() {
        warn!("User @{} tried to comment unknown post {post_id}", auth_user.username);
        return Err(AppError::not_found_error("Post introuvable."));
    }

    let text = check_comment_input(auth_user.id, &comment)?;

    let comment_id = app_state
        .store
        .create_comment(NewComment {
            post_id,
            author_id: auth_user.id,
            text,
        })
        .await?;

    info!(
        "User @{} commented post {post_id} (comment {comment_id})",
        auth_user.username
    );

    Ok(Redirect::to(&post_detail_url(post_id)))
}
