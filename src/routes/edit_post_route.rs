use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::{info, warn};

use crate::{
    extractors::auth_extractor::LoggedUser,
    models::post::{PostChanges, PublicPost},
    structs::post::{PostForm, PostInput},
    utils::{app_error::AppError, image::save_post_image, post::check_post_input},
    AppState,
};

use super::post_detail_url;

async fn existing_post(app_state: &AppState, post_id: i64) -> Result<PublicPost, AppError> {
    app_state.store.post_by_id(post_id).await?.ok_or_else(|| {
        warn!("Unknown post {post_id}");
        AppError::not_found_error("Post introuvable.")
    })
}

pub async fn edit_post_form_route(
    State(app_state): State<Arc<AppState>>,
    LoggedUser(auth_user): LoggedUser,
    Path(post_id): Path<i64>,
) -> Result<Response, AppError> {
    let post = existing_post(&app_state, post_id).await?;

    if post.author.id != auth_user.id {
        return Ok(Redirect::to(&post_detail_url(post_id)).into_response());
    }

    Ok(Json(PostForm {
        is_edit: true,
        post: Some(post),
        groups: app_state.store.list_groups().await?,
    })
    .into_response())
}

/// Only the author can edit. Anyone else is sent back to the post, untouched,
/// whatever the body holds.
pub async fn edit_post_route(
    State(app_state): State<Arc<AppState>>,
    LoggedUser(auth_user): LoggedUser,
    Path(post_id): Path<i64>,
    payload: Result<Json<PostInput>, JsonRejection>,
) -> Result<Response, AppError> {
    let post = existing_post(&app_state, post_id).await?;

    if post.author.id != auth_user.id {
        warn!(
            "User @{} tried to edit post {post_id} of @{}",
            auth_user.username, post.author.username
        );
        return Ok(Redirect::to(&post_detail_url(post_id)).into_response());
    }

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!("Unreadable edit of post {post_id} : {rejection}");
            return Ok(rejection.into_response());
        }
    };

    let checked = check_post_input(&app_state.store, auth_user.id, &input).await?;

    let image = match &checked.image {
        Some(image) => Some(save_post_image(&app_state.config.media_root, image).await?),
        None => None,
    };

    app_state
        .store
        .update_post(
            post_id,
            PostChanges {
                text: checked.text,
                group_id: checked.group_id,
                image,
            },
        )
        .await?;

    info!("User @{} edited post {post_id}", auth_user.username);

    Ok(Redirect::to(&post_detail_url(post_id)).into_response())
}
