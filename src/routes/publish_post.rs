use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::info;

use crate::{
    extractors::auth_extractor::LoggedUser,
    models::post::{preview, NewPost},
    structs::post::{PostForm, PostInput},
    utils::{app_error::AppError, image::save_post_image, post::check_post_input},
    AppState,
};

use super::profile_url;

pub async fn publish_post_form_route(
    State(app_state): State<Arc<AppState>>,
    LoggedUser(_auth_user): LoggedUser,
) -> Result<Json<PostForm>, AppError> {
    Ok(Json(PostForm {
        is_edit: false,
        post: None,
        groups: app_state.store.list_groups().await?,
    }))
}

/// The author is always the logged user, whatever the body says.
pub async fn publish_post_route(
    State(app_state): State<Arc<AppState>>,
    LoggedUser(auth_user): LoggedUser,
    Json(post): Json<PostInput>,
) -> Result<Response, AppError> {
    let post = check_post_input(&app_state.store, auth_user.id, &post).await?;

    let image = match &post.image {
        Some(image) => Some(save_post_image(&app_state.config.media_root, image).await?),
        None => None,
    };

    let post_id = app_state
        .store
        .create_post(
            NewPost::new(auth_user.id, post.text.as_str())
                .in_group(post.group_id)
                .with_image(image),
        )
        .await?;

    info!(
        "User @{} published post {post_id} `{}`",
        auth_user.username,
        preview(&post.text)
    );

    Ok(Redirect::to(&profile_url(&auth_user.username)).into_response())
}
