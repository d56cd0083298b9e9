use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    extractors::auth_extractor::LoggedUser,
    structs::pages::FollowPage,
    utils::{
        app_error::AppError,
        feed::followed_feed,
        pagination::{paginate, PaginationParams},
    },
    AppState,
};

pub async fn follow_index_route(
    State(app_state): State<Arc<AppState>>,
    LoggedUser(auth_user): LoggedUser,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Json<FollowPage>, AppError> {
    let posts = followed_feed(&app_state.store, auth_user.id).await?;

    Ok(Json(FollowPage {
        page_obj: paginate(
            posts,
            app_state.config.page_size,
            pagination_params.page.as_deref(),
        ),
    }))
}
