use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use hyper::header;
use tracing::warn;

use crate::{
    models::post::PostFilter,
    structs::pages::IndexPage,
    utils::{
        app_error::AppError,
        pagination::{PageWindow, PaginationParams},
        timeline_cache::{get_or_render, index_page_key},
    },
    AppState,
};

/// Home listing. Served from the timeline cache, the same for every visitor.
pub async fn index_route(
    State(app_state): State<Arc<AppState>>,
    Query(pagination_params): Query<PaginationParams>,
) -> Result<Response, AppError> {
    let page_number = pagination_params.page_number();

    let body = get_or_render(
        app_state.timeline_cache.as_ref(),
        &index_page_key(page_number),
        app_state.config.home_cache_ttl,
        || render_index_page(&app_state, page_number),
    )
    .await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

async fn render_index_page(app_state: &AppState, page_number: usize) -> Result<Bytes, AppError> {
    let window = PageWindow::new(app_state.config.page_size, page_number);
    let page_obj = app_state.store.page_posts(PostFilter::All, window).await?;

    serde_json::to_vec(&IndexPage { page_obj })
        .map(Bytes::from)
        .map_err(|e| {
            warn!("Error serializing index page {page_number} : {e}");
            AppError::internal_server_error()
        })
}
