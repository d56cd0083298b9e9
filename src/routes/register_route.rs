use std::sync::Arc;

use axum::{extract::State, response::Redirect, Json};
use axum_extra::extract::CookieJar;
use tracing::info;

use crate::{
    models::account::NewAccount,
    structs::register_user::RegisterUser,
    utils::{
        app_error::AppError,
        register::{check_register_infos, generate_session_token, hash_password},
    },
    AppState,
};

use super::session_cookie;

/// Creates the account and logs it in straight away.
pub async fn register_route(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(mut register_user): Json<RegisterUser>,
) -> Result<(CookieJar, Redirect), AppError> {
    register_user.username = register_user.username.trim().to_string();
    register_user.email = register_user.email.trim().to_lowercase();
    check_register_infos(&app_state.store, &register_user).await?;

    let account = app_state
        .store
        .create_account(NewAccount {
            username: register_user.username,
            email: register_user.email,
            first_name: register_user.first_name.trim().to_string(),
            last_name: register_user.last_name.trim().to_string(),
            password: hash_password(&register_user.password),
            token: generate_session_token(),
        })
        .await?;

    info!("Account @{} created", account.username);

    Ok((jar.add(session_cookie(account.token)), Redirect::to("/")))
}
