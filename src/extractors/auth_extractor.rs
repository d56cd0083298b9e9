use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;

use crate::{
    utils::{app_error::AppError, authentification::authentificate},
    AppState,
};

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug)]
pub struct InnerAuthUser {
    pub id: i64,
    pub username: String,
}

/// The viewer, if the request carries a valid session cookie.
pub struct AuthUser(pub Option<Arc<InnerAuthUser>>);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = Arc::<AppState>::from_ref(state);
        let cookies = CookieJar::from_headers(&parts.headers);
        let token = match cookies.get(SESSION_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => return Ok(AuthUser(None)),
        };

        authentificate(&app_state.store, &token).await
    }
}

/// Like [`AuthUser`] but rejects anonymous requests with a redirect to the
/// login page, keeping the requested path as `next`.
pub struct LoggedUser(pub Arc<InnerAuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for LoggedUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(auth_user) = AuthUser::from_request_parts(parts, state).await?;

        match auth_user {
            Some(auth_user) => Ok(LoggedUser(auth_user)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|path| path.as_str())
                    .unwrap_or_else(|| parts.uri.path());
                Err(AppError::you_have_to_be_connected_to_perform_this_action_error(next))
            }
        }
    }
}
