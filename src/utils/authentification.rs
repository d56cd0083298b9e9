use std::sync::Arc;

use tracing::warn;

use super::app_error::AppError;
use crate::{
    extractors::auth_extractor::{AuthUser, InnerAuthUser},
    store::Store,
};

pub async fn authentificate(store: &Store, token: &str) -> Result<AuthUser, AppError> {
    let token = match urlencoding::decode(token) {
        Ok(token) => token,
        Err(e) => {
            warn!("{e}");
            return Ok(AuthUser(None));
        }
    }
    .to_string();

    if let Some(account) = store.account_by_token(&token).await? {
        Ok(AuthUser(Some(Arc::new(InnerAuthUser {
            id: account.id,
            username: account.username,
        }))))
    } else {
        Ok(AuthUser(None))
    }
}
