use time::OffsetDateTime;
use tracing::warn;

use super::Store;
use crate::{
    models::account::{Account, NewAccount},
    utils::app_error::AppError,
};

const ACCOUNT_COLUMNS: &str =
    "id, username, email, first_name, last_name, password, token, created_at";

impl Store {
    pub async fn create_account(&self, account: NewAccount) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            "INSERT INTO account (username, email, first_name, last_name, password, token, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.password)
        .bind(&account.token)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error creating account @{} : {e}", account.username);
            AppError::internal_server_error()
        })
    }

    pub async fn account_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error getting account @{username} from database : {e}");
            AppError::internal_server_error()
        })
    }

    pub async fn account_by_token(&self, token: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE token = ?"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error getting auth user from database : {e}");
            AppError::internal_server_error()
        })
    }

    /// `password_hash` is compared as stored, see `utils::register::hash_password`.
    pub async fn account_by_credentials(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = ? AND password = ?"
        ))
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error getting user @{username} from database : {e}");
            AppError::internal_server_error()
        })
    }

    pub async fn username_taken(&self, username: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM account WHERE username = ?)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!("Error while checking if username already exists : {e}");
                AppError::internal_server_error()
            })
    }

    /// Replaces the session token, invalidating every cookie carrying the old one.
    pub async fn rotate_token(&self, id: i64, token: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE account SET token = ? WHERE id = ?")
            .bind(token)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!("Error rotating session token of account {id} : {e}");
                AppError::internal_server_error()
            })?;

        Ok(())
    }

    /// Removes the account together with its posts, comments and follow edges.
    pub async fn delete_account(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM account WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!("Error deleting account {id} : {e}");
                AppError::internal_server_error()
            })?;

        Ok(result.rows_affected() > 0)
    }
}
