use tracing::warn;

use super::Store;
use crate::utils::app_error::AppError;

impl Store {
    /// Adds the `user -> author` edge if absent. Returns whether an edge was created.
    pub async fn follow(&self, user_id: i64, author_id: i64) -> Result<bool, AppError> {
        if user_id == author_id {
            return Ok(false);
        }

        let result =
            sqlx::query("INSERT OR IGNORE INTO follow (user_id, author_id) VALUES (?, ?)")
                .bind(user_id)
                .bind(author_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    warn!("Error creating follow {user_id} -> {author_id} : {e}");
                    AppError::internal_server_error()
                })?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns whether an edge existed.
    pub async fn unfollow(&self, user_id: i64, author_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM follow WHERE user_id = ? AND author_id = ?")
            .bind(user_id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!("Error deleting follow {user_id} -> {author_id} : {e}");
                AppError::internal_server_error()
            })?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn is_following(&self, user_id: i64, author_id: i64) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM follow WHERE user_id = ? AND author_id = ?)",
        )
        .bind(user_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error checking follow {user_id} -> {author_id} : {e}");
            AppError::internal_server_error()
        })
    }

    pub async fn followed_author_ids(&self, user_id: i64) -> Result<Vec<i64>, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT author_id FROM follow WHERE user_id = ? ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!("Error getting authors followed by {user_id} : {e}");
                AppError::internal_server_error()
            })
    }
}
