use time::OffsetDateTime;
use tracing::warn;

use super::Store;
use crate::{
    models::comment::{CommentRow, NewComment, PublicComment},
    utils::app_error::AppError,
};

impl Store {
    pub async fn create_comment(&self, comment: NewComment) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO comment (post_id, author_id, text, created) VALUES (?, ?, ?, ?) \
             RETURNING id",
        )
        .bind(comment.post_id)
        .bind(comment.author_id)
        .bind(&comment.text)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(
                "Error inserting comment of user {} on post {} : {e}",
                comment.author_id, comment.post_id
            );
            AppError::internal_server_error()
        })
    }

    pub async fn comments_for_post(&self, post_id: i64) -> Result<Vec<PublicComment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT c.id, c.post_id, c.text, c.created, c.author_id, a.username AS author_username \
             FROM comment c JOIN account a ON a.id = c.author_id \
             WHERE c.post_id = ? ORDER BY julianday(c.created) DESC, c.id DESC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error getting comments of post {post_id} : {e}");
            AppError::internal_server_error()
        })?;

        Ok(rows.into_iter().map(PublicComment::from).collect())
    }
}
