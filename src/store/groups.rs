use tracing::warn;

use super::Store;
use crate::{
    models::group::{Group, NewGroup},
    utils::app_error::AppError,
};

impl Store {
    pub async fn create_group(&self, group: NewGroup) -> Result<Group, AppError> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO community_group (title, slug, description) VALUES (?, ?, ?) \
             RETURNING id, title, slug, description",
        )
        .bind(&group.title)
        .bind(&group.slug)
        .bind(&group.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error creating group `{}` : {e}", group.slug);
            AppError::internal_server_error()
        })
    }

    pub async fn group_by_slug(&self, slug: &str) -> Result<Option<Group>, AppError> {
        sqlx::query_as::<_, Group>(
            "SELECT id, title, slug, description FROM community_group WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error getting group `{slug}` from database : {e}");
            AppError::internal_server_error()
        })
    }

    pub async fn group_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        sqlx::query_as::<_, Group>(
            "SELECT id, title, slug, description FROM community_group WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error getting group {id} from database : {e}");
            AppError::internal_server_error()
        })
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, AppError> {
        sqlx::query_as::<_, Group>(
            "SELECT id, title, slug, description FROM community_group ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error listing groups : {e}");
            AppError::internal_server_error()
        })
    }

    /// Posts of the group stay, with their group reference cleared.
    pub async fn delete_group(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM community_group WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!("Error deleting group {id} : {e}");
                AppError::internal_server_error()
            })?;

        Ok(result.rows_affected() > 0)
    }
}
