use sqlx::{QueryBuilder, Sqlite};
use tracing::warn;

use super::Store;
use crate::{
    models::post::{NewPost, PostChanges, PostFilter, PostRow, PublicPost},
    utils::{
        app_error::AppError,
        pagination::{Page, PageWindow},
    },
};

const POST_SELECT: &str = "SELECT p.id, p.text, p.pub_date, p.image, \
    p.author_id, a.username AS author_username, \
    p.group_id, g.title AS group_title, g.slug AS group_slug \
    FROM post p \
    JOIN account a ON a.id = p.author_id \
    LEFT JOIN community_group g ON g.id = p.group_id";

const POST_ORDER: &str = " ORDER BY julianday(p.pub_date) DESC, p.id DESC";

fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: PostFilter) {
    match filter {
        PostFilter::All => {}
        PostFilter::Group(group_id) => {
            builder.push(" WHERE p.group_id = ").push_bind(group_id);
        }
        PostFilter::Author(author_id) => {
            builder.push(" WHERE p.author_id = ").push_bind(author_id);
        }
    }
}

impl Store {
    pub async fn create_post(&self, post: NewPost) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO post (text, pub_date, author_id, group_id, image) \
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&post.text)
        .bind(post.pub_date)
        .bind(post.author_id)
        .bind(post.group_id)
        .bind(&post.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error inserting post with author {} : {e}", post.author_id);
            AppError::internal_server_error()
        })
    }

    pub async fn post_by_id(&self, id: i64) -> Result<Option<PublicPost>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{POST_SELECT} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!("Error getting post {id} from database : {e}");
                AppError::internal_server_error()
            })?;

        Ok(row.map(PublicPost::from))
    }

    /// Never touches `pub_date` nor `author_id`.
    pub async fn update_post(&self, id: i64, changes: PostChanges) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE post SET text = ?, group_id = ?, image = COALESCE(?, image) WHERE id = ?",
        )
        .bind(&changes.text)
        .bind(changes.group_id)
        .bind(&changes.image)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error updating post {id} : {e}");
            AppError::internal_server_error()
        })?;

        Ok(())
    }

    pub async fn count_posts(&self, filter: PostFilter) -> Result<usize, AppError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM post p");
        push_filter(&mut builder, filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                warn!("Error counting posts ({filter:?}) : {e}");
                AppError::internal_server_error()
            })?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    pub async fn list_posts(
        &self,
        filter: PostFilter,
        window: PageWindow,
    ) -> Result<Vec<PublicPost>, AppError> {
        let mut builder = QueryBuilder::<Sqlite>::new(POST_SELECT);
        push_filter(&mut builder, filter);
        builder
            .push(POST_ORDER)
            .push(" LIMIT ")
            .push_bind(i64::try_from(window.limit).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(window.offset).unwrap_or(i64::MAX));

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!("Error listing posts ({filter:?}, page {}) : {e}", window.number);
                AppError::internal_server_error()
            })?;

        Ok(rows.into_iter().map(PublicPost::from).collect())
    }

    /// Every post of `author_id`, newest first.
    pub async fn posts_by_author(&self, author_id: i64) -> Result<Vec<PublicPost>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{POST_SELECT} WHERE p.author_id = ?{POST_ORDER}"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!("Error getting posts of author {author_id} : {e}");
            AppError::internal_server_error()
        })?;

        Ok(rows.into_iter().map(PublicPost::from).collect())
    }

    /// One page of the listing selected by `filter`.
    pub async fn page_posts(
        &self,
        filter: PostFilter,
        window: PageWindow,
    ) -> Result<Page<PublicPost>, AppError> {
        let count = self.count_posts(filter).await?;
        let posts = self.list_posts(filter, window).await?;

        Ok(Page::from_window(posts, count, window))
    }
}
