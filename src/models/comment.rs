use serde::Serialize;
use time::OffsetDateTime;

use super::post::PostAuthor;

#[derive(sqlx::FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
    pub created: OffsetDateTime,
    pub author_id: i64,
    pub author_username: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicComment {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    pub author: PostAuthor,
}

impl From<CommentRow> for PublicComment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            text: row.text,
            created: row.created,
            author: PostAuthor {
                id: row.author_id,
                username: row.author_username,
            },
        }
    }
}

pub struct NewComment {
    pub post_id: i64,
    pub author_id: i64,
    pub text: String,
}
