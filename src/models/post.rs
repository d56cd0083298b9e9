use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;

/// Number of characters shown when a post is printed.
const PREVIEW_LEN: usize = 15;

/// Which posts a listing is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(i64),
    Author(i64),
}

/// A post joined with its author and group, as read from the database.
#[derive(sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub text: String,
    pub pub_date: OffsetDateTime,
    pub image: Option<String>,
    pub author_id: i64,
    pub author_username: String,
    pub group_id: Option<i64>,
    pub group_title: Option<String>,
    pub group_slug: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PostAuthor {
    pub id: i64,
    pub username: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PostGroup {
    pub id: i64,
    pub title: String,
    pub slug: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicPost {
    pub id: i64,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub pub_date: OffsetDateTime,
    pub author: PostAuthor,
    pub group: Option<PostGroup>,
    pub image: Option<String>,
}

impl From<PostRow> for PublicPost {
    fn from(row: PostRow) -> Self {
        let group = match (row.group_id, row.group_title, row.group_slug) {
            (Some(id), Some(title), Some(slug)) => Some(PostGroup { id, title, slug }),
            _ => None,
        };

        Self {
            id: row.id,
            text: row.text,
            pub_date: row.pub_date,
            author: PostAuthor {
                id: row.author_id,
                username: row.author_username,
            },
            group,
            image: row.image,
        }
    }
}

impl fmt::Display for PublicPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&preview(&self.text))
    }
}

pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_LEN).collect()
}

pub struct NewPost {
    pub author_id: i64,
    pub text: String,
    pub group_id: Option<i64>,
    pub image: Option<String>,
    pub pub_date: OffsetDateTime,
}

impl NewPost {
    /// A post published now.
    pub fn new(author_id: i64, text: impl Into<String>) -> Self {
        Self {
            author_id,
            text: text.into(),
            group_id: None,
            image: None,
            pub_date: OffsetDateTime::now_utc(),
        }
    }

    pub fn in_group(mut self, group_id: Option<i64>) -> Self {
        self.group_id = group_id;
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

/// Fields an author may change. `pub_date` and `author` are not part of it.
pub struct PostChanges {
    pub text: String,
    pub group_id: Option<i64>,
    /// `None` keeps the current image.
    pub image: Option<String>,
}
