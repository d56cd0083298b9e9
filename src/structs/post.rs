use serde::{Deserialize, Serialize};

use crate::models::{group::Group, post::PublicPost};

/// Body of `POST /create/` and `POST /posts/{id}/edit/`.
#[derive(Deserialize, Debug, Default)]
pub struct PostInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<i64>,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

/// An image sent inline, `content` being base64 encoded.
#[derive(Deserialize, Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct PostForm {
    pub is_edit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PublicPost>,
    pub groups: Vec<Group>,
}
