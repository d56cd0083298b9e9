use tracing::warn;

use super::{
    app_error::{AppError, FormErrors},
    image::{decode_image, DecodedImage},
};
use crate::{
    store::Store,
    structs::{comment::CommentInput, post::PostInput},
};

pub const REQUIRED_FIELD_MESSAGE: &str = "Ce champ est obligatoire.";
pub const INVALID_GROUP_MESSAGE: &str = "Sélectionnez un groupe valide.";

/// A post form that passed validation.
#[derive(Debug)]
pub struct CheckedPost {
    pub text: String,
    pub group_id: Option<i64>,
    pub image: Option<DecodedImage>,
}

pub async fn check_post_input(
    store: &Store,
    auth_user_id: i64,
    input: &PostInput,
) -> Result<CheckedPost, AppError> {
    let mut errors = FormErrors::default();

    let text = input.text.trim();
    if text.is_empty() {
        warn!("User {auth_user_id} tried to save a post without text");
        errors.add("text", REQUIRED_FIELD_MESSAGE);
    }

    if let Some(group_id) = input.group {
        if store.group_by_id(group_id).await?.is_none() {
            warn!("User {auth_user_id} tried to save a post in unknown group {group_id}");
            errors.add("group", INVALID_GROUP_MESSAGE);
        }
    }

    let image = match input.image.as_ref().map(decode_image).transpose() {
        Ok(image) => image,
        Err(message) => {
            warn!("User {auth_user_id} sent an invalid image : {message}");
            errors.add("image", message);
            None
        }
    };

    errors.into_result()?;

    Ok(CheckedPost {
        text: text.to_string(),
        group_id: input.group,
        image,
    })
}

pub fn check_comment_input(auth_user_id: i64, input: &CommentInput) -> Result<String, AppError> {
    let text = input.text.trim();
    if text.is_empty() {
        warn!("User {auth_user_id} tried to post an empty comment");
        return Err(AppError::field_error("text", REQUIRED_FIELD_MESSAGE));
    }

    Ok(text.to_string())
}
