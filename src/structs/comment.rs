use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct CommentInput {
    #[serde(default)]
    pub text: String,
}
