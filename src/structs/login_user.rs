use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct LoginUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct NextParams {
    pub next: Option<String>,
}

#[derive(Serialize)]
pub struct LoginForm {
    pub next: Option<String>,
}
