use std::collections::BTreeMap;

use axum::{
    response::{IntoResponse, Redirect, Response},
    Json,
};
use hyper::StatusCode;
use serde::Serialize;
use serde_json::json;

pub const LOGIN_URL: &str = "/auth/login/";

/// Field-level messages of a rejected form, keyed by field name.
/// Errors that are not bound to a single field go under `__all__`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was reported, the validation error otherwise.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    NotFound(&'static str),
    Validation(FormErrors),
    Unauthenticated { next: String },
    InternalServerError,
}

impl AppError {
    pub fn internal_server_error() -> Self {
        Self::InternalServerError
    }

    pub fn not_found_error(what: &'static str) -> Self {
        Self::NotFound(what)
    }

    pub fn field_error(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = FormErrors::default();
        errors.add(field, message);
        Self::Validation(errors)
    }

    pub fn you_have_to_be_connected_to_perform_this_action_error(next: impl Into<String>) -> Self {
        Self::Unauthenticated { next: next.into() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated { .. } => StatusCode::SEE_OTHER,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn login_redirect_url(next: &str) -> String {
    format!("{LOGIN_URL}?next={}", urlencoding::encode(next))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        match self {
            AppError::NotFound(body) => (status_code, body).into_response(),
            AppError::Validation(errors) => {
                (status_code, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::Unauthenticated { next } => {
                Redirect::to(&login_redirect_url(&next)).into_response()
            }
            AppError::InternalServerError => status_code.into_response(),
        }
    }
}
