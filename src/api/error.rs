use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::error::StoreError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Everything a handler can fail with.
///
/// The documented failures (duplicate account, bad credentials, double like)
/// are answered with 200 and an `error_message` body. Missing entities and
/// unreadable bodies get a 4xx status with the same body shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Incorrect credentials")]
    IncorrectCredentials,

    #[error("You can only react once!")]
    AlreadyLiked,

    #[error("Thread not found")]
    ThreadNotFound(String),

    #[error("User not found")]
    UserNotFound(String),

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Form(#[from] FormRejection),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error_message: String,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserAlreadyExists => ApiError::UserAlreadyExists,
            StoreError::AlreadyLiked(_) => ApiError::AlreadyLiked,
            StoreError::ThreadNotFound(id) => ApiError::ThreadNotFound(id),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserAlreadyExists
            | ApiError::IncorrectCredentials
            | ApiError::AlreadyLiked => StatusCode::OK,
            ApiError::ThreadNotFound(_) | ApiError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Json(rejection) => rejection.status(),
            ApiError::Form(rejection) => rejection.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Json(rejection) => rejection.body_text(),
            ApiError::Form(rejection) => rejection.body_text(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::ThreadNotFound(id) => tracing::warn!("Thread {} not found", id),
            ApiError::UserNotFound(id) => tracing::warn!("User {} not found", id),
            ApiError::Json(_) | ApiError::Form(_) => {
                tracing::warn!("Rejected request body: {}", self.message())
            }
            other => tracing::debug!("{}", other),
        }

        let body = ErrorResponse {
            error_message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
