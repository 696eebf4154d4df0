use std::time::Duration;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

/// Failure talking to the store. None of these are the caller's fault and none
/// are retried inside the call that hit them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unable to start transaction: {0}")]
    Begin(#[source] sqlx::Error),

    #[error("unable to {action}: {source}")]
    Statement {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("unable to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),

    #[error("store call did not finish within {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    pub(crate) fn statement(action: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Statement { action, source }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_argument",
            Self::Store(_) => "internal",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({
                "error": {
                    "code": self.code(),
                    "message": self.to_string(),
                }
            })),
        )
            .into_response()
    }
}
