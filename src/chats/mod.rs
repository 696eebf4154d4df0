mod delete;
mod msg;
mod new;
mod writer;

use axum::{
    extract::{FromRequest, FromRequestParts},
    routing::{delete, post},
    Router,
};
use serde::Serialize;

use crate::{appresult::{AppError, AppResult}, AppState};

pub use msg::add_message;
pub use writer::{create_chat, delete_chat};

/// Shape checks run on a decoded request before any store call.
pub(crate) trait Validate {
    fn validate(&self) -> AppResult<()>;
}

/// `Json` whose rejections answer as [`AppError::InvalidInput`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub(crate) struct AppJson<T>(pub(crate) T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub(crate) struct AppPath<T>(pub(crate) T);

#[derive(Debug, Serialize)]
pub(crate) struct Created {
    id: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(new::create_chat))
        .route("/{id}", delete(delete::delete_chat))
        .route("/{id}/messages", post(msg::send_message))
}
