use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{
    appresult::{AppError, AppResult, StoreError},
    config::StoreDeadline,
    db::NewMessage,
    AppState,
};

use super::{AppJson, AppPath, Created, Validate};

const INSERT_MESSAGE: &str =
    "INSERT INTO chat_messages (chat_id, user_id, message, created_at) VALUES (?1, ?2, ?3, ?4) RETURNING id";

#[derive(Debug, Deserialize)]
pub(crate) struct SendMessageRequest {
    from_user_id: i64,
    #[serde(default)]
    text: String,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
}

impl Validate for SendMessageRequest {
    fn validate(&self) -> AppResult<()> {
        if self.text.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Message text must contain at least 1 non-space character",
            ));
        }

        Ok(())
    }
}

/// Single insert, no transaction. Whether `chat_id` exists is left to the
/// foreign key.
pub async fn add_message(db_pool: &SqlitePool, message: &NewMessage) -> Result<i64, StoreError> {
    sqlx::query_scalar(INSERT_MESSAGE)
        .bind(message.chat_id)
        .bind(message.from_user_id)
        .bind(&message.text)
        .bind(message.created_at)
        .fetch_one(db_pool)
        .await
        .map_err(StoreError::statement("insert message"))
}

#[debug_handler(state = AppState)]
pub(crate) async fn send_message(
    State(db_pool): State<SqlitePool>,
    State(deadline): State<StoreDeadline>,
    AppPath(chat_id): AppPath<i64>,
    AppJson(req): AppJson<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<Created>)> {
    tracing::info!(chat_id, ?req, "send message");

    if let Err(err) = req.validate() {
        tracing::warn!(chat_id, error = %err, "send message rejected");
        return Err(err);
    }

    let message = NewMessage {
        chat_id,
        from_user_id: req.from_user_id,
        text: req.text,
        created_at: req.timestamp,
    };

    let id = deadline
        .run(add_message(&db_pool, &message))
        .await
        .inspect_err(|err| tracing::error!(chat_id, error = %err, "send message failed"))?;

    tracing::info!(chat_id, message_id = id, "message sent");
    Ok((StatusCode::CREATED, Json(Created { id })))
}
