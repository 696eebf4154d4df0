use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    appresult::{AppError, AppResult},
    config::StoreDeadline,
    db::NewChat,
    AppState,
};

use super::{writer, AppJson, Created, Validate};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateChatRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    user_ids: Vec<i64>,
}

impl Validate for CreateChatRequest {
    fn validate(&self) -> AppResult<()> {
        if self.user_ids.is_empty() {
            return Err(AppError::invalid_input("user_ids must contain at least one ID"));
        }

        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Chat name must not be empty"));
        }

        Ok(())
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn create_chat(
    State(db_pool): State<SqlitePool>,
    State(deadline): State<StoreDeadline>,
    AppJson(req): AppJson<CreateChatRequest>,
) -> AppResult<(StatusCode, Json<Created>)> {
    tracing::info!(?req, "create chat");

    if let Err(err) = req.validate() {
        tracing::warn!(error = %err, "create chat rejected");
        return Err(err);
    }

    let chat = NewChat {
        name: req.name,
        description: req.description,
        user_ids: req.user_ids,
    };

    let id = deadline
        .run(writer::create_chat(&db_pool, &chat))
        .await
        .inspect_err(|err| tracing::error!(error = %err, "create chat failed"))?;

    tracing::info!(chat_id = id, members = chat.user_ids.len(), "chat created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}
