use axum::{debug_handler, extract::State, http::StatusCode};
use sqlx::SqlitePool;

use crate::{
    appresult::{AppError, AppResult},
    config::StoreDeadline,
    AppState,
};

use super::{writer, AppPath, Validate};

#[derive(Debug)]
pub(crate) struct DeleteChatRequest {
    id: i64,
}

impl Validate for DeleteChatRequest {
    fn validate(&self) -> AppResult<()> {
        if self.id == 0 {
            return Err(AppError::invalid_input("ID required"));
        }

        Ok(())
    }
}

#[debug_handler(state = AppState)]
pub(crate) async fn delete_chat(
    State(db_pool): State<SqlitePool>,
    State(deadline): State<StoreDeadline>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    let req = DeleteChatRequest { id };
    tracing::info!(?req, "delete chat");

    if let Err(err) = req.validate() {
        tracing::warn!(error = %err, "delete chat rejected");
        return Err(err);
    }

    deadline
        .run(writer::delete_chat(&db_pool, req.id))
        .await
        .inspect_err(|err| tracing::error!(chat_id = req.id, error = %err, "delete chat failed"))?;

    tracing::info!(chat_id = req.id, "chat deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_id_is_rejected() {
        let err = DeleteChatRequest { id: 0 }.validate().unwrap_err();
        assert_eq!(err.to_string(), "ID required");
    }

    #[test]
    fn any_other_id_is_accepted() {
        assert!(DeleteChatRequest { id: 1 }.validate().is_ok());
        assert!(DeleteChatRequest { id: -3 }.validate().is_ok());
    }
}
