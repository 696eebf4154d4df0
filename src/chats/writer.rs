use sqlx::SqlitePool;

use crate::{appresult::StoreError, db::{NewChat, UnitOfWork}};

const INSERT_CHAT: &str = "INSERT INTO chats (name, description) VALUES (?1, ?2) RETURNING id";
const INSERT_CHAT_USER: &str = "INSERT INTO chat_users (chat_id, user_id) VALUES (?1, ?2)";
const DELETE_CHAT: &str = "DELETE FROM chats WHERE id = ?1";
const DELETE_CHAT_USERS: &str = "DELETE FROM chat_users WHERE chat_id = ?1";

/// Inserts the chat row and one membership row per user id, in input order,
/// as one transaction. Returns the new chat id.
pub async fn create_chat(db_pool: &SqlitePool, chat: &NewChat) -> Result<i64, StoreError> {
    let mut work = UnitOfWork::begin(db_pool).await?;

    let result = async {
        let conn = work.conn();

        let chat_id: i64 = sqlx::query_scalar(INSERT_CHAT)
            .bind(&chat.name)
            .bind(&chat.description)
            .fetch_one(&mut *conn)
            .await
            .map_err(StoreError::statement("insert chat"))?;

        for user_id in &chat.user_ids {
            sqlx::query(INSERT_CHAT_USER)
                .bind(chat_id)
                .bind(user_id)
                .execute(&mut *conn)
                .await
                .map_err(StoreError::statement("insert chat users"))?;
        }

        Ok::<_, StoreError>(chat_id)
    }
    .await;

    work.finish(result).await
}

/// Deletes the chat row, then its membership rows, as one transaction.
/// An id with no rows is not an error.
pub async fn delete_chat(db_pool: &SqlitePool, chat_id: i64) -> Result<(), StoreError> {
    let mut work = UnitOfWork::begin(db_pool).await?;

    let result = async {
        let conn = work.conn();

        let chats = sqlx::query(DELETE_CHAT)
            .bind(chat_id)
            .execute(&mut *conn)
            .await
            .map_err(StoreError::statement("delete chat"))?;

        let chat_users = sqlx::query(DELETE_CHAT_USERS)
            .bind(chat_id)
            .execute(&mut *conn)
            .await
            .map_err(StoreError::statement("delete chat users"))?;

        tracing::debug!(
            chat_id,
            chats = chats.rows_affected(),
            chat_users = chat_users.rows_affected(),
            "chat rows deleted"
        );
        Ok::<_, StoreError>(())
    }
    .await;

    work.finish(result).await
}
