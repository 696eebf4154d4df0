use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqliteConnection, SqlitePool, Transaction,
};
use time::OffsetDateTime;

use crate::{include_res, appresult::StoreError};

pub struct NewChat {
    pub name: String,
    pub description: Option<String>,
    // duplicates are kept, one membership row each
    pub user_ids: Vec<i64>,
}

pub struct NewMessage {
    pub chat_id: i64,
    pub from_user_id: i64,
    pub text: String,
    pub created_at: OffsetDateTime,
}

pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database url {database_url}"))?
        .foreign_keys(true)
        .create_if_missing(true);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("unable to connect to {database_url}"))?;

    migrate(&db_pool).await?;
    Ok(db_pool)
}

pub async fn migrate(db_pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::raw_sql(include_res!(str, "/schema.sql"))
        .execute(db_pool)
        .await
        .context("unable to apply schema")?;

    tracing::debug!("schema applied");
    Ok(())
}

/// A transaction that is committed only through [`UnitOfWork::finish`].
///
/// Any other way out, an early return, a dropped future or an elapsed
/// deadline, drops the inner transaction and sqlx rolls it back.
pub(crate) struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub(crate) async fn begin(db_pool: &SqlitePool) -> Result<Self, StoreError> {
        let tx = db_pool.begin().await.map_err(StoreError::Begin)?;
        Ok(Self { tx })
    }

    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commits on `Ok`, rolls back before returning on `Err`.
    pub(crate) async fn finish<T>(self, result: Result<T, StoreError>) -> Result<T, StoreError> {
        match result {
            Ok(value) => {
                self.tx.commit().await.map_err(StoreError::Commit)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // one connection, every in-memory connection is its own database
    connect("sqlite::memory:", 1).await.expect("in-memory pool")
}
