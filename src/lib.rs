pub mod appresult;
pub mod chats;
pub mod config;
pub mod db;
pub mod res;
pub mod tracing_init;

use axum::{extract::FromRef, routing::get, Json, Router};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult, StoreError};
pub use config::{Config, StoreDeadline};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub deadline: StoreDeadline,
}

pub fn app(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/chats", chats::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
