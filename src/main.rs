use std::path::PathBuf;

use anyhow::Context;
use chat_server::{app, db, tracing_init::init_tracing, AppState, Config};
use clap::Parser;

#[derive(Parser)]
#[command(about = "Chat API: create and delete chats, send messages")]
struct Args {
    /// dotenv file with DATABASE_URL, CHAT_HOST, CHAT_PORT [default: .env, if present]
    #[arg(long)]
    config_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = Config::load(args.config_path.as_deref()).context("unable to init config")?;

    let db_pool = db::connect(&config.database_url, config.max_connections).await?;

    let app_state = AppState {
        db_pool,
        deadline: config.store_deadline,
    };

    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to listen on {address}"))?;
    tracing::info!(address = %listener.local_addr()?, "server listening");

    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
