use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use rusty_etl::config::ServiceArgs;
use rusty_etl::jokes;
use rusty_etl::jokes::AppState;
use rusty_etl::jokes::JokeApiClient;
use rusty_etl::jokes::JokeStore;
use rusty_etl::logging::init_logging;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let args = ServiceArgs::parse();
    let store = JokeStore::open(&args.store())
        .with_context(|| format!("failed to open joke store {}", args.database.display()))?;
    let source = JokeApiClient::new(&args.api_url, args.amount, &args.joke_type);
    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    jokes::serve(listener, AppState {
        store,
        source: Arc::new(source),
    })
    .await
    .context("joke service stopped")
}
