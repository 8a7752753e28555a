use crate::error::RustyEtlError;
use crate::jokes::api::JokeApiError;
use crate::jokes::api::JokeSource;
use crate::jokes::model::StoredJoke;
use crate::jokes::store::JokeStore;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tracing::error;
use tracing::info;

pub const DEFAULT_LIMIT: u64 = 10;

/// Errors a handler can end with; all of them answer `500`.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    UpstreamError(#[from] JokeApiError),

    #[error("{0}")]
    StoreError(#[from] RustyEtlError),

    #[error("Store task failed: {0}")]
    TaskError(#[from] JoinError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let detail = match &self {
            ServiceError::UpstreamError(_) => "Failed to fetch jokes",
            ServiceError::StoreError(_) | ServiceError::TaskError(_) => "Database error",
        };
        error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": detail }))).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: JokeStore,
    pub source: Arc<dyn JokeSource>,
}

/// `skip`/`limit` query parameters of `GET /jokes/`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Both routes answer with and without the trailing slash.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/fetch_jokes/", post(fetch_jokes))
        .route("/fetch_jokes", post(fetch_jokes))
        .route("/jokes/", get(list_jokes))
        .route("/jokes", get(list_jokes))
        .with_state(state)
}

/// Serves the router until the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(address) = listener.local_addr() {
        info!(%address, "joke service listening");
    }
    axum::serve(listener, router(state)).await
}

async fn fetch_jokes(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ServiceError> {
    let jokes = state.source.fetch().await?;
    let store = state.store.clone();
    let stored = tokio::task::spawn_blocking(move || store.insert_all(&jokes)).await??;
    info!(stored, "fetched and stored jokes");
    Ok(Json(json!({ "message": "Jokes fetched and stored successfully" })))
}

async fn list_jokes(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<StoredJoke>>, ServiceError> {
    let store = state.store.clone();
    let jokes = tokio::task::spawn_blocking(move || store.page(pagination.skip, pagination.limit)).await??;
    Ok(Json(jokes))
}
