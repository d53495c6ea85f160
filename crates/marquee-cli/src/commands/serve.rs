//! HTTP front end over one shared index.
//!
//! Every request reads the current snapshot of an [`IndexHandle`];
//! `POST /reload` re-reads the dataset and swaps in a new index without
//! interrupting queries in flight.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use marquee_search::{IndexHandle, QueryOptions, Recommendations};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::commands::{build_index, load_movies};
use crate::config::Config;
use crate::render;

/// Shared server state.
#[derive(Debug, Clone)]
pub struct ServeState {
    pub handle: Arc<IndexHandle>,
    pub config: Arc<Config>,
}

/// Query string of `GET /recommend`.
#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    title: String,
    limit: Option<usize>,
    #[serde(default)]
    exclude_query: bool,
}

/// Errors returned to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] marquee_search::Error),

    #[error("reload failed: {0:#}")]
    Reload(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Query(e) => {
                let status = match e {
                    marquee_search::Error::NoMatchFound { .. }
                    | marquee_search::Error::IndexNotFound { .. } => StatusCode::NOT_FOUND,
                    marquee_search::Error::IndexOutOfRange { .. } => StatusCode::CONFLICT,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, render::error_json(e))
            }
            ApiError::Reload(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "reload", "message": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Build the index, then answer HTTP requests until interrupted.
pub async fn run_serve(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.port))?;

    let state = ServeState {
        handle: Arc::new(IndexHandle::new(build_index(&config).await?)),
        config: Arc::new(config),
    };

    let app = create_router(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("Serving suggestions on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("Server error")?;

    log::info!("Server shut down");
    Ok(())
}

/// Routes of the HTTP front end.
pub fn create_router(state: ServeState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/recommend", get(recommend))
        .route("/reload", post(reload))
        .with_state(state)
}

async fn health_check(State(state): State<ServeState>) -> Json<Value> {
    let snapshot = state.handle.snapshot();
    Json(json!({
        "status": "healthy",
        "movies": snapshot.dataset().len(),
        "fingerprint": format!("{:016x}", snapshot.fingerprint()),
    }))
}

async fn recommend(
    State(state): State<ServeState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<Recommendations>, ApiError> {
    let mut options: QueryOptions = state
        .config
        .query_options()
        .with_include_query(!params.exclude_query);
    if let Some(limit) = params.limit {
        options = options.with_limit(limit);
    }

    Ok(Json(state.handle.recommend(&params.title, &options)?))
}

async fn reload(State(state): State<ServeState>) -> Result<Json<Value>, ApiError> {
    let handle = Arc::clone(&state.handle);
    let config = Arc::clone(&state.config);

    let reloaded = tokio::task::spawn_blocking(move || -> Result<bool> {
        let dataset = load_movies(&config.data_path, &config.features)?;
        Ok(handle.refresh(dataset)?)
    })
    .await
    .context("Reload task failed")
    .and_then(|result| result)
    .map_err(ApiError::Reload)?;

    Ok(Json(json!({
        "reloaded": reloaded,
        "movies": state.handle.snapshot().dataset().len(),
    })))
}
