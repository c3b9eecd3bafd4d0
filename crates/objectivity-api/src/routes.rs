//! HTTP routes.

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use llm_rewriter::{GeminiClient, LlmRewriter, TextGenerator};

use crate::analysis::{AnalysisRequest, AnalysisResponse, Analyzer, DetectionResponse};
use crate::error::ApiError;

/// State shared by every handler.
pub struct AppState<G = GeminiClient> {
    pub analyzer: Analyzer,
    /// `None` when AI mode is disabled or has no API key.
    pub llm: Option<LlmRewriter<G>>,
}

impl<G: TextGenerator> AppState<G> {
    pub fn new(analyzer: Analyzer, llm: Option<LlmRewriter<G>>) -> Self {
        Self { analyzer, llm }
    }
}

/// Build the API router.
///
/// - `GET /api/health` - liveness check
/// - `POST /api/analyze` - detect, score, rewrite and classify
/// - `POST /api/detect` - detect and score only
pub fn create_router<G: TextGenerator + 'static>(state: Arc<AppState<G>>) -> Router {
    // Browser frontends call from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze::<G>))
        .route("/api/detect", post(detect::<G>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "objectivity API listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("objectivity API stopped");
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "message": "API is running" }))
}

async fn analyze<G: TextGenerator + 'static>(
    State(state): State<Arc<AppState<G>>>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(request) = body?;
    let response = state
        .analyzer
        .handle(&request, state.llm.as_ref())
        .await?;
    Ok(Json(response))
}

async fn detect<G: TextGenerator + 'static>(
    State(state): State<Arc<AppState<G>>>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<DetectionResponse>, ApiError> {
    let Json(request) = body?;
    Ok(Json(state.analyzer.detect(&request)?))
}
