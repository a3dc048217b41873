use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Form, Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use newsum_core::{AppConfig, Outcome, Pipeline, MISSING_URL_WARNING};

use crate::page::{render_page, Banner};

#[derive(Clone)]
struct AppState {
    pipeline: Arc<Pipeline>,
}

#[derive(Debug, Deserialize)]
struct SummarizeRequest {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum ResponseStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Serialize)]
struct SummarizeResponse {
    status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
}

pub async fn run(config: &AppConfig, addr: Option<String>) -> Result<()> {
    let pipeline = Arc::new(Pipeline::new(config)?);

    let addr = addr.unwrap_or_else(|| config.server.addr.clone());
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", addr))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving on http://{}", addr);

    axum::serve(listener, router(pipeline)).await?;

    Ok(())
}

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/api/summarize", post(api_summarize_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { pipeline })
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn index_handler() -> Html<String> {
    Html(render_page("", None))
}

async fn submit_handler(
    State(state): State<AppState>,
    Form(request): Form<SummarizeRequest>,
) -> Response {
    match state.pipeline.process(&request.url).await {
        Ok(outcome) => {
            let banner = Banner::from_outcome(&outcome);
            Html(render_page(&request.url, Some(&banner))).into_response()
        }
        Err(e) => {
            let banner = Banner::from_failure(&e);
            (
                StatusCode::BAD_GATEWAY,
                Html(render_page(&request.url, Some(&banner))),
            )
                .into_response()
        }
    }
}

async fn api_summarize_handler(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> (StatusCode, Json<SummarizeResponse>) {
    let (status, body) = match state.pipeline.process(&request.url).await {
        Ok(Outcome::MissingUrl) => (
            StatusCode::BAD_REQUEST,
            SummarizeResponse {
                status: ResponseStatus::Warning,
                message: Some(MISSING_URL_WARNING.to_string()),
                summary: None,
            },
        ),
        Ok(Outcome::FetchFailed(e)) => (
            StatusCode::BAD_GATEWAY,
            SummarizeResponse {
                status: ResponseStatus::Error,
                message: Some(e.to_string()),
                summary: None,
            },
        ),
        Ok(Outcome::Summarized { summary, .. }) => (
            StatusCode::OK,
            SummarizeResponse {
                status: ResponseStatus::Ok,
                message: None,
                summary: Some(summary.into_inner()),
            },
        ),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            SummarizeResponse {
                status: ResponseStatus::Error,
                message: Some(format!("Summarization failed: {}", e)),
                summary: None,
            },
        ),
    };

    (status, Json(body))
}
