//! HTTP surface: text and file summarization endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::BytesRejection,
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{config::ServerConfig, Error, Summarizer};

/// Body of `GET /`.
pub const READY_MESSAGE: &str = "Summarization API is running.";

// ── Shared application state ──────────────────────────────────────────

/// Handle shared by all handlers.
pub type SharedState = Arc<Summarizer>;

// ── Response payload types ────────────────────────────────────────────

/// Success body of both summarization endpoints.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// The aggregated summary.
    pub summary: String,
}

// ── Error handling ────────────────────────────────────────────────────

/// Handler failure, rendered as `{"error": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// Client mistake: missing field or file.
    BadRequest(String),
    /// Tokenizer, model or decoding failure.
    Internal(String),
    /// Rejection carrying the status the extractor chose (e.g. 413).
    Rejected(StatusCode, String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::Rejected(status, msg) => (status, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Rejected(err.status(), err.body_text())
    }
}

// ── Router ────────────────────────────────────────────────────────────

/// Build the application router: `GET /`, `POST /summarize`, `POST /upload`.
pub fn build_router(summarizer: SharedState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/summarize", post(summarize_text))
        .route("/upload", post(upload_file))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(summarizer)
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    READY_MESSAGE
}

async fn summarize_text(
    State(summarizer): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let body = body?;
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Request body must be a JSON object".into()))?;
    let text = match payload.get("text") {
        None => return Err(ApiError::BadRequest("Missing 'text' in request".into())),
        Some(Value::String(text)) => text,
        Some(_) => return Err(ApiError::BadRequest("'text' must be a string".into())),
    };

    let summary = summarizer.summarize_document(text).await?;
    Ok(Json(SummaryResponse { summary }))
}

async fn upload_file(
    State(summarizer): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!(%rejection, "upload without multipart body");
        ApiError::BadRequest("No file part".into())
    })?;

    // Parts without a filename are plain form fields, not files.
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        upload = Some((file_name, field.bytes().await?));
        break;
    }

    let (file_name, data) = upload.ok_or_else(|| ApiError::BadRequest("No file part".into()))?;
    if file_name.is_empty() {
        return Err(ApiError::BadRequest("No selected file".into()));
    }
    if data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".into()));
    }

    info!(file = %file_name, bytes = data.len(), "summarizing upload");
    let text = String::from_utf8(data.to_vec()).map_err(Error::from)?;
    let summary = summarizer.summarize_document(&text).await?;
    Ok(Json(SummaryResponse { summary }))
}

// ── Serving ───────────────────────────────────────────────────────────

/// Bind `config.addr` and serve until Ctrl+C.
///
/// # Errors
///
/// Returns [`Error::Io`] if the address cannot be bound or the server fails.
pub async fn serve(summarizer: SharedState, config: &ServerConfig) -> crate::Result<()> {
    let app = build_router(summarizer, config.max_body_bytes);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "summarization API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
