use axum::{
    Json, Router,
    body::Body,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::columns::{ColumnMap, schedule_name_rule};
use crate::encoding::decode_upload;
use crate::error::ProcessError;
use crate::render::{RenderMode, render, spool_through_disk};
use crate::roster::Roster;

/// Per-deployment configuration: the column mapping and which artifact the
/// download endpoint returns. Requests share nothing else.
pub struct AppState {
    pub columns: ColumnMap,
    pub mode: RenderMode,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/health", get(health))
        .route("/process-csv", post(process_csv))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until shutdown.
///
/// # Arguments
/// * `addr` - Bind address, e.g. `0.0.0.0:8000`
/// * `mode` - Which artifact `/process-csv` returns
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
pub async fn run(addr: &str, mode: RenderMode) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        columns: ColumnMap::default_layout(),
        mode,
    });

    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    log::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("./static/index.html"))
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        message: "CSV processor is running",
    })
}

/// Accept a roster export and return the filtered download.
///
/// The pipeline runs Received -> Decoded -> Extracted -> Rendered ->
/// Returned; a fault at any stage short-circuits into `ProcessError`, which
/// renders the JSON error body. The filename check happens before any byte
/// of the upload is parsed.
async fn process_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ProcessError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.ends_with(".csv") {
            return Err(ProcessError::UnsupportedExtension);
        }

        upload = Some(field.bytes().await?);
        break;
    }

    let raw = upload.ok_or(ProcessError::MissingFile)?;

    let (text, encoding) = decode_upload(&raw);
    log::info!(
        "read CSV upload ({} bytes) with {} encoding",
        raw.len(),
        encoding
    );

    let roster = Roster::parse(&text)?;
    log::debug!(
        "upload has {} columns: {:?}",
        roster.width(),
        roster.headers()
    );

    let schedule = schedule_name_rule();
    if !roster.headers().iter().any(|h| schedule.matches(h)) {
        log::warn!("schedule name column not found with expected header");
    }

    let resolved = state.columns.resolve(roster.headers());
    let filtered = roster.extract(&resolved)?;

    let artifact = render(state.mode, &roster, &filtered)?;
    let bytes = spool_through_disk(&std::env::temp_dir(), &artifact.bytes)?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        )
        .body(Body::from(bytes))?;

    Ok(response)
}
