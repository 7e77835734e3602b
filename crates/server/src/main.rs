//! # sheetsum-server
//!
//! HTTP server for the spreadsheet summary API.
//!
//! `POST /api/v1/excel-summary` accepts a multipart upload (`file` plus one
//! or more `column_names` fields) and responds with per-column sums and
//! averages. Every request runs under a span carrying a fresh correlation
//! id, so all pipeline logs for one upload can be tied together.

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sheetsum_core::{SummaryError, SummaryGenerator, SummaryRow, XlsxRowSource};
use std::io::Write;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Successful summary response.
#[derive(Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Name of the uploaded file, as sent by the client.
    pub file: String,
    /// One entry per requested column, in request order.
    pub summary: Vec<SummaryRow>,
}

/// Error payload for client-input failures.
#[derive(Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Summary endpoint handler. Binds a correlation id to the request span
/// before doing any work.
pub async fn excel_summary(multipart: Multipart) -> Response {
    let correlation_id = Uuid::new_v4();
    let span = tracing::info_span!("excel_summary", correlation_id = %correlation_id);
    handle_summary(multipart).instrument(span).await
}

async fn handle_summary(mut multipart: Multipart) -> Response {
    let mut file_name = None;
    let mut file_bytes = None;
    let mut column_names: Vec<String> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("Malformed multipart body: {e}")),
        };
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => {
                file_name = field.file_name().map(ToString::to_string);
                match field.bytes().await {
                    Ok(bytes) => file_bytes = Some(bytes),
                    Err(e) => return bad_request(format!("Failed to read file field: {e}")),
                }
            }
            Some("column_names") => match field.text().await {
                Ok(text) => column_names.push(text),
                Err(e) => return bad_request(format!("Failed to read column_names field: {e}")),
            },
            _ => {}
        }
    }

    let Some(bytes) = file_bytes else {
        return bad_request("Missing file field".to_string());
    };
    if column_names.is_empty() {
        return bad_request("Missing column_names field".to_string());
    }
    let file_name = file_name.unwrap_or_else(|| "upload.xlsx".to_string());
    tracing::debug!(file = %file_name, ?column_names, "received summary request");

    let summary = match summarize_upload(&bytes, &column_names) {
        Ok(summary) => summary,
        Err(err @ SummaryError::HeaderNotFound) => return bad_request(err.to_string()),
        Err(err) => {
            tracing::error!(error = %err, "summary generation failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    Json(SummaryResponse {
        file: file_name,
        summary,
    })
    .into_response()
}

/// Spool the upload to disk and run the aggregation pipeline over it. The
/// spool file is removed when the handle drops, on success and failure
/// alike.
fn summarize_upload(bytes: &[u8], column_names: &[String]) -> Result<Vec<SummaryRow>, SummaryError> {
    let mut spool = tempfile::Builder::new().suffix(".xlsx").tempfile()?;
    spool.write_all(bytes)?;
    spool.flush()?;

    let source = XlsxRowSource::open(spool.path())?;
    SummaryGenerator::default().generate(&source, column_names)
}

fn bad_request(detail: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorDetail { detail })).into_response()
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/excel-summary", post(excel_summary))
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let app = create_router();

    let addr = "0.0.0.0:3000";
    tracing::info!("sheetsum-server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
