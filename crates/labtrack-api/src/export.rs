//! Handlers for `/export` downloads.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/export/excel` | Full history + summary, two sheets |
//! | `GET` | `/export/current_status` | Open sessions, one sheet |
//!
//! The store result set is materialized first, then the document is
//! assembled in memory and returned as an attachment.

use std::sync::Arc;

use axum::{
  body::Body,
  extract::State,
  http::{StatusCode, header},
  response::Response,
};
use labtrack_core::{store::AttendanceStore, time};

use crate::error::{ApiFailure, store_err};

/// `GET /export/excel` — the full-history workbook.
pub async fn history<S>(State(store): State<Arc<S>>) -> Result<Response, ApiFailure>
where
  S: AttendanceStore,
{
  let rows = store.history_report().await.map_err(store_err)?;
  let generated_at = time::now();
  let bytes = labtrack_export::history_workbook(&rows, generated_at)?;

  tracing::info!(rows = rows.len(), bytes = bytes.len(), "generated history export");

  Ok(attachment(bytes, labtrack_export::history_filename(generated_at)))
}

/// `GET /export/current_status` — the open-sessions workbook.
pub async fn current_status<S>(
  State(store): State<Arc<S>>,
) -> Result<Response, ApiFailure>
where
  S: AttendanceStore,
{
  let rows = store.current_status_report().await.map_err(store_err)?;
  let generated_at = time::now();
  let bytes = labtrack_export::current_status_workbook(&rows)?;

  tracing::info!(rows = rows.len(), bytes = bytes.len(), "generated status export");

  Ok(attachment(
    bytes,
    labtrack_export::current_status_filename(generated_at),
  ))
}

fn attachment(bytes: Vec<u8>, filename: String) -> Response {
  Response::builder()
    .status(StatusCode::OK)
    .header(header::CONTENT_TYPE, labtrack_export::XLSX_CONTENT_TYPE)
    .header(
      header::CONTENT_DISPOSITION,
      format!("attachment; filename=\"{filename}\""),
    )
    .header(header::CONTENT_LENGTH, bytes.len())
    .body(Body::from(bytes))
    .unwrap()
}
