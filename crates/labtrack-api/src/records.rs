//! Handlers for `/records` endpoints.
//!
//! | Method | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/records` | Full history, newest entry first |
//! | `DELETE` | `/records/{id}` | Remove one record; the person remains |
//! | `DELETE` | `/records` | Remove all records; persons remain |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use labtrack_core::{store::AttendanceStore, views::HistoryRow};
use serde::Serialize;

use crate::error::{ApiFailure, store_err};

/// `GET /records` — the full history as a bare array.
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<HistoryRow>>, ApiFailure>
where
  S: AttendanceStore,
{
  let rows = store.list_history().await.map_err(store_err)?;
  Ok(Json(rows))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
  pub success: bool,
  pub message: String,
}

/// `DELETE /records/{id}`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiFailure>
where
  S: AttendanceStore,
{
  let Path(id) = path?;

  let removed = store.delete_record(id).await.map_err(store_err)?;
  tracing::info!(record_id = id, removed, "deleted record");

  Ok(Json(DeleteResponse {
    success: true,
    message: "Record deleted successfully".to_string(),
  }))
}

/// `DELETE /records`
pub async fn delete_all<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<DeleteResponse>, ApiFailure>
where
  S: AttendanceStore,
{
  let removed = store.delete_all_records().await.map_err(store_err)?;
  tracing::info!(removed, "deleted all records");

  Ok(Json(DeleteResponse {
    success: true,
    message: "All records deleted successfully".to_string(),
  }))
}
