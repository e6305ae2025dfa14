//! Handler for `POST /scan`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/scan` | Body: `{"qr_content", "lab_name"?}`; toggles entry/exit |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use labtrack_core::{store::AttendanceStore, toggle};
use serde::{Deserialize, Serialize};

use crate::error::ApiFailure;

/// Validated request body.
#[derive(Debug, Deserialize)]
pub struct ScanBody {
  /// The decoded credential text read from a QR code.
  pub qr_content: String,
  /// Defaults to "Main Lab" when unspecified.
  pub lab_name:   Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
  pub success: bool,
  #[serde(flatten)]
  pub outcome: toggle::ScanOutcome,
}

/// `POST /scan` — toggle the scanned person's session.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<ScanBody>, JsonRejection>,
) -> Result<Json<ScanResponse>, ApiFailure>
where
  S: AttendanceStore,
{
  let Json(body) = body?;

  let outcome =
    toggle::process_scan(store.as_ref(), &body.qr_content, body.lab_name).await?;

  tracing::info!(
    action = ?outcome.action,
    lab = %outcome.lab_name,
    person = %outcome.person.name,
    "processed scan"
  );

  Ok(Json(ScanResponse {
    success: true,
    outcome,
  }))
}
