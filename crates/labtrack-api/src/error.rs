//! The uniform failure envelope.
//!
//! Per the API contract, failures are reported as HTTP 200 with
//! `{"success": false, "message": …}` — clients inspect `success`, not the
//! transport status. [`ApiFailure`] is the one type every handler returns on
//! its error path.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error reported by an API handler.
#[derive(Debug, Error)]
pub enum ApiFailure {
  /// Request body or path failed validation (missing or mistyped fields).
  #[error("invalid request: {0}")]
  Validation(String),

  /// A domain or storage failure from the core taxonomy.
  #[error(transparent)]
  Domain(#[from] labtrack_core::Error),

  /// QR rendering failed.
  #[error("credential encoding error: {0}")]
  Encoding(#[from] labtrack_credential::Error),

  /// Spreadsheet assembly failed.
  #[error("export error: {0}")]
  Export(#[from] labtrack_export::Error),
}

impl From<JsonRejection> for ApiFailure {
  fn from(rejection: JsonRejection) -> Self {
    ApiFailure::Validation(rejection.body_text())
  }
}

impl From<PathRejection> for ApiFailure {
  fn from(rejection: PathRejection) -> Self {
    ApiFailure::Validation(rejection.body_text())
  }
}

/// Map a backend error into the envelope via the core taxonomy.
pub(crate) fn store_err<E: Into<labtrack_core::Error>>(e: E) -> ApiFailure {
  ApiFailure::Domain(e.into())
}

impl IntoResponse for ApiFailure {
  fn into_response(self) -> Response {
    Json(json!({ "success": false, "message": self.to_string() })).into_response()
  }
}
