//! Handler for `POST /register`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/register` | Body: `{"name", "email", "phone"?, "department"?}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use labtrack_core::{credential::Credential, person::NewPerson, store::AttendanceStore};
use serde::{Deserialize, Serialize};

use crate::error::{ApiFailure, store_err};

/// Validated request body. `name` and `email` are required; a body missing
/// either is rejected before any handler logic runs.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:       String,
  pub email:      String,
  pub phone:      Option<String>,
  pub department: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
  pub success:   bool,
  pub person_id: i64,
  /// Base64-encoded PNG of the person's QR credential.
  pub qr_code:   String,
  pub message:   String,
}

/// `POST /register` — create a person and issue their QR credential.
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiFailure>
where
  S: AttendanceStore,
{
  let Json(body) = body?;

  let person = store
    .add_person(NewPerson {
      name:       body.name,
      email:      body.email,
      phone:      body.phone,
      department: body.department,
    })
    .await
    .map_err(store_err)?;

  let qr_code = labtrack_credential::render_png_base64(&Credential::from(&person))?;

  tracing::info!(person_id = person.id, email = %person.email, "registered person");

  Ok(Json(RegisterResponse {
    success:   true,
    person_id: person.id,
    qr_code,
    message:   "Person registered successfully".to_string(),
  }))
}
