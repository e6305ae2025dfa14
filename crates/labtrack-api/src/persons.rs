//! Handler for `GET /person/{id}`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use labtrack_core::store::AttendanceStore;
use serde::Serialize;

use crate::error::{ApiFailure, store_err};

#[derive(Debug, Serialize)]
pub struct PersonResponse {
  pub success: bool,
  pub person:  PersonBody,
}

/// The identity fields exposed over the API — the registration timestamp
/// stays internal.
#[derive(Debug, Serialize)]
pub struct PersonBody {
  pub id:         i64,
  pub name:       String,
  pub email:      String,
  pub phone:      Option<String>,
  pub department: Option<String>,
}

/// `GET /person/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PersonResponse>, ApiFailure>
where
  S: AttendanceStore,
{
  let Path(id) = path?;

  let person = store
    .get_person(id)
    .await
    .map_err(store_err)?
    .ok_or(labtrack_core::Error::PersonNotFound(id))?;

  Ok(Json(PersonResponse {
    success: true,
    person:  PersonBody {
      id:         person.id,
      name:       person.name,
      email:      person.email,
      phone:      person.phone,
      department: person.department,
    },
  }))
}
