//! Handler for `GET /current_lab_status`.

use std::sync::Arc;

use axum::{Json, extract::State};
use labtrack_core::{
  store::AttendanceStore,
  views::{LastExit, Occupant},
};
use serde::Serialize;

use crate::error::{ApiFailure, store_err};

/// Who is inside right now, and where everyone else last left from.
#[derive(Debug, Serialize)]
pub struct CurrentLabStatus {
  pub current_occupants: Vec<Occupant>,
  pub last_exits:        Vec<LastExit>,
}

/// `GET /current_lab_status`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<CurrentLabStatus>, ApiFailure>
where
  S: AttendanceStore,
{
  let current_occupants = store.current_occupants().await.map_err(store_err)?;
  let last_exits = store.last_exits().await.map_err(store_err)?;

  Ok(Json(CurrentLabStatus {
    current_occupants,
    last_exits,
  }))
}
