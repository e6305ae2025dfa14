//! JSON REST API for labtrack.
//!
//! Exposes an axum [`Router`] backed by any
//! [`labtrack_core::store::AttendanceStore`]. Transport concerns (TLS, CORS)
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", labtrack_api::api_router(store.clone()))
//! ```
//!
//! Failure reporting is uniform: every handler catches its errors and
//! answers HTTP 200 with `{"success": false, "message": …}`. Callers inspect
//! the `success` field, not the transport status.

pub mod error;
pub mod export;
pub mod persons;
pub mod records;
pub mod register;
pub mod scan;
pub mod status;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use labtrack_core::store::AttendanceStore;

pub use error::ApiFailure;

#[cfg(test)]
mod tests;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: AttendanceStore + 'static,
{
  Router::new()
    .route("/register", post(register::handler::<S>))
    .route("/scan", post(scan::handler::<S>))
    .route(
      "/records",
      get(records::list::<S>).delete(records::delete_all::<S>),
    )
    .route("/records/{id}", delete(records::delete_one::<S>))
    .route("/current_lab_status", get(status::handler::<S>))
    .route("/person/{id}", get(persons::get_one::<S>))
    .route("/export/excel", get(export::history::<S>))
    .route("/export/current_status", get(export::current_status::<S>))
    .with_state(store)
}
