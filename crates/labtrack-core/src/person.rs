//! Person — the long-lived aggregate root.
//!
//! A person owns zero or more attendance records; nothing in the system ever
//! deletes a person.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A registered lab member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub id:            i64,
  pub name:          String,
  /// Globally unique; the natural dedup key for registration.
  pub email:         String,
  pub phone:         Option<String>,
  pub department:    Option<String>,
  /// Set at creation, immutable afterwards.
  #[serde(with = "crate::time::timestamp")]
  pub registered_at: NaiveDateTime,
}

/// Input for registering a person. The id and registration timestamp are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
  pub name:       String,
  pub email:      String,
  pub phone:      Option<String>,
  pub department: Option<String>,
}
