//! AttendanceRecord — one lab visit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The lab name used when a scan does not specify one.
pub const DEFAULT_LAB: &str = "Main Lab";

/// One lab visit. A null exit timestamp marks an open session; at most one
/// open record may exist per person at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
  pub id:         i64,
  pub person_id:  i64,
  pub lab_name:   String,
  #[serde(with = "crate::time::timestamp")]
  pub entry_time: NaiveDateTime,
  #[serde(with = "crate::time::timestamp_opt")]
  pub exit_time:  Option<NaiveDateTime>,
}

impl AttendanceRecord {
  /// Whether this record denotes a person currently inside a lab.
  pub fn is_open(&self) -> bool { self.exit_time.is_none() }
}
