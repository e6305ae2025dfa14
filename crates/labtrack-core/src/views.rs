//! Read views over the store — deterministic projections, no mutation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ─── Listing views ───────────────────────────────────────────────────────────

/// One row of the full-history listing: every record joined to its person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRow {
  pub id:         i64,
  pub name:       String,
  pub email:      String,
  pub lab_name:   String,
  #[serde(with = "crate::time::timestamp")]
  pub entry_time: NaiveDateTime,
  #[serde(with = "crate::time::timestamp_opt")]
  pub exit_time:  Option<NaiveDateTime>,
}

/// A person currently inside a lab (open record joined to person).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occupant {
  pub lab_name:   String,
  pub name:       String,
  pub email:      String,
  #[serde(with = "crate::time::timestamp")]
  pub entry_time: NaiveDateTime,
}

/// The most recent closed session per person. The lab name is the one on the
/// record carrying that person's maximum exit timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastExit {
  pub lab_name:  String,
  pub name:      String,
  #[serde(with = "crate::time::timestamp")]
  pub last_exit: NaiveDateTime,
}

// ─── Export views ────────────────────────────────────────────────────────────

/// Whether a report row is an open or a closed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabStatus {
  #[serde(rename = "IN LAB")]
  InLab,
  #[serde(rename = "LEFT LAB")]
  LeftLab,
}

impl LabStatus {
  pub fn from_exit(exit_time: Option<NaiveDateTime>) -> Self {
    match exit_time {
      None => LabStatus::InLab,
      Some(_) => LabStatus::LeftLab,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      LabStatus::InLab => "IN LAB",
      LabStatus::LeftLab => "LEFT LAB",
    }
  }
}

/// One row of the full-history export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
  pub person_id:  i64,
  pub name:       String,
  pub email:      String,
  pub phone:      Option<String>,
  pub department: Option<String>,
  pub lab_name:   String,
  #[serde(with = "crate::time::timestamp")]
  pub entry_time: NaiveDateTime,
  #[serde(with = "crate::time::timestamp_opt")]
  pub exit_time:  Option<NaiveDateTime>,
}

impl ReportRow {
  /// The computed `status` column of the export.
  pub fn status(&self) -> LabStatus { LabStatus::from_exit(self.exit_time) }
}

/// One row of the current-status export (open sessions only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStatusRow {
  pub name:       String,
  pub email:      String,
  pub department: Option<String>,
  pub phone:      Option<String>,
  pub lab_name:   String,
  #[serde(with = "crate::time::timestamp")]
  pub entry_time: NaiveDateTime,
}
