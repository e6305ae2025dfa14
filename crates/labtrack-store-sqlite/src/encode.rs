//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as fixed `YYYY-MM-DD HH:MM:SS` strings (the
//! system-wide wire format). Ids are SQLite rowids.

use chrono::NaiveDateTime;
use labtrack_core::{
  person::Person,
  record::AttendanceRecord,
  time,
  views::{CurrentStatusRow, HistoryRow, LastExit, Occupant, ReportRow},
};

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_ts(ts: NaiveDateTime) -> String { time::format(ts) }

pub fn decode_ts(s: &str) -> Result<NaiveDateTime> {
  time::parse(s).map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_ts_opt(s: Option<&str>) -> Result<Option<NaiveDateTime>> {
  s.map(decode_ts).transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `persons` row.
pub struct RawPerson {
  pub id:            i64,
  pub name:          String,
  pub email:         String,
  pub phone:         Option<String>,
  pub department:    Option<String>,
  pub registered_at: String,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:            self.id,
      name:          self.name,
      email:         self.email,
      phone:         self.phone,
      department:    self.department,
      registered_at: decode_ts(&self.registered_at)?,
    })
  }
}

/// Raw strings read directly from a `lab_records` row.
pub struct RawRecord {
  pub id:         i64,
  pub person_id:  i64,
  pub lab_name:   String,
  pub entry_time: String,
  pub exit_time:  Option<String>,
}

impl RawRecord {
  pub fn into_record(self) -> Result<AttendanceRecord> {
    Ok(AttendanceRecord {
      id:         self.id,
      person_id:  self.person_id,
      lab_name:   self.lab_name,
      entry_time: decode_ts(&self.entry_time)?,
      exit_time:  decode_ts_opt(self.exit_time.as_deref())?,
    })
  }
}

/// A `lab_records` row joined with its person's identity.
pub struct RawHistoryRow {
  pub id:         i64,
  pub name:       String,
  pub email:      String,
  pub lab_name:   String,
  pub entry_time: String,
  pub exit_time:  Option<String>,
}

impl RawHistoryRow {
  pub fn into_row(self) -> Result<HistoryRow> {
    Ok(HistoryRow {
      id:         self.id,
      name:       self.name,
      email:      self.email,
      lab_name:   self.lab_name,
      entry_time: decode_ts(&self.entry_time)?,
      exit_time:  decode_ts_opt(self.exit_time.as_deref())?,
    })
  }
}

pub struct RawOccupant {
  pub lab_name:   String,
  pub name:       String,
  pub email:      String,
  pub entry_time: String,
}

impl RawOccupant {
  pub fn into_occupant(self) -> Result<Occupant> {
    Ok(Occupant {
      lab_name:   self.lab_name,
      name:       self.name,
      email:      self.email,
      entry_time: decode_ts(&self.entry_time)?,
    })
  }
}

pub struct RawLastExit {
  pub lab_name:  String,
  pub name:      String,
  pub last_exit: String,
}

impl RawLastExit {
  pub fn into_last_exit(self) -> Result<LastExit> {
    Ok(LastExit {
      lab_name:  self.lab_name,
      name:      self.name,
      last_exit: decode_ts(&self.last_exit)?,
    })
  }
}

/// A full-history export row (person details joined to the record).
pub struct RawReportRow {
  pub person_id:  i64,
  pub name:       String,
  pub email:      String,
  pub phone:      Option<String>,
  pub department: Option<String>,
  pub lab_name:   String,
  pub entry_time: String,
  pub exit_time:  Option<String>,
}

impl RawReportRow {
  pub fn into_row(self) -> Result<ReportRow> {
    Ok(ReportRow {
      person_id:  self.person_id,
      name:       self.name,
      email:      self.email,
      phone:      self.phone,
      department: self.department,
      lab_name:   self.lab_name,
      entry_time: decode_ts(&self.entry_time)?,
      exit_time:  decode_ts_opt(self.exit_time.as_deref())?,
    })
  }
}

pub struct RawCurrentStatusRow {
  pub name:       String,
  pub email:      String,
  pub department: Option<String>,
  pub phone:      Option<String>,
  pub lab_name:   String,
  pub entry_time: String,
}

impl RawCurrentStatusRow {
  pub fn into_row(self) -> Result<CurrentStatusRow> {
    Ok(CurrentStatusRow {
      name:       self.name,
      email:      self.email,
      department: self.department,
      phone:      self.phone,
      lab_name:   self.lab_name,
      entry_time: decode_ts(&self.entry_time)?,
    })
  }
}
