//! The `AttendanceStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g.
//! `labtrack-store-sqlite`). Higher layers (`labtrack-api`, the toggle
//! engine) depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
  person::{NewPerson, Person},
  record::AttendanceRecord,
  views::{CurrentStatusRow, HistoryRow, LastExit, Occupant, ReportRow},
};

// ─── Toggle outcome ──────────────────────────────────────────────────────────

/// The action a toggle resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
  Entry,
  Exit,
}

/// Result of an atomic [`AttendanceStore::toggle_session`].
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
  pub action: ToggleAction,
  /// The record created (entry) or closed (exit).
  pub record: AttendanceRecord,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an attendance store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). The associated
/// error must convert into the core [`Error`](crate::Error) taxonomy so
/// callers can report backend failures uniformly.
pub trait AttendanceStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Register a new person. Email is the natural dedup key: a duplicate is
  /// rejected, never merged.
  fn add_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  // ── Attendance records ────────────────────────────────────────────────

  /// Find the open record for a person — at most one exists at any time.
  fn find_open_record(
    &self,
    person_id: i64,
  ) -> impl Future<Output = Result<Option<AttendanceRecord>, Self::Error>> + Send + '_;

  /// Insert a new open record with the given entry timestamp.
  fn insert_record(
    &self,
    person_id: i64,
    lab_name: String,
    entry_time: NaiveDateTime,
  ) -> impl Future<Output = Result<AttendanceRecord, Self::Error>> + Send + '_;

  /// Populate the exit timestamp of an existing record.
  fn close_record(
    &self,
    record_id: i64,
    exit_time: NaiveDateTime,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Atomically toggle a person's session: close the open record if one
  /// exists, otherwise create a new one. The lookup and the write execute
  /// under a single transaction so two concurrent scans for the same person
  /// cannot both observe "no open session".
  fn toggle_session(
    &self,
    person_id: i64,
    lab_name: String,
    at: NaiveDateTime,
  ) -> impl Future<Output = Result<ToggleOutcome, Self::Error>> + Send + '_;

  /// Delete one record by id, returning whether a row was removed. Has no
  /// cascading effect on the person.
  fn delete_record(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete all records, returning the number removed. Persons are left
  /// untouched.
  fn delete_all_records(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Read views ────────────────────────────────────────────────────────

  /// Every record joined to its person, entry timestamp descending.
  fn list_history(
    &self,
  ) -> impl Future<Output = Result<Vec<HistoryRow>, Self::Error>> + Send + '_;

  /// Open records joined to person, entry timestamp descending.
  fn current_occupants(
    &self,
  ) -> impl Future<Output = Result<Vec<Occupant>, Self::Error>> + Send + '_;

  /// The most recent closed session per person, newest first.
  fn last_exits(
    &self,
  ) -> impl Future<Output = Result<Vec<LastExit>, Self::Error>> + Send + '_;

  /// Export projection of the full history, entry timestamp descending.
  fn history_report(
    &self,
  ) -> impl Future<Output = Result<Vec<ReportRow>, Self::Error>> + Send + '_;

  /// Export projection of the open records, entry timestamp descending.
  fn current_status_report(
    &self,
  ) -> impl Future<Output = Result<Vec<CurrentStatusRow>, Self::Error>> + Send + '_;
}
