//! [`SqliteStore`] — the SQLite implementation of [`AttendanceStore`].

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::OptionalExtension as _;

use labtrack_core::{
  person::{NewPerson, Person},
  record::AttendanceRecord,
  store::{AttendanceStore, ToggleAction, ToggleOutcome},
  time,
  views::{CurrentStatusRow, HistoryRow, LastExit, Occupant, ReportRow},
};

use crate::{
  Error, Result,
  encode::{
    RawCurrentStatusRow, RawHistoryRow, RawLastExit, RawOccupant, RawPerson,
    RawRecord, RawReportRow, encode_ts,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An attendance store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// operation is a scoped call onto the store's dedicated database thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Whether `e` is a SQLite unique-constraint violation.
fn is_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(err, _))
      if err.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── AttendanceStore impl ────────────────────────────────────────────────────

impl AttendanceStore for SqliteStore {
  type Error = Error;

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn add_person(&self, input: NewPerson) -> Result<Person> {
    let registered_at = time::now();
    let at_str = encode_ts(registered_at);
    let row = input.clone();

    let result = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (name, email, phone, department, registered_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![row.name, row.email, row.phone, row.department, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await;

    let id = match result {
      Err(e) if is_unique_violation(&e) => {
        return Err(Error::DuplicateEmail(input.email));
      }
      other => other?,
    };

    Ok(Person {
      id,
      name: input.name,
      email: input.email,
      phone: input.phone,
      department: input.department,
      registered_at,
    })
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, email, phone, department, registered_at
               FROM persons WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawPerson {
                  id:            row.get(0)?,
                  name:          row.get(1)?,
                  email:         row.get(2)?,
                  phone:         row.get(3)?,
                  department:    row.get(4)?,
                  registered_at: row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  // ── Attendance records ────────────────────────────────────────────────────

  async fn find_open_record(&self, person_id: i64) -> Result<Option<AttendanceRecord>> {
    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, person_id, lab_name, entry_time, exit_time
               FROM lab_records
               WHERE person_id = ?1 AND exit_time IS NULL",
              rusqlite::params![person_id],
              |row| {
                Ok(RawRecord {
                  id:         row.get(0)?,
                  person_id:  row.get(1)?,
                  lab_name:   row.get(2)?,
                  entry_time: row.get(3)?,
                  exit_time:  row.get(4)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn insert_record(
    &self,
    person_id: i64,
    lab_name: String,
    entry_time: NaiveDateTime,
  ) -> Result<AttendanceRecord> {
    let entry_str = encode_ts(entry_time);
    let lab = lab_name.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO lab_records (person_id, lab_name, entry_time)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![person_id, lab, entry_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(AttendanceRecord {
      id,
      person_id,
      lab_name,
      entry_time,
      exit_time: None,
    })
  }

  async fn close_record(&self, record_id: i64, exit_time: NaiveDateTime) -> Result<()> {
    let exit_str = encode_ts(exit_time);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE lab_records SET exit_time = ?1 WHERE id = ?2",
          rusqlite::params![exit_str, record_id],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::RecordNotFound(record_id));
    }
    Ok(())
  }

  async fn toggle_session(
    &self,
    person_id: i64,
    lab_name: String,
    at: NaiveDateTime,
  ) -> Result<ToggleOutcome> {
    let at_str = encode_ts(at);

    let (action, raw): (ToggleAction, RawRecord) = self
      .conn
      .call(move |conn| {
        // Lookup and write run under one transaction so two concurrent
        // scans cannot both observe "no open session".
        let tx = conn.transaction()?;

        let open: Option<(i64, String, String)> = tx
          .query_row(
            "SELECT id, lab_name, entry_time FROM lab_records
             WHERE person_id = ?1 AND exit_time IS NULL",
            rusqlite::params![person_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
          )
          .optional()?;

        let result = match open {
          Some((id, open_lab, entry_str)) => {
            tx.execute(
              "UPDATE lab_records SET exit_time = ?1 WHERE id = ?2",
              rusqlite::params![at_str, id],
            )?;
            (
              ToggleAction::Exit,
              RawRecord {
                id,
                person_id,
                lab_name:   open_lab,
                entry_time: entry_str,
                exit_time:  Some(at_str),
              },
            )
          }
          None => {
            tx.execute(
              "INSERT INTO lab_records (person_id, lab_name, entry_time)
               VALUES (?1, ?2, ?3)",
              rusqlite::params![person_id, lab_name, at_str],
            )?;
            (
              ToggleAction::Entry,
              RawRecord {
                id:         tx.last_insert_rowid(),
                person_id,
                lab_name,
                entry_time: at_str,
                exit_time:  None,
              },
            )
          }
        };

        tx.commit()?;
        Ok(result)
      })
      .await?;

    Ok(ToggleOutcome {
      action,
      record: raw.into_record()?,
    })
  }

  async fn delete_record(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM lab_records WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_all_records(&self) -> Result<u64> {
    let changed = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM lab_records", [])?))
      .await?;

    Ok(changed as u64)
  }

  // ── Read views ────────────────────────────────────────────────────────────

  async fn list_history(&self) -> Result<Vec<HistoryRow>> {
    let raws: Vec<RawHistoryRow> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT lr.id, p.name, p.email, lr.lab_name, lr.entry_time, lr.exit_time
           FROM lab_records lr
           JOIN persons p ON lr.person_id = p.id
           ORDER BY lr.entry_time DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawHistoryRow {
              id:         row.get(0)?,
              name:       row.get(1)?,
              email:      row.get(2)?,
              lab_name:   row.get(3)?,
              entry_time: row.get(4)?,
              exit_time:  row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHistoryRow::into_row).collect()
  }

  async fn current_occupants(&self) -> Result<Vec<Occupant>> {
    let raws: Vec<RawOccupant> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT lr.lab_name, p.name, p.email, lr.entry_time
           FROM lab_records lr
           JOIN persons p ON lr.person_id = p.id
           WHERE lr.exit_time IS NULL
           ORDER BY lr.entry_time DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawOccupant {
              lab_name:   row.get(0)?,
              name:       row.get(1)?,
              email:      row.get(2)?,
              entry_time: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOccupant::into_occupant).collect()
  }

  async fn last_exits(&self) -> Result<Vec<LastExit>> {
    let raws: Vec<RawLastExit> = self
      .conn
      .call(|conn| {
        // SQLite resolves the bare lab_name from the row that carries
        // MAX(exit_time), so each person reports the lab they left last.
        let mut stmt = conn.prepare(
          "SELECT lr.lab_name, p.name, MAX(lr.exit_time) AS last_exit
           FROM lab_records lr
           JOIN persons p ON lr.person_id = p.id
           WHERE lr.exit_time IS NOT NULL
           GROUP BY p.id
           ORDER BY last_exit DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawLastExit {
              lab_name:  row.get(0)?,
              name:      row.get(1)?,
              last_exit: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLastExit::into_last_exit).collect()
  }

  async fn history_report(&self) -> Result<Vec<ReportRow>> {
    let raws: Vec<RawReportRow> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT p.id, p.name, p.email, p.phone, p.department,
                  lr.lab_name, lr.entry_time, lr.exit_time
           FROM lab_records lr
           JOIN persons p ON lr.person_id = p.id
           ORDER BY lr.entry_time DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawReportRow {
              person_id:  row.get(0)?,
              name:       row.get(1)?,
              email:      row.get(2)?,
              phone:      row.get(3)?,
              department: row.get(4)?,
              lab_name:   row.get(5)?,
              entry_time: row.get(6)?,
              exit_time:  row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReportRow::into_row).collect()
  }

  async fn current_status_report(&self) -> Result<Vec<CurrentStatusRow>> {
    let raws: Vec<RawCurrentStatusRow> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT p.name, p.email, p.department, p.phone,
                  lr.lab_name, lr.entry_time
           FROM lab_records lr
           JOIN persons p ON lr.person_id = p.id
           WHERE lr.exit_time IS NULL
           ORDER BY lr.entry_time DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawCurrentStatusRow {
              name:       row.get(0)?,
              email:      row.get(1)?,
              department: row.get(2)?,
              phone:      row.get(3)?,
              lab_name:   row.get(4)?,
              entry_time: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCurrentStatusRow::into_row).collect()
  }
}
