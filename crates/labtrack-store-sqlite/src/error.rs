//! Error type for `labtrack-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  /// Attempted to close a record that does not exist.
  #[error("no record found with id {0}")]
  RecordNotFound(i64),
}

impl From<Error> for labtrack_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::DuplicateEmail(email) => labtrack_core::Error::DuplicateEmail(email),
      other => labtrack_core::Error::Storage(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
