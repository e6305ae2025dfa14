//! Error types for `labtrack-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  #[error("no person found with id {0}")]
  PersonNotFound(i64),

  #[error("malformed credential: {0}")]
  MalformedCredential(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
