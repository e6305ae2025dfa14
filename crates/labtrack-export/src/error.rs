//! Error type for `labtrack-export`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("spreadsheet assembly error: {0}")]
  Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
