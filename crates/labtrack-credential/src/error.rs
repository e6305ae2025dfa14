//! Error types for the labtrack-credential renderer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("QR encoding error: {0}")]
  Qr(#[from] qrcode::types::QrError),

  #[error("image encoding error: {0}")]
  Image(#[from] image::ImageError),

  #[error(transparent)]
  Core(#[from] labtrack_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
