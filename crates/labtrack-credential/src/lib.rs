//! QR credential rendering for labtrack.
//!
//! Turns a [`Credential`] into the scannable image handed out at
//! registration time. Pure synchronous; no HTTP or database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use labtrack_core::credential::Credential;
//!
//! let credential = Credential {
//!   id:    1,
//!   name:  "Alice".into(),
//!   email: "alice@example.com".into(),
//! };
//! let png_b64 = labtrack_credential::render_png_base64(&credential).unwrap();
//! println!("{} base64 bytes", png_b64.len());
//! ```

pub mod error;

pub use error::{Error, Result};

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use image::{DynamicImage, ImageFormat, Luma};
use labtrack_core::credential::Credential;
use qrcode::QrCode;

/// Minimum edge length of the rendered image in pixels.
const MIN_DIMENSIONS: u32 = 240;

/// Render `credential` as a QR code PNG, base64-encoded for JSON transport.
///
/// Deterministic: the same credential always yields the same image bytes.
/// A scanner decoding the image reads back the credential's JSON payload.
pub fn render_png_base64(credential: &Credential) -> Result<String> {
  let payload = credential.to_payload()?;

  let code = QrCode::new(payload.as_bytes())?;
  let img = code
    .render::<Luma<u8>>()
    .min_dimensions(MIN_DIMENSIONS, MIN_DIMENSIONS)
    .build();

  let mut png = Vec::new();
  DynamicImage::ImageLuma8(img)
    .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

  Ok(B64.encode(png))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn credential() -> Credential {
    Credential {
      id:    1,
      name:  "Alice Liddell".into(),
      email: "alice@example.com".into(),
    }
  }

  #[test]
  fn renders_a_png() {
    let encoded = render_png_base64(&credential()).unwrap();
    let bytes = B64.decode(encoded).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
  }

  #[test]
  fn rendering_is_deterministic() {
    let a = render_png_base64(&credential()).unwrap();
    let b = render_png_base64(&credential()).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn distinct_credentials_render_distinct_images() {
    let a = render_png_base64(&credential()).unwrap();
    let b = render_png_base64(&Credential {
      id: 2,
      ..credential()
    })
    .unwrap();
    assert_ne!(a, b);
  }
}
