//! The scannable credential payload.
//!
//! A credential is the small `{id, name, email}` record embedded in a
//! person's QR image at registration time. It travels as compact JSON text;
//! a scanner hands the decoded text back to the scan endpoint.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, person::Person};

/// The structured payload embedded in a person's QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
  pub id:    i64,
  #[serde(default)]
  pub name:  String,
  #[serde(default)]
  pub email: String,
}

impl Credential {
  /// Serialize to the compact JSON text embedded in the QR image.
  pub fn to_payload(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }

  /// Decode a scanned payload.
  ///
  /// Only `id` is required — `name` and `email` default to empty so a
  /// scanner that strips them still produces a usable credential. Anything
  /// that is not a JSON object with a numeric `id` fails with
  /// [`Error::MalformedCredential`].
  pub fn from_payload(payload: &str) -> Result<Self> {
    serde_json::from_str(payload)
      .map_err(|e| Error::MalformedCredential(e.to_string()))
  }
}

impl From<&Person> for Credential {
  fn from(person: &Person) -> Self {
    Self {
      id:    person.id,
      name:  person.name.clone(),
      email: person.email.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn payload_round_trips() {
    let credential = Credential {
      id:    7,
      name:  "Alice Liddell".into(),
      email: "alice@example.com".into(),
    };
    let payload = credential.to_payload().unwrap();
    assert_eq!(Credential::from_payload(&payload).unwrap(), credential);
  }

  #[test]
  fn decode_with_only_id_succeeds() {
    let credential = Credential::from_payload(r#"{"id":3}"#).unwrap();
    assert_eq!(credential.id, 3);
    assert!(credential.name.is_empty());
    assert!(credential.email.is_empty());
  }

  #[test]
  fn decode_without_id_fails() {
    let err =
      Credential::from_payload(r#"{"name":"Alice"}"#).unwrap_err();
    assert!(matches!(err, Error::MalformedCredential(_)));
  }

  #[test]
  fn decode_non_json_fails() {
    let err = Credential::from_payload("not json at all").unwrap_err();
    assert!(matches!(err, Error::MalformedCredential(_)));
  }
}
