//! The attendance toggle engine — entry/exit decisions per scan.
//!
//! A strict two-state machine per person: `OUT` (no open record) and `IN`
//! (one open record). A scan flips the state; nothing else does. There is no
//! force-close and no timeout-based auto-exit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  credential::Credential,
  record::DEFAULT_LAB,
  store::{AttendanceStore, ToggleAction},
  time,
};

/// The result of a processed scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
  pub action:    ToggleAction,
  pub person:    ScannedPerson,
  pub lab_name:  String,
  #[serde(with = "crate::time::timestamp")]
  pub timestamp: NaiveDateTime,
}

/// The identity echoed back to the scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedPerson {
  pub name:  String,
  pub email: String,
}

/// Process one scan: decode the credential, toggle the person's session and
/// report which action resulted.
///
/// The person is resolved before anything is written, so a credential
/// referencing a deleted or never-registered person fails with
/// [`Error::PersonNotFound`] without creating a record.
pub async fn process_scan<S>(
  store: &S,
  payload: &str,
  lab_name: Option<String>,
) -> Result<ScanOutcome>
where
  S: AttendanceStore,
{
  let credential = Credential::from_payload(payload)?;
  let lab_name = lab_name.unwrap_or_else(|| DEFAULT_LAB.to_string());

  let person = store
    .get_person(credential.id)
    .await
    .map_err(Into::into)?
    .ok_or(Error::PersonNotFound(credential.id))?;

  let now = time::now();
  let outcome = store
    .toggle_session(person.id, lab_name.clone(), now)
    .await
    .map_err(Into::into)?;

  Ok(ScanOutcome {
    action: outcome.action,
    person: ScannedPerson {
      name:  person.name,
      email: person.email,
    },
    lab_name,
    timestamp: now,
  })
}
