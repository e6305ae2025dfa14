//! Fixed-format timestamp codec.
//!
//! All timestamps are stored and transmitted as `YYYY-MM-DD HH:MM:SS` text
//! with no timezone marker. Domain types hold [`NaiveDateTime`]; wall-clock
//! values are taken in UTC and truncated to whole seconds so a value always
//! round-trips through the text format unchanged.

use chrono::{NaiveDateTime, Timelike as _, Utc};

/// The wire and storage format for all timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current UTC wall-clock time, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
  let now = Utc::now().naive_utc();
  now.with_nanosecond(0).unwrap_or(now)
}

pub fn format(ts: NaiveDateTime) -> String {
  ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
  NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}

/// Serde codec for required timestamp fields: `#[serde(with = "…::timestamp")]`.
pub mod timestamp {
  use chrono::NaiveDateTime;
  use serde::{Deserialize as _, Deserializer, Serializer, de};

  pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&super::format(*ts))
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    super::parse(&s).map_err(de::Error::custom)
  }
}

/// Serde codec for nullable timestamp fields:
/// `#[serde(with = "…::timestamp_opt")]`.
pub mod timestamp_opt {
  use chrono::NaiveDateTime;
  use serde::{Deserialize as _, Deserializer, Serializer, de};

  pub fn serialize<S>(
    ts: &Option<NaiveDateTime>,
    serializer: S,
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match ts {
      Some(ts) => serializer.serialize_some(&super::format(*ts)),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D>(
    deserializer: D,
  ) -> Result<Option<NaiveDateTime>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.as_deref()
      .map(super::parse)
      .transpose()
      .map_err(de::Error::custom)
  }
}
