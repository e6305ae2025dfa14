//! Spreadsheet export for labtrack.
//!
//! Renders report rows from the store into downloadable xlsx documents.
//! Pure synchronous; no HTTP or database dependencies.

pub mod error;

pub use error::{Error, Result};

use std::collections::HashSet;

use chrono::NaiveDateTime;
use labtrack_core::{
  time,
  views::{CurrentStatusRow, ReportRow},
};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet};

/// MIME type of the generated documents.
pub const XLSX_CONTENT_TYPE: &str =
  "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const HISTORY_SHEET: &str = "Lab Records";
pub const SUMMARY_SHEET: &str = "Summary";
pub const STATUS_SHEET: &str = "Current Lab Status";

/// Columns are sized to their longest cell plus padding, capped here.
const MAX_COLUMN_WIDTH: f64 = 50.0;
const COLUMN_PADDING: f64 = 2.0;

const HISTORY_HEADER_FILL: u32 = 0x366092;
const STATUS_HEADER_FILL: u32 = 0x4CAF50;

const FILENAME_TS_FORMAT: &str = "%Y%m%d_%H%M%S";

// ─── Workbooks ───────────────────────────────────────────────────────────────

/// Render the full-history export: a "Lab Records" sheet mirroring `rows`
/// plus the computed `status` column, and a "Summary" sheet with headline
/// metrics over the same result set.
pub fn history_workbook(
  rows: &[ReportRow],
  generated_at: NaiveDateTime,
) -> Result<Vec<u8>> {
  let header = header_format(HISTORY_HEADER_FILL);
  let mut workbook = Workbook::new();

  let headers = [
    "person_id",
    "name",
    "email",
    "phone",
    "department",
    "lab_name",
    "entry_time",
    "exit_time",
    "status",
  ];
  let cells: Vec<Vec<String>> = rows.iter().map(report_cells).collect();

  let sheet = workbook.add_worksheet();
  sheet.set_name(HISTORY_SHEET)?;
  write_sheet(sheet, &headers, &cells, &header)?;

  let in_lab = rows.iter().filter(|r| r.exit_time.is_none()).count();
  let unique_persons: HashSet<i64> = rows.iter().map(|r| r.person_id).collect();
  let summary = vec![
    vec!["Total Records".to_string(), rows.len().to_string()],
    vec!["Current Lab Occupants".to_string(), in_lab.to_string()],
    vec!["Unique Persons".to_string(), unique_persons.len().to_string()],
    vec!["Date Generated".to_string(), time::format(generated_at)],
  ];

  let sheet = workbook.add_worksheet();
  sheet.set_name(SUMMARY_SHEET)?;
  write_sheet(sheet, &["Metric", "Value"], &summary, &header)?;

  Ok(workbook.save_to_buffer()?)
}

/// Render the current-status export: one sheet of open sessions.
pub fn current_status_workbook(rows: &[CurrentStatusRow]) -> Result<Vec<u8>> {
  let header = header_format(STATUS_HEADER_FILL);
  let mut workbook = Workbook::new();

  let headers = ["name", "email", "department", "phone", "lab_name", "entry_time"];
  let cells: Vec<Vec<String>> = rows.iter().map(status_cells).collect();

  let sheet = workbook.add_worksheet();
  sheet.set_name(STATUS_SHEET)?;
  write_sheet(sheet, &headers, &cells, &header)?;

  Ok(workbook.save_to_buffer()?)
}

// ─── Filenames ───────────────────────────────────────────────────────────────

pub fn history_filename(generated_at: NaiveDateTime) -> String {
  format!(
    "lab_records_export_{}.xlsx",
    generated_at.format(FILENAME_TS_FORMAT)
  )
}

pub fn current_status_filename(generated_at: NaiveDateTime) -> String {
  format!(
    "current_lab_status_{}.xlsx",
    generated_at.format(FILENAME_TS_FORMAT)
  )
}

// ─── Sheet assembly ──────────────────────────────────────────────────────────

fn header_format(fill: u32) -> Format {
  Format::new()
    .set_bold()
    .set_font_size(12)
    .set_font_color(Color::White)
    .set_background_color(Color::RGB(fill))
    .set_align(FormatAlign::Center)
}

/// Write a header row plus data rows and size each column to its content.
fn write_sheet(
  sheet: &mut Worksheet,
  headers: &[&str],
  rows: &[Vec<String>],
  header: &Format,
) -> Result<()> {
  for (col, title) in headers.iter().enumerate() {
    sheet.write_string_with_format(0, col as u16, *title, header)?;
  }

  for (r, row) in rows.iter().enumerate() {
    for (c, value) in row.iter().enumerate() {
      sheet.write_string(r as u32 + 1, c as u16, value)?;
    }
  }

  for (col, title) in headers.iter().enumerate() {
    let longest = rows
      .iter()
      .filter_map(|row| row.get(col))
      .map(|v| v.len())
      .max()
      .unwrap_or(0)
      .max(title.len());
    let width = (longest as f64 + COLUMN_PADDING).min(MAX_COLUMN_WIDTH);
    sheet.set_column_width(col as u16, width)?;
  }

  Ok(())
}

fn report_cells(row: &ReportRow) -> Vec<String> {
  vec![
    row.person_id.to_string(),
    row.name.clone(),
    row.email.clone(),
    row.phone.clone().unwrap_or_default(),
    row.department.clone().unwrap_or_default(),
    row.lab_name.clone(),
    time::format(row.entry_time),
    row.exit_time.map(time::format).unwrap_or_default(),
    row.status().as_str().to_string(),
  ]
}

fn status_cells(row: &CurrentStatusRow) -> Vec<String> {
  vec![
    row.name.clone(),
    row.email.clone(),
    row.department.clone().unwrap_or_default(),
    row.phone.clone().unwrap_or_default(),
    row.lab_name.clone(),
    time::format(row.entry_time),
  ]
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn ts(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
      .unwrap()
      .and_hms_opt(hour, 0, 0)
      .unwrap()
  }

  fn report_row(person_id: i64, exit: Option<NaiveDateTime>) -> ReportRow {
    ReportRow {
      person_id,
      name:       "Alice".into(),
      email:      "alice@example.com".into(),
      phone:      None,
      department: Some("Chemistry".into()),
      lab_name:   "Chem".into(),
      entry_time: ts(9),
      exit_time:  exit,
    }
  }

  #[test]
  fn history_workbook_is_a_zip_container() {
    let rows = vec![report_row(1, Some(ts(17))), report_row(2, None)];
    let bytes = history_workbook(&rows, ts(18)).unwrap();
    // xlsx is a zip archive; PK is the local-file-header magic.
    assert_eq!(&bytes[..2], b"PK");
  }

  #[test]
  fn history_workbook_accepts_empty_result_set() {
    let bytes = history_workbook(&[], ts(18)).unwrap();
    assert_eq!(&bytes[..2], b"PK");
  }

  #[test]
  fn current_status_workbook_builds() {
    let rows = vec![CurrentStatusRow {
      name:       "Alice".into(),
      email:      "alice@example.com".into(),
      department: None,
      phone:      Some("555-0101".into()),
      lab_name:   "Chem".into(),
      entry_time: ts(9),
    }];
    let bytes = current_status_workbook(&rows).unwrap();
    assert_eq!(&bytes[..2], b"PK");
  }

  #[test]
  fn filenames_embed_the_generation_timestamp() {
    let at = ts(18);
    assert_eq!(
      history_filename(at),
      "lab_records_export_20240601_180000.xlsx"
    );
    assert_eq!(
      current_status_filename(at),
      "current_lab_status_20240601_180000.xlsx"
    );
  }
}
