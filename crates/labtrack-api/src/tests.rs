//! Router-level integration tests against the SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use labtrack_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn make_router() -> Router<()> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

async fn send_raw(
  router: &Router<()>,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> axum::response::Response {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  router
    .clone()
    .oneshot(builder.body(body).unwrap())
    .await
    .unwrap()
}

/// Send a request and decode the JSON body; all envelope responses are 200.
async fn send_json(
  router: &Router<()>,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> Value {
  let resp = send_raw(router, method, uri, body).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

async fn register(router: &Router<()>, name: &str, email: &str) -> Value {
  send_json(
    router,
    "POST",
    "/register",
    Some(json!({ "name": name, "email": email })),
  )
  .await
}

fn scan_body(person_id: i64, lab_name: Option<&str>) -> Value {
  let qr_content = json!({ "id": person_id }).to_string();
  match lab_name {
    Some(lab) => json!({ "qr_content": qr_content, "lab_name": lab }),
    None => json!({ "qr_content": qr_content }),
  }
}

// ─── Register ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_issues_a_qr_credential() {
  let router = make_router().await;

  let resp = register(&router, "Alice", "alice@example.com").await;
  assert_eq!(resp["success"], json!(true));
  assert_eq!(resp["person_id"], json!(1));
  assert_eq!(resp["message"], json!("Person registered successfully"));

  let png = B64.decode(resp["qr_code"].as_str().unwrap()).unwrap();
  assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn register_duplicate_email_reports_failure() {
  let router = make_router().await;

  register(&router, "Alice", "alice@example.com").await;
  let resp = register(&router, "Impostor", "alice@example.com").await;

  assert_eq!(resp["success"], json!(false));
  let message = resp["message"].as_str().unwrap();
  assert!(message.contains("already registered"), "message: {message}");
}

#[tokio::test]
async fn register_missing_field_reports_failure() {
  let router = make_router().await;

  let resp = send_json(
    &router,
    "POST",
    "/register",
    Some(json!({ "name": "No Email" })),
  )
  .await;

  assert_eq!(resp["success"], json!(false));
}

// ─── Scan ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn scan_toggles_entry_then_exit() {
  let router = make_router().await;
  register(&router, "Alice", "a@x.com").await;

  let entered = send_json(&router, "POST", "/scan", Some(scan_body(1, Some("Chem")))).await;
  assert_eq!(entered["success"], json!(true));
  assert_eq!(entered["action"], json!("entry"));
  assert_eq!(entered["person"]["name"], json!("Alice"));
  assert_eq!(entered["person"]["email"], json!("a@x.com"));
  assert_eq!(entered["lab_name"], json!("Chem"));
  assert!(entered["timestamp"].is_string());

  let exited = send_json(&router, "POST", "/scan", Some(scan_body(1, Some("Chem")))).await;
  assert_eq!(exited["action"], json!("exit"));

  let status = send_json(&router, "GET", "/current_lab_status", None).await;
  assert_eq!(status["current_occupants"], json!([]));
  let exits = status["last_exits"].as_array().unwrap();
  assert_eq!(exits.len(), 1);
  assert_eq!(exits[0]["name"], json!("Alice"));
  assert_eq!(exits[0]["lab_name"], json!("Chem"));
}

#[tokio::test]
async fn scan_defaults_to_main_lab() {
  let router = make_router().await;
  register(&router, "Alice", "a@x.com").await;

  let resp = send_json(&router, "POST", "/scan", Some(scan_body(1, None))).await;
  assert_eq!(resp["lab_name"], json!("Main Lab"));
}

#[tokio::test]
async fn scan_unknown_person_reports_failure_and_writes_nothing() {
  let router = make_router().await;

  let resp = send_json(&router, "POST", "/scan", Some(scan_body(99, None))).await;
  assert_eq!(resp["success"], json!(false));
  assert!(resp["message"].as_str().unwrap().contains("99"));

  let records = send_json(&router, "GET", "/records", None).await;
  assert_eq!(records, json!([]));
}

#[tokio::test]
async fn scan_malformed_credential_reports_failure() {
  let router = make_router().await;

  let resp = send_json(
    &router,
    "POST",
    "/scan",
    Some(json!({ "qr_content": "not a credential" })),
  )
  .await;

  assert_eq!(resp["success"], json!(false));
  assert!(
    resp["message"]
      .as_str()
      .unwrap()
      .contains("malformed credential")
  );
}

// ─── Records & persons ───────────────────────────────────────────────────────

#[tokio::test]
async fn records_list_and_person_survive_deletion() {
  let router = make_router().await;
  register(&router, "Alice", "a@x.com").await;
  send_json(&router, "POST", "/scan", Some(scan_body(1, Some("Chem")))).await;

  let records = send_json(&router, "GET", "/records", None).await;
  let rows = records.as_array().unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["name"], json!("Alice"));
  assert_eq!(rows[0]["lab_name"], json!("Chem"));
  assert_eq!(rows[0]["exit_time"], json!(null));
  let record_id = rows[0]["id"].as_i64().unwrap();

  let resp =
    send_json(&router, "DELETE", &format!("/records/{record_id}"), None).await;
  assert_eq!(resp["success"], json!(true));

  assert_eq!(send_json(&router, "GET", "/records", None).await, json!([]));

  // The person is untouched by record deletion.
  let person = send_json(&router, "GET", "/person/1", None).await;
  assert_eq!(person["success"], json!(true));
  assert_eq!(person["person"]["name"], json!("Alice"));
}

#[tokio::test]
async fn delete_all_records_empties_views_but_keeps_persons() {
  let router = make_router().await;
  register(&router, "Alice", "a@x.com").await;
  register(&router, "Bob", "b@x.com").await;
  send_json(&router, "POST", "/scan", Some(scan_body(1, None))).await;
  send_json(&router, "POST", "/scan", Some(scan_body(2, None))).await;

  let resp = send_json(&router, "DELETE", "/records", None).await;
  assert_eq!(resp["success"], json!(true));

  assert_eq!(send_json(&router, "GET", "/records", None).await, json!([]));
  let status = send_json(&router, "GET", "/current_lab_status", None).await;
  assert_eq!(status["current_occupants"], json!([]));

  assert_eq!(
    send_json(&router, "GET", "/person/2", None).await["success"],
    json!(true)
  );
}

#[tokio::test]
async fn person_not_found_reports_failure() {
  let router = make_router().await;

  let resp = send_json(&router, "GET", "/person/42", None).await;
  assert_eq!(resp["success"], json!(false));
  assert!(resp["message"].as_str().unwrap().contains("42"));
}

// ─── Exports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn history_export_downloads_a_workbook() {
  let router = make_router().await;
  register(&router, "Alice", "a@x.com").await;
  send_json(&router, "POST", "/scan", Some(scan_body(1, Some("Chem")))).await;

  let resp = send_raw(&router, "GET", "/export/excel", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(
    resp.headers().get(header::CONTENT_TYPE).unwrap(),
    labtrack_export::XLSX_CONTENT_TYPE
  );
  let disposition = resp
    .headers()
    .get(header::CONTENT_DISPOSITION)
    .unwrap()
    .to_str()
    .unwrap();
  assert!(disposition.contains("lab_records_export_"), "{disposition}");

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn current_status_export_downloads_a_workbook() {
  let router = make_router().await;

  let resp = send_raw(&router, "GET", "/export/current_status", None).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let disposition = resp
    .headers()
    .get(header::CONTENT_DISPOSITION)
    .unwrap()
    .to_str()
    .unwrap();
  assert!(disposition.contains("current_lab_status_"), "{disposition}");

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert_eq!(&bytes[..2], b"PK");
}
