//! HTTP wiring for the Shortlist server: configuration and the root router.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use serde::Deserialize;
use shortlist_core::store::ReviewStore;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SHORTLIST_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api`, with request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: ReviewStore + 'static,
{
  Router::new()
    .nest("/api", shortlist_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use shortlist_core::{CandidateId, LecturerId};
  use shortlist_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  struct Seed {
    store:     Arc<SqliteStore>,
    lecturer:  LecturerId,
    other:     LecturerId,
    course_id: i64,
    candidate: CandidateId,
  }

  async fn seed() -> Seed {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let lecturer = store.add_lecturer("Ada", "Byron").await.unwrap();
    let other = store.add_lecturer("Alan", "Turing").await.unwrap();
    let course = store
      .add_course("COSC2758 Full Stack Development", lecturer)
      .await
      .unwrap();
    store.add_course("COSC2222 Web", other).await.unwrap();
    let candidate = store.add_candidate("Zoe", "Park").await.unwrap();
    Seed {
      store: Arc::new(store),
      lecturer,
      other,
      course_id: course.course_id.0,
      candidate,
    }
  }

  async fn send(
    store: &Arc<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(match body {
        Some(v) => Body::from(v.to_string()),
        None => Body::empty(),
      })
      .unwrap();
    let resp = app(store.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn create(s: &Seed, candidate: CandidateId, role: &str) -> (StatusCode, Value) {
    send(
      &s.store,
      "POST",
      "/api/applications",
      Some(json!({
        "candidate_id": candidate.0,
        "course_id": s.course_id,
        "availability": "part_time",
        "role": role,
      })),
    )
    .await
  }

  // ── Applications ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_duplicate_is_conflict() {
    let s = seed().await;

    let (status, body) = create(&s, s.candidate, "tutor").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["rank"], 1);
    assert_eq!(body["role"], "tutor");

    let (status, body) = create(&s, s.candidate, "tutor").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already applied"));
  }

  #[tokio::test]
  async fn bad_enum_is_bad_request() {
    let s = seed().await;
    let (status, body) = create(&s, s.candidate, "professor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn unknown_candidate_is_unprocessable() {
    let s = seed().await;
    let (status, _) = create(&s, CandidateId(999), "tutor").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn missing_application_is_not_found() {
    let s = seed().await;
    let (status, body) = send(&s.store, "GET", "/api/applications/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "application not found: 77");
  }

  #[tokio::test]
  async fn patch_and_delete_round_trip() {
    let s = seed().await;
    let (_, created) = create(&s, s.candidate, "tutor").await;
    let id = created["application_id"].as_i64().unwrap();

    let (status, body) = send(
      &s.store,
      "PATCH",
      &format!("/api/applications/{id}"),
      Some(json!({ "availability": "full time" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availability"], "full_time");
    assert_eq!(body["rank"], created["rank"]);

    let (status, _) =
      send(&s.store, "DELETE", &format!("/api/applications/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&s.store, "GET", "/api/applications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn list_filters_by_candidate() {
    let s = seed().await;
    let other = s.store.add_candidate("Mia", "Chen").await.unwrap();
    create(&s, s.candidate, "tutor").await;
    create(&s, other, "tutor").await;

    let (_, body) = send(
      &s.store,
      "GET",
      &format!("/api/applications?candidate_id={}", other.0),
      None,
    )
    .await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["candidate_id"], other.0);
  }

  #[tokio::test]
  async fn submit_feeds_the_applicant_view() {
    let s = seed().await;
    let (status, _) = send(
      &s.store,
      "POST",
      "/api/applications/submit",
      Some(json!({
        "candidate_id": s.candidate.0,
        "course_code": "COSC2758",
        "role": "lab assistant",
        "availability": "Part Time",
        "degree": "Computer Science",
        "level": "Bachelor",
        "skills": "Rust, SQL",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/lecturers/{}/applicants", s.lecturer);
    let (status, body) = send(&s.store, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["candidate_name"], "Zoe Park");
    assert_eq!(rows[0]["credentials_text"], "Computer Science Bachelor");
    assert_eq!(rows[0]["skills_text"], "Rust, SQL");
    assert_eq!(rows[0]["role"], "lab_assistant");

    // The other lecturer teaches a different course and sees nothing.
    let uri = format!("/api/lecturers/{}/applicants", s.other);
    let (_, body) = send(&s.store, "GET", &uri, None).await;
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn applicant_filter_params_are_applied() {
    let s = seed().await;
    let mia = s.store.add_candidate("Mia", "Chen").await.unwrap();
    create(&s, s.candidate, "tutor").await;
    create(&s, mia, "tutor").await;

    let uri = format!(
      "/api/lecturers/{}/applicants?search=mia&search_field=name",
      s.lecturer
    );
    let (status, body) = send(&s.store, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["candidate_name"], "Mia Chen");
  }

  #[tokio::test]
  async fn applicant_filter_folds_enum_spellings() {
    let s = seed().await;
    create(&s, s.candidate, "tutor").await;

    let uri = format!(
      "/api/lecturers/{}/applicants?availability=Part-Time&role=Tutor",
      s.lecturer
    );
    let (status, body) = send(&s.store, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let uri = format!("/api/lecturers/{}/applicants?role=professor", s.lecturer);
    let (status, body) = send(&s.store, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("professor"));
  }

  // ── Ranking ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn reorder_and_move() {
    let s = seed().await;
    let mia = s.store.add_candidate("Mia", "Chen").await.unwrap();
    let (_, a) = create(&s, s.candidate, "tutor").await;
    let (_, b) = create(&s, mia, "tutor").await;
    let (a, b) = (a["application_id"].clone(), b["application_id"].clone());

    let uri = format!("/api/lecturers/{}/ranking", s.lecturer);
    let (status, body) = send(&s.store, "PUT", &uri, Some(json!({ "order": [b, a] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["application_id"], b);
    assert_eq!(body[0]["rank"], 1);
    assert_eq!(body[1]["rank"], 2);

    let (status, _) =
      send(&s.store, "PUT", &uri, Some(json!({ "order": [a, a] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/lecturers/{}/ranking/move", s.lecturer);
    let (status, body) = send(
      &s.store,
      "POST",
      &uri,
      Some(json!({ "application_id": a, "direction": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["application_id"], a);
    assert_eq!(body[0]["rank"], 1);
  }

  #[tokio::test]
  async fn reorder_outside_scope_is_unprocessable() {
    let s = seed().await;
    let (_, a) = create(&s, s.candidate, "tutor").await;

    let uri = format!("/api/lecturers/{}/ranking", s.other);
    let (status, _) = send(
      &s.store,
      "PUT",
      &uri,
      Some(json!({ "order": [a["application_id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  // ── Selections and comments ─────────────────────────────────────────────────

  #[tokio::test]
  async fn toggle_count_and_labels() {
    let s = seed().await;
    let mia = s.store.add_candidate("Mia", "Chen").await.unwrap();
    let (_, a) = create(&s, s.candidate, "tutor").await;
    create(&s, mia, "tutor").await;
    let a = a["application_id"].as_i64().unwrap();

    let toggle = json!({ "lecturer_id": s.lecturer.0, "application_id": a });
    let (status, body) =
      send(&s.store, "POST", "/api/selections/toggle", Some(toggle.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected"], true);

    let (_, body) =
      send(&s.store, "GET", &format!("/api/applications/{a}/selections"), None).await;
    assert_eq!(body["count"], 1);

    let uri = format!("/api/lecturers/{}/selection-labels", s.lecturer);
    let (_, body) = send(&s.store, "GET", &uri, None).await;
    assert_eq!(body[0]["label"], "most_selected");
    assert_eq!(body[1]["label"], "not_selected");

    let (_, body) =
      send(&s.store, "POST", "/api/selections/toggle", Some(toggle)).await;
    assert_eq!(body["selected"], false);

    let uri = format!("/api/lecturers/{}/selections", s.lecturer);
    let (_, body) = send(&s.store, "GET", &uri, None).await;
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn comment_upsert_and_read() {
    let s = seed().await;
    let (_, a) = create(&s, s.candidate, "tutor").await;
    let a = a["application_id"].as_i64().unwrap();

    let put = |text: &str| {
      json!({ "lecturer_id": s.lecturer.0, "application_id": a, "text": text })
    };

    let (status, _) = send(&s.store, "PUT", "/api/comments", Some(put("   "))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    send(&s.store, "PUT", "/api/comments", Some(put("good"))).await;
    let (status, body) = send(&s.store, "PUT", "/api/comments", Some(put("great"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "great");

    let uri = format!("/api/comments?lecturer_id={}&application_id={a}", s.lecturer);
    let (_, body) = send(&s.store, "GET", &uri, None).await;
    assert_eq!(body["text"], "great");

    let (_, body) =
      send(&s.store, "GET", &format!("/api/applications/{a}/comments"), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
  }
}
