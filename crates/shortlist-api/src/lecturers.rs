//! Lecturer-scoped endpoints: the applicant view and ranking.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/lecturers/{id}/applicants` | [`ApplicantFilter`] query params |
//! | `GET`  | `/lecturers/{id}/selections` | Selected application ids |
//! | `GET`  | `/lecturers/{id}/selection-labels` | Labels over the visible set |
//! | `PUT`  | `/lecturers/{id}/ranking` | Body: `{"order":[...]}` |
//! | `POST` | `/lecturers/{id}/ranking/move` | Body: [`MoveBody`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shortlist_core::{
  ApplicationId, LecturerId,
  application::Application,
  ranking::Direction,
  selection::{SelectionLabel, label_selections},
  store::ReviewStore,
  view::{ApplicantFilter, ApplicantView, build_applicant_view},
};

use crate::error::ApiError;

// ─── Applicant view ───────────────────────────────────────────────────────────

/// `GET /lecturers/{id}/applicants[?search=...][&search_field=...][&course=...]
/// [&availability=...][&role=...][&selected_only=true][&sort=...][&order=...]`
///
/// With no query params this is the plain rank-ordered view.
pub async fn applicants<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(lecturer): Path<LecturerId>,
  Query(filter): Query<ApplicantFilter>,
) -> Result<Json<Vec<ApplicantView>>, ApiError> {
  let records = build_applicant_view(store.as_ref(), lecturer)
    .await
    .map_err(ApiError::from_store)?;

  let selected = if filter.selected_only {
    store
      .list_selected(lecturer)
      .await
      .map_err(ApiError::from_store)?
  } else {
    Vec::new()
  };

  Ok(Json(filter.apply(records, &selected)?))
}

/// `GET /lecturers/{id}/selections`
pub async fn selected<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(lecturer): Path<LecturerId>,
) -> Result<Json<Vec<ApplicationId>>, ApiError> {
  let ids = store
    .list_selected(lecturer)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(ids))
}

#[derive(Debug, Serialize)]
pub struct LabelledSelection {
  pub application_id: ApplicationId,
  pub count:          u64,
  pub label:          SelectionLabel,
}

/// `GET /lecturers/{id}/selection-labels`
///
/// Labels each application in the lecturer's view against the others in
/// that same view, in rank order.
pub async fn labels<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(lecturer): Path<LecturerId>,
) -> Result<Json<Vec<LabelledSelection>>, ApiError> {
  let records = build_applicant_view(store.as_ref(), lecturer)
    .await
    .map_err(ApiError::from_store)?;

  let mut scope = Vec::with_capacity(records.len());
  for r in &records {
    let count = store
      .count_selections(r.application_id)
      .await
      .map_err(ApiError::from_store)?;
    scope.push((r.application_id, count));
  }

  let out = scope
    .iter()
    .zip(label_selections(&scope))
    .map(|((application_id, count), (_, label))| LabelledSelection {
      application_id: *application_id,
      count: *count,
      label,
    })
    .collect();
  Ok(Json(out))
}

// ─── Ranking ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReorderBody {
  /// Desired top-to-bottom order of a subset of the lecturer's applications.
  pub order: Vec<ApplicationId>,
}

/// `PUT /lecturers/{id}/ranking`: returns the reordered rows in the
/// requested order.
pub async fn reorder<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(lecturer): Path<LecturerId>,
  Json(body): Json<ReorderBody>,
) -> Result<Json<Vec<Application>>, ApiError> {
  let apps = store
    .reorder(lecturer, body.order)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(apps))
}

#[derive(Debug, Deserialize)]
pub struct MoveBody {
  pub application_id: ApplicationId,
  pub direction:      Direction,
}

/// `POST /lecturers/{id}/ranking/move`
pub async fn move_one<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(lecturer): Path<LecturerId>,
  Json(body): Json<MoveBody>,
) -> Result<Json<Vec<Application>>, ApiError> {
  let apps = store
    .move_application(lecturer, body.application_id, body.direction)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(apps))
}
