//! Handlers for `/applications` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/applications` | optional `candidate_id`, `course_id` |
//! | `POST`   | `/applications` | Body: [`NewApplicationBody`]; returns 201 |
//! | `POST`   | `/applications/submit` | Body: [`Submission`]; returns 201 |
//! | `GET`    | `/applications/{id}` | Single application |
//! | `PATCH`  | `/applications/{id}` | Body: [`ApplicationPatch`] |
//! | `DELETE` | `/applications/{id}` | Returns the removed row |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use shortlist_core::{
  ApplicationId, CandidateId, CourseId,
  application::{
    Application, ApplicationPatch, AppliedRole, Availability, NewApplication,
    Submission,
  },
  store::ReviewStore,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub candidate_id: Option<CandidateId>,
  pub course_id:    Option<CourseId>,
}

/// `GET /applications[?candidate_id=...][&course_id=...]`
///
/// Results are ordered by ascending rank.
pub async fn list<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Application>>, ApiError> {
  let mut apps = match (params.candidate_id, params.course_id) {
    (Some(candidate), _) => store.list_by_candidate(candidate).await,
    (None, Some(course)) => store.list_by_course(course).await,
    (None, None) => store.list_applications().await,
  }
  .map_err(ApiError::from_store)?;

  if let (Some(_), Some(course)) = (params.candidate_id, params.course_id) {
    apps.retain(|a| a.course_id == course);
  }
  Ok(Json(apps))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /applications/{id}`
pub async fn get_one<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<ApplicationId>,
) -> Result<Json<Application>, ApiError> {
  let app = store.get_application(id).await.map_err(ApiError::from_store)?;
  Ok(Json(app))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /applications`. Enum fields are free text so
/// a bad value is reported as an invalid enum rather than a parse failure.
#[derive(Debug, Deserialize)]
pub struct NewApplicationBody {
  pub candidate_id: CandidateId,
  pub course_id:    CourseId,
  pub availability: String,
  pub role:         String,
}

impl TryFrom<NewApplicationBody> for NewApplication {
  type Error = shortlist_core::Error;

  fn try_from(b: NewApplicationBody) -> Result<Self, Self::Error> {
    Ok(NewApplication {
      candidate_id: b.candidate_id,
      course_id:    b.course_id,
      availability: b.availability.parse::<Availability>()?,
      role:         b.role.parse::<AppliedRole>()?,
    })
  }
}

/// `POST /applications`: returns 201 + the stored application.
pub async fn create<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewApplicationBody>,
) -> Result<impl IntoResponse, ApiError> {
  let input = NewApplication::try_from(body)?;
  let app = store
    .create_application(input)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(app)))
}

/// `POST /applications/submit`: the full candidate submission.
pub async fn submit<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<Submission>,
) -> Result<impl IntoResponse, ApiError> {
  let app = store
    .submit_application(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(app)))
}

// ─── Update / remove ──────────────────────────────────────────────────────────

/// `PATCH /applications/{id}`
pub async fn update<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<ApplicationId>,
  Json(patch): Json<ApplicationPatch>,
) -> Result<Json<Application>, ApiError> {
  let app = store
    .update_application(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(app))
}

/// `DELETE /applications/{id}`
pub async fn remove<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<ApplicationId>,
) -> Result<Json<Application>, ApiError> {
  let app = store
    .remove_application(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(app))
}
