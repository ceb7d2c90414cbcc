//! Handlers for the selection ledger.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shortlist_core::{
  ApplicationId, LecturerId, selection::ToggleOutcome, store::ReviewStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ToggleBody {
  pub lecturer_id:    LecturerId,
  pub application_id: ApplicationId,
}

/// `POST /selections/toggle`
pub async fn toggle<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<ToggleBody>,
) -> Result<Json<ToggleOutcome>, ApiError> {
  let outcome = store
    .toggle_selection(body.lecturer_id, body.application_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
pub struct SelectionCount {
  pub application_id: ApplicationId,
  pub count:          u64,
}

/// `GET /applications/{id}/selections`: how many lecturers selected it.
pub async fn count<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<ApplicationId>,
) -> Result<Json<SelectionCount>, ApiError> {
  let count = store.count_selections(id).await.map_err(ApiError::from_store)?;
  Ok(Json(SelectionCount { application_id: id, count }))
}
