//! Handlers for the comment ledger.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `PUT`  | `/comments` | Body: [`UpsertBody`]; create or replace |
//! | `GET`  | `/comments` | `?lecturer_id&application_id`; empty text if none |
//! | `GET`  | `/applications/{id}/comments` | Every lecturer's comment |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shortlist_core::{
  ApplicationId, LecturerId, comment::Comment, store::ReviewStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UpsertBody {
  pub lecturer_id:    LecturerId,
  pub application_id: ApplicationId,
  pub text:           String,
}

/// `PUT /comments`
pub async fn upsert<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<UpsertBody>,
) -> Result<Json<Comment>, ApiError> {
  let comment = store
    .upsert_comment(body.lecturer_id, body.application_id, body.text)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(comment))
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentKey {
  pub lecturer_id:    LecturerId,
  pub application_id: ApplicationId,
}

#[derive(Debug, Serialize)]
pub struct CommentText {
  #[serde(flatten)]
  pub key:  CommentKey,
  pub text: String,
}

/// `GET /comments?lecturer_id=...&application_id=...`
pub async fn get_one<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Query(key): Query<CommentKey>,
) -> Result<Json<CommentText>, ApiError> {
  let text = store
    .get_comment(key.lecturer_id, key.application_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(CommentText { key, text }))
}

/// `GET /applications/{id}/comments`
pub async fn for_application<S: ReviewStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<ApplicationId>,
) -> Result<Json<Vec<Comment>>, ApiError> {
  let comments = store.list_comments(id).await.map_err(ApiError::from_store)?;
  Ok(Json(comments))
}
