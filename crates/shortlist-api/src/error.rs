//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use shortlist_core::{ErrorKind, StoreError};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// A domain rule rejected the request; nothing was written.
  #[error("{message}")]
  Domain { kind: ErrorKind, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error by its [`StoreError::kind`].
  pub fn from_store<E: StoreError>(e: E) -> Self {
    match e.kind() {
      Some(kind) => ApiError::Domain { kind, message: e.to_string() },
      None => ApiError::Store(Box::new(e)),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Domain { kind, .. } => match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::DuplicateApplication => StatusCode::CONFLICT,
        ErrorKind::InvalidEnumValue
        | ErrorKind::EmptyComment
        | ErrorKind::InvalidOrder
        | ErrorKind::MissingField => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidReference => StatusCode::UNPROCESSABLE_ENTITY,
      },
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// Request bodies are validated with the core rules before reaching a store.
impl From<shortlist_core::Error> for ApiError {
  fn from(e: shortlist_core::Error) -> Self {
    ApiError::Domain { kind: e.kind(), message: e.to_string() }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::warn!(%status, error = %self, "request rejected");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use shortlist_core::{ApplicationId, Error};

  use super::*;

  #[test]
  fn domain_kinds_map_to_statuses() {
    let cases = [
      (Error::ApplicationNotFound(ApplicationId(1)), StatusCode::NOT_FOUND),
      (Error::EmptyComment, StatusCode::BAD_REQUEST),
      (Error::RepeatedInOrder(ApplicationId(1)), StatusCode::BAD_REQUEST),
      (Error::MissingField("degree"), StatusCode::BAD_REQUEST),
      (
        Error::UnknownApplication(ApplicationId(1)),
        StatusCode::UNPROCESSABLE_ENTITY,
      ),
    ];
    for (err, status) in cases {
      assert_eq!(ApiError::from_store(err).status(), status);
    }
  }
}
