//! Comment ledger types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  ids::{ApplicationId, LecturerId},
};

/// One lecturer's note on one application. At most one exists per
/// `(lecturer_id, application_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub lecturer_id:    LecturerId,
  pub application_id: ApplicationId,
  pub text:           String,
  /// Time of the most recent write.
  pub updated_at:     DateTime<Utc>,
}

/// Trim `text`, rejecting it if nothing is left.
pub fn normalize(text: &str) -> Result<String> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return Err(Error::EmptyComment);
  }
  Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_trims() {
    assert_eq!(normalize("  strong candidate \n").unwrap(), "strong candidate");
  }

  #[test]
  fn blank_comment_is_rejected() {
    assert!(matches!(normalize(" \t\n"), Err(Error::EmptyComment)));
    assert!(matches!(normalize(""), Err(Error::EmptyComment)));
  }
}
