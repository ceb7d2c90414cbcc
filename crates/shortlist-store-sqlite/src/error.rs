//! Error type for `shortlist-store-sqlite`.

use shortlist_core::{ErrorKind, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A domain rule was violated; nothing was written.
  #[error(transparent)]
  Core(#[from] shortlist_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored value does not decode into its domain type.
  #[error("corrupt row: {0}")]
  Decode(String),
}

impl StoreError for Error {
  fn kind(&self) -> Option<ErrorKind> {
    match self {
      Error::Core(e) => Some(e.kind()),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
