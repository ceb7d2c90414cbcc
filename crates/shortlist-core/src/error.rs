//! Error types for `shortlist-core`.

use thiserror::Error;

use crate::ids::{ApplicationId, CandidateId, CourseId, LecturerId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("application not found: {0}")]
  ApplicationNotFound(ApplicationId),

  #[error("course not found: {0:?}")]
  CourseNotFound(String),

  #[error(
    "candidate {candidate} already applied to course {course} as {role}"
  )]
  DuplicateApplication {
    candidate: CandidateId,
    course:    CourseId,
    role:      &'static str,
  },

  #[error("invalid {field} value: {value:?}")]
  InvalidEnumValue { field: &'static str, value: String },

  #[error("unknown lecturer: {0}")]
  UnknownLecturer(LecturerId),

  #[error("unknown candidate: {0}")]
  UnknownCandidate(CandidateId),

  #[error("unknown course: {0}")]
  UnknownCourse(CourseId),

  #[error("unknown application: {0}")]
  UnknownApplication(ApplicationId),

  #[error("application {application} is not visible to lecturer {lecturer}")]
  NotInScope {
    lecturer:    LecturerId,
    application: ApplicationId,
  },

  #[error("comment cannot be empty")]
  EmptyComment,

  #[error("application {0} appears more than once in the requested order")]
  RepeatedInOrder(ApplicationId),

  #[error("missing required field: {0}")]
  MissingField(&'static str),
}

/// The caller-facing classification of an [`Error`].
///
/// Transports map on this rather than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  DuplicateApplication,
  InvalidEnumValue,
  InvalidReference,
  EmptyComment,
  InvalidOrder,
  MissingField,
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::ApplicationNotFound(_) | Self::CourseNotFound(_) => {
        ErrorKind::NotFound
      }
      Self::DuplicateApplication { .. } => ErrorKind::DuplicateApplication,
      Self::InvalidEnumValue { .. } => ErrorKind::InvalidEnumValue,
      Self::UnknownLecturer(_)
      | Self::UnknownCandidate(_)
      | Self::UnknownCourse(_)
      | Self::UnknownApplication(_)
      | Self::NotInScope { .. } => ErrorKind::InvalidReference,
      Self::EmptyComment => ErrorKind::EmptyComment,
      Self::RepeatedInOrder(_) => ErrorKind::InvalidOrder,
      Self::MissingField(_) => ErrorKind::MissingField,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Implemented by backend error types so generic callers can raise domain
/// errors and recover their [`ErrorKind`] without knowing the backend.
///
/// `kind` returns `None` for infrastructure failures (I/O, decoding, ...).
pub trait StoreError:
  std::error::Error + From<Error> + Send + Sync + 'static
{
  fn kind(&self) -> Option<ErrorKind>;
}

impl StoreError for Error {
  fn kind(&self) -> Option<ErrorKind> { Some(Error::kind(self)) }
}
