//! Integer identifiers shared by every layer.
//!
//! Each id is a transparent newtype over the row id used by the backing
//! store, so an application id cannot be passed where a course id is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Globally unique ordinal position of an application. Lower is better.
pub type Rank = i64;

macro_rules! id_type {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }

    impl From<i64> for $name {
      fn from(v: i64) -> Self { Self(v) }
    }
  };
}

id_type!(
  /// Identity of an [`Application`](crate::application::Application).
  ApplicationId
);
id_type!(
  /// Identity of a candidate in the candidate directory.
  CandidateId
);
id_type!(
  /// Identity of a course in the course directory.
  CourseId
);
id_type!(
  /// Identity of a lecturer; owner of selections and comments.
  LecturerId
);
