//! Read-only collaborators: the course and candidate directories.
//!
//! The review engine never writes these records. Signup, course
//! administration and profile editing belong to the surrounding system; the
//! engine only looks things up.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  StoreError,
  ids::{CandidateId, CourseId, LecturerId},
};

/// A course as seen by the review engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  pub course_id:   CourseId,
  /// Display name; usually begins with the course code, e.g.
  /// `"COSC2758 Full Stack Development"`.
  pub name:        String,
  pub lecturer_id: LecturerId,
}

/// A qualification declared by a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
  pub degree: String,
  pub level:  String,
}

impl Credential {
  /// `"<degree> <level>"`, the form shown to lecturers.
  pub fn display(&self) -> String { format!("{} {}", self.degree, self.level) }
}

/// Lookups the engine needs from the course and candidate directories.
pub trait Directory: Send + Sync {
  type Error: StoreError;

  // ── Courses ───────────────────────────────────────────────────────────────

  /// Every course taught by `lecturer`, ordered by id. Empty for an unknown
  /// lecturer.
  fn courses_taught_by(
    &self,
    lecturer: LecturerId,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + '_;

  /// Resolve a course code such as `"COSC2758"`. The code matches as a
  /// case-insensitive substring of the course name; the lowest id wins.
  /// Fails with `NotFound` when nothing matches.
  fn course_by_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Course, Self::Error>> + Send + 'a;

  // ── Candidates ────────────────────────────────────────────────────────────

  /// `"<name> <surname>"`. Fails with `InvalidReference` for an unknown
  /// candidate.
  fn candidate_display_name(
    &self,
    candidate: CandidateId,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  fn credentials(
    &self,
    candidate: CandidateId,
  ) -> impl Future<Output = Result<Vec<Credential>, Self::Error>> + Send + '_;

  /// Skill names, in the order they were first recorded for the candidate.
  fn skills(
    &self,
    candidate: CandidateId,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Names of courses the candidate previously held a role on.
  fn prior_role_course_names(
    &self,
    candidate: CandidateId,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
