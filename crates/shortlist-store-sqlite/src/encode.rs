//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Enums are stored as their
//! canonical snake_case text; the schema's CHECK constraints reject anything
//! else.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use shortlist_core::{
  ApplicationId, CandidateId, CourseId, LecturerId,
  application::{Application, AppliedRole, Availability},
  comment::Comment,
  directory::Course,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enums ───────────────────────────────────────────────────────────────────

pub fn decode_availability(s: &str) -> Result<Availability> {
  match s {
    "part_time" => Ok(Availability::PartTime),
    "full_time" => Ok(Availability::FullTime),
    other => Err(Error::Decode(format!("unknown availability: {other:?}"))),
  }
}

pub fn decode_role(s: &str) -> Result<AppliedRole> {
  match s {
    "lab_assistant" => Ok(AppliedRole::LabAssistant),
    "tutor" => Ok(AppliedRole::Tutor),
    other => Err(Error::Decode(format!("unknown role: {other:?}"))),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawApplication::from_row`].
pub const APPLICATION_COLUMNS: &str =
  "application_id, candidate_id, course_id, availability, role, rank, submitted_at";

/// Raw values read directly from an `applications` row.
pub struct RawApplication {
  pub application_id: i64,
  pub candidate_id:   i64,
  pub course_id:      i64,
  pub availability:   String,
  pub role:           String,
  pub rank:           i64,
  pub submitted_at:   String,
}

impl RawApplication {
  /// Read a row selected with [`APPLICATION_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      application_id: row.get(0)?,
      candidate_id:   row.get(1)?,
      course_id:      row.get(2)?,
      availability:   row.get(3)?,
      role:           row.get(4)?,
      rank:           row.get(5)?,
      submitted_at:   row.get(6)?,
    })
  }

  pub fn into_application(self) -> Result<Application> {
    Ok(Application {
      application_id: ApplicationId(self.application_id),
      candidate_id:   CandidateId(self.candidate_id),
      course_id:      CourseId(self.course_id),
      availability:   decode_availability(&self.availability)?,
      role:           decode_role(&self.role)?,
      rank:           self.rank,
      submitted_at:   decode_dt(&self.submitted_at)?,
    })
  }
}

pub fn into_applications(raws: Vec<RawApplication>) -> Result<Vec<Application>> {
  raws.into_iter().map(RawApplication::into_application).collect()
}

/// Raw values read directly from a `comments` row.
pub struct RawComment {
  pub lecturer_id:    i64,
  pub application_id: i64,
  pub text:           String,
  pub updated_at:     String,
}

impl RawComment {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      lecturer_id:    row.get(0)?,
      application_id: row.get(1)?,
      text:           row.get(2)?,
      updated_at:     row.get(3)?,
    })
  }

  pub fn into_comment(self) -> Result<Comment> {
    Ok(Comment {
      lecturer_id:    LecturerId(self.lecturer_id),
      application_id: ApplicationId(self.application_id),
      text:           self.text,
      updated_at:     decode_dt(&self.updated_at)?,
    })
  }
}

/// Read a `(course_id, name, lecturer_id)` row. Courses hold no encoded
/// columns, so they decode directly.
pub fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
  Ok(Course {
    course_id:   CourseId(row.get(0)?),
    name:        row.get(1)?,
    lecturer_id: LecturerId(row.get(2)?),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn datetime_roundtrip() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn enum_columns_decode_canonical_text_only() {
    assert_eq!(decode_availability("part_time").unwrap(), Availability::PartTime);
    assert_eq!(decode_role("lab_assistant").unwrap(), AppliedRole::LabAssistant);
    assert!(matches!(decode_role("lab assistant"), Err(Error::Decode(_))));
  }
}
