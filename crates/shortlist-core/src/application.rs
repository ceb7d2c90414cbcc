//! Applications: a candidate's bid for a role on one course.
//!
//! Every application carries a rank that is unique across the whole store,
//! not per course. The rank is allocated by the store on insert and is only
//! rewritten afterwards by the ranking engine.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  ids::{ApplicationId, CandidateId, CourseId, Rank},
};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// How much time the candidate can commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
  PartTime,
  FullTime,
}

/// The teaching role applied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedRole {
  LabAssistant,
  Tutor,
}

/// Lowercase and fold `-` and ` ` onto `_`, so `"Part time"`, `"part-time"`
/// and `"part_time"` all compare equal.
fn fold(s: &str) -> String {
  s.trim()
    .chars()
    .map(|c| match c {
      '-' | ' ' => '_',
      c => c.to_ascii_lowercase(),
    })
    .collect()
}

impl Availability {
  /// The canonical text form stored in the database and sent over the wire.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::PartTime => "part_time",
      Self::FullTime => "full_time",
    }
  }

  /// Human-facing label, e.g. for free-text search.
  pub fn label(self) -> &'static str {
    match self {
      Self::PartTime => "part time",
      Self::FullTime => "full time",
    }
  }
}

impl FromStr for Availability {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match fold(s).as_str() {
      "part_time" => Ok(Self::PartTime),
      "full_time" => Ok(Self::FullTime),
      _ => Err(Error::InvalidEnumValue {
        field: "availability",
        value: s.to_owned(),
      }),
    }
  }
}

impl fmt::Display for Availability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl AppliedRole {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::LabAssistant => "lab_assistant",
      Self::Tutor => "tutor",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::LabAssistant => "lab assistant",
      Self::Tutor => "tutor",
    }
  }
}

impl FromStr for AppliedRole {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match fold(s).as_str() {
      "lab_assistant" => Ok(Self::LabAssistant),
      "tutor" => Ok(Self::Tutor),
      _ => Err(Error::InvalidEnumValue {
        field: "role",
        value: s.to_owned(),
      }),
    }
  }
}

impl fmt::Display for AppliedRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Application ─────────────────────────────────────────────────────────────

/// A persisted application row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
  pub application_id: ApplicationId,
  pub candidate_id:   CandidateId,
  pub course_id:      CourseId,
  pub availability:   Availability,
  pub role:           AppliedRole,
  pub rank:           Rank,
  /// Server-assigned; never changes after creation.
  pub submitted_at:   DateTime<Utc>,
}

/// Input to [`crate::store::ReviewStore::create_application`].
/// `rank` and `submitted_at` are always assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewApplication {
  pub candidate_id: CandidateId,
  pub course_id:    CourseId,
  pub availability: Availability,
  pub role:         AppliedRole,
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// A partial update as received from a caller. Values are raw text so that
/// validation against the allowed sets happens in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicationPatch {
  pub availability: Option<String>,
  pub role:         Option<String>,
}

/// An [`ApplicationPatch`] whose values have been checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidPatch {
  pub availability: Option<Availability>,
  pub role:         Option<AppliedRole>,
}

impl ApplicationPatch {
  /// Parse both fields, failing with `InvalidEnumValue` on the first bad one.
  pub fn validate(&self) -> Result<ValidPatch> {
    Ok(ValidPatch {
      availability: self
        .availability
        .as_deref()
        .map(str::parse::<Availability>)
        .transpose()?,
      role:         self.role.as_deref().map(str::parse::<AppliedRole>).transpose()?,
    })
  }
}

impl ValidPatch {
  pub fn is_empty(&self) -> bool {
    self.availability.is_none() && self.role.is_none()
  }

  /// Apply onto an existing row, leaving absent fields untouched.
  pub fn apply(&self, app: &mut Application) {
    if let Some(a) = self.availability {
      app.availability = a;
    }
    if let Some(r) = self.role {
      app.role = r;
    }
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// The full candidate-facing submission: the application itself plus the
/// credential and skills the candidate declares alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
  pub candidate_id: CandidateId,
  /// Matched against course names; see
  /// [`Directory::course_by_code`](crate::directory::Directory::course_by_code).
  pub course_code:  String,
  pub role:         String,
  pub availability: String,
  pub degree:       String,
  pub level:        String,
  /// Comma-separated skill names.
  pub skills:       String,
}

/// A [`Submission`] whose text fields have been checked and normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
  pub candidate_id: CandidateId,
  pub course_code:  String,
  pub role:         AppliedRole,
  pub availability: Availability,
  pub degree:       String,
  pub level:        String,
  /// Trimmed, non-empty, first occurrence kept.
  pub skills:       Vec<String>,
}

fn required(value: &str, field: &'static str) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::MissingField(field));
  }
  Ok(trimmed.to_owned())
}

/// Split a comma-separated skill list, dropping blanks and repeats.
pub fn split_skills(raw: &str) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
    if !out.iter().any(|existing| existing == name) {
      out.push(name.to_owned());
    }
  }
  out
}

impl Submission {
  pub fn validate(&self) -> Result<ValidSubmission> {
    let course_code = required(&self.course_code, "course_code")?;
    let role: AppliedRole = required(&self.role, "role")?.parse()?;
    let availability: Availability =
      required(&self.availability, "availability")?.parse()?;
    let degree = required(&self.degree, "degree")?;
    let level = required(&self.level, "level")?;
    let skills = split_skills(&required(&self.skills, "skills")?);
    if skills.is_empty() {
      return Err(Error::MissingField("skills"));
    }

    Ok(ValidSubmission {
      candidate_id: self.candidate_id,
      course_code,
      role,
      availability,
      degree,
      level,
      skills,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ErrorKind;

  #[test]
  fn enums_accept_every_spelling() {
    for s in ["part_time", "part-time", "Part time", " PART_TIME "] {
      assert_eq!(s.parse::<Availability>().unwrap(), Availability::PartTime);
    }
    for s in ["lab_assistant", "lab assistant", "Lab-Assistant"] {
      assert_eq!(s.parse::<AppliedRole>().unwrap(), AppliedRole::LabAssistant);
    }
    assert_eq!("tutor".parse::<AppliedRole>().unwrap(), AppliedRole::Tutor);
  }

  #[test]
  fn unknown_enum_value_is_rejected() {
    let err = "sometimes".parse::<Availability>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEnumValue);
    let err = "professor".parse::<AppliedRole>().unwrap_err();
    assert!(matches!(err, Error::InvalidEnumValue { field: "role", .. }));
  }

  #[test]
  fn enums_serialise_snake_case() {
    let json = serde_json::to_string(&AppliedRole::LabAssistant).unwrap();
    assert_eq!(json, "\"lab_assistant\"");
    let back: Availability = serde_json::from_str("\"full_time\"").unwrap();
    assert_eq!(back, Availability::FullTime);
  }

  #[test]
  fn patch_validation_is_all_or_nothing() {
    let patch = ApplicationPatch {
      availability: Some("full time".into()),
      role:         Some("janitor".into()),
    };
    assert_eq!(patch.validate().unwrap_err().kind(), ErrorKind::InvalidEnumValue);

    let patch = ApplicationPatch {
      availability: None,
      role:         Some("tutor".into()),
    };
    let valid = patch.validate().unwrap();
    assert_eq!(valid.role, Some(AppliedRole::Tutor));
    assert!(valid.availability.is_none());
    assert!(ApplicationPatch::default().validate().unwrap().is_empty());
  }

  #[test]
  fn skills_are_trimmed_and_deduplicated() {
    assert_eq!(
      split_skills(" Rust, SQL ,, rust,Rust "),
      vec!["Rust".to_string(), "SQL".into(), "rust".into()]
    );
  }

  #[test]
  fn submission_requires_every_field() {
    let mut sub = Submission {
      candidate_id: CandidateId(1),
      course_code:  "COSC2758".into(),
      role:         "tutor".into(),
      availability: "part_time".into(),
      degree:       "Computer Science".into(),
      level:        "Bachelor".into(),
      skills:       "Rust, SQL".into(),
    };
    let valid = sub.validate().unwrap();
    assert_eq!(valid.skills, vec!["Rust".to_string(), "SQL".into()]);

    sub.degree = "   ".into();
    assert!(matches!(sub.validate(), Err(Error::MissingField("degree"))));

    sub.degree = "CS".into();
    sub.skills = " , ,".into();
    assert!(matches!(sub.validate(), Err(Error::MissingField("skills"))));
  }
}
