//! The applicant view: the flat read model a lecturer's screen consumes.
//!
//! Never stored, always derived: [`build_applicant_view`] joins applications
//! on the lecturer's courses with directory data and the lecturer's own
//! comments. [`ApplicantFilter`] is an optional presentation layer over the
//! result and never changes which records the builder returns.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  application::{Application, AppliedRole, Availability},
  directory::Credential,
  ids::{ApplicationId, CandidateId, LecturerId, Rank},
  store::ReviewStore,
};

/// One application as presented to one lecturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantView {
  pub application_id:   ApplicationId,
  pub candidate_name:   String,
  pub course_name:      String,
  pub role:             AppliedRole,
  /// `"<degree> <level>"` entries joined with `", "`.
  pub credentials_text: String,
  pub skills_text:      String,
  pub prior_roles_text: String,
  pub availability:     Availability,
  /// This lecturer's comment; empty if they have not written one.
  pub comment:          String,
  pub rank:             Rank,
}

/// Directory data for one candidate, fetched once per build.
#[derive(Debug, Clone, Default)]
struct CandidateDetails {
  name:        String,
  credentials: String,
  skills:      String,
  prior_roles: String,
}

impl ApplicantView {
  fn assemble(
    app: &Application,
    course_name: String,
    details: &CandidateDetails,
    comment: String,
  ) -> Self {
    Self {
      application_id: app.application_id,
      candidate_name: details.name.clone(),
      course_name,
      role: app.role,
      credentials_text: details.credentials.clone(),
      skills_text: details.skills.clone(),
      prior_roles_text: details.prior_roles.clone(),
      availability: app.availability,
      comment,
      rank: app.rank,
    }
  }
}

/// Join a list of credentials into display text.
pub fn credentials_text(credentials: &[Credential]) -> String {
  credentials
    .iter()
    .map(Credential::display)
    .collect::<Vec<_>>()
    .join(", ")
}

/// Build the applicant view for `lecturer`, ordered by ascending rank.
///
/// Only applications on courses the lecturer teaches are included. A
/// lecturer with no courses gets an empty list.
pub async fn build_applicant_view<S: ReviewStore>(
  store: &S,
  lecturer: LecturerId,
) -> Result<Vec<ApplicantView>, S::Error> {
  let courses = store.courses_taught_by(lecturer).await?;
  if courses.is_empty() {
    return Ok(Vec::new());
  }

  let mut apps = Vec::new();
  for course in &courses {
    apps.extend(store.list_by_course(course.course_id).await?);
  }
  apps.sort_by_key(|a| a.rank);

  let course_names: HashMap<_, _> =
    courses.into_iter().map(|c| (c.course_id, c.name)).collect();

  let mut details: HashMap<CandidateId, CandidateDetails> = HashMap::new();
  let mut out = Vec::with_capacity(apps.len());

  for app in &apps {
    if !details.contains_key(&app.candidate_id) {
      let fetched = fetch_details(store, app.candidate_id).await?;
      details.insert(app.candidate_id, fetched);
    }
    let candidate = &details[&app.candidate_id];
    let comment = store.get_comment(lecturer, app.application_id).await?;
    let course_name =
      course_names.get(&app.course_id).cloned().unwrap_or_default();

    out.push(ApplicantView::assemble(app, course_name, candidate, comment));
  }

  Ok(out)
}

async fn fetch_details<S: ReviewStore>(
  store: &S,
  candidate: CandidateId,
) -> Result<CandidateDetails, S::Error> {
  Ok(CandidateDetails {
    name:        store.candidate_display_name(candidate).await?,
    credentials: credentials_text(&store.credentials(candidate).await?),
    skills:      store.skills(candidate).await?.join(", "),
    prior_roles: store.prior_role_course_names(candidate).await?.join(", "),
  })
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Which text column a search string is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
  #[default]
  All,
  Name,
  Skills,
  Course,
  Availability,
  Role,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
  #[default]
  Rank,
  Name,
  Course,
  Availability,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

/// Optional narrowing and ordering of a built applicant view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicantFilter {
  /// Case-insensitive substring.
  pub search:        Option<String>,
  #[serde(default)]
  pub search_field:  SearchField,
  /// Exact course display name.
  pub course:        Option<String>,
  /// Raw text, folded like every other enum input (`"part-time"`, ...).
  pub availability:  Option<String>,
  pub role:          Option<String>,
  /// Keep only applications the requesting lecturer has selected.
  #[serde(default)]
  pub selected_only: bool,
  #[serde(default)]
  pub sort:          SortKey,
  #[serde(default)]
  pub order:         SortOrder,
}

impl ApplicantFilter {
  /// Narrow and sort `records`. `selected` is consulted only when
  /// `selected_only` is set.
  ///
  /// Fails with `InvalidEnumValue` if `availability` or `role` is not a
  /// recognised value.
  pub fn apply(
    &self,
    records: Vec<ApplicantView>,
    selected: &[ApplicationId],
  ) -> Result<Vec<ApplicantView>> {
    let availability = self
      .availability
      .as_deref()
      .map(str::parse::<Availability>)
      .transpose()?;
    let role = self.role.as_deref().map(str::parse::<AppliedRole>).transpose()?;
    let needle = self
      .search
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(str::to_lowercase);
    let selected: HashSet<_> = selected.iter().copied().collect();

    let mut out: Vec<_> = records
      .into_iter()
      .filter(|r| !self.selected_only || selected.contains(&r.application_id))
      .filter(|r| self.course.as_ref().is_none_or(|c| &r.course_name == c))
      .filter(|r| availability.is_none_or(|a| r.availability == a))
      .filter(|r| role.is_none_or(|role| r.role == role))
      .filter(|r| needle.as_deref().is_none_or(|n| self.matches(r, n)))
      .collect();

    match self.sort {
      SortKey::Rank => out.sort_by_key(|r| r.rank),
      SortKey::Name => out.sort_by_cached_key(|r| r.candidate_name.to_lowercase()),
      SortKey::Course => out.sort_by(|a, b| a.course_name.cmp(&b.course_name)),
      SortKey::Availability => out.sort_by_key(|r| r.availability.as_str()),
    }
    if self.order == SortOrder::Desc {
      out.reverse();
    }
    Ok(out)
  }

  fn matches(&self, r: &ApplicantView, needle: &str) -> bool {
    let hit = |hay: &str| hay.to_lowercase().contains(needle);
    match self.search_field {
      SearchField::Name => hit(&r.candidate_name),
      SearchField::Skills => hit(&r.skills_text),
      SearchField::Course => hit(&r.course_name),
      SearchField::Availability => hit(r.availability.label()),
      SearchField::Role => hit(r.role.label()),
      SearchField::All => {
        hit(&r.candidate_name)
          || hit(&r.skills_text)
          || hit(&r.course_name)
          || hit(r.availability.label())
          || hit(r.role.label())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(
    id: i64,
    name: &str,
    course: &str,
    skills: &str,
    availability: Availability,
    rank: Rank,
  ) -> ApplicantView {
    ApplicantView {
      application_id: ApplicationId(id),
      candidate_name: name.into(),
      course_name: course.into(),
      role: AppliedRole::Tutor,
      credentials_text: String::new(),
      skills_text: skills.into(),
      prior_roles_text: String::new(),
      availability,
      comment: String::new(),
      rank,
    }
  }

  fn sample() -> Vec<ApplicantView> {
    vec![
      record(1, "Zoe Park", "COSC1111 Databases", "SQL, Rust", Availability::PartTime, 2),
      record(2, "adam Lee", "COSC2222 Web", "React", Availability::FullTime, 1),
      record(3, "Mia Chen", "COSC1111 Databases", "Python", Availability::FullTime, 3),
    ]
  }

  fn ids(records: &[ApplicantView]) -> Vec<i64> {
    records.iter().map(|r| r.application_id.0).collect()
  }

  #[test]
  fn credentials_join_degree_and_level() {
    let creds = [
      Credential { degree: "Computer Science".into(), level: "Bachelor".into() },
      Credential { degree: "IT".into(), level: "Master".into() },
    ];
    assert_eq!(credentials_text(&creds), "Computer Science Bachelor, IT Master");
    assert_eq!(credentials_text(&[]), "");
  }

  #[test]
  fn default_filter_sorts_by_rank() {
    let out = ApplicantFilter::default().apply(sample(), &[]).unwrap();
    assert_eq!(ids(&out), vec![2, 1, 3]);
  }

  #[test]
  fn search_by_skill_substring() {
    let filter = ApplicantFilter {
      search: Some("rus".into()),
      search_field: SearchField::Skills,
      ..Default::default()
    };
    assert_eq!(ids(&filter.apply(sample(), &[]).unwrap()), vec![1]);
  }

  #[test]
  fn search_all_fields_is_case_insensitive() {
    let filter = ApplicantFilter {
      search: Some("FULL TIME".into()),
      ..Default::default()
    };
    assert_eq!(ids(&filter.apply(sample(), &[]).unwrap()), vec![2, 3]);
  }

  #[test]
  fn course_and_availability_filters_combine() {
    let filter = ApplicantFilter {
      course: Some("COSC1111 Databases".into()),
      availability: Some("Full-Time".into()),
      ..Default::default()
    };
    assert_eq!(ids(&filter.apply(sample(), &[]).unwrap()), vec![3]);
  }

  #[test]
  fn unknown_enum_filter_is_rejected() {
    let filter = ApplicantFilter {
      role: Some("professor".into()),
      ..Default::default()
    };
    let err = filter.apply(sample(), &[]).unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::InvalidEnumValue);
  }

  #[test]
  fn selected_only_uses_the_given_selection() {
    let filter = ApplicantFilter { selected_only: true, ..Default::default() };
    let out = filter
      .apply(sample(), &[ApplicationId(3), ApplicationId(1)])
      .unwrap();
    assert_eq!(ids(&out), vec![1, 3]);
  }

  #[test]
  fn sort_by_name_descending() {
    let filter = ApplicantFilter {
      sort: SortKey::Name,
      order: SortOrder::Desc,
      ..Default::default()
    };
    assert_eq!(ids(&filter.apply(sample(), &[]).unwrap()), vec![1, 3, 2]);
  }
}
