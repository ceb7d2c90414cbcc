//! [`SqliteStore`]: the SQLite implementation of [`ReviewStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension as _, TransactionBehavior};
use shortlist_core::{
  ApplicationId, CandidateId, CourseId, LecturerId, Rank,
  application::{
    Application, ApplicationPatch, NewApplication, Submission, ValidSubmission,
  },
  comment::{self, Comment},
  directory::{Course, Credential, Directory},
  ranking::{self, Direction},
  selection::ToggleOutcome,
  store::ReviewStore,
};

use crate::{
  Error, Result,
  encode::{
    APPLICATION_COLUMNS, RawApplication, RawComment, course_from_row,
    encode_dt, into_applications,
  },
  schema::SCHEMA,
};

// ─── Transaction plumbing ────────────────────────────────────────────────────

/// Failure raised inside a database closure. Domain failures roll the
/// transaction back and surface as [`Error::Core`].
enum TxError {
  Domain(shortlist_core::Error),
  Sql(rusqlite::Error),
}

impl From<rusqlite::Error> for TxError {
  fn from(e: rusqlite::Error) -> Self { Self::Sql(e) }
}

impl From<shortlist_core::Error> for TxError {
  fn from(e: shortlist_core::Error) -> Self { Self::Domain(e) }
}

type TxResult<T> = std::result::Result<T, TxError>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A review store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` inside a `BEGIN IMMEDIATE` transaction, committing only if it
  /// succeeds.
  async fn write<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Connection) -> TxResult<T> + Send + 'static,
  {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        match f(&tx) {
          Ok(value) => {
            tx.commit()?;
            Ok(Ok(value))
          }
          Err(TxError::Domain(e)) => Ok(Err(e)),
          Err(TxError::Sql(e)) => Err(e.into()),
        }
      })
      .await?;
    Ok(outcome?)
  }

  /// Run a read-only closure on the connection.
  async fn read<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&Connection) -> TxResult<T> + Send + 'static,
  {
    let outcome = self
      .conn
      .call(move |conn| match f(conn) {
        Ok(value) => Ok(Ok(value)),
        Err(TxError::Domain(e)) => Ok(Err(e)),
        Err(TxError::Sql(e)) => Err(e.into()),
      })
      .await?;
    Ok(outcome?)
  }

  // ── Directory registration ───────────────────────────────────────────────
  //
  // The directory belongs to the surrounding system; these helpers are how
  // it (and the tests) populate the shared tables.

  pub async fn add_lecturer(
    &self,
    name: impl Into<String>,
    surname: impl Into<String>,
  ) -> Result<LecturerId> {
    let (name, surname) = (name.into(), surname.into());
    self
      .write(move |conn| {
        conn.execute(
          "INSERT INTO lecturers (name, surname) VALUES (?1, ?2)",
          rusqlite::params![name, surname],
        )?;
        Ok(LecturerId(conn.last_insert_rowid()))
      })
      .await
  }

  pub async fn add_candidate(
    &self,
    name: impl Into<String>,
    surname: impl Into<String>,
  ) -> Result<CandidateId> {
    let (name, surname) = (name.into(), surname.into());
    self
      .write(move |conn| {
        conn.execute(
          "INSERT INTO candidates (name, surname) VALUES (?1, ?2)",
          rusqlite::params![name, surname],
        )?;
        Ok(CandidateId(conn.last_insert_rowid()))
      })
      .await
  }

  pub async fn add_course(
    &self,
    name: impl Into<String>,
    lecturer: LecturerId,
  ) -> Result<Course> {
    let name = name.into();
    self
      .write(move |conn| {
        if !lecturer_exists(conn, lecturer)? {
          return Err(shortlist_core::Error::UnknownLecturer(lecturer).into());
        }
        conn.execute(
          "INSERT INTO courses (name, lecturer_id) VALUES (?1, ?2)",
          rusqlite::params![name, lecturer.0],
        )?;
        Ok(Course {
          course_id: CourseId(conn.last_insert_rowid()),
          name,
          lecturer_id: lecturer,
        })
      })
      .await
  }

  /// Record that `candidate` previously held a role on `course`.
  pub async fn add_prior_role(
    &self,
    candidate: CandidateId,
    course: CourseId,
  ) -> Result<()> {
    self
      .write(move |conn| {
        require_candidate(conn, candidate)?;
        require_course(conn, course)?;
        conn.execute(
          "INSERT INTO prior_roles (candidate_id, course_id) VALUES (?1, ?2)
           ON CONFLICT DO NOTHING",
          rusqlite::params![candidate.0, course.0],
        )?;
        Ok(())
      })
      .await
  }
}

// ─── Synchronous helpers (run on the connection thread) ──────────────────────

fn lecturer_exists(conn: &Connection, id: LecturerId) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM lecturers WHERE lecturer_id = ?1",
        rusqlite::params![id.0],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false),
  )
}

fn require_lecturer(conn: &Connection, id: LecturerId) -> TxResult<()> {
  if lecturer_exists(conn, id)? {
    Ok(())
  } else {
    Err(shortlist_core::Error::UnknownLecturer(id).into())
  }
}

fn require_candidate(conn: &Connection, id: CandidateId) -> TxResult<()> {
  let exists = conn
    .query_row(
      "SELECT 1 FROM candidates WHERE candidate_id = ?1",
      rusqlite::params![id.0],
      |_| Ok(()),
    )
    .optional()?
    .is_some();
  if exists {
    Ok(())
  } else {
    Err(shortlist_core::Error::UnknownCandidate(id).into())
  }
}

/// Returns the teaching lecturer of `id`.
fn require_course(conn: &Connection, id: CourseId) -> TxResult<LecturerId> {
  conn
    .query_row(
      "SELECT lecturer_id FROM courses WHERE course_id = ?1",
      rusqlite::params![id.0],
      |r| r.get(0).map(LecturerId),
    )
    .optional()?
    .ok_or_else(|| shortlist_core::Error::UnknownCourse(id).into())
}

fn application_row(
  conn: &Connection,
  id: ApplicationId,
) -> rusqlite::Result<Option<RawApplication>> {
  conn
    .query_row(
      &format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE application_id = ?1"),
      rusqlite::params![id.0],
      RawApplication::from_row,
    )
    .optional()
}

fn require_application(
  conn: &Connection,
  id: ApplicationId,
) -> TxResult<RawApplication> {
  application_row(conn, id)?
    .ok_or_else(|| shortlist_core::Error::ApplicationNotFound(id).into())
}

fn applications_where(
  conn: &Connection,
  clause: &str,
  params: impl rusqlite::Params,
) -> rusqlite::Result<Vec<RawApplication>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {APPLICATION_COLUMNS} FROM applications {clause} ORDER BY rank"
  ))?;
  stmt
    .query_map(params, RawApplication::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()
}

/// Reject an application whose candidate or course is unknown, or whose
/// (candidate, course, role) triple is already taken.
fn check_new_application(conn: &Connection, input: &NewApplication) -> TxResult<()> {
  require_candidate(conn, input.candidate_id)?;
  require_course(conn, input.course_id)?;

  let taken = conn
    .query_row(
      "SELECT 1 FROM applications
       WHERE candidate_id = ?1 AND course_id = ?2 AND role = ?3",
      rusqlite::params![
        input.candidate_id.0,
        input.course_id.0,
        input.role.as_str()
      ],
      |_| Ok(()),
    )
    .optional()?
    .is_some();
  if taken {
    return Err(
      shortlist_core::Error::DuplicateApplication {
        candidate: input.candidate_id,
        course:    input.course_id,
        role:      input.role.as_str(),
      }
      .into(),
    );
  }
  Ok(())
}

/// Allocate the next rank and insert. Must run inside a write transaction
/// after [`check_new_application`].
fn insert_application(
  conn: &Connection,
  input: &NewApplication,
) -> TxResult<RawApplication> {
  let max: Option<Rank> =
    conn.query_row("SELECT MAX(rank) FROM applications", [], |r| r.get(0))?;
  let rank = ranking::next_rank(max);

  conn.execute(
    "INSERT INTO applications
       (candidate_id, course_id, availability, role, rank, submitted_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    rusqlite::params![
      input.candidate_id.0,
      input.course_id.0,
      input.availability.as_str(),
      input.role.as_str(),
      rank,
      encode_dt(Utc::now()),
    ],
  )?;

  require_application(conn, ApplicationId(conn.last_insert_rowid()))
}

/// An empty code never matches; `instr` would otherwise accept every row.
fn find_course_by_code(conn: &Connection, code: &str) -> TxResult<Course> {
  let code = code.trim();
  if code.is_empty() {
    return Err(shortlist_core::Error::CourseNotFound(code.to_owned()).into());
  }
  conn
    .query_row(
      "SELECT course_id, name, lecturer_id FROM courses
       WHERE instr(lower(name), lower(?1)) > 0
       ORDER BY course_id
       LIMIT 1",
      rusqlite::params![code],
      course_from_row,
    )
    .optional()?
    .ok_or_else(|| shortlist_core::Error::CourseNotFound(code.to_owned()).into())
}

/// Insert-or-get the credential and skills declared with a submission.
fn record_bookkeeping(conn: &Connection, sub: &ValidSubmission) -> TxResult<()> {
  let candidate = sub.candidate_id.0;

  conn.execute(
    "INSERT INTO credentials (candidate_id, degree, level) VALUES (?1, ?2, ?3)
     ON CONFLICT (candidate_id, degree) DO NOTHING",
    rusqlite::params![candidate, sub.degree, sub.level],
  )?;

  for name in &sub.skills {
    conn.execute(
      "INSERT INTO skills (name) VALUES (?1) ON CONFLICT (name) DO NOTHING",
      rusqlite::params![name],
    )?;
    let skill_id: i64 = conn.query_row(
      "SELECT skill_id FROM skills WHERE name = ?1",
      rusqlite::params![name],
      |r| r.get(0),
    )?;
    conn.execute(
      "INSERT INTO candidate_skills (candidate_id, skill_id) VALUES (?1, ?2)
       ON CONFLICT DO NOTHING",
      rusqlite::params![candidate, skill_id],
    )?;
  }
  Ok(())
}

/// Ids and ranks of every application on `lecturer`'s courses, by rank.
fn visible_ranks(
  conn: &Connection,
  lecturer: LecturerId,
) -> rusqlite::Result<Vec<(ApplicationId, Rank)>> {
  let mut stmt = conn.prepare(
    "SELECT a.application_id, a.rank
     FROM applications a
     JOIN courses c ON c.course_id = a.course_id
     WHERE c.lecturer_id = ?1
     ORDER BY a.rank",
  )?;
  stmt
    .query_map(rusqlite::params![lecturer.0], |r| {
      Ok((ApplicationId(r.get(0)?), r.get(1)?))
    })?
    .collect()
}

/// Validate `order` against `lecturer`'s scope and write the redistributed
/// ranks. Returns the rows in `order` order.
fn apply_order(
  conn: &Connection,
  lecturer: LecturerId,
  order: &[ApplicationId],
) -> TxResult<Vec<RawApplication>> {
  require_lecturer(conn, lecturer)?;

  let mut current = HashMap::with_capacity(order.len());
  for id in order {
    let row = require_application(conn, *id)?;
    if require_course(conn, CourseId(row.course_id))? != lecturer {
      return Err(
        shortlist_core::Error::NotInScope {
          lecturer,
          application: *id,
        }
        .into(),
      );
    }
    current.insert(*id, row.rank);
  }

  let assignment = ranking::redistribute(order, &current)?;

  // `rank` is UNIQUE and checked per row, so park the subset on negative
  // placeholders before writing the final values.
  {
    let mut park =
      conn.prepare("UPDATE applications SET rank = -rank WHERE application_id = ?1")?;
    for (id, _) in &assignment {
      park.execute(rusqlite::params![id.0])?;
    }
    let mut set =
      conn.prepare("UPDATE applications SET rank = ?2 WHERE application_id = ?1")?;
    for (id, rank) in &assignment {
      set.execute(rusqlite::params![id.0, rank])?;
    }
  }

  order
    .iter()
    .map(|id| require_application(conn, *id))
    .collect()
}

// ─── Directory impl ──────────────────────────────────────────────────────────

impl Directory for SqliteStore {
  type Error = Error;

  async fn courses_taught_by(&self, lecturer: LecturerId) -> Result<Vec<Course>> {
    self
      .read(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT course_id, name, lecturer_id FROM courses
           WHERE lecturer_id = ?1 ORDER BY course_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![lecturer.0], course_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn course_by_code<'a>(&'a self, code: &'a str) -> Result<Course> {
    let code = code.trim().to_owned();
    self.read(move |conn| find_course_by_code(conn, &code)).await
  }

  async fn candidate_display_name(&self, candidate: CandidateId) -> Result<String> {
    self
      .read(move |conn| {
        conn
          .query_row(
            "SELECT name || ' ' || surname FROM candidates WHERE candidate_id = ?1",
            rusqlite::params![candidate.0],
            |r| r.get(0),
          )
          .optional()?
          .ok_or_else(|| shortlist_core::Error::UnknownCandidate(candidate).into())
      })
      .await
  }

  async fn credentials(&self, candidate: CandidateId) -> Result<Vec<Credential>> {
    self
      .read(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT degree, level FROM credentials
           WHERE candidate_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![candidate.0], |r| {
            Ok(Credential {
              degree: r.get(0)?,
              level:  r.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn skills(&self, candidate: CandidateId) -> Result<Vec<String>> {
    self
      .read(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT s.name FROM candidate_skills cs
           JOIN skills s ON s.skill_id = cs.skill_id
           WHERE cs.candidate_id = ?1
           ORDER BY cs.rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![candidate.0], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await
  }

  async fn prior_role_course_names(
    &self,
    candidate: CandidateId,
  ) -> Result<Vec<String>> {
    self
      .read(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT c.name FROM prior_roles p
           JOIN courses c ON c.course_id = p.course_id
           WHERE p.candidate_id = ?1
           ORDER BY c.course_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![candidate.0], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await
  }
}

// ─── ReviewStore impl ────────────────────────────────────────────────────────

impl ReviewStore for SqliteStore {
  // ── Applications ──────────────────────────────────────────────────────────

  async fn create_application(&self, input: NewApplication) -> Result<Application> {
    let raw = self
      .write(move |conn| {
        check_new_application(conn, &input)?;
        insert_application(conn, &input)
      })
      .await?;

    let app = raw.into_application()?;
    tracing::info!(
      application_id = %app.application_id,
      candidate_id = %app.candidate_id,
      course_id = %app.course_id,
      rank = app.rank,
      "application created"
    );
    Ok(app)
  }

  async fn submit_application(&self, input: Submission) -> Result<Application> {
    let sub = input.validate()?;

    let raw = self
      .write(move |conn| {
        let course = find_course_by_code(conn, &sub.course_code)?;
        let new = NewApplication {
          candidate_id: sub.candidate_id,
          course_id:    course.course_id,
          availability: sub.availability,
          role:         sub.role,
        };
        check_new_application(conn, &new)?;
        record_bookkeeping(conn, &sub)?;
        insert_application(conn, &new)
      })
      .await?;

    let app = raw.into_application()?;
    tracing::info!(
      application_id = %app.application_id,
      candidate_id = %app.candidate_id,
      course_id = %app.course_id,
      rank = app.rank,
      "application submitted"
    );
    Ok(app)
  }

  async fn get_application(&self, id: ApplicationId) -> Result<Application> {
    self
      .read(move |conn| require_application(conn, id))
      .await?
      .into_application()
  }

  async fn list_applications(&self) -> Result<Vec<Application>> {
    let raws = self
      .read(|conn| Ok(applications_where(conn, "", rusqlite::params![])?))
      .await?;
    into_applications(raws)
  }

  async fn list_by_candidate(&self, candidate: CandidateId) -> Result<Vec<Application>> {
    let raws = self
      .read(move |conn| {
        Ok(applications_where(
          conn,
          "WHERE candidate_id = ?1",
          rusqlite::params![candidate.0],
        )?)
      })
      .await?;
    into_applications(raws)
  }

  async fn list_by_course(&self, course: CourseId) -> Result<Vec<Application>> {
    let raws = self
      .read(move |conn| {
        Ok(applications_where(
          conn,
          "WHERE course_id = ?1",
          rusqlite::params![course.0],
        )?)
      })
      .await?;
    into_applications(raws)
  }

  async fn update_application(
    &self,
    id: ApplicationId,
    patch: ApplicationPatch,
  ) -> Result<Application> {
    let patch = patch.validate()?;

    let raw = self
      .write(move |conn| {
        let mut app = require_application(conn, id)?;
        if patch.is_empty() {
          return Ok(app);
        }

        if let Some(role) = patch.role {
          let clash = conn
            .query_row(
              "SELECT 1 FROM applications
               WHERE candidate_id = ?1 AND course_id = ?2 AND role = ?3
                 AND application_id != ?4",
              rusqlite::params![app.candidate_id, app.course_id, role.as_str(), id.0],
              |_| Ok(()),
            )
            .optional()?
            .is_some();
          if clash {
            return Err(
              shortlist_core::Error::DuplicateApplication {
                candidate: CandidateId(app.candidate_id),
                course:    CourseId(app.course_id),
                role:      role.as_str(),
              }
              .into(),
            );
          }
          app.role = role.as_str().to_owned();
        }
        if let Some(availability) = patch.availability {
          app.availability = availability.as_str().to_owned();
        }

        conn.execute(
          "UPDATE applications SET availability = ?2, role = ?3
           WHERE application_id = ?1",
          rusqlite::params![id.0, app.availability, app.role],
        )?;
        Ok(app)
      })
      .await?;

    tracing::debug!(application_id = %id, "application updated");
    raw.into_application()
  }

  async fn remove_application(&self, id: ApplicationId) -> Result<Application> {
    let raw = self
      .write(move |conn| {
        let app = require_application(conn, id)?;
        conn.execute(
          "DELETE FROM applications WHERE application_id = ?1",
          rusqlite::params![id.0],
        )?;
        Ok(app)
      })
      .await?;

    tracing::info!(application_id = %id, "application removed");
    raw.into_application()
  }

  // ── Ranking ───────────────────────────────────────────────────────────────

  async fn reorder(
    &self,
    lecturer: LecturerId,
    order: Vec<ApplicationId>,
  ) -> Result<Vec<Application>> {
    let count = order.len();
    let raws = self
      .write(move |conn| apply_order(conn, lecturer, &order))
      .await?;

    tracing::debug!(lecturer_id = %lecturer, count, "applications reordered");
    into_applications(raws)
  }

  async fn move_application(
    &self,
    lecturer: LecturerId,
    id: ApplicationId,
    direction: Direction,
  ) -> Result<Vec<Application>> {
    let raws = self
      .write(move |conn| {
        require_lecturer(conn, lecturer)?;
        let row = require_application(conn, id)?;
        if require_course(conn, CourseId(row.course_id))? != lecturer {
          return Err(
            shortlist_core::Error::NotInScope {
              lecturer,
              application: id,
            }
            .into(),
          );
        }

        let ordered: Vec<_> = visible_ranks(conn, lecturer)?
          .into_iter()
          .map(|(app, _)| app)
          .collect();
        match ranking::adjacent_swap(&ordered, id, direction) {
          Some(pair) => apply_order(conn, lecturer, &pair),
          None => Ok(vec![row]),
        }
      })
      .await?;

    tracing::debug!(
      lecturer_id = %lecturer,
      application_id = %id,
      ?direction,
      "application moved"
    );
    into_applications(raws)
  }

  // ── Selections ────────────────────────────────────────────────────────────

  async fn toggle_selection(
    &self,
    lecturer: LecturerId,
    application: ApplicationId,
  ) -> Result<ToggleOutcome> {
    let selected = self
      .write(move |conn| {
        require_lecturer(conn, lecturer)?;
        if application_row(conn, application)?.is_none() {
          return Err(shortlist_core::Error::UnknownApplication(application).into());
        }

        let removed = conn.execute(
          "DELETE FROM selections WHERE lecturer_id = ?1 AND application_id = ?2",
          rusqlite::params![lecturer.0, application.0],
        )?;
        if removed > 0 {
          return Ok(false);
        }
        conn.execute(
          "INSERT INTO selections (lecturer_id, application_id) VALUES (?1, ?2)",
          rusqlite::params![lecturer.0, application.0],
        )?;
        Ok(true)
      })
      .await?;

    tracing::debug!(
      lecturer_id = %lecturer,
      application_id = %application,
      selected,
      "selection toggled"
    );
    Ok(ToggleOutcome {
      lecturer_id: lecturer,
      application_id: application,
      selected,
    })
  }

  async fn list_selected(&self, lecturer: LecturerId) -> Result<Vec<ApplicationId>> {
    self
      .read(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT application_id FROM selections
           WHERE lecturer_id = ?1 ORDER BY application_id",
        )?;
        let ids = stmt
          .query_map(rusqlite::params![lecturer.0], |r| r.get(0).map(ApplicationId))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
      })
      .await
  }

  async fn count_selections(&self, application: ApplicationId) -> Result<u64> {
    let count: i64 = self
      .read(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM selections WHERE application_id = ?1",
          rusqlite::params![application.0],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(count.unsigned_abs())
  }

  // ── Comments ──────────────────────────────────────────────────────────────

  async fn upsert_comment(
    &self,
    lecturer: LecturerId,
    application: ApplicationId,
    text: String,
  ) -> Result<Comment> {
    let text = comment::normalize(&text)?;
    let now = Utc::now();
    let at = encode_dt(now);

    let text = self
      .write(move |conn| {
        require_lecturer(conn, lecturer)?;
        if application_row(conn, application)?.is_none() {
          return Err(shortlist_core::Error::UnknownApplication(application).into());
        }
        conn.execute(
          "INSERT INTO comments (lecturer_id, application_id, text, updated_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (lecturer_id, application_id)
           DO UPDATE SET text = excluded.text, updated_at = excluded.updated_at",
          rusqlite::params![lecturer.0, application.0, text, at],
        )?;
        Ok(text)
      })
      .await?;

    tracing::debug!(
      lecturer_id = %lecturer,
      application_id = %application,
      "comment saved"
    );
    Ok(Comment {
      lecturer_id: lecturer,
      application_id: application,
      text,
      updated_at: now,
    })
  }

  async fn get_comment(
    &self,
    lecturer: LecturerId,
    application: ApplicationId,
  ) -> Result<String> {
    self
      .read(move |conn| {
        let text: Option<String> = conn
          .query_row(
            "SELECT text FROM comments WHERE lecturer_id = ?1 AND application_id = ?2",
            rusqlite::params![lecturer.0, application.0],
            |r| r.get(0),
          )
          .optional()?;
        Ok(text.unwrap_or_default())
      })
      .await
  }

  async fn list_comments(&self, application: ApplicationId) -> Result<Vec<Comment>> {
    let raws = self
      .read(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT lecturer_id, application_id, text, updated_at FROM comments
           WHERE application_id = ?1 ORDER BY lecturer_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![application.0], RawComment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    raws.into_iter().map(RawComment::into_comment).collect()
  }
}
