//! The `ReviewStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `shortlist-store-sqlite`). Higher layers (`shortlist-api`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  application::{Application, ApplicationPatch, NewApplication, Submission},
  comment::Comment,
  directory::Directory,
  ids::{ApplicationId, CandidateId, CourseId, LecturerId},
  ranking::Direction,
  selection::ToggleOutcome,
};

/// Abstraction over a review store backend.
///
/// Every operation validates before it writes: a failed call leaves the
/// store exactly as it was. Domain failures surface as backend errors whose
/// [`StoreError::kind`](crate::StoreError::kind) is `Some`.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ReviewStore: Directory {
  // ── Applications ──────────────────────────────────────────────────────────

  /// Insert a new application at `max(rank) + 1`.
  ///
  /// The duplicate check, rank read and insert are one indivisible step, so
  /// concurrent callers never receive the same rank.
  fn create_application(
    &self,
    input: NewApplication,
  ) -> impl Future<Output = Result<Application, Self::Error>> + Send + '_;

  /// Run a full candidate submission: resolve the course, record the
  /// credential and skills if new, then create the application. Nothing is
  /// written if any step fails.
  fn submit_application(
    &self,
    input: Submission,
  ) -> impl Future<Output = Result<Application, Self::Error>> + Send + '_;

  fn get_application(
    &self,
    id: ApplicationId,
  ) -> impl Future<Output = Result<Application, Self::Error>> + Send + '_;

  /// Every application, by ascending rank.
  fn list_applications(
    &self,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  fn list_by_candidate(
    &self,
    candidate: CandidateId,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  fn list_by_course(
    &self,
    course: CourseId,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  /// Change availability and/or role. Rank is never touched here.
  fn update_application(
    &self,
    id: ApplicationId,
    patch: ApplicationPatch,
  ) -> impl Future<Output = Result<Application, Self::Error>> + Send + '_;

  /// Delete an application together with its selections and comments.
  /// Returns the removed row.
  fn remove_application(
    &self,
    id: ApplicationId,
  ) -> impl Future<Output = Result<Application, Self::Error>> + Send + '_;

  // ── Ranking ───────────────────────────────────────────────────────────────

  /// Persist `order` as the new top-to-bottom order of a subset of the
  /// applications `lecturer` can see. See [`crate::ranking::redistribute`].
  ///
  /// Returns the reordered applications, in `order` order.
  fn reorder(
    &self,
    lecturer: LecturerId,
    order: Vec<ApplicationId>,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  /// Swap `id` with its neighbour in `lecturer`'s rank-ordered view.
  ///
  /// At either end of the view this is a no-op returning just `id`'s row.
  fn move_application(
    &self,
    lecturer: LecturerId,
    id: ApplicationId,
    direction: Direction,
  ) -> impl Future<Output = Result<Vec<Application>, Self::Error>> + Send + '_;

  // ── Selections ────────────────────────────────────────────────────────────

  fn toggle_selection(
    &self,
    lecturer: LecturerId,
    application: ApplicationId,
  ) -> impl Future<Output = Result<ToggleOutcome, Self::Error>> + Send + '_;

  /// Applications `lecturer` currently has selected, ascending by id.
  fn list_selected(
    &self,
    lecturer: LecturerId,
  ) -> impl Future<Output = Result<Vec<ApplicationId>, Self::Error>> + Send + '_;

  /// Number of lecturers that have `application` selected.
  fn count_selections(
    &self,
    application: ApplicationId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Comments ──────────────────────────────────────────────────────────────

  /// Create or replace `lecturer`'s comment on `application`.
  fn upsert_comment(
    &self,
    lecturer: LecturerId,
    application: ApplicationId,
    text: String,
  ) -> impl Future<Output = Result<Comment, Self::Error>> + Send + '_;

  /// The comment text, or an empty string if there is none.
  fn get_comment(
    &self,
    lecturer: LecturerId,
    application: ApplicationId,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  /// Every lecturer's comment on `application`, ordered by lecturer id.
  fn list_comments(
    &self,
    application: ApplicationId,
  ) -> impl Future<Output = Result<Vec<Comment>, Self::Error>> + Send + '_;
}
