//! JSON REST API for Shortlist.
//!
//! Exposes an axum [`Router`] backed by any
//! [`shortlist_core::store::ReviewStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility; lecturer and candidate ids arrive as plain
//! request parameters.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", shortlist_api::api_router(store.clone()))
//! ```

pub mod applications;
pub mod comments;
pub mod error;
pub mod lecturers;
pub mod selections;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use shortlist_core::store::ReviewStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ReviewStore + 'static,
{
  Router::new()
    // Applications
    .route(
      "/applications",
      get(applications::list::<S>).post(applications::create::<S>),
    )
    .route("/applications/submit", post(applications::submit::<S>))
    .route(
      "/applications/{id}",
      get(applications::get_one::<S>)
        .patch(applications::update::<S>)
        .delete(applications::remove::<S>),
    )
    .route("/applications/{id}/comments", get(comments::for_application::<S>))
    .route("/applications/{id}/selections", get(selections::count::<S>))
    // Selections
    .route("/selections/toggle", post(selections::toggle::<S>))
    // Comments
    .route("/comments", get(comments::get_one::<S>).put(comments::upsert::<S>))
    // Lecturer-scoped views
    .route("/lecturers/{id}/applicants", get(lecturers::applicants::<S>))
    .route("/lecturers/{id}/selections", get(lecturers::selected::<S>))
    .route("/lecturers/{id}/selection-labels", get(lecturers::labels::<S>))
    .route("/lecturers/{id}/ranking", put(lecturers::reorder::<S>))
    .route("/lecturers/{id}/ranking/move", post(lecturers::move_one::<S>))
    .with_state(store)
}
