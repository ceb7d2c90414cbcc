//! Core types and trait definitions for the Shortlist review engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ReviewStore`]; transports depend on
//! that abstraction, not on any concrete backend.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod application;
pub mod comment;
pub mod directory;
pub mod error;
pub mod ids;
pub mod ranking;
pub mod selection;
pub mod store;
pub mod view;

pub use error::{Error, ErrorKind, Result, StoreError};
pub use ids::{ApplicationId, CandidateId, CourseId, LecturerId, Rank};
