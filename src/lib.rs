//! Workout tracking service.
//!
//! An in-memory [`WorkoutStore`] owns every workout record; the [`api`]
//! module exposes it over HTTP as a small JSON resource and [`server`] runs
//! that router on a tokio listener. With the `client` feature the crate also
//! carries a blocking HTTP client and the form logic used by the desktop
//! client binary.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod store;

#[cfg(feature = "client")]
pub mod client;

pub use error::{ApiError, ErrorBody, MessageBody};
pub use models::{Exercise, Workout, WorkoutDraft, WorkoutId};
pub use server::{RunningWorkoutServer, WorkoutServer};
pub use store::{StoreError, WorkoutStore};
