//! Blocking HTTP client for the workout API, plus the view helpers the
//! desktop client renders with.

pub mod form;

use chrono::{DateTime, Local, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use thiserror::Error;

use crate::error::ErrorBody;
use crate::models::{Exercise, Workout, WorkoutDraft};

pub use form::{ExerciseRow, FormError, WorkoutForm};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message} ({status})")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport(err) => err.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn list_workouts(&self) -> Result<Vec<Workout>, ClientError> {
        let response = self.http.get(self.url("/workouts")).send()?;
        Ok(check(response, "Failed to fetch workouts")?.json()?)
    }

    /// `Ok(None)` when the server reports the id as unknown.
    pub fn get_workout(&self, id: &str) -> Result<Option<Workout>, ClientError> {
        let response = self.http.get(self.url(&format!("/workouts/{id}"))).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check(response, "Failed to fetch workout")?.json()?))
    }

    pub fn create_workout(&self, draft: &WorkoutDraft) -> Result<Workout, ClientError> {
        let response = self.http.post(self.url("/workouts")).json(draft).send()?;
        Ok(check(response, "Failed to create workout")?.json()?)
    }

    pub fn delete_workout(&self, id: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/workouts/{id}")))
            .send()?;
        check(response, "Failed to delete workout")?;
        Ok(())
    }
}

/// Turn a non-success response into [`ClientError::Api`], preferring the
/// server's own error message over `fallback`.
fn check(response: Response, fallback: &str) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .map(|body| body.error)
        .unwrap_or_else(|_| fallback.to_string());
    Err(ClientError::Api { status, message })
}

/// `Jan 5, 2025` in the local time zone.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%b %-d, %Y").to_string()
}

/// `Bench Press - 3x10 @ 60kg`; the weight part is left out for bodyweight
/// exercises.
pub fn exercise_summary(exercise: &Exercise) -> String {
    let mut summary = format!("{} - {}x{}", exercise.name, exercise.sets, exercise.reps);
    if let Some(weight) = exercise.weight.filter(|weight| *weight > 0.0) {
        summary.push_str(&format!(" @ {}kg", weight));
    }
    summary
}
