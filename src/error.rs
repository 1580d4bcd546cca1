use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Body of every non-success response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body returned after a successful delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Workout not found")]
    NotFound,

    /// `reason` is logged, never sent to the caller.
    #[error("Invalid workout data")]
    InvalidData { reason: String },

    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        ApiError::InvalidData {
            reason: reason.into(),
        }
    }

    /// Wraps a store failure with the message shown to the caller.
    pub fn internal(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Internal { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidData { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound => {}
            ApiError::InvalidData { reason } => tracing::warn!(%reason, "rejected workout data"),
            ApiError::Internal { message, source } => {
                tracing::error!(error = %source, "{message}")
            }
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
