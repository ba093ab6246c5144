//! Custom error types and handling
//!
//! This module defines the gateway's error taxonomy and implements
//! conversion to HTTP responses for the Axum framework. Every failure a
//! request can hit is classified here; handlers never build error bodies
//! themselves.

use std::time::Duration;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Infrastructure errors
    #[error("sentinel binary not found at {0}")]
    EngineUnavailable(String),

    #[error("failed to start sentinel: {0}")]
    EngineSpawn(String),

    // Request errors
    #[error("{0}")]
    InvalidRequest(String),

    #[error("code too large")]
    CodeTooLarge { size: usize, limit: usize },

    #[error("request body too large")]
    BodyTooLarge,

    // Engine errors
    #[error("sentinel failed")]
    EngineFailed {
        returncode: i32,
        stdout: String,
        stderr: String,
    },

    #[error("sentinel timed out after {timeout:?}")]
    EngineTimedOut {
        timeout: Duration,
        stdout: String,
        stderr: String,
    },

    #[error("invalid JSON from sentinel")]
    InvalidEngineOutput { raw: String },

    // Internal errors
    #[error("Workspace error: {0}")]
    Workspace(#[from] std::io::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
///
/// Serialized flat: `{ "error": ..., "code": ..., ...details }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EngineUnavailable(_) => "ENGINE_UNAVAILABLE",
            Self::EngineSpawn(_) => "ENGINE_SPAWN_FAILED",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::CodeTooLarge { .. } | Self::BodyTooLarge => "PAYLOAD_TOO_LARGE",
            Self::EngineFailed { .. } | Self::EngineTimedOut { .. } => "ENGINE_FAILED",
            Self::InvalidEngineOutput { .. } => "INVALID_ENGINE_OUTPUT",
            Self::Workspace(_) => "WORKSPACE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::CodeTooLarge { .. } | Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::EngineTimedOut { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::EngineUnavailable(_)
            | Self::EngineSpawn(_)
            | Self::EngineFailed { .. }
            | Self::InvalidEngineOutput { .. }
            | Self::Workspace(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Extra diagnostic fields merged into the response body
    pub fn details(&self) -> Map<String, Value> {
        let mut details = Map::new();
        match self {
            Self::CodeTooLarge { size, limit } => {
                details.insert("size".into(), (*size).into());
                details.insert("limit".into(), (*limit).into());
            }
            Self::EngineFailed {
                returncode,
                stdout,
                stderr,
            } => {
                details.insert("returncode".into(), (*returncode).into());
                details.insert("timed_out".into(), false.into());
                details.insert("stdout".into(), stdout.clone().into());
                details.insert("stderr".into(), stderr.clone().into());
            }
            Self::EngineTimedOut { stdout, stderr, .. } => {
                details.insert("returncode".into(), Value::Null);
                details.insert("timed_out".into(), true.into());
                details.insert("stdout".into(), stdout.clone().into());
                details.insert("stderr".into(), stderr.clone().into());
            }
            Self::InvalidEngineOutput { raw } => {
                details.insert("raw".into(), raw.clone().into());
            }
            _ => {}
        }
        details
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Workspace(e) => {
                tracing::error!("Workspace error: {}", e);
                "Failed to prepare submission workspace".to_string()
            }
            AppError::EngineUnavailable(_) | AppError::EngineSpawn(_) => {
                tracing::error!("{}", self);
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: self.error_code(),
            details: self.details(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::BodyTooLarge;
        }
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::InvalidRequest("expected JSON with 'code'".to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidRequest(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
