// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorBody;

pub const CONFIGURATION_ERROR: &str = "Server configuration error";
pub const SERVER_ERROR: &str = "Server error";
pub use crate::message::FALLBACK_REPLY;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("missing configuration: {0}")]
    Configuration(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The provider failed or produced nothing usable. `details` is only
    /// set when diagnostics are exposed.
    #[error("provider failure")]
    Provider { details: Option<String> },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody { error: msg, details: None },
            ),
            AppError::Configuration(what) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: CONFIGURATION_ERROR.to_string(),
                    details: Some(what),
                },
            ),
            AppError::MalformedBody(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody { error: SERVER_ERROR.to_string(), details: None },
            ),
            AppError::Provider { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody { error: FALLBACK_REPLY.to_string(), details },
            ),
        };
        (status, Json(body)).into_response()
    }
}
