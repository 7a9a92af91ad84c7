//! Error types for the Headway server application.
//!
//! Domain errors use `thiserror` and are aggregated into a single [`Error`]
//! enum with `#[from]` conversions so `?` works throughout the server. All
//! errors implement `IntoResponse` for Axum HTTP responses; store violations
//! carry enough detail to identify the violated rule.

pub mod config;
pub mod store;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::server::{
    error::{config::ConfigError, store::StoreError},
    model::api::ErrorDto,
};

/// Main error type for the Headway server application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Store violation (constraint, foreign key, primary key, restricted delete).
    #[error(transparent)]
    StoreError(#[from] StoreError),
    /// Database error (query failures, connection issues).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Parse error (failed to parse a value from string input).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// I/O error (data directory access during import, listener binding).
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// CSV decode error during import.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::StoreError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error for debugging but returns a generic message to the
/// client so internal details are not leaked.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
