//! Error taxonomy for writes against the transit schedule store.
//!
//! Every rejected write maps onto one of four violation categories so the
//! caller can identify the violated rule: check/uniqueness failures name the
//! offending field, reference failures name the missing parent, restricted
//! deletes name the dependent table blocking the delete. Database errors that
//! escape the explicit checks (for example a uniqueness race between two
//! concurrent inserts) are classified through [`sea_orm::SqlErr`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::server::{error::InternalServerError, model::api::ErrorDto};

#[derive(Error, Debug)]
pub enum StoreError {
    /// Check or uniqueness constraint failure on a single field.
    #[error("Constraint violation on {field}: {message}")]
    ConstraintViolation {
        field: &'static str,
        message: String,
    },
    /// Insert referencing a parent row that does not exist.
    #[error("Foreign key violation: no {entity} identified by {key:?}")]
    ForeignKeyViolation { entity: &'static str, key: String },
    /// Insert with a duplicate primary identity.
    #[error("Primary key violation: {entity} {key:?} already exists")]
    PrimaryKeyViolation { entity: &'static str, key: String },
    /// Delete of a row that dependents still reference.
    #[error(
        "Referential restriction: {entity} {key:?} is still referenced by \
         {dependents} row(s) in {dependent_table}"
    )]
    ReferentialRestriction {
        entity: &'static str,
        key: String,
        dependent_table: &'static str,
        dependents: u64,
    },
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl StoreError {
    pub fn constraint(field: &'static str, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            field,
            message: message.into(),
        }
    }

    pub fn foreign_key(entity: &'static str, key: impl ToString) -> Self {
        Self::ForeignKeyViolation {
            entity,
            key: key.to_string(),
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ConstraintViolation { .. } | Self::ForeignKeyViolation { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::PrimaryKeyViolation { .. } | Self::ReferentialRestriction { .. } => {
                StatusCode::CONFLICT
            }
            Self::Database(_) => return InternalServerError(self).into_response(),
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
