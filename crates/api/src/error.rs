//! HTTP error responses.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use invoices::MutationError;
use serde_json::json;
use tracing::error;

/// An error rendered as `{"error": ..., "fields": {...}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Per-field messages, only for validation failures.
    pub fields: BTreeMap<String, Vec<String>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), fields: BTreeMap::new() }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, what)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.fields.is_empty() {
            json!({ "error": self.message })
        } else {
            json!({ "error": self.message, "fields": self.fields })
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<MutationError> for ApiError {
    fn from(err: MutationError) -> Self {
        match err {
            MutationError::Validation(v) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: "invalid invoice form".into(),
                fields: v
                    .field_errors()
                    .into_iter()
                    .map(|(field, msgs)| {
                        (field.to_owned(), msgs.into_iter().map(str::to_owned).collect())
                    })
                    .collect(),
            },
            MutationError::Persistence(e) => e.into(),
        }
    }
}

impl From<db::DbError> for ApiError {
    fn from(err: db::DbError) -> Self {
        match err {
            db::DbError::NotFound(id) => Self::not_found(format!("invoice '{id}' not found")),
            other => {
                error!(error = %other, "database failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}
