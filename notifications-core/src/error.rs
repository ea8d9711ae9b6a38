use crate::repository;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("notification not exist")]
    NotificationNotExist,

    #[error("notification belongs to another user")]
    NotificationNotOwned,

    #[error("validation error: {field} {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("missing session")]
    Unauthenticated,

    #[error("missing role: {0}")]
    MissingRole(&'static str),

    #[error("database error: {0}")]
    Database(#[from] repository::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        match self {
            Error::NotificationNotExist => StatusCode::NOT_FOUND.into_response(),
            // owner is intentionally not disclosed
            Error::NotificationNotOwned => StatusCode::FORBIDDEN.into_response(),
            Error::Validation { field, reason } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": reason,
                    "field": field,
                })),
            )
                .into_response(),
            Error::Forbidden(reason) => {
                (StatusCode::FORBIDDEN, Json(json!({ "error": reason }))).into_response()
            }
            Error::Unauthenticated => StatusCode::UNAUTHORIZED.into_response(),
            Error::MissingRole(_) => StatusCode::FORBIDDEN.into_response(),
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
