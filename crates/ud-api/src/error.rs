//! API error handling
//!
//! Provides HTTP error types with JSON responses. Every error kind here is a
//! terminal per-request outcome; nothing is retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use ud_auth::AuthError;
use ud_core::error::ValidationErrors;
use ud_store::StoreError;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Missing, malformed, or unknown bearer token — or a role the caller
    /// does not hold. `message` is present only when a reason exists.
    Unauthorized { message: Option<String> },
    Forbidden,
    NotFound { resource: &'static str },
    Validation(ValidationErrors),
    Conflict { message: String },
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            message: Some(message.into()),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        ApiError::NotFound { resource }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Serialize)]
struct ValidationBody {
    errors: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => (
                status,
                Json(ValidationBody {
                    errors: errors.messages(),
                }),
            )
                .into_response(),
            ApiError::Unauthorized { message } => (
                status,
                Json(ErrorBody {
                    error: "Unauthorized".into(),
                    message,
                }),
            )
                .into_response(),
            ApiError::Forbidden => (
                status,
                Json(ErrorBody {
                    error: "Forbidden".into(),
                    message: None,
                }),
            )
                .into_response(),
            ApiError::NotFound { resource } => (
                status,
                Json(ErrorBody {
                    error: format!("{resource} not found"),
                    message: None,
                }),
            )
                .into_response(),
            ApiError::Conflict { message } => (
                status,
                Json(ErrorBody {
                    error: "Conflict".into(),
                    message: Some(message),
                }),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                (
                    status,
                    Json(ErrorBody {
                        error: "Internal Server Error".into(),
                        message: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken | AuthError::InvalidToken => {
                ApiError::unauthorized(e.to_string())
            }
            // Bad role names are a startup configuration problem, not a
            // caller problem.
            AuthError::UnknownRole(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict => {
                ApiError::conflict("User with this login and pass already exists.")
            }
            StoreError::Database(err) => ApiError::Internal(err.to_string()),
            StoreError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
