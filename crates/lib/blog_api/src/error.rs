//! Application error types.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use blog_core::auth::AuthError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Request body or path could not be extracted.
    #[error("Rejected request: {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", "Invalid token"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "token_expired", "Token expired"),
            AppError::Rejected { status, message } => (*status, "invalid_request", message.as_str()),
            AppError::Internal(detail) => {
                error!("internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Incorrect login or password".into())
            }
            AuthError::TokenInvalid | AuthError::UnknownSubject(_) => AppError::InvalidToken,
            AuthError::TokenExpired => AppError::TokenExpired,
            AuthError::ValidationError(msg) => AppError::Validation(msg),
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_subject_looks_like_invalid_token() {
        let err = AppError::from(AuthError::UnknownSubject("ghost".into()));
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn expired_token_stays_distinct() {
        let err = AppError::from(AuthError::TokenExpired);
        assert!(matches!(err, AppError::TokenExpired));
    }

    #[test]
    fn unauthorized_responses_carry_bearer_challenge() {
        let resp = AppError::InvalidToken.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers()[WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn not_found_has_no_challenge() {
        let resp = AppError::NotFound("Post(id=1) not found".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get(WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn rejection_keeps_its_status() {
        let resp = AppError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `password`".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(resp.headers().get(WWW_AUTHENTICATE).is_none());
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
