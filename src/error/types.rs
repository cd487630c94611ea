/**
 * API Error Types
 *
 * This module defines the error enum used by all HTTP handlers. Each
 * variant maps to one HTTP status code; the JSON body shape is produced
 * by the `IntoResponse` implementation in `conversion.rs`.
 */
use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by API handlers.
///
/// Validation errors carry the full list of failed checks so the client
/// receives them in one response. Database and internal errors are never
/// exposed verbatim; they are logged and replaced by a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input (HTTP 400)
    #[error("Validation failed: {}", errors.join(", "))]
    Validation {
        /// One message per failed check
        errors: Vec<String>,
    },

    /// Missing, invalid, or expired credentials (HTTP 401)
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// Authenticated but not permitted (HTTP 403)
    #[error("Authorization error: {message}")]
    Authorization { message: String },

    /// Referenced entity does not exist (HTTP 404)
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Too many requests from one source (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Object-storage operation failed (HTTP 500)
    #[error("Storage error: {message}")]
    UpstreamStorage { message: String },

    /// Database operation failed (HTTP 500, generic body)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Unexpected internal failure (HTTP 500, generic body)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    /// Create a validation error with a single message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![message.into()],
        }
    }

    /// Create a validation error carrying several messages
    pub fn validation_all(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    /// Create an authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create an authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an upstream-storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::UpstreamStorage {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Authentication { .. } => StatusCode::UNAUTHORIZED,
            Self::Authorization { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamStorage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::internal(format!("Password hashing failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("bad input").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::authentication("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::authorization("not yours").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::storage("upload failed").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_collects_messages() {
        let error = ApiError::validation_all(vec![
            "Title is required".to_string(),
            "College name is required".to_string(),
        ]);
        match error {
            ApiError::Validation { errors } => assert_eq!(errors.len(), 2),
            _ => panic!("Expected Validation"),
        }
    }

    #[test]
    fn test_from_sqlx_error() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
