/**
 * Error Conversion
 *
 * Converts `ApiError` values into HTTP responses.
 *
 * # Response Format
 *
 * - Validation errors: `{"errors": ["...", ...]}` with status 400
 * - Other coded errors: `{"error": "..."}` with the matching status
 * - Database/internal errors: logged, returned as a generic
 *   `{"error": "Internal server error"}` so details never leak
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ApiError::Validation { errors } => json!({ "errors": errors }),
            ApiError::Authentication { message }
            | ApiError::Authorization { message }
            | ApiError::NotFound { message }
            | ApiError::UpstreamStorage { message } => json!({ "error": message }),
            ApiError::RateLimited => {
                json!({ "error": "Too many authentication attempts, please try again later." })
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                json!({ "error": "Internal server error" })
            }
            ApiError::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_response_status() {
        let response = ApiError::validation("Content is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_response_is_generic() {
        let response = ApiError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_forbidden_response_status() {
        let response = ApiError::authorization("Not authorized").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
