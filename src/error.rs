// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::validation::ValidationErrors;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        issues: ValidationErrors,
    },

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { message, issues } => json!({
                "error": message,
                "issues": issues,
            }),
            _ => json!({ "error": self.message() }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, issues: ValidationErrors) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            issues,
        }
    }

    /// Rejected request payload, reported with the per-field issues.
    pub fn invalid_payload(issues: ValidationErrors) -> Self {
        Self::validation_error("Payload invalido", issues)
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden("Forbidden".to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<ValidationErrors> for ApiError {
    fn from(issues: ValidationErrors) -> Self {
        ApiError::invalid_payload(issues)
    }
}

impl From<crate::database::DatabaseError> for ApiError {
    fn from(err: crate::database::DatabaseError) -> Self {
        match err {
            crate::database::DatabaseError::Sqlx(sqlx::Error::PoolTimedOut)
            | crate::database::DatabaseError::Sqlx(sqlx::Error::PoolClosed) => {
                tracing::error!("Database pool unavailable: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            other => {
                // Log the real error but return generic message
                tracing::error!("Database error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::ServiceError> for ApiError {
    fn from(err: crate::services::ServiceError) -> Self {
        match err {
            crate::services::ServiceError::Validation(issues) => ApiError::invalid_payload(issues),
            crate::services::ServiceError::Unauthorized(reason) => ApiError::Unauthorized(reason),
            crate::services::ServiceError::Database(db) => db.into(),
        }
    }
}

impl From<crate::uploads::UploadError> for ApiError {
    fn from(err: crate::uploads::UploadError) -> Self {
        match err {
            crate::uploads::UploadError::Validation(msg) => ApiError::bad_request(msg),
            other => {
                tracing::error!("Error subiendo archivo: {}", other);
                ApiError::internal_server_error("No se pudo procesar el archivo")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_carry_generic_messages() {
        assert_eq!(ApiError::unauthorized().to_json(), json!({ "error": "Unauthorized" }));
        assert_eq!(ApiError::forbidden().status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn validation_errors_include_issues() {
        let mut issues = ValidationErrors::new();
        issues.add("email", "Correo invalido");
        let err = ApiError::from(issues);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = err.to_json();
        assert_eq!(body["error"], "Payload invalido");
        assert_eq!(body["issues"]["fieldErrors"]["email"][0], "Correo invalido");
    }

    #[test]
    fn upload_validation_maps_to_bad_request() {
        let err = ApiError::from(crate::uploads::UploadError::Validation("Archivo vacío.".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Archivo vacío.");

        let err = ApiError::from(crate::uploads::UploadError::Processing("boom".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "No se pudo procesar el archivo");
    }
}
