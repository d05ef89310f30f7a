//! Application error type and its HTTP rendering.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Every failure the service can report.
///
/// All variants are plain values returned to the caller; nothing here is
/// fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Destination URL does not use the `http` or `https` scheme.
    #[error("Invalid URL format. Must start with http:// or https://")]
    InvalidUrlFormat { url: String },

    /// Custom alias collides with an existing short code.
    #[error("Custom alias already taken")]
    AliasTaken { alias: String },

    /// The generator kept producing codes that were already in use.
    #[error("Failed to allocate a unique short code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// No live record for the code. Expired records surface here too.
    #[error("{message}")]
    NotFound { code: String, message: String },

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Not-found error used by lookups that also hide expired records.
    pub fn not_found_or_expired(code: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: "URL not found or expired".to_string(),
        }
    }

    /// Not-found error used by management operations (update, delete).
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: "URL not found".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrlFormat { .. } | AppError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::AliasTaken { .. } => StatusCode::CONFLICT,
            AppError::AllocationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidUrlFormat { .. } => "invalid_url_format",
            AppError::AliasTaken { .. } => "alias_taken",
            AppError::AllocationExhausted { .. } => "allocation_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::Validation { .. } => "validation_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    fn details(&self) -> Value {
        match self {
            AppError::InvalidUrlFormat { url } => json!({ "url": url }),
            AppError::AliasTaken { alias } => json!({ "alias": alias }),
            AppError::AllocationExhausted { attempts } => json!({ "attempts": attempts }),
            AppError::NotFound { code, .. } => json!({ "code": code }),
            AppError::Validation { details, .. } | AppError::Internal { details, .. } => {
                details.clone()
            }
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.error_code(),
            message: self.to_string(),
            details: self.details(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateCode { code } => AppError::AliasTaken { alias: code },
            StoreError::Backend(message) => {
                tracing::error!(error = %message, "Record store failure");
                AppError::internal("Storage error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or(Value::Null);
        AppError::bad_request("Request validation failed", details)
    }
}
