use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ErrorCode {
    // Authentication errors (1xxx)
    #[serde(rename = "AUTH_1001")]
    InvalidCredentials,
    #[serde(rename = "AUTH_1002")]
    TokenExpired,
    #[serde(rename = "AUTH_1003")]
    TokenInvalid,
    #[serde(rename = "AUTH_1004")]
    TokenMissing,
    #[serde(rename = "AUTH_1005")]
    PasswordLoginUnavailable,

    // Authorization errors (2xxx)
    #[serde(rename = "AUTHZ_2001")]
    InsufficientPermissions,
    #[serde(rename = "AUTHZ_2002")]
    ResourceAccessDenied,

    // Validation errors (3xxx)
    #[serde(rename = "VAL_3001")]
    InvalidInput,
    #[serde(rename = "VAL_3002")]
    MissingRequiredField,
    #[serde(rename = "VAL_3003")]
    InvalidFormat,
    #[serde(rename = "VAL_3004")]
    InvalidEmail,

    // Resource errors (4xxx)
    #[serde(rename = "RES_4001")]
    NotFound,
    #[serde(rename = "RES_4002")]
    AlreadyExists,
    #[serde(rename = "RES_4003")]
    Conflict,

    // Business logic errors (5xxx)
    #[serde(rename = "BIZ_5001")]
    InsufficientStock,
    #[serde(rename = "BIZ_5002")]
    ProductUnavailable,
    #[serde(rename = "BIZ_5003")]
    InvalidStatusTransition,
    #[serde(rename = "BIZ_5004")]
    OwnProductInCart,

    // Database errors (7xxx)
    #[serde(rename = "DB_7001")]
    QueryFailed,
    #[serde(rename = "DB_7002")]
    TransactionFailed,
    #[serde(rename = "DB_7003")]
    ConstraintViolation,

    // External service errors (8xxx)
    #[serde(rename = "EXT_8001")]
    StorageUnavailable,
    #[serde(rename = "EXT_8002")]
    OAuthExchangeFailed,

    // Internal errors (9xxx)
    #[serde(rename = "INT_9999")]
    InternalServerError,
    #[serde(rename = "INT_9998")]
    ConfigurationError,
}

impl ErrorCode {
    /// Get numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::InvalidCredentials => 1001,
            ErrorCode::TokenExpired => 1002,
            ErrorCode::TokenInvalid => 1003,
            ErrorCode::TokenMissing => 1004,
            ErrorCode::PasswordLoginUnavailable => 1005,

            ErrorCode::InsufficientPermissions => 2001,
            ErrorCode::ResourceAccessDenied => 2002,

            ErrorCode::InvalidInput => 3001,
            ErrorCode::MissingRequiredField => 3002,
            ErrorCode::InvalidFormat => 3003,
            ErrorCode::InvalidEmail => 3004,

            ErrorCode::NotFound => 4001,
            ErrorCode::AlreadyExists => 4002,
            ErrorCode::Conflict => 4003,

            ErrorCode::InsufficientStock => 5001,
            ErrorCode::ProductUnavailable => 5002,
            ErrorCode::InvalidStatusTransition => 5003,
            ErrorCode::OwnProductInCart => 5004,

            ErrorCode::QueryFailed => 7001,
            ErrorCode::TransactionFailed => 7002,
            ErrorCode::ConstraintViolation => 7003,

            ErrorCode::StorageUnavailable => 8001,
            ErrorCode::OAuthExchangeFailed => 8002,

            ErrorCode::InternalServerError => 9999,
            ErrorCode::ConfigurationError => 9998,
        }
    }

    /// Get user-friendly message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Your session has expired. Please log in again",
            ErrorCode::TokenInvalid => "Invalid authentication token",
            ErrorCode::TokenMissing => "Authentication required. Please log in",
            ErrorCode::PasswordLoginUnavailable => {
                "Please sign in with Google or reset your password"
            }

            ErrorCode::InsufficientPermissions => {
                "You don't have permission to perform this action"
            }
            ErrorCode::ResourceAccessDenied => "Access to this resource is denied",

            ErrorCode::InvalidInput => "Invalid input provided",
            ErrorCode::MissingRequiredField => "Required field is missing",
            ErrorCode::InvalidFormat => "Invalid format provided",
            ErrorCode::InvalidEmail => "Invalid email address format",

            ErrorCode::NotFound => "The requested resource was not found",
            ErrorCode::AlreadyExists => "This resource already exists",
            ErrorCode::Conflict => "A conflict occurred with an existing resource",

            ErrorCode::InsufficientStock => "Insufficient stock for the requested quantity",
            ErrorCode::ProductUnavailable => "Product is not available for purchase",
            ErrorCode::InvalidStatusTransition => "Order status transition is not allowed",
            ErrorCode::OwnProductInCart => "You cannot add your own products to cart",

            ErrorCode::QueryFailed => "Database query failed",
            ErrorCode::TransactionFailed => "Database transaction failed",
            ErrorCode::ConstraintViolation => "Database constraint violation",

            ErrorCode::StorageUnavailable => "Object storage is currently unavailable",
            ErrorCode::OAuthExchangeFailed => "Google sign-in failed",

            ErrorCode::InternalServerError => "An internal server error occurred",
            ErrorCode::ConfigurationError => "Server configuration error",
        }
    }
}

/// Structured error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub code_number: u16,
    pub message: String,
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    // Enhanced error types with codes
    #[error("{1}")]
    WithCode(ErrorCode, String),

    #[error("{1}")]
    WithCodeAndDetails(ErrorCode, String, String),

    #[error("Validation failed: {field}")]
    ValidationWithField {
        code: ErrorCode,
        field: String,
        message: String,
    },
}

impl ApiError {
    /// Create error with specific error code
    pub fn with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError::WithCode(code, message.into())
    }

    /// Create error with code and additional details
    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        ApiError::WithCodeAndDetails(code, message.into(), details.into())
    }

    /// Create validation error for specific field
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationWithField {
            code: ErrorCode::InvalidInput,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create general validation error
    pub fn validation_error(message: impl Into<String>, field: Option<&str>) -> Self {
        if let Some(field_name) = field {
            ApiError::ValidationWithField {
                code: ErrorCode::InvalidInput,
                field: field_name.to_string(),
                message: message.into(),
            }
        } else {
            ApiError::with_code(ErrorCode::InvalidInput, message)
        }
    }

    /// Helper: Invalid credentials
    pub fn invalid_credentials() -> Self {
        ApiError::with_code(ErrorCode::InvalidCredentials, "Invalid email or password")
    }

    /// Helper: Resource not found
    pub fn not_found(resource: &str) -> Self {
        ApiError::with_code(ErrorCode::NotFound, format!("{} not found", resource))
    }

    /// Helper: Resource already exists
    pub fn already_exists(resource: &str) -> Self {
        ApiError::with_code(
            ErrorCode::AlreadyExists,
            format!("{} already exists", resource),
        )
    }

    /// Helper: Insufficient stock with availability details
    pub fn insufficient_stock(product: &str, available: i32, requested: i32) -> Self {
        ApiError::with_details(
            ErrorCode::InsufficientStock,
            format!("Insufficient stock for product {}", product),
            format!("Available: {}, Requested: {}", available, requested),
        )
    }

    /// Get error code
    fn error_code(&self) -> ErrorCode {
        match self {
            ApiError::Authentication(_) => ErrorCode::InvalidCredentials,
            ApiError::BadRequest(_) => ErrorCode::InvalidInput,
            ApiError::Unauthorized(_) => ErrorCode::TokenMissing,
            ApiError::Forbidden(_) => ErrorCode::ResourceAccessDenied,
            ApiError::Validation(_) => ErrorCode::InvalidInput,
            ApiError::NotFound(_) => ErrorCode::NotFound,
            ApiError::Conflict(_) => ErrorCode::Conflict,
            ApiError::Database(_) => ErrorCode::QueryFailed,
            ApiError::ExternalService(_) => ErrorCode::StorageUnavailable,
            ApiError::Configuration(_) => ErrorCode::ConfigurationError,
            ApiError::Internal(_) => ErrorCode::InternalServerError,
            ApiError::WithCode(code, _) => *code,
            ApiError::WithCodeAndDetails(code, _, _) => *code,
            ApiError::ValidationWithField { code, .. } => *code,
        }
    }

    /// Get error details
    fn error_details(&self) -> Option<String> {
        match self {
            ApiError::WithCodeAndDetails(_, _, details) => Some(details.clone()),
            _ => None,
        }
    }

    /// Get field name for validation errors
    fn error_field(&self) -> Option<String> {
        match self {
            ApiError::ValidationWithField { field, .. } => Some(field.clone()),
            _ => None,
        }
    }

    /// Get status code
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Authentication(_)
            | ApiError::Unauthorized(_)
            | ApiError::WithCode(ErrorCode::InvalidCredentials, _)
            | ApiError::WithCode(ErrorCode::TokenExpired, _)
            | ApiError::WithCode(ErrorCode::TokenInvalid, _)
            | ApiError::WithCode(ErrorCode::TokenMissing, _)
            | ApiError::WithCode(ErrorCode::PasswordLoginUnavailable, _) => {
                StatusCode::UNAUTHORIZED
            }

            ApiError::Forbidden(_)
            | ApiError::WithCode(ErrorCode::InsufficientPermissions, _)
            | ApiError::WithCode(ErrorCode::ResourceAccessDenied, _) => StatusCode::FORBIDDEN,

            ApiError::BadRequest(_)
            | ApiError::Validation(_)
            | ApiError::ValidationWithField { .. }
            | ApiError::WithCode(ErrorCode::InvalidInput, _)
            | ApiError::WithCode(ErrorCode::MissingRequiredField, _)
            | ApiError::WithCode(ErrorCode::InvalidFormat, _)
            | ApiError::WithCode(ErrorCode::InvalidEmail, _)
            | ApiError::WithCode(ErrorCode::InsufficientStock, _)
            | ApiError::WithCode(ErrorCode::ProductUnavailable, _)
            | ApiError::WithCode(ErrorCode::InvalidStatusTransition, _)
            | ApiError::WithCode(ErrorCode::OwnProductInCart, _)
            | ApiError::WithCodeAndDetails(ErrorCode::InsufficientStock, _, _)
            | ApiError::WithCodeAndDetails(ErrorCode::InvalidInput, _, _) => {
                StatusCode::BAD_REQUEST
            }

            ApiError::NotFound(_) | ApiError::WithCode(ErrorCode::NotFound, _) => {
                StatusCode::NOT_FOUND
            }

            ApiError::Conflict(_)
            | ApiError::WithCode(ErrorCode::Conflict, _)
            | ApiError::WithCode(ErrorCode::AlreadyExists, _) => StatusCode::CONFLICT,

            ApiError::ExternalService(_)
            | ApiError::WithCode(ErrorCode::StorageUnavailable, _)
            | ApiError::WithCode(ErrorCode::OAuthExchangeFailed, _) => StatusCode::BAD_GATEWAY,

            ApiError::Database(_)
            | ApiError::Configuration(_)
            | ApiError::Internal(_)
            | ApiError::WithCode(_, _)
            | ApiError::WithCodeAndDetails(_, _, _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log error with appropriate level
    fn log_error(&self, request_id: &str) {
        match self.status_code() {
            status if status.is_server_error() => {
                error!(
                    request_id = %request_id,
                    error = %self,
                    "Server error occurred"
                );
            }
            status if status.is_client_error() => {
                warn!(
                    request_id = %request_id,
                    error = %self,
                    "Client error occurred"
                );
            }
            _ => {}
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let status = self.status_code();
        let code = self.error_code();

        self.log_error(&request_id);

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code,
                code_number: code.code(),
                message: match &self {
                    ApiError::WithCode(_, msg) | ApiError::WithCodeAndDetails(_, msg, _) => {
                        msg.clone()
                    }
                    ApiError::ValidationWithField { message, .. } => message.clone(),
                    ApiError::BadRequest(msg)
                    | ApiError::Validation(msg)
                    | ApiError::NotFound(msg)
                    | ApiError::Conflict(msg)
                    | ApiError::Forbidden(msg)
                    | ApiError::Unauthorized(msg) => msg.clone(),
                    _ => code.message().to_string(),
                },
                details: self.error_details(),
                field: self.error_field(),
            },
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Handle Axum JSON rejections and convert to structured API errors
pub fn handle_rejection(err: JsonRejection) -> Response {
    match err {
        JsonRejection::JsonDataError(e) => ApiError::with_details(
            ErrorCode::InvalidInput,
            "Invalid input provided",
            e.to_string(),
        )
        .into_response(),
        JsonRejection::JsonSyntaxError(_) => {
            ApiError::with_code(ErrorCode::InvalidFormat, "Invalid JSON format").into_response()
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::with_code(ErrorCode::InvalidFormat, "JSON content type required")
                .into_response()
        }
        _ => ApiError::with_details(
            ErrorCode::InvalidInput,
            "Invalid input provided",
            format!("{:?}", err),
        )
        .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::invalid_credentials().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::already_exists("User").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::not_found("Product").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::insufficient_stock("Lamp", 2, 5).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::with_code(ErrorCode::InvalidStatusTransition, "nope").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_code_numbers() {
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1001);
        assert_eq!(ErrorCode::InsufficientStock.code(), 5001);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4002);
    }
}
