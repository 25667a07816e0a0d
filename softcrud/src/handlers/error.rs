//! API error types for handler operations
//!
//! [`ApiError`] is the boundary type: manager and service failures are
//! converted into it and its `IntoResponse` impl maps them to HTTP statuses.
//!
//! # Example
//!
//! ```rust
//! use softcrud::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found("Note", "42");
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.kind.status_code().as_u16(), 404);
//! assert_eq!(error.kind.error_code(), "NOT_FOUND");
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::{
    RepositoryError, RepositoryErrorKind, RepositoryOperation, NOT_FOUND_MESSAGE,
};

/// Controller action an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl ApiOperation {
    /// Lowercase name used in logs and error bodies
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads map to the action that issued them, writes to `Update`
impl From<RepositoryOperation> for ApiOperation {
    fn from(op: RepositoryOperation) -> Self {
        match op {
            RepositoryOperation::FindById | RepositoryOperation::FindOneBy => Self::Get,
            RepositoryOperation::FindAll | RepositoryOperation::FindBy => Self::List,
            RepositoryOperation::Persist | RepositoryOperation::Flush => Self::Update,
            RepositoryOperation::SoftDelete => Self::Delete,
        }
    }
}

/// What went wrong, independent of the action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No live entity with the requested id
    NotFound,
    /// The service rejected the request data
    ValidationFailed,
    /// Body or path could not be decoded
    BadRequest,
    Conflict,
    InternalError,
    /// The store timed out or could not be reached
    ServiceUnavailable,
}

impl ApiErrorKind {
    /// Status sent to the client
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// The `code` field of the error body, e.g. `NOT_FOUND`
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::BadRequest => "BAD_REQUEST",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_code().to_lowercase())
    }
}

impl From<RepositoryErrorKind> for ApiErrorKind {
    fn from(kind: RepositoryErrorKind) -> Self {
        match kind {
            RepositoryErrorKind::NotFound => Self::NotFound,
            RepositoryErrorKind::ValidationFailed => Self::ValidationFailed,
            RepositoryErrorKind::ConstraintViolation => Self::Conflict,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout => {
                Self::ServiceUnavailable
            }
            RepositoryErrorKind::StorageError
            | RepositoryErrorKind::SerializationError
            | RepositoryErrorKind::Other => Self::InternalError,
        }
    }
}

/// A validation problem with a single request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    /// Machine-readable code, e.g. `REQUIRED`
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Error returned by controller actions and services
///
/// Constructors pick a default operation; controllers overwrite it with
/// [`with_operation`](Self::with_operation) once the action is known.
///
/// # Example
///
/// ```rust
/// use softcrud::handlers::{ApiError, FieldError};
///
/// let error = ApiError::validation_failed("Note is invalid")
///     .with_field_error(FieldError::new("title", "REQUIRED", "title is required"));
/// assert_eq!(error.fields.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub operation: ApiOperation,
    pub kind: ApiErrorKind,
    /// Client-facing message
    pub message: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    /// Empty unless the service reported per-field problems
    pub fields: Vec<FieldError>,
}

impl ApiError {
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
            fields: Vec::new(),
        }
    }

    /// 404 for a missing or soft-deleted entity
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::NotFound, NOT_FOUND_MESSAGE)
            .with_entity(entity_type, entity_id)
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Create, ApiErrorKind::ValidationFailed, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Create, ApiErrorKind::BadRequest, message)
    }

    pub fn conflict(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::InternalError, message)
    }

    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    #[must_use]
    pub fn with_field_error(mut self, field: FieldError) -> Self {
        self.fields.push(field);
        self
    }

    /// Only an unavailable store is worth retrying
    pub fn is_retriable(&self) -> bool {
        self.kind == ApiErrorKind::ServiceUnavailable
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed ({}): {}", self.operation, self.kind, self.message)?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{entity_type}: {entity_id}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// JSON body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub code: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            error: err.message,
            code: err.kind.error_code().to_string(),
            status: err.kind.status_code().as_u16(),
            operation: Some(err.operation.to_string()),
            entity_type: err.entity_type,
            entity_id: err.entity_id,
            fields: err.fields,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, retriable = self.is_retriable(), "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        (status, Json(ApiErrorResponse::from(self))).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let kind = ApiErrorKind::from(err.kind);

        // store details stay in the logs
        let message = match kind {
            ApiErrorKind::ServiceUnavailable => "Service temporarily unavailable".to_string(),
            ApiErrorKind::InternalError => {
                tracing::error!(error = %err, "repository failure");
                "An internal error occurred".to_string()
            }
            _ => err.message,
        };

        Self {
            operation: err.operation.into(),
            kind,
            message,
            entity_type: err.entity_type,
            entity_id: err.entity_id,
            fields: Vec::new(),
        }
    }
}
