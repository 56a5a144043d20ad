//! API error types for handler operations
//!
//! Structured errors for the REST boundary, with automatic HTTP status code
//! mapping via `IntoResponse`. The handler factory itself only ever
//! originates [`ApiErrorKind::NotFound`]; every other kind exists so errors
//! from collaborators (validation, the store backend) pass through this one
//! boundary unchanged.
//!
//! # Example
//!
//! ```rust
//! use souk_service::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found("Brand", "b_123");
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.entity_id, Some("b_123".to_string()));
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::{StoreError, StoreErrorKind, StoreOperation};

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// Listing entities
    List,
    /// Fetching a single entity by id
    Fetch,
    /// Creating a new entity
    Create,
    /// Updating an existing entity
    Update,
    /// Deleting an entity
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Fetch => write!(f, "fetch"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Entity was not found
    NotFound,
    /// Request payload validation failed
    ValidationFailed,
    /// Invalid request format or parameters
    BadRequest,
    /// Caller identity missing
    Unauthorized,
    /// Operation conflicts with current state
    Conflict,
    /// Internal server error
    InternalError,
    /// Service temporarily unavailable
    ServiceUnavailable,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::ValidationFailed => write!(f, "validation_failed"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Conflict => write!(f, "conflict"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

impl ApiErrorKind {
    /// The HTTP status code for this error kind.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// The error code string for this error kind.
    #[must_use]
    pub fn error_code(&self) -> String {
        format!("{self}").to_uppercase()
    }
}

/// Structured API error with operation context.
///
/// # Example
///
/// ```rust
/// use souk_service::handlers::ApiError;
///
/// let error = ApiError::not_found("Product", "p_42");
/// assert!(error.to_string().contains("[Product: p_42]"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The operation being performed when the error occurred
    pub operation: ApiOperation,
    /// The category of error
    pub kind: ApiErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The kind of entity involved (e.g., "Brand", "Order")
    pub entity_kind: Option<String>,
    /// The id of the entity involved
    pub entity_id: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_kind: None,
            entity_id: None,
        }
    }

    /// A "not found" error naming the offending identifier.
    pub fn not_found(entity_kind: impl Into<String>, entity_id: impl Into<String>) -> Self {
        let entity_kind = entity_kind.into();
        let entity_id = entity_id.into();
        Self {
            operation: ApiOperation::Fetch,
            kind: ApiErrorKind::NotFound,
            message: format!("No {entity_kind} found for id {entity_id}"),
            entity_kind: Some(entity_kind),
            entity_id: Some(entity_id),
        }
    }

    /// A payload validation error.
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(
            ApiOperation::Create,
            ApiErrorKind::ValidationFailed,
            message,
        )
    }

    /// A malformed-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::List, ApiErrorKind::BadRequest, message)
    }

    /// A missing-identity error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Fetch, ApiErrorKind::Unauthorized, message)
    }

    /// A state-conflict error.
    pub fn conflict(operation: ApiOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::Conflict, message)
    }

    /// An internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Fetch, ApiErrorKind::InternalError, message)
    }

    /// Set the operation that caused the error.
    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Add entity context to an existing error.
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_kind: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_kind = Some(entity_kind.into());
        self.entity_id = Some(entity_id.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(kind), Some(id)) = (&self.entity_kind, &self.entity_id) {
            write!(f, " [{kind}: {id}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Response body for API errors
#[derive(Debug, Serialize, Deserialize)]
struct ApiErrorResponse {
    error: String,
    code: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        // Errors are logged exactly once, here at the boundary.
        tracing::error!(
            operation = %self.operation,
            kind = %self.kind,
            entity_kind = ?self.entity_kind,
            entity_id = ?self.entity_id,
            "API error: {}", self.message
        );

        let body = ApiErrorResponse {
            error: self.message,
            code: self.kind.error_code(),
            status: status.as_u16(),
            entity_kind: self.entity_kind,
            entity_id: self.entity_id,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let operation = match err.operation {
            StoreOperation::Create => ApiOperation::Create,
            StoreOperation::FindById => ApiOperation::Fetch,
            StoreOperation::Find | StoreOperation::Count => ApiOperation::List,
            StoreOperation::Update | StoreOperation::Save => ApiOperation::Update,
            StoreOperation::Delete => ApiOperation::Delete,
        };

        let kind = match err.kind {
            StoreErrorKind::NotFound => ApiErrorKind::NotFound,
            StoreErrorKind::Unavailable => ApiErrorKind::ServiceUnavailable,
            StoreErrorKind::Serialization | StoreErrorKind::Other => ApiErrorKind::InternalError,
        };

        // Internal details stay out of user-facing messages.
        let message = match kind {
            ApiErrorKind::ServiceUnavailable => "Service temporarily unavailable".to_string(),
            ApiErrorKind::InternalError => "An internal error occurred".to_string(),
            _ => err.message,
        };

        Self {
            operation,
            kind,
            message,
            entity_kind: err.entity_kind,
            entity_id: err.entity_id,
        }
    }
}
