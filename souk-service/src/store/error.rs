//! Document store error types
//!
//! Structured errors for store operations, carrying the operation that
//! failed and the entity involved.
//!
//! # Example
//!
//! ```rust
//! use souk_service::store::{StoreError, StoreErrorKind};
//!
//! let error = StoreError::not_found("Brand", "b_123");
//! assert!(matches!(error.kind, StoreErrorKind::NotFound));
//! assert_eq!(error.entity_id, Some("b_123".to_string()));
//! ```

use std::fmt;

/// Operation being performed when the store error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// Creating a new document
    Create,
    /// Loading a document by id
    FindById,
    /// Executing a list plan
    Find,
    /// Counting documents matching a filter
    Count,
    /// Conditional update by id
    Update,
    /// Re-saving a loaded document
    Save,
    /// Deleting a document by id
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::FindById => write!(f, "find_by_id"),
            Self::Find => write!(f, "find"),
            Self::Count => write!(f, "count"),
            Self::Update => write!(f, "update"),
            Self::Save => write!(f, "save"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of store error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// Document was not found
    NotFound,
    /// Document could not be encoded or decoded
    Serialization,
    /// Backend unreachable or not ready
    Unavailable,
    /// Other unclassified error
    Other,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Serialization => write!(f, "serialization"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured store error with operation context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// The operation being performed when the error occurred
    pub operation: StoreOperation,
    /// The category of error
    pub kind: StoreErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The kind of entity involved (e.g., "Brand", "Order")
    pub entity_kind: Option<String>,
    /// The id of the document involved
    pub entity_id: Option<String>,
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create a new store error.
    pub fn new(
        operation: StoreOperation,
        kind: StoreErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_kind: None,
            entity_id: None,
        }
    }

    /// A "not found" error naming the missing document.
    pub fn not_found(entity_kind: impl Into<String>, entity_id: impl Into<String>) -> Self {
        let entity_kind = entity_kind.into();
        let entity_id = entity_id.into();
        Self {
            operation: StoreOperation::FindById,
            kind: StoreErrorKind::NotFound,
            message: format!("No document for this id {entity_id}"),
            entity_kind: Some(entity_kind),
            entity_id: Some(entity_id),
        }
    }

    /// A serialization error during `operation`.
    pub fn serialization(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StoreErrorKind::Serialization, message)
    }

    /// An unavailable-backend error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StoreOperation::FindById,
            StoreErrorKind::Unavailable,
            message,
        )
    }

    /// Set the operation that caused the error.
    #[must_use]
    pub fn with_operation(mut self, operation: StoreOperation) -> Self {
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

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "store {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(kind), Some(id)) = (&self.entity_kind, &self.entity_id) {
            write!(f, " [{kind}: {id}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_entity_context() {
        let error = StoreError::not_found("Brand", "b_123");
        assert_eq!(error.operation, StoreOperation::FindById);
        assert_eq!(error.kind, StoreErrorKind::NotFound);
        assert_eq!(error.entity_kind, Some("Brand".to_string()));
        assert_eq!(error.entity_id, Some("b_123".to_string()));
        assert!(error.message.contains("b_123"));
    }

    #[test]
    fn test_with_operation() {
        let error = StoreError::not_found("Order", "o_1").with_operation(StoreOperation::Delete);
        assert_eq!(error.operation, StoreOperation::Delete);
    }

    #[test]
    fn test_display_with_entity() {
        let error = StoreError::not_found("Brand", "b_123");
        let display = format!("{error}");
        assert!(display.contains("not_found"));
        assert!(display.contains("[Brand: b_123]"));
    }

    #[test]
    fn test_display_without_entity() {
        let error = StoreError::unavailable("backend down");
        let display = format!("{error}");
        assert!(display.contains("unavailable"));
        assert!(!display.contains('['));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(format!("{}", StoreOperation::FindById), "find_by_id");
        assert_eq!(format!("{}", StoreOperation::Save), "save");
        assert_eq!(format!("{}", StoreOperation::Delete), "delete");
    }
}
