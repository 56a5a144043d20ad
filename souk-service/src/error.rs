//! Library-level error type

use thiserror::Error;

use crate::handlers::ApiError;
use crate::store::StoreError;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the service plumbing.
///
/// Request-scoped failures travel as [`ApiError`] through the REST boundary;
/// this enum covers everything outside a request (startup, config, I/O) and
/// wraps the request-scoped kinds for callers that need one error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// Socket or filesystem I/O failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A store operation failed outside a request context
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A handler operation failed outside a request context
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts() {
        let error: Error = StoreError::not_found("Brand", "b_1").into();
        assert!(matches!(error, Error::Store(_)));
        assert!(error.to_string().contains("b_1"));
    }

    #[test]
    fn test_api_error_converts() {
        let error: Error = ApiError::not_found("Brand", "b_1").into();
        assert!(matches!(error, Error::Api(_)));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken");
        let error: Error = io.into();
        assert!(error.to_string().contains("taken"));
    }
}
