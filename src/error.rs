//! Error types for outreach
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

use crate::api::ApiError;

/// All error types that can occur in outreach
#[derive(Debug, Error)]
pub enum OutreachError {
    /// Form data failed consumer-side validation
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A form record could not be converted to or from a typed model
    #[error("Form error: {0}")]
    Form(String),

    /// Backend API error
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A form submission handler rejected the record
    #[error("Submit failed: {0}")]
    Submit(String),

    /// Clipboard capability failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for outreach operations
pub type Result<T> = std::result::Result<T, OutreachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_error() {
        let err = OutreachError::ValidationFailed("name is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: name is required");
    }

    #[test]
    fn test_api_error_conversion() {
        let api_err = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        let err: OutreachError = api_err.into();
        assert!(matches!(err, OutreachError::Api(_)));
        assert_eq!(err.to_string(), "API error: Request failed with status 500: boom");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: OutreachError = io_err.into();
        assert!(matches!(err, OutreachError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: OutreachError = json_err.into();
        assert!(matches!(err, OutreachError::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(OutreachError::Form("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
