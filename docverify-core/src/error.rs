//! Error types for DocVerify.
//!
//! A missing document is deliberately absent from this hierarchy: lookups and
//! removals report it through their own outcome enums so callers can branch on
//! it without treating it as a failure.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `DocVerifyError`.
pub type Result<T> = std::result::Result<T, DocVerifyError>;

/// Main error type for all DocVerify operations.
#[derive(Debug, Error)]
pub enum DocVerifyError {
    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A required request field is missing or empty.
    #[error("Validation error: {0}")]
    Validation(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Persisted state exists but could not be read or parsed.
    #[error("Failed to read registry at {}: {reason}", path.display())]
    StorageRead {
        /// Location of the store
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Persisting the registry failed; the mutation was not committed.
    #[error("Failed to write registry at {}: {reason}", path.display())]
    StorageWrite {
        /// Location of the store
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocVerifyError {
    /// Builds a validation error naming the missing fields.
    pub fn missing_fields(fields: &[&str]) -> Self {
        DocVerifyError::Validation(format!("Missing required fields: {}", fields.join(", ")))
    }

    /// Builds a read error for the store at `path`.
    pub fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DocVerifyError::StorageRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Builds a write error for the store at `path`.
    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DocVerifyError::StorageWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, DocVerifyError::Validation(_))
    }

    /// Returns true if the persisted registry could not be read or written.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            DocVerifyError::StorageRead { .. } | DocVerifyError::StorageWrite { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DocVerifyError::read("lib/document-registry.json", "expected value at line 1");
        let msg = err.to_string();
        assert!(msg.contains("lib/document-registry.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_missing_fields_message() {
        let err = DocVerifyError::missing_fields(&["registrationNumber", "documentType"]);
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: registrationNumber, documentType"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(DocVerifyError::Validation("x".into()).is_validation_error());
        assert!(!DocVerifyError::Validation("x".into()).is_storage_error());

        assert!(DocVerifyError::read("a", "b").is_storage_error());
        assert!(DocVerifyError::write("a", "b").is_storage_error());
        assert!(!DocVerifyError::missing_fields(&["filename"]).is_storage_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(DocVerifyError::from);
        assert!(matches!(result, Err(DocVerifyError::Json(_))));
    }
}
