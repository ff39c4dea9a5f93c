//! Error types for sheetsort.
//!
//! Three taxonomies with different propagation rules: `LlmError` is always
//! absorbed by the request handler (classification degrades, the request
//! still succeeds), `StoreError` wraps tab store faults, and `ProcessError`
//! is what actually decides the HTTP outcome of a request.

use thiserror::Error;

/// Faults from the LLM backend or reply parsing.
///
/// None of these ever change the HTTP outcome of a request.
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    #[error("LLM backend disabled: no API key configured")]
    Disabled,

    #[error("LLM quota exhausted")]
    ResourceExhausted,

    #[error("LLM HTTP error: {0}")]
    Http(String),

    #[error("LLM returned empty response")]
    EmptyResponse,

    #[error("invalid JSON in LLM reply: {0}")]
    InvalidJson(String),
}

/// Faults from the tab store (Google Sheets).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store HTTP error: {0}")]
    Http(String),

    #[error("store rejected request: {0}")]
    Rejected(String),
}

/// Per-request failure modes, mapped to HTTP statuses.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("No text provided")]
    EmptyText,

    #[error("Google Sheets connection not active")]
    StoreUnavailable,

    #[error("Internal server error: {0}")]
    StoreWrite(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ProcessError {
    /// HTTP status code for this failure mode.
    pub fn http_status(&self) -> u16 {
        match self {
            ProcessError::EmptyText => 400,
            ProcessError::StoreUnavailable => 503,
            ProcessError::StoreWrite(_) => 500,
            ProcessError::Internal(_) => 500,
        }
    }

    /// Whether this failure should produce an audit row.
    pub fn should_audit(&self) -> bool {
        matches!(
            self,
            ProcessError::StoreWrite(_) | ProcessError::Internal(_)
        )
    }
}

impl From<StoreError> for ProcessError {
    fn from(e: StoreError) -> Self {
        ProcessError::StoreWrite(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProcessError::EmptyText.http_status(), 400);
        assert_eq!(ProcessError::StoreUnavailable.http_status(), 503);
        assert_eq!(ProcessError::StoreWrite("x".into()).http_status(), 500);
        assert_eq!(ProcessError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn test_audit_policy() {
        assert!(!ProcessError::EmptyText.should_audit());
        assert!(!ProcessError::StoreUnavailable.should_audit());
        assert!(ProcessError::StoreWrite("x".into()).should_audit());
        assert!(ProcessError::Internal("x".into()).should_audit());
    }

    #[test]
    fn test_detail_strings() {
        assert_eq!(ProcessError::EmptyText.to_string(), "No text provided");
        assert_eq!(
            ProcessError::StoreUnavailable.to_string(),
            "Google Sheets connection not active"
        );
        assert!(ProcessError::StoreWrite("quota".into())
            .to_string()
            .starts_with("Internal server error:"));
    }
}
