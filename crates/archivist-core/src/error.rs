//! Error types for archivist-core.

use thiserror::Error;

/// Errors that can occur while talking to a document datastore.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatastoreError {
    /// No project id was supplied, so there is nothing to connect to
    #[error("Datastore is not configured (missing project id)")]
    NotConfigured,
    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("Request failed: {0}")]
    Request(String),
    /// The server answered with a non-success status
    #[error("Datastore returned {code}: {message}")]
    Status { code: u16, message: String },
    /// The response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// The backend has been taken offline (in-memory store only)
    #[error("Datastore is offline")]
    Offline,
}

impl DatastoreError {
    /// Whether the failure points at credentials or security rules rather than the network.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, DatastoreError::Status { code: 401 | 403, .. })
    }
}

impl From<DatastoreError> for String {
    fn from(err: DatastoreError) -> String {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = DatastoreError::Status {
            code: 403,
            message: "Missing or insufficient permissions.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Datastore returned 403: Missing or insufficient permissions."
        );
        assert!(err.is_permission_denied());
    }

    #[test]
    fn test_network_error_is_not_permission_denied() {
        assert!(!DatastoreError::Request("timed out".into()).is_permission_denied());
        assert!(!DatastoreError::NotConfigured.is_permission_denied());
    }
}
