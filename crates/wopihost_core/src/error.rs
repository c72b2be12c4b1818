//! Error types for the document-host capability.

use thiserror::Error;
use wopihost_protocol::WopiError;

/// Result type for document-host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Errors the document store can surface.
#[derive(Debug, Error)]
pub enum HostError {
    /// The document or its blob does not exist.
    #[error("file not found")]
    NotFound,

    /// The store backend failed.
    #[error("document store error: {0}")]
    Backend(String),
}

impl From<HostError> for WopiError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::NotFound => WopiError::NotFound,
            HostError::Backend(msg) => WopiError::Host(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_wopi_statuses() {
        assert_eq!(WopiError::from(HostError::NotFound).status_code(), 404);
        assert_eq!(
            WopiError::from(HostError::Backend("down".into())).status_code(),
            500
        );
    }
}
