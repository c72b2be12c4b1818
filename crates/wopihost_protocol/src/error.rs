//! Error taxonomy for WOPI operations.

use thiserror::Error;

/// Result type for WOPI operations.
pub type WopiResult<T> = Result<T, WopiError>;

/// Failures a WOPI operation can surface to the client.
///
/// Every variant maps to a protocol-defined HTTP status. Per the WOPI
/// convention, a missing write permission surfaces as a lock conflict
/// for most operations; PutRelativeFile's missing create permission
/// surfaces as [`WopiError::NotImplemented`] instead. That asymmetry is
/// protocol-visible and preserved deliberately.
#[derive(Error, Debug)]
pub enum WopiError {
    /// Unknown file id, or the document carries no blob.
    #[error("file not found")]
    NotFound,

    /// A required header is missing or empty.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A host-native lock or a WOPI lock mismatch blocks the operation.
    ///
    /// Carries the current WOPI lock token so it can be echoed in the
    /// `X-WOPI-Lock` response header; empty when no WOPI lock exists.
    #[error("lock conflict, current lock {current_lock:?}")]
    LockConflict {
        /// Current lock token, empty if none.
        current_lock: String,
    },

    /// Content size exceeds a representable or client-supplied limit.
    #[error("content size exceeds limit")]
    PreconditionFailed,

    /// Malformed or unsupported parameter combination.
    #[error("operation not implemented for this request")]
    NotImplemented,

    /// The request carried a proof that did not verify.
    #[error("proof verification failed")]
    ProofVerification,

    /// A document-store or lock-store backend failure.
    #[error("host error: {0}")]
    Host(String),
}

impl WopiError {
    /// Returns the HTTP status code for this failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            WopiError::NotFound => 404,
            WopiError::BadRequest(_) => 400,
            WopiError::LockConflict { .. } => 409,
            WopiError::PreconditionFailed => 412,
            WopiError::NotImplemented => 501,
            WopiError::ProofVerification | WopiError::Host(_) => 500,
        }
    }

    /// Returns true if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Returns true if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
