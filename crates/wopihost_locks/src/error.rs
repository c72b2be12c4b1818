//! Error types for lock operations.

use thiserror::Error;
use wopihost_protocol::WopiError;

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;

/// Errors that can occur during lock operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// The operation conflicts with the current lock state.
    ///
    /// Carries the current WOPI lock token; empty when the conflict
    /// comes from a host-native lock or an unlocked state.
    #[error("lock conflict, current lock {current_lock:?}")]
    Conflict {
        /// Current lock token, empty if none.
        current_lock: String,
    },

    /// The request supplied an empty lock token.
    #[error("lock token must not be empty")]
    EmptyToken,

    /// The lock store backend failed.
    #[error("lock store error: {0}")]
    Store(String),

    /// The host's native lock capability failed.
    #[error("native lock error: {0}")]
    Native(String),
}

impl LockError {
    /// Creates a conflict carrying the given current token.
    #[must_use]
    pub fn conflict(current_lock: impl Into<String>) -> Self {
        LockError::Conflict {
            current_lock: current_lock.into(),
        }
    }
}

impl From<LockError> for WopiError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::Conflict { current_lock } => WopiError::LockConflict { current_lock },
            LockError::EmptyToken => WopiError::BadRequest("empty lock token".into()),
            LockError::Store(msg) | LockError::Native(msg) => WopiError::Host(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_wopi_conflict() {
        let err: WopiError = LockError::conflict("foo").into();
        match err {
            WopiError::LockConflict { current_lock } => assert_eq!(current_lock, "foo"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_token_maps_to_bad_request() {
        let err: WopiError = LockError::EmptyToken.into();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn backend_failures_map_to_host_error() {
        let err: WopiError = LockError::Store("down".into()).into();
        assert_eq!(err.status_code(), 500);
    }
}
