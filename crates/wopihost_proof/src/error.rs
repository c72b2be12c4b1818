//! Error types for proof-key handling.

use thiserror::Error;

/// Result type for proof-key operations.
pub type ProofResult<T> = Result<T, ProofError>;

/// Errors that can occur while building a verifier.
///
/// Verification itself never errors: an undecodable proof header or
/// signature simply fails to verify.
#[derive(Debug, Error)]
pub enum ProofError {
    /// Key material from the discovery document did not decode.
    #[error("invalid proof key material: {0}")]
    InvalidKey(String),
}
