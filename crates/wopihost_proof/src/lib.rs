//! # WOPI Host Proof
//!
//! Proof-key verification for inbound WOPI requests.
//!
//! WOPI clients sign every request with an RSA key pair published in
//! the discovery document, so the host can authenticate the request's
//! origin. This crate provides:
//! - [`ProofKeyVerifier`] - signature verification against the current
//!   and previous public keys, with the protocol's rotation fallback
//! - [`expected_proof_bytes`] - the byte sequence the client signs
//! - Timestamp freshness checking in .NET ticks
//!
//! Signatures are RSA PKCS#1 v1.5 over SHA-256, transported
//! base64-encoded in the `X-WOPI-Proof` / `X-WOPI-ProofOld` headers.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod verifier;

pub use error::{ProofError, ProofResult};
pub use verifier::{
    expected_proof_bytes, now_ticks, public_key_from_base64, ProofKeyVerifier, TICKS_AT_UNIX_EPOCH,
    TICKS_PER_SECOND,
};
