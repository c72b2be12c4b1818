//! Inbound request value object.

use crate::file_id::FileId;
use crate::operation::FileOperation;

/// Proof headers attached to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofHeaders {
    /// `X-WOPI-Proof` value.
    pub proof: String,
    /// `X-WOPI-ProofOld` value, if sent.
    pub proof_old: Option<String>,
    /// `X-WOPI-TimeStamp` value, if sent.
    pub timestamp: Option<String>,
}

/// A WOPI request after HTTP parsing.
///
/// The routing layer resolves the path into a [`FileId`], the verb and
/// headers into a [`FileOperation`], and forwards the pieces proof-key
/// verification needs: the full request URL as the client signed it and
/// the `access_token` query parameter.
#[derive(Debug, Clone)]
pub struct WopiRequest {
    /// Target file.
    pub file_id: FileId,
    /// Parsed operation.
    pub operation: FileOperation,
    /// Bearer credential from the `access_token` query parameter.
    pub access_token: String,
    /// Full request URL, exactly as received.
    pub url: String,
    /// Proof headers, when the client signed the request.
    pub proof: Option<ProofHeaders>,
}

impl WopiRequest {
    /// Creates an unsigned request.
    #[must_use]
    pub fn new(file_id: FileId, operation: FileOperation) -> Self {
        Self {
            file_id,
            operation,
            access_token: String::new(),
            url: String::new(),
            proof: None,
        }
    }

    /// Sets the access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    /// Sets the request URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Attaches proof headers.
    #[must_use]
    pub fn with_proof(mut self, proof: ProofHeaders) -> Self {
        self.proof = Some(proof);
        self
    }
}
