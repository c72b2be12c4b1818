//! Server facade.

use crate::dispatch::FileOperationDispatcher;
use crate::host::Principal;
use tracing::{debug, warn};
use wopihost_proof::ProofKeyVerifier;
use wopihost_protocol::{WopiError, WopiRequest, WopiResponse, WopiResult};

/// The WOPI host's request entry point.
///
/// Wraps a [`FileOperationDispatcher`] with the cross-cutting request
/// pipeline: file resolution first, then proof-key verification, then
/// dispatch. Failures are folded into status-plus-headers responses so
/// the HTTP routing layer only ever serializes a [`WopiResponse`].
pub struct WopiServer {
    dispatcher: FileOperationDispatcher,
    verifier: Option<ProofKeyVerifier>,
}

impl WopiServer {
    /// Creates a server without proof-key verification; every request
    /// is treated as authentic.
    #[must_use]
    pub fn new(dispatcher: FileOperationDispatcher) -> Self {
        Self {
            dispatcher,
            verifier: None,
        }
    }

    /// Enables proof-key verification of signed requests.
    #[must_use]
    pub fn with_verifier(mut self, verifier: ProofKeyVerifier) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Handles one request on behalf of a principal.
    ///
    /// Never fails; protocol errors become their status responses.
    pub fn handle(&self, principal: &Principal, request: &WopiRequest) -> WopiResponse {
        match self.dispatch(principal, request) {
            Ok(response) => response,
            Err(error) => {
                warn!(
                    operation = request.operation.name(),
                    file_id = %request.file_id,
                    status = error.status_code(),
                    %error,
                    "file operation failed"
                );
                WopiResponse::from_error(&error)
            }
        }
    }

    fn dispatch(&self, principal: &Principal, request: &WopiRequest) -> WopiResult<WopiResponse> {
        // Resolution precedes proof verification: an unresolvable id is
        // 404 even on a badly signed request.
        self.dispatcher.resolve(&request.file_id)?;
        self.verify_proof(request)?;
        self.dispatcher.handle(principal, request)
    }

    fn verify_proof(&self, request: &WopiRequest) -> WopiResult<()> {
        let Some(verifier) = &self.verifier else {
            return Ok(());
        };
        let (proof, old_proof, timestamp) = match &request.proof {
            Some(headers) => (
                Some(headers.proof.as_str()),
                headers.proof_old.as_deref(),
                headers.timestamp.as_deref(),
            ),
            None => (None, None, None),
        };
        if verifier.verify(
            proof,
            old_proof,
            &request.url,
            &request.access_token,
            timestamp,
        ) {
            Ok(())
        } else {
            debug!(file_id = %request.file_id, "proof verification failed");
            Err(WopiError::ProofVerification)
        }
    }
}
