//! WOPI header names.
//!
//! Header names are defined by the WOPI protocol and must be emitted
//! byte-for-byte; note the unusual capitalization of `X-WOPI-TimeStamp`.

/// Selects the operation on `POST /files/{id}` requests.
pub const OVERRIDE: &str = "X-WOPI-Override";

/// Lock token supplied by the client, or the current lock on responses.
pub const LOCK: &str = "X-WOPI-Lock";

/// Previous lock token on unlock-and-relock requests.
pub const OLD_LOCK: &str = "X-WOPI-OldLock";

/// Item version emitted on lock and content-update successes.
pub const ITEM_VERSION: &str = "X-WOPI-ItemVersion";

/// Largest content size the client is prepared to receive.
pub const MAX_EXPECTED_SIZE: &str = "X-WOPI-MaxExpectedSize";

/// New file name requested by a rename operation.
pub const REQUESTED_NAME: &str = "X-WOPI-RequestedName";

/// File name hint for creating a sibling file.
pub const SUGGESTED_TARGET: &str = "X-WOPI-SuggestedTarget";

/// Exact file name for creating a sibling file.
pub const RELATIVE_TARGET: &str = "X-WOPI-RelativeTarget";

/// Share-link flavor requested by a get-share-url operation.
pub const URL_TYPE: &str = "X-WOPI-UrlType";

/// Proof signature over the request, made with the client's current key.
pub const PROOF: &str = "X-WOPI-Proof";

/// Proof signature made with the client's previous key.
pub const PROOF_OLD: &str = "X-WOPI-ProofOld";

/// Timestamp of the proof signature, in .NET ticks.
pub const TIMESTAMP: &str = "X-WOPI-TimeStamp";
