//! Lock store trait definition.

use crate::error::LockResult;
use wopihost_protocol::FileId;

/// A key-value store mapping file id to the current WOPI lock token.
///
/// Stores are **opaque token maps**. The lock state machine lives in
/// [`crate::LockCoordinator`]; stores do not interpret tokens and never
/// expire them.
///
/// # Invariants
///
/// - `get` returns exactly the token last stored for that file id
/// - `compare_and_swap` is atomic: no interleaving store mutation can
///   occur between its comparison and its write
/// - Stores must be `Send + Sync` for concurrent request handling
///
/// # Implementors
///
/// - [`crate::InMemoryLockStore`] - single-instance deployments and tests
///
/// Multi-instance deployments back this trait with an external
/// consistent store; the state machine is independent of the backing.
pub trait LockStore: Send + Sync {
    /// Returns the current lock token for a file, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    fn get(&self, id: &FileId) -> LockResult<Option<String>>;

    /// Atomically replaces the lock record if it matches `expected`.
    ///
    /// `expected` is the token the caller believes is current (`None`
    /// for "no lock"); `replacement` is the desired new state (`None`
    /// removes the record). Returns true when the swap was applied,
    /// false when the current state did not match `expected`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    fn compare_and_swap(
        &self,
        id: &FileId,
        expected: Option<&str>,
        replacement: Option<&str>,
    ) -> LockResult<bool>;

    /// Unconditionally removes the lock record for a file.
    ///
    /// Used for administrative cleanup, not by the state machine.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    fn remove(&self, id: &FileId) -> LockResult<()>;
}
