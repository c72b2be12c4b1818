//! The WOPI lock state machine.

use crate::error::{LockError, LockResult};
use crate::native::NativeLockOps;
use crate::store::LockStore;
use std::sync::Arc;
use wopihost_protocol::FileId;

/// Coordinates WOPI locks with the host's native locks.
///
/// Per file the WOPI state is `UNLOCKED` or `LOCKED(token)`; the host's
/// native lock is orthogonal, read-only state. A file counts as
/// host-locked when the host reports a native lock and the store has no
/// record for the file - a record means the native lock was placed by
/// this coordinator as part of a WOPI lock. Host-locked files fail
/// every operation here with a conflict, regardless of WOPI state.
///
/// State transitions use the store's compare-and-swap so that
/// concurrent requests on the same file cannot lose updates; a failed
/// swap re-reads and re-decides.
pub struct LockCoordinator {
    store: Arc<dyn LockStore>,
    native: Arc<dyn NativeLockOps>,
}

impl LockCoordinator {
    /// Creates a coordinator over a lock store and the host's native
    /// lock capability.
    pub fn new(store: Arc<dyn LockStore>, native: Arc<dyn NativeLockOps>) -> Self {
        Self { store, native }
    }

    /// Returns the current WOPI lock token without host-lock checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn current(&self, id: &FileId) -> LockResult<Option<String>> {
        self.store.get(id)
    }

    /// Takes or refreshes a lock.
    ///
    /// `UNLOCKED -> LOCKED(token)`; locking with the token already held
    /// is an idempotent refresh. A successful transition from unlocked
    /// also places the host-native lock.
    ///
    /// # Errors
    ///
    /// - [`LockError::EmptyToken`] for an empty token
    /// - [`LockError::Conflict`] when host-locked or locked with a
    ///   different token (carries the current token)
    pub fn lock(&self, id: &FileId, token: &str) -> LockResult<()> {
        if token.is_empty() {
            return Err(LockError::EmptyToken);
        }
        loop {
            self.ensure_not_host_locked(id)?;
            match self.store.get(id)?.as_deref() {
                None => {
                    if self.store.compare_and_swap(id, None, Some(token))? {
                        self.native.lock(id)?;
                        return Ok(());
                    }
                    // Lost a race; re-read and re-decide.
                }
                Some(current) if current == token => return Ok(()),
                Some(current) => return Err(LockError::conflict(current)),
            }
        }
    }

    /// Returns the current lock token, empty string if unlocked.
    ///
    /// # Errors
    ///
    /// [`LockError::Conflict`] when the file is host-locked.
    pub fn get_lock(&self, id: &FileId) -> LockResult<String> {
        self.ensure_not_host_locked(id)?;
        Ok(self.store.get(id)?.unwrap_or_default())
    }

    /// Releases a lock. `LOCKED(token) -> UNLOCKED`.
    ///
    /// Unlocking an unlocked file is a conflict (with an empty current
    /// token). A successful unlock also releases the host-native lock.
    ///
    /// # Errors
    ///
    /// - [`LockError::EmptyToken`] for an empty token
    /// - [`LockError::Conflict`] when host-locked, unlocked, or locked
    ///   with a different token
    pub fn unlock(&self, id: &FileId, token: &str) -> LockResult<()> {
        if token.is_empty() {
            return Err(LockError::EmptyToken);
        }
        loop {
            self.ensure_not_host_locked(id)?;
            match self.store.get(id)?.as_deref() {
                None => return Err(LockError::conflict("")),
                Some(current) if current != token => return Err(LockError::conflict(current)),
                Some(_) => {
                    if self.store.compare_and_swap(id, Some(token), None)? {
                        self.native.unlock(id)?;
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Extends an existing lock. `LOCKED(token) -> LOCKED(token)`.
    ///
    /// Locks have no expiry here, so this only re-validates ownership.
    ///
    /// # Errors
    ///
    /// Same failure surface as [`LockCoordinator::unlock`].
    pub fn refresh_lock(&self, id: &FileId, token: &str) -> LockResult<()> {
        if token.is_empty() {
            return Err(LockError::EmptyToken);
        }
        self.ensure_not_host_locked(id)?;
        match self.store.get(id)?.as_deref() {
            None => Err(LockError::conflict("")),
            Some(current) if current == token => Ok(()),
            Some(current) => Err(LockError::conflict(current)),
        }
    }

    /// Atomically replaces a lock. `LOCKED(old_token) -> LOCKED(token)`.
    ///
    /// The host-native lock stays in place across the swap.
    ///
    /// # Errors
    ///
    /// - [`LockError::EmptyToken`] for an empty token or old token
    /// - [`LockError::Conflict`] when host-locked, unlocked, or locked
    ///   with a token other than `old_token`
    pub fn unlock_and_relock(&self, id: &FileId, token: &str, old_token: &str) -> LockResult<()> {
        if token.is_empty() || old_token.is_empty() {
            return Err(LockError::EmptyToken);
        }
        loop {
            self.ensure_not_host_locked(id)?;
            match self.store.get(id)?.as_deref() {
                None => return Err(LockError::conflict("")),
                Some(current) if current != old_token => return Err(LockError::conflict(current)),
                Some(_) => {
                    if self.store.compare_and_swap(id, Some(old_token), Some(token))? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Lock guard for content replacement.
    ///
    /// A file with no content and no lock accepts its first write
    /// without a prior lock, whatever lock header the client sent. A
    /// file with content must be locked with a token matching
    /// `supplied` before it can be overwritten.
    ///
    /// # Errors
    ///
    /// [`LockError::Conflict`] when the guard fails; the carried token
    /// is empty for the unlocked-with-content case.
    pub fn check_put(
        &self,
        id: &FileId,
        supplied: Option<&str>,
        has_content: bool,
    ) -> LockResult<()> {
        self.ensure_not_host_locked(id)?;
        match self.store.get(id)?.as_deref() {
            None if !has_content => Ok(()),
            None => Err(LockError::conflict("")),
            Some(current) if supplied == Some(current) => Ok(()),
            Some(current) => Err(LockError::conflict(current)),
        }
    }

    /// Lock guard for rename, delete, and sibling-creation targets.
    ///
    /// Unlocked files pass; locked files require a matching token.
    ///
    /// # Errors
    ///
    /// [`LockError::Conflict`] when the guard fails.
    pub fn check_mutation(&self, id: &FileId, supplied: Option<&str>) -> LockResult<()> {
        self.ensure_not_host_locked(id)?;
        match self.store.get(id)?.as_deref() {
            None => Ok(()),
            Some(current) if supplied == Some(current) => Ok(()),
            Some(current) => Err(LockError::conflict(current)),
        }
    }

    /// Fails with a conflict when the host holds a native lock that was
    /// not placed through this coordinator.
    fn ensure_not_host_locked(&self, id: &FileId) -> LockResult<()> {
        if self.native.is_locked(id)? && self.store.get(id)?.is_none() {
            return Err(LockError::conflict(""));
        }
        Ok(())
    }
}
