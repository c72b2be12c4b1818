//! Host native-lock capability.

use crate::error::LockResult;
use wopihost_protocol::FileId;

/// The host's native document-lock capability.
///
/// A native lock is placed through the host's own (non-WOPI) locking
/// mechanism and is disjoint from WOPI lock tokens. The coordinator
/// reads it to detect host-side locking and couples it to the WOPI
/// lifecycle: a successful WOPI lock also places the native lock, a
/// successful unlock releases it.
pub trait NativeLockOps: Send + Sync {
    /// Returns true if the host holds a native lock on the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the host backend fails.
    fn is_locked(&self, id: &FileId) -> LockResult<bool>;

    /// Places the host-native lock on the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the host backend fails.
    fn lock(&self, id: &FileId) -> LockResult<()>;

    /// Releases the host-native lock on the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the host backend fails.
    fn unlock(&self, id: &FileId) -> LockResult<()>;
}
