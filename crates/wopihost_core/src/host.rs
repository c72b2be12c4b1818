//! Document-host capability interface.

use crate::error::HostResult;
use bytes::Bytes;
use wopihost_protocol::{FileId, ItemVersion};

/// A permission the host evaluates for a principal on a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Read metadata and content.
    Read,
    /// Replace content, rename, delete, lock.
    Write,
    /// Create sibling files.
    CreateChild,
}

/// The authenticated caller of a request.
///
/// Token-to-principal resolution is the host platform's concern; the
/// core receives the resolved identity alongside each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable identity, used for `UserId` in responses.
    pub id: String,
    /// Display name, used for `UserFriendlyName` in responses.
    pub friendly_name: String,
}

impl Principal {
    /// Creates a principal whose display name equals its id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            friendly_name: id.clone(),
            id,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_friendly_name(mut self, name: impl Into<String>) -> Self {
        self.friendly_name = name.into();
        self
    }
}

/// Metadata of one resolvable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// File name including extension.
    pub name: String,
    /// Content size in bytes.
    pub size: u64,
    /// Current item version.
    pub version: ItemVersion,
    /// Identity of the owner.
    pub owner: String,
}

impl FileDescriptor {
    /// Returns true when the file has non-empty content.
    ///
    /// Zero-length files accept their first write without a prior
    /// lock, like files that were never written.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.size > 0
    }
}

/// The document store, consumed as a narrow capability interface.
///
/// The store owns creation, versioning, permission evaluation, and
/// blob persistence; this core never sees documents directly. A file
/// id resolves while its document exists and carries a blob at the
/// id's property path. Calls are synchronous and may fail; failures
/// propagate to the client as internal errors, never retried here.
pub trait DocumentHost: Send + Sync {
    /// Resolves a file id to its metadata.
    ///
    /// Returns `Ok(None)` when the document does not exist or carries
    /// no blob at the id's property path.
    ///
    /// # Errors
    ///
    /// Returns an error if the store backend fails.
    fn descriptor(&self, id: &FileId) -> HostResult<Option<FileDescriptor>>;

    /// Evaluates a permission for a principal on a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the store backend fails.
    fn has_permission(
        &self,
        principal: &Principal,
        id: &FileId,
        permission: Permission,
    ) -> HostResult<bool>;

    /// Reads the file's content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not resolve or the backend
    /// fails.
    fn read(&self, id: &FileId) -> HostResult<Bytes>;

    /// Replaces the file's content, preserving its name.
    ///
    /// Returns the incremented item version.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not resolve or the backend
    /// fails.
    fn write(&self, id: &FileId, content: Bytes) -> HostResult<ItemVersion>;

    /// Renames the file's blob to `new_name`.
    ///
    /// The caller has already applied the protocol's extension
    /// preservation; the host stores the name as given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not resolve or the backend
    /// fails.
    fn rename(&self, id: &FileId, new_name: &str) -> HostResult<()>;

    /// Removes the document entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not resolve or the backend
    /// fails.
    fn delete(&self, id: &FileId) -> HostResult<()>;

    /// Looks up an existing sibling file by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_sibling(&self, id: &FileId, name: &str) -> HostResult<Option<FileId>>;

    /// Creates a sibling document with the given name and content.
    ///
    /// Collision policy is the host's: it may overwrite, dedupe the
    /// name, or fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn create_sibling(&self, id: &FileId, name: &str, content: Bytes) -> HostResult<FileId>;
}
