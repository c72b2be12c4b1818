//! In-memory document host.

use crate::error::{HostError, HostResult};
use crate::host::{DocumentHost, FileDescriptor, Permission, Principal};
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;
use wopihost_locks::{LockError, LockResult, NativeLockOps};
use wopihost_protocol::{FileId, ItemVersion};

/// Blob property path used for files in this host.
pub const BLOB_XPATH: &str = "content";

#[derive(Debug, Clone, Default)]
struct Grants {
    read: bool,
    write: bool,
    create: bool,
}

#[derive(Debug, Clone)]
struct BlobEntry {
    name: String,
    content: Bytes,
    /// Test support: synthetic size reported instead of the content
    /// length, for exercising size-limit behavior without allocating.
    size_override: Option<u64>,
}

#[derive(Debug, Clone)]
struct DocumentEntry {
    blob: Option<BlobEntry>,
    version: ItemVersion,
    owner: String,
    native_lock: bool,
    acl: HashMap<String, Grants>,
}

/// An in-memory document host.
///
/// Implements [`DocumentHost`] and [`NativeLockOps`] over a flat map
/// of documents. Suitable for unit tests, integration tests, and
/// single-process embedding; every document is a sibling of every
/// other.
///
/// # Thread Safety
///
/// This host is thread-safe and can be shared across request handlers.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    documents: RwLock<HashMap<Uuid, DocumentEntry>>,
}

impl InMemoryHost {
    /// Creates a new empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document carrying a blob and returns its file id.
    ///
    /// The owner is granted read, write, and create.
    pub fn add_file(&self, name: &str, content: impl Into<Bytes>, owner: &str) -> FileId {
        let doc_id = Uuid::new_v4();
        let mut acl = HashMap::new();
        acl.insert(
            owner.to_string(),
            Grants {
                read: true,
                write: true,
                create: true,
            },
        );
        self.documents.write().insert(
            doc_id,
            DocumentEntry {
                blob: Some(BlobEntry {
                    name: name.to_string(),
                    content: content.into(),
                    size_override: None,
                }),
                version: ItemVersion::ZERO,
                owner: owner.to_string(),
                native_lock: false,
                acl,
            },
        );
        FileId::new(doc_id, BLOB_XPATH)
    }

    /// Adds a document without a blob; its file id never resolves.
    pub fn add_blobless_document(&self, owner: &str) -> FileId {
        let doc_id = Uuid::new_v4();
        self.documents.write().insert(
            doc_id,
            DocumentEntry {
                blob: None,
                version: ItemVersion::ZERO,
                owner: owner.to_string(),
                native_lock: false,
                acl: HashMap::new(),
            },
        );
        FileId::new(doc_id, BLOB_XPATH)
    }

    /// Grants a permission to a principal on a document.
    pub fn grant(&self, id: &FileId, principal_id: &str, permission: Permission) {
        if let Some(doc) = self.documents.write().get_mut(&id.doc_id()) {
            let grants = doc.acl.entry(principal_id.to_string()).or_default();
            match permission {
                Permission::Read => grants.read = true,
                Permission::Write => grants.write = true,
                Permission::CreateChild => grants.create = true,
            }
        }
    }

    /// Test support: reports a synthetic content size for a file.
    pub fn override_size(&self, id: &FileId, size: u64) {
        if let Some(doc) = self.documents.write().get_mut(&id.doc_id()) {
            if let Some(blob) = doc.blob.as_mut() {
                blob.size_override = Some(size);
            }
        }
    }

    /// Returns the blob name of a file, for assertions.
    #[must_use]
    pub fn file_name(&self, id: &FileId) -> Option<String> {
        self.documents
            .read()
            .get(&id.doc_id())
            .and_then(|doc| doc.blob.as_ref())
            .map(|blob| blob.name.clone())
    }

    /// Returns true when the document still exists.
    #[must_use]
    pub fn document_exists(&self, id: &FileId) -> bool {
        self.documents.read().contains_key(&id.doc_id())
    }

    fn with_blob<T>(&self, id: &FileId, f: impl FnOnce(&BlobEntry) -> T) -> HostResult<T> {
        let documents = self.documents.read();
        let doc = documents.get(&id.doc_id()).ok_or(HostError::NotFound)?;
        if id.xpath() != BLOB_XPATH {
            return Err(HostError::NotFound);
        }
        let blob = doc.blob.as_ref().ok_or(HostError::NotFound)?;
        Ok(f(blob))
    }
}

impl DocumentHost for InMemoryHost {
    fn descriptor(&self, id: &FileId) -> HostResult<Option<FileDescriptor>> {
        let documents = self.documents.read();
        let Some(doc) = documents.get(&id.doc_id()) else {
            return Ok(None);
        };
        if id.xpath() != BLOB_XPATH {
            return Ok(None);
        }
        let Some(blob) = doc.blob.as_ref() else {
            return Ok(None);
        };
        Ok(Some(FileDescriptor {
            name: blob.name.clone(),
            size: blob.size_override.unwrap_or(blob.content.len() as u64),
            version: doc.version,
            owner: doc.owner.clone(),
        }))
    }

    fn has_permission(
        &self,
        principal: &Principal,
        id: &FileId,
        permission: Permission,
    ) -> HostResult<bool> {
        let documents = self.documents.read();
        let doc = documents.get(&id.doc_id()).ok_or(HostError::NotFound)?;
        let Some(grants) = doc.acl.get(&principal.id) else {
            return Ok(false);
        };
        Ok(match permission {
            Permission::Read => grants.read,
            Permission::Write => grants.write,
            Permission::CreateChild => grants.create,
        })
    }

    fn read(&self, id: &FileId) -> HostResult<Bytes> {
        self.with_blob(id, |blob| blob.content.clone())
    }

    fn write(&self, id: &FileId, content: Bytes) -> HostResult<ItemVersion> {
        let mut documents = self.documents.write();
        let doc = documents.get_mut(&id.doc_id()).ok_or(HostError::NotFound)?;
        let blob = doc.blob.as_mut().ok_or(HostError::NotFound)?;
        blob.content = content;
        blob.size_override = None;
        doc.version = doc.version.bumped();
        Ok(doc.version)
    }

    fn rename(&self, id: &FileId, new_name: &str) -> HostResult<()> {
        let mut documents = self.documents.write();
        let doc = documents.get_mut(&id.doc_id()).ok_or(HostError::NotFound)?;
        let blob = doc.blob.as_mut().ok_or(HostError::NotFound)?;
        blob.name = new_name.to_string();
        Ok(())
    }

    fn delete(&self, id: &FileId) -> HostResult<()> {
        self.documents
            .write()
            .remove(&id.doc_id())
            .map(|_| ())
            .ok_or(HostError::NotFound)
    }

    fn find_sibling(&self, id: &FileId, name: &str) -> HostResult<Option<FileId>> {
        let documents = self.documents.read();
        Ok(documents
            .iter()
            .filter(|(doc_id, _)| **doc_id != id.doc_id())
            .find(|(_, doc)| doc.blob.as_ref().is_some_and(|blob| blob.name == name))
            .map(|(doc_id, _)| FileId::new(*doc_id, BLOB_XPATH)))
    }

    fn create_sibling(&self, id: &FileId, name: &str, content: Bytes) -> HostResult<FileId> {
        let mut documents = self.documents.write();
        let source = documents.get(&id.doc_id()).ok_or(HostError::NotFound)?;
        let entry = DocumentEntry {
            blob: Some(BlobEntry {
                name: name.to_string(),
                content,
                size_override: None,
            }),
            version: ItemVersion::ZERO,
            owner: source.owner.clone(),
            native_lock: false,
            acl: source.acl.clone(),
        };
        let doc_id = Uuid::new_v4();
        documents.insert(doc_id, entry);
        Ok(FileId::new(doc_id, BLOB_XPATH))
    }
}

impl NativeLockOps for InMemoryHost {
    fn is_locked(&self, id: &FileId) -> LockResult<bool> {
        Ok(self
            .documents
            .read()
            .get(&id.doc_id())
            .is_some_and(|doc| doc.native_lock))
    }

    fn lock(&self, id: &FileId) -> LockResult<()> {
        let mut documents = self.documents.write();
        let doc = documents
            .get_mut(&id.doc_id())
            .ok_or_else(|| LockError::Native("unknown document".into()))?;
        doc.native_lock = true;
        Ok(())
    }

    fn unlock(&self, id: &FileId) -> LockResult<()> {
        let mut documents = self.documents.write();
        let doc = documents
            .get_mut(&id.doc_id())
            .ok_or_else(|| LockError::Native("unknown document".into()))?;
        doc.native_lock = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_resolves() {
        let host = InMemoryHost::new();
        let id = host.add_file("report.docx", &b"content"[..], "john");

        let descriptor = host.descriptor(&id).unwrap().unwrap();
        assert_eq!(descriptor.name, "report.docx");
        assert_eq!(descriptor.size, 7);
        assert_eq!(descriptor.version, ItemVersion::ZERO);
        assert_eq!(descriptor.owner, "john");
        assert!(descriptor.has_content());
    }

    #[test]
    fn blobless_document_does_not_resolve() {
        let host = InMemoryHost::new();
        let id = host.add_blobless_document("john");
        assert!(host.descriptor(&id).unwrap().is_none());
        assert!(host.document_exists(&id));
    }

    #[test]
    fn unknown_document_does_not_resolve() {
        let host = InMemoryHost::new();
        let id = FileId::new(Uuid::new_v4(), BLOB_XPATH);
        assert!(host.descriptor(&id).unwrap().is_none());
    }

    #[test]
    fn wrong_xpath_does_not_resolve() {
        let host = InMemoryHost::new();
        let id = host.add_file("a.docx", &b"x"[..], "john");
        let wrong = FileId::new(id.doc_id(), "thumbnail");
        assert!(host.descriptor(&wrong).unwrap().is_none());
    }

    #[test]
    fn owner_has_all_grants_others_none() {
        let host = InMemoryHost::new();
        let id = host.add_file("a.docx", &b"x"[..], "john");
        let john = Principal::new("john");
        let joe = Principal::new("joe");

        for permission in [Permission::Read, Permission::Write, Permission::CreateChild] {
            assert!(host.has_permission(&john, &id, permission).unwrap());
            assert!(!host.has_permission(&joe, &id, permission).unwrap());
        }

        host.grant(&id, "joe", Permission::Read);
        assert!(host.has_permission(&joe, &id, Permission::Read).unwrap());
        assert!(!host.has_permission(&joe, &id, Permission::Write).unwrap());
    }

    #[test]
    fn write_bumps_version_and_replaces_content() {
        let host = InMemoryHost::new();
        let id = host.add_file("a.docx", &b""[..], "john");

        let version = host.write(&id, Bytes::from_static(b"v1")).unwrap();
        assert_eq!(version.to_string(), "0.1");
        assert_eq!(host.read(&id).unwrap(), Bytes::from_static(b"v1"));

        let version = host.write(&id, Bytes::from_static(b"v2")).unwrap();
        assert_eq!(version.to_string(), "0.2");
    }

    #[test]
    fn rename_changes_blob_name() {
        let host = InMemoryHost::new();
        let id = host.add_file("a.docx", &b"x"[..], "john");
        host.rename(&id, "b.docx").unwrap();
        assert_eq!(host.file_name(&id).as_deref(), Some("b.docx"));
    }

    #[test]
    fn delete_removes_document() {
        let host = InMemoryHost::new();
        let id = host.add_file("a.docx", &b"x"[..], "john");
        host.delete(&id).unwrap();
        assert!(!host.document_exists(&id));
        assert!(matches!(host.delete(&id), Err(HostError::NotFound)));
    }

    #[test]
    fn sibling_lookup_and_creation() {
        let host = InMemoryHost::new();
        let a = host.add_file("a.docx", &b"x"[..], "john");
        let b = host.add_file("b.docx", &b"y"[..], "john");

        assert_eq!(host.find_sibling(&a, "b.docx").unwrap(), Some(b));
        assert_eq!(host.find_sibling(&a, "missing.docx").unwrap(), None);

        let created = host
            .create_sibling(&a, "c.docx", Bytes::from_static(b"z"))
            .unwrap();
        let descriptor = host.descriptor(&created).unwrap().unwrap();
        assert_eq!(descriptor.name, "c.docx");
        assert_eq!(descriptor.owner, "john");
        // The new document inherits the sibling's ACL.
        let john = Principal::new("john");
        assert!(host
            .has_permission(&john, &created, Permission::Write)
            .unwrap());
    }

    #[test]
    fn native_lock_lifecycle() {
        let host = InMemoryHost::new();
        let id = host.add_file("a.docx", &b"x"[..], "john");

        assert!(!host.is_locked(&id).unwrap());
        NativeLockOps::lock(&host, &id).unwrap();
        assert!(host.is_locked(&id).unwrap());
        NativeLockOps::unlock(&host, &id).unwrap();
        assert!(!host.is_locked(&id).unwrap());
    }

    #[test]
    fn size_override_reports_synthetic_size() {
        let host = InMemoryHost::new();
        let id = host.add_file("huge.docx", &b"tiny"[..], "john");
        host.override_size(&id, u64::MAX);
        assert_eq!(host.descriptor(&id).unwrap().unwrap().size, u64::MAX);
    }
}
