//! File identifier.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Identifies one editable blob of a hosted document.
///
/// A file id is derived from the document identifier and the property
/// path that carries the blob. It is:
/// - Opaque to WOPI clients
/// - Immutable once computed
/// - Stable across document updates
///
/// It ceases to resolve when the document or its blob is deleted.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId {
    doc_id: Uuid,
    xpath: String,
}

/// Error returned when a string is not a well-formed file id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid file id")]
pub struct InvalidFileId;

impl FileId {
    /// Creates a file id from a document id and a blob property path.
    #[must_use]
    pub fn new(doc_id: Uuid, xpath: impl Into<String>) -> Self {
        Self {
            doc_id,
            xpath: xpath.into(),
        }
    }

    /// Returns the document identifier.
    #[inline]
    #[must_use]
    pub fn doc_id(&self) -> Uuid {
        self.doc_id
    }

    /// Returns the blob property path within the document.
    #[inline]
    #[must_use]
    pub fn xpath(&self) -> &str {
        &self.xpath
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({}:{})", self.doc_id, self.xpath)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.doc_id, self.xpath)
    }
}

impl FromStr for FileId {
    type Err = InvalidFileId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (doc_id, xpath) = s.split_once(':').ok_or(InvalidFileId)?;
        if xpath.is_empty() {
            return Err(InvalidFileId);
        }
        let doc_id = Uuid::parse_str(doc_id).map_err(|_| InvalidFileId)?;
        Ok(Self::new(doc_id, xpath))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_roundtrip() {
        let id = FileId::new(Uuid::new_v4(), "content");
        let parsed: FileId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn xpath_may_contain_separator() {
        let uuid = Uuid::new_v4();
        let s = format!("{uuid}:file:content");
        let id: FileId = s.parse().unwrap();
        assert_eq!(id.doc_id(), uuid);
        assert_eq!(id.xpath(), "file:content");
    }

    #[test]
    fn rejects_malformed() {
        assert!("not-a-file-id".parse::<FileId>().is_err());
        assert!("not-a-uuid:content".parse::<FileId>().is_err());
        let uuid = Uuid::new_v4();
        assert!(format!("{uuid}:").parse::<FileId>().is_err());
    }
}
