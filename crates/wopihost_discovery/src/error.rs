//! Error types for discovery handling.

use thiserror::Error;

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Errors that can occur while loading a discovery document.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The document is not well-formed against the extracted subset.
    #[error("malformed discovery document: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// The discovery file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
