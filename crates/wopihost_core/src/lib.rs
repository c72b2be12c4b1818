//! # WOPI Host Core
//!
//! The WOPI host's operation surface.
//!
//! This crate provides:
//! - [`DocumentHost`] - the narrow capability interface to the
//!   document store (permissions, blobs, native locks)
//! - [`InMemoryHost`] - an in-process host for tests, demos, and
//!   single-process embedding
//! - [`WopiConfig`] - base-URL and application configuration
//! - [`FileOperationDispatcher`] - one handler per WOPI file operation
//! - [`WopiServer`] - facade wiring dispatch, lock coordination, and
//!   proof-key verification
//!
//! # Architecture
//!
//! Every request resolves a file id, passes proof-key verification
//! (when proof headers are present), then permission checks, then the
//! operation handler, which consults the lock coordinator before any
//! mutation. The HTTP routing layer is external: it parses requests
//! into [`WopiRequest`] values and serializes [`WopiResponse`] values
//! back out.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatch;
mod error;
mod host;
mod memory;
mod server;

pub use config::WopiConfig;
pub use dispatch::FileOperationDispatcher;
pub use error::{HostError, HostResult};
pub use host::{DocumentHost, FileDescriptor, Permission, Principal};
pub use memory::InMemoryHost;
pub use server::WopiServer;

pub use wopihost_discovery::ActionUrlRegistry;
pub use wopihost_locks::{InMemoryLockStore, LockCoordinator};
pub use wopihost_proof::ProofKeyVerifier;
pub use wopihost_protocol::{
    FileId, FileOperation, WopiError, WopiRequest, WopiResponse, WopiResult,
};
