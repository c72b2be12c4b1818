//! # WOPI Host Locks
//!
//! Lock storage and the WOPI lock state machine.
//!
//! This crate provides:
//! - [`LockStore`] - pluggable key-value lock storage with compare-and-swap
//! - [`InMemoryLockStore`] - store for single-instance deployments and tests
//! - [`NativeLockOps`] - the host's native document-lock capability
//! - [`LockCoordinator`] - the per-file lock state machine consulted by
//!   every mutating file operation
//!
//! ## Design Principles
//!
//! - Lock records have no TTL and no owner beyond the token itself
//! - A host-native lock is disjoint state and always wins
//! - All read-modify-write sequences are linearizable per file id
//!   (compare-and-swap discipline); cross-file operations need no
//!   ordering guarantees relative to each other

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod coordinator;
mod error;
mod memory;
mod native;
mod store;

pub use coordinator::LockCoordinator;
pub use error::{LockError, LockResult};
pub use memory::InMemoryLockStore;
pub use native::NativeLockOps;
pub use store::LockStore;
