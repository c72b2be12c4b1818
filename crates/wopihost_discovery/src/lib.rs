//! # WOPI Host Discovery
//!
//! Minimal extraction of the WOPI client's discovery document, and the
//! action-URL registry built from it at startup.
//!
//! This crate provides:
//! - [`Discovery`] - the app/action/proof-key subset of the discovery
//!   XML schema; everything else in the schema is ignored
//! - [`ActionUrlRegistry`] - extension to app-name and action-URL
//!   lookup, filtered by a configured application allow-list
//!
//! The registry is built once at startup and immutable thereafter. A
//! missing or malformed discovery document disables the registry
//! (`is_enabled() == false`) without failing the host.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod discovery;
mod error;
mod registry;

pub use discovery::{Action, App, Discovery, NetZone, ProofKeyMaterial};
pub use error::{DiscoveryError, DiscoveryResult};
pub use registry::{ActionUrlRegistry, AppBinding};
