//! # WOPI Host Protocol
//!
//! Protocol vocabulary for the WOPI host core.
//!
//! This crate provides:
//! - [`FileId`] and [`ItemVersion`] identifiers
//! - WOPI header-name constants
//! - [`WopiOverride`] and [`FileOperation`] for typed operation dispatch
//! - [`WopiRequest`] / [`WopiResponse`] value objects
//! - [`FileInfo`] and the other JSON response bodies
//! - The [`WopiError`] taxonomy with HTTP status mapping
//!
//! This is a pure protocol crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file_id;
pub mod headers;
mod info;
mod operation;
mod request;
mod response;
mod version;

pub use error::{WopiError, WopiResult};
pub use file_id::{FileId, InvalidFileId};
pub use info::{FileInfo, PutRelativeResponse, RenameResponse, ShareUrlResponse};
pub use operation::{FileOperation, WopiOverride};
pub use request::{ProofHeaders, WopiRequest};
pub use response::{ResponseBody, WopiResponse};
pub use version::ItemVersion;
