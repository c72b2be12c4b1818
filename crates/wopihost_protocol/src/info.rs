//! JSON response bodies.
//!
//! Field names follow the WOPI wire format (PascalCase) and are part of
//! the protocol; do not rename them.

use serde::Serialize;

/// CheckFileInfo response body.
///
/// Capability flags describe what this host implements and are constant;
/// permission booleans are evaluated per request against the calling
/// principal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileInfo {
    /// File name including extension.
    pub base_file_name: String,
    /// Identity of the file owner.
    pub owner_id: String,
    /// Content size in bytes.
    pub size: u64,
    /// Identity of the calling principal.
    pub user_id: String,
    /// Current item version.
    pub version: String,
    /// True when the calling principal cannot write.
    pub read_only: bool,
    /// True when the calling principal may rename the file.
    pub user_can_rename: bool,
    /// True when the calling principal may replace content.
    pub user_can_write: bool,
    /// True when the calling principal may NOT create sibling files.
    pub user_can_not_write_relative: bool,
    /// Display name of the calling principal.
    pub user_friendly_name: String,
    /// This host implements WOPI locks.
    pub supports_locks: bool,
    /// This host implements GetLock.
    pub supports_get_lock: bool,
    /// This host accepts lock tokens longer than 256 bytes.
    pub supports_extended_lock_length: bool,
    /// This host implements PutFile and PutRelativeFile.
    pub supports_update: bool,
    /// This host implements RenameFile.
    pub supports_rename: bool,
    /// This host implements DeleteFile.
    pub supports_delete_file: bool,
    /// True when the action-URL registry pre-fills the licensing flag.
    pub license_check_for_edit_is_enabled: bool,
    /// Deep link for viewing the file in the host UI.
    pub host_view_url: String,
    /// Deep link for editing the file in the host UI.
    pub host_edit_url: String,
    /// Direct content download URL.
    pub download_url: String,
}

/// RenameFile response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenameResponse {
    /// The new name, as requested (without the preserved extension).
    pub name: String,
    /// WOPI endpoint URL for the renamed file.
    pub url: String,
}

/// PutRelativeFile response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutRelativeResponse {
    /// Name of the created file.
    pub name: String,
    /// WOPI endpoint URL for the created file.
    pub url: String,
    /// Deep link for viewing the created file.
    pub host_view_url: String,
    /// Deep link for editing the created file.
    pub host_edit_url: String,
}

/// GetShareUrl response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShareUrlResponse {
    /// The requested share link.
    pub share_url: String,
}
