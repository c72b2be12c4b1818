//! File-operation dispatch.

use crate::config::WopiConfig;
use crate::host::{DocumentHost, FileDescriptor, Permission, Principal};
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;
use wopihost_discovery::ActionUrlRegistry;
use wopihost_locks::LockCoordinator;
use wopihost_protocol::{
    FileId, FileInfo, FileOperation, PutRelativeResponse, RenameResponse, ShareUrlResponse,
    WopiError, WopiRequest, WopiResponse, WopiResult,
};

/// Share-link flavor requested through `X-WOPI-UrlType`.
const URL_TYPE_READ_ONLY: &str = "ReadOnly";
const URL_TYPE_READ_WRITE: &str = "ReadWrite";

/// Hard ceiling on downloadable content; WOPI clients address file
/// content with 32-bit signed offsets.
const MAX_DOWNLOAD_SIZE: u64 = i32::MAX as u64;

/// Executes parsed WOPI file operations against a document host.
///
/// One method per operation; every path resolves the file first, then
/// checks permissions, then consults the lock coordinator before
/// mutating. Failures return [`WopiError`] values the caller turns into
/// status-plus-headers responses.
pub struct FileOperationDispatcher {
    host: Arc<dyn DocumentHost>,
    locks: LockCoordinator,
    registry: Arc<ActionUrlRegistry>,
    config: WopiConfig,
}

impl FileOperationDispatcher {
    /// Creates a dispatcher over a host, a lock coordinator, the
    /// action-URL registry, and host configuration.
    pub fn new(
        host: Arc<dyn DocumentHost>,
        locks: LockCoordinator,
        registry: Arc<ActionUrlRegistry>,
        config: WopiConfig,
    ) -> Self {
        Self {
            host,
            locks,
            registry,
            config,
        }
    }

    /// Resolves a file id, failing with `NotFound` when it does not
    /// map to an existing blob.
    ///
    /// # Errors
    ///
    /// [`WopiError::NotFound`] or a host backend failure.
    pub fn resolve(&self, id: &FileId) -> WopiResult<FileDescriptor> {
        self.host.descriptor(id)?.ok_or(WopiError::NotFound)
    }

    /// Executes one operation on behalf of a principal.
    ///
    /// # Errors
    ///
    /// The operation's protocol failure, see [`WopiError`].
    pub fn handle(&self, principal: &Principal, request: &WopiRequest) -> WopiResult<WopiResponse> {
        let id = &request.file_id;
        let descriptor = self.resolve(id)?;
        debug!(
            operation = request.operation.name(),
            file_id = %id,
            user = %principal.id,
            "dispatching file operation"
        );
        match &request.operation {
            FileOperation::CheckFileInfo => self.check_file_info(principal, id, &descriptor),
            FileOperation::GetFile { max_expected_size } => {
                self.get_file(principal, id, &descriptor, max_expected_size.as_deref())
            }
            FileOperation::Lock { token } => {
                self.require_write(principal, id)?;
                self.locks.lock(id, token)?;
                Ok(self.lock_response(token, &descriptor))
            }
            FileOperation::UnlockAndRelock { token, old_token } => {
                self.require_write(principal, id)?;
                self.locks.unlock_and_relock(id, token, old_token)?;
                Ok(self.lock_response(token, &descriptor))
            }
            FileOperation::GetLock => {
                // Reading the lock needs no write access.
                self.require_read(principal, id)?;
                let current = self.locks.get_lock(id)?;
                Ok(self.lock_response(&current, &descriptor))
            }
            FileOperation::Unlock { token } => {
                self.require_write(principal, id)?;
                self.locks.unlock(id, token)?;
                Ok(self.lock_response("", &descriptor))
            }
            FileOperation::RefreshLock { token } => {
                self.require_write(principal, id)?;
                self.locks.refresh_lock(id, token)?;
                Ok(self.lock_response(token, &descriptor))
            }
            FileOperation::PutFile { token, content } => {
                self.put_file(principal, id, &descriptor, token.as_deref(), content.clone())
            }
            FileOperation::PutRelativeFile {
                suggested_target,
                relative_target,
                content,
            } => self.put_relative_file(
                principal,
                id,
                &descriptor,
                suggested_target.as_deref(),
                relative_target.as_deref(),
                content.clone(),
            ),
            FileOperation::RenameFile {
                requested_name,
                token,
            } => self.rename_file(
                principal,
                id,
                &descriptor,
                requested_name.as_deref(),
                token.as_deref(),
            ),
            FileOperation::DeleteFile { token } => {
                self.delete_file(principal, id, token.as_deref())
            }
            FileOperation::GetShareUrl { url_type } => {
                self.get_share_url(principal, id, url_type.as_deref())
            }
            FileOperation::Unsupported => Err(WopiError::NotImplemented),
        }
    }

    fn check_file_info(
        &self,
        principal: &Principal,
        id: &FileId,
        descriptor: &FileDescriptor,
    ) -> WopiResult<WopiResponse> {
        self.require_read(principal, id)?;
        let can_write = self.host.has_permission(principal, id, Permission::Write)?;
        let can_create = self
            .host
            .has_permission(principal, id, Permission::CreateChild)?;
        let info = FileInfo {
            base_file_name: descriptor.name.clone(),
            owner_id: descriptor.owner.clone(),
            size: descriptor.size,
            user_id: principal.id.clone(),
            version: descriptor.version.to_string(),
            read_only: !can_write,
            user_can_rename: can_write,
            user_can_write: can_write,
            user_can_not_write_relative: !can_create,
            user_friendly_name: principal.friendly_name.clone(),
            supports_locks: true,
            supports_get_lock: true,
            supports_extended_lock_length: true,
            supports_update: true,
            supports_rename: true,
            supports_delete_file: true,
            license_check_for_edit_is_enabled: self.registry.is_enabled(),
            host_view_url: self.config.view_url(id),
            host_edit_url: self.config.edit_url(id),
            download_url: self.config.download_url(id),
        };
        Ok(WopiResponse::json(&info))
    }

    fn get_file(
        &self,
        principal: &Principal,
        id: &FileId,
        descriptor: &FileDescriptor,
        max_expected_size: Option<&str>,
    ) -> WopiResult<WopiResponse> {
        self.require_read(principal, id)?;
        // The absolute cap applies before any client-declared limit.
        if descriptor.size > MAX_DOWNLOAD_SIZE {
            return Err(WopiError::PreconditionFailed);
        }
        if let Some(raw) = max_expected_size {
            // An unparsable or non-positive limit is ignored.
            if let Ok(limit) = raw.trim().parse::<i64>() {
                if limit > 0 && descriptor.size > limit as u64 {
                    return Err(WopiError::PreconditionFailed);
                }
            }
        }
        let content = self.host.read(id)?;
        Ok(WopiResponse::content(content).with_item_version(descriptor.version))
    }

    fn put_file(
        &self,
        principal: &Principal,
        id: &FileId,
        descriptor: &FileDescriptor,
        token: Option<&str>,
        content: Bytes,
    ) -> WopiResult<WopiResponse> {
        self.require_write(principal, id)?;
        self.locks.check_put(id, token, descriptor.has_content())?;
        let version = self.host.write(id, content)?;
        Ok(WopiResponse::ok().with_item_version(version))
    }

    fn put_relative_file(
        &self,
        principal: &Principal,
        id: &FileId,
        descriptor: &FileDescriptor,
        suggested_target: Option<&str>,
        relative_target: Option<&str>,
        content: Bytes,
    ) -> WopiResult<WopiResponse> {
        // Exactly one naming mode must be present.
        let (name, is_relative) = match (suggested_target, relative_target) {
            (Some(suggested), None) => (resolve_suggested_name(&descriptor.name, suggested), false),
            (None, Some(relative)) => (relative.to_string(), true),
            _ => return Err(WopiError::NotImplemented),
        };
        if !self
            .host
            .has_permission(principal, id, Permission::CreateChild)?
        {
            return Err(WopiError::NotImplemented);
        }
        if is_relative {
            // A relative target is exact; naming a locked sibling is a
            // conflict carrying that sibling's token.
            if let Some(sibling) = self.host.find_sibling(id, &name)? {
                if let Some(current_lock) = self.locks.current(&sibling)? {
                    return Err(WopiError::LockConflict { current_lock });
                }
            }
        }
        let new_id = self.host.create_sibling(id, &name, content)?;
        let body = PutRelativeResponse {
            name,
            url: self.config.file_url(&new_id),
            host_view_url: self.config.view_url(&new_id),
            host_edit_url: self.config.edit_url(&new_id),
        };
        Ok(WopiResponse::json(&body))
    }

    fn rename_file(
        &self,
        principal: &Principal,
        id: &FileId,
        descriptor: &FileDescriptor,
        requested_name: Option<&str>,
        token: Option<&str>,
    ) -> WopiResult<WopiResponse> {
        self.require_write(principal, id)?;
        let requested = match requested_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(WopiError::BadRequest("missing requested name".into())),
        };
        self.locks.check_mutation(id, token)?;
        // The stored name keeps the original extension; the response
        // reports the bare requested name.
        let stored = match extension(&descriptor.name) {
            Some(ext) => format!("{requested}.{ext}"),
            None => requested.to_string(),
        };
        self.host.rename(id, &stored)?;
        let body = RenameResponse {
            name: requested.to_string(),
            url: self.config.file_url(id),
        };
        Ok(WopiResponse::json(&body))
    }

    fn delete_file(
        &self,
        principal: &Principal,
        id: &FileId,
        token: Option<&str>,
    ) -> WopiResult<WopiResponse> {
        self.require_write(principal, id)?;
        self.locks.check_mutation(id, token)?;
        self.host.delete(id)?;
        Ok(WopiResponse::ok())
    }

    fn get_share_url(
        &self,
        principal: &Principal,
        id: &FileId,
        url_type: Option<&str>,
    ) -> WopiResult<WopiResponse> {
        self.require_read(principal, id)?;
        let share_url = match url_type {
            Some(URL_TYPE_READ_ONLY) => self.config.view_url(id),
            Some(URL_TYPE_READ_WRITE) => self.config.edit_url(id),
            _ => return Err(WopiError::NotImplemented),
        };
        Ok(WopiResponse::json(&ShareUrlResponse { share_url }))
    }

    fn lock_response(&self, token: &str, descriptor: &FileDescriptor) -> WopiResponse {
        WopiResponse::ok()
            .with_lock(token)
            .with_item_version(descriptor.version)
    }

    /// Missing read access is indistinguishable from a missing file.
    fn require_read(&self, principal: &Principal, id: &FileId) -> WopiResult<()> {
        if self.host.has_permission(principal, id, Permission::Read)? {
            Ok(())
        } else {
            Err(WopiError::NotFound)
        }
    }

    /// Missing write access reads as a lock conflict carrying the
    /// current token, so editors surface it as contention.
    fn require_write(&self, principal: &Principal, id: &FileId) -> WopiResult<()> {
        if self.host.has_permission(principal, id, Permission::Write)? {
            Ok(())
        } else {
            Err(WopiError::LockConflict {
                current_lock: self.locks.current(id)?.unwrap_or_default(),
            })
        }
    }
}

/// Resolves a suggested target against the source file name. A target
/// starting with `.` is an extension to append to the source's base
/// name; anything else is a full name.
fn resolve_suggested_name(source_name: &str, suggested: &str) -> String {
    if suggested.starts_with('.') {
        format!("{}{suggested}", base_name(source_name))
    } else {
        suggested.to_string()
    }
}

fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

fn base_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(base, _)| base)
}
