//! Typed operation dispatch.

use bytes::Bytes;
use std::fmt;
use std::str::FromStr;

/// Value of the `X-WOPI-Override` header on `POST /files/{id}`.
///
/// An unknown override string does not parse; callers map that to a
/// [`FileOperation::Unsupported`] dispatch, which the handler answers
/// with NotImplemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WopiOverride {
    /// Take or refresh a lock. With `X-WOPI-OldLock` present this
    /// dispatches as unlock-and-relock.
    Lock,
    /// Read the current lock token.
    GetLock,
    /// Extend an existing lock.
    RefreshLock,
    /// Release a lock.
    Unlock,
    /// Replace file content.
    Put,
    /// Create a sibling file.
    PutRelative,
    /// Rename the file.
    RenameFile,
    /// Delete the file.
    Delete,
    /// Build a share link.
    GetShareUrl,
}

impl WopiOverride {
    /// Returns the protocol string for this override.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            WopiOverride::Lock => "LOCK",
            WopiOverride::GetLock => "GET_LOCK",
            WopiOverride::RefreshLock => "REFRESH_LOCK",
            WopiOverride::Unlock => "UNLOCK",
            WopiOverride::Put => "PUT",
            WopiOverride::PutRelative => "PUT_RELATIVE",
            WopiOverride::RenameFile => "RENAME_FILE",
            WopiOverride::Delete => "DELETE",
            WopiOverride::GetShareUrl => "GET_SHARE_URL",
        }
    }
}

impl fmt::Display for WopiOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WopiOverride {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOCK" => Ok(WopiOverride::Lock),
            "GET_LOCK" => Ok(WopiOverride::GetLock),
            "REFRESH_LOCK" => Ok(WopiOverride::RefreshLock),
            "UNLOCK" => Ok(WopiOverride::Unlock),
            "PUT" => Ok(WopiOverride::Put),
            "PUT_RELATIVE" => Ok(WopiOverride::PutRelative),
            "RENAME_FILE" => Ok(WopiOverride::RenameFile),
            "DELETE" => Ok(WopiOverride::Delete),
            "GET_SHARE_URL" => Ok(WopiOverride::GetShareUrl),
            _ => Err(()),
        }
    }
}

/// A fully-parsed WOPI file operation.
///
/// The HTTP layer resolves verb, path and headers into one of these
/// variants; the dispatcher matches on them exhaustively. Header values
/// are carried as parsed by the HTTP layer: absent headers are `None`,
/// present-but-empty headers are `Some("")`, and the distinction matters
/// for the lock state machine.
#[derive(Debug, Clone)]
pub enum FileOperation {
    /// `GET /files/{id}` — file metadata as JSON.
    CheckFileInfo,
    /// `GET /files/{id}/contents` — raw file content.
    GetFile {
        /// Raw `X-WOPI-MaxExpectedSize` value, if sent.
        max_expected_size: Option<String>,
    },
    /// `LOCK` override without `X-WOPI-OldLock`.
    Lock {
        /// Requested lock token.
        token: String,
    },
    /// `LOCK` override accompanied by `X-WOPI-OldLock`.
    UnlockAndRelock {
        /// Replacement lock token.
        token: String,
        /// Token expected to hold the current lock.
        old_token: String,
    },
    /// `GET_LOCK` override.
    GetLock,
    /// `UNLOCK` override.
    Unlock {
        /// Token expected to hold the current lock.
        token: String,
    },
    /// `REFRESH_LOCK` override.
    RefreshLock {
        /// Token expected to hold the current lock.
        token: String,
    },
    /// `PUT` override on `/contents`.
    PutFile {
        /// Lock token, if the client sent one.
        token: Option<String>,
        /// Replacement content.
        content: Bytes,
    },
    /// `PUT_RELATIVE` override.
    PutRelativeFile {
        /// `X-WOPI-SuggestedTarget` value, if sent.
        suggested_target: Option<String>,
        /// `X-WOPI-RelativeTarget` value, if sent.
        relative_target: Option<String>,
        /// Content for the new file.
        content: Bytes,
    },
    /// `RENAME_FILE` override.
    RenameFile {
        /// `X-WOPI-RequestedName` value, if sent.
        requested_name: Option<String>,
        /// Lock token, if the client sent one.
        token: Option<String>,
    },
    /// `DELETE` override.
    DeleteFile {
        /// Lock token, if the client sent one.
        token: Option<String>,
    },
    /// `GET_SHARE_URL` override.
    GetShareUrl {
        /// `X-WOPI-UrlType` value, if sent.
        url_type: Option<String>,
    },
    /// Missing or unknown override value.
    Unsupported,
}

impl FileOperation {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            FileOperation::CheckFileInfo => "CheckFileInfo",
            FileOperation::GetFile { .. } => "GetFile",
            FileOperation::Lock { .. } => "Lock",
            FileOperation::UnlockAndRelock { .. } => "UnlockAndRelock",
            FileOperation::GetLock => "GetLock",
            FileOperation::Unlock { .. } => "Unlock",
            FileOperation::RefreshLock { .. } => "RefreshLock",
            FileOperation::PutFile { .. } => "PutFile",
            FileOperation::PutRelativeFile { .. } => "PutRelativeFile",
            FileOperation::RenameFile { .. } => "RenameFile",
            FileOperation::DeleteFile { .. } => "DeleteFile",
            FileOperation::GetShareUrl { .. } => "GetShareUrl",
            FileOperation::Unsupported => "Unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_roundtrip() {
        for s in [
            "LOCK",
            "GET_LOCK",
            "REFRESH_LOCK",
            "UNLOCK",
            "PUT",
            "PUT_RELATIVE",
            "RENAME_FILE",
            "DELETE",
            "GET_SHARE_URL",
        ] {
            let parsed: WopiOverride = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s);
        }
    }

    #[test]
    fn unknown_override_does_not_parse() {
        assert!("COBALT".parse::<WopiOverride>().is_err());
        assert!("lock".parse::<WopiOverride>().is_err());
        assert!("".parse::<WopiOverride>().is_err());
    }
}
