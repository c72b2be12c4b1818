//! Outbound response value object.

use crate::error::WopiError;
use bytes::Bytes;
use serde::Serialize;

/// Body of a WOPI response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// No body.
    Empty,
    /// A JSON document.
    Json(serde_json::Value),
    /// Raw file content.
    Content(Bytes),
}

/// A WOPI response before HTTP serialization.
///
/// The routing layer turns this into an HTTP response: `lock` becomes
/// the `X-WOPI-Lock` header and `item_version` becomes
/// `X-WOPI-ItemVersion`. Conflict responses always carry `lock`, even
/// when it is the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WopiResponse {
    /// HTTP status code.
    pub status: u16,
    /// `X-WOPI-Lock` header value, when present.
    pub lock: Option<String>,
    /// `X-WOPI-ItemVersion` header value, when present.
    pub item_version: Option<String>,
    /// Response body.
    pub body: ResponseBody,
}

impl WopiResponse {
    /// An empty 200 response.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: 200,
            lock: None,
            item_version: None,
            body: ResponseBody::Empty,
        }
    }

    /// A 200 response with a JSON body.
    ///
    /// Serialization cannot fail for the derive-based bodies this crate
    /// defines; a failure degrades to a JSON null body.
    #[must_use]
    pub fn json<T: Serialize>(body: &T) -> Self {
        let value = serde_json::to_value(body).unwrap_or(serde_json::Value::Null);
        Self {
            status: 200,
            lock: None,
            item_version: None,
            body: ResponseBody::Json(value),
        }
    }

    /// A 200 response with raw content.
    #[must_use]
    pub fn content(content: Bytes) -> Self {
        Self {
            status: 200,
            lock: None,
            item_version: None,
            body: ResponseBody::Content(content),
        }
    }

    /// Sets the `X-WOPI-Lock` header.
    #[must_use]
    pub fn with_lock(mut self, lock: impl Into<String>) -> Self {
        self.lock = Some(lock.into());
        self
    }

    /// Sets the `X-WOPI-ItemVersion` header.
    #[must_use]
    pub fn with_item_version(mut self, version: impl ToString) -> Self {
        self.item_version = Some(version.to_string());
        self
    }

    /// Builds the response for a failed operation.
    ///
    /// Lock conflicts carry the current lock token in `X-WOPI-Lock`;
    /// all other failures are status-only.
    #[must_use]
    pub fn from_error(error: &WopiError) -> Self {
        let mut response = Self {
            status: error.status_code(),
            lock: None,
            item_version: None,
            body: ResponseBody::Empty,
        };
        if let WopiError::LockConflict { current_lock } = error {
            response.lock = Some(current_lock.clone());
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_bare_200() {
        let response = WopiResponse::ok();
        assert_eq!(response.status, 200);
        assert_eq!(response.lock, None);
        assert_eq!(response.body, ResponseBody::Empty);
    }

    #[test]
    fn conflict_response_carries_lock_header() {
        let err = WopiError::LockConflict {
            current_lock: "token-1".into(),
        };
        let response = WopiResponse::from_error(&err);
        assert_eq!(response.status, 409);
        assert_eq!(response.lock.as_deref(), Some("token-1"));
    }

    #[test]
    fn not_found_response_has_no_lock_header() {
        let response = WopiResponse::from_error(&WopiError::NotFound);
        assert_eq!(response.status, 404);
        assert_eq!(response.lock, None);
    }

    #[test]
    fn builder_headers() {
        let response = WopiResponse::ok().with_lock("t").with_item_version("0.1");
        assert_eq!(response.lock.as_deref(), Some("t"));
        assert_eq!(response.item_version.as_deref(), Some("0.1"));
    }
}
