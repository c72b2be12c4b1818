//! Discovery document extraction.

use crate::error::DiscoveryResult;
use serde::Deserialize;
use std::path::Path;

/// The subset of the WOPI discovery document this host consumes.
///
/// Only the net-zone app/action tree and the proof-key element are
/// extracted; unknown elements and attributes are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "wopi-discovery")]
pub struct Discovery {
    /// The applications advertised by the WOPI client.
    #[serde(rename = "net-zone")]
    pub net_zone: NetZone,
    /// The client's proof-key pair, if published.
    #[serde(rename = "proof-key")]
    pub proof_key: Option<ProofKeyMaterial>,
}

/// A net-zone element grouping the advertised applications.
#[derive(Debug, Clone, Deserialize)]
pub struct NetZone {
    /// Advertised applications.
    #[serde(rename = "app", default)]
    pub apps: Vec<App>,
}

/// One advertised application.
#[derive(Debug, Clone, Deserialize)]
pub struct App {
    /// Application name, matched against the configured allow-list.
    #[serde(rename = "@name")]
    pub name: String,
    /// Actions the application supports.
    #[serde(rename = "action", default)]
    pub actions: Vec<Action>,
}

/// One action of an application.
#[derive(Debug, Clone, Deserialize)]
pub struct Action {
    /// Action name, e.g. `view` or `edit`.
    #[serde(rename = "@name")]
    pub name: String,
    /// File extension the action applies to; empty for actions bound
    /// to other selectors.
    #[serde(rename = "@ext", default)]
    pub ext: String,
    /// URL template with a trailing placeholder section.
    #[serde(rename = "@urlsrc")]
    pub urlsrc: String,
}

/// Base64-encoded proof-key attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct ProofKeyMaterial {
    /// Current key, CSP blob form.
    #[serde(rename = "@value", default)]
    pub value: String,
    /// Current key modulus, big-endian.
    #[serde(rename = "@modulus")]
    pub modulus: String,
    /// Current key exponent, big-endian.
    #[serde(rename = "@exponent")]
    pub exponent: String,
    /// Previous key, CSP blob form.
    #[serde(rename = "@oldvalue", default)]
    pub old_value: String,
    /// Previous key modulus, big-endian.
    #[serde(rename = "@oldmodulus", default)]
    pub old_modulus: String,
    /// Previous key exponent, big-endian.
    #[serde(rename = "@oldexponent", default)]
    pub old_exponent: String,
}

impl ProofKeyMaterial {
    /// Returns the previous key's modulus and exponent, when published.
    #[must_use]
    pub fn old_key(&self) -> Option<(&str, &str)> {
        if self.old_modulus.is_empty() || self.old_exponent.is_empty() {
            None
        } else {
            Some((&self.old_modulus, &self.old_exponent))
        }
    }
}

impl Discovery {
    /// Parses a discovery document from XML.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DiscoveryError::Xml`] when the document is not
    /// well-formed against the extracted subset.
    pub fn parse(xml: &str) -> DiscoveryResult<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Reads and parses a discovery document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> DiscoveryResult<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::parse(&xml)
    }
}
