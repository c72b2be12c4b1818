//! Action-URL registry.

use crate::discovery::Discovery;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Placeholder pre-filled into every registered action URL; the WOPI
/// client requires the licensing flag to be present on the query
/// string.
pub const PLACEHOLDER_IS_LICENSED_USER: &str = "IsLicensedUser";

/// Value pre-filled for [`PLACEHOLDER_IS_LICENSED_USER`].
pub const PLACEHOLDER_IS_LICENSED_USER_VALUE: &str = "1";

/// Office-integration info for one file: which app opens it and with
/// which actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppBinding {
    /// Application name.
    pub app_name: String,
    /// Action names available for the file's extension.
    pub actions: Vec<String>,
}

/// Maps file extensions to application names and per-action URL
/// templates.
///
/// Built once at startup from the discovery document, filtered by the
/// configured application allow-list, and immutable thereafter. When no
/// application registers (discovery absent, malformed, or entirely
/// filtered out) the registry reports `is_enabled() == false` and the
/// host treats WOPI as unavailable for office-integration UI purposes.
#[derive(Debug, Clone, Default)]
pub struct ActionUrlRegistry {
    // extension => app name
    extension_app_names: HashMap<String, String>,
    // extension => action name => action url
    extension_action_urls: HashMap<String, HashMap<String, String>>,
}

impl ActionUrlRegistry {
    /// Creates a disabled registry with no applications.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the registry from a discovery document.
    ///
    /// Applications not named in `supported_apps` are skipped. Each
    /// registered action URL is the action's `urlsrc` truncated at its
    /// placeholder section with the licensing flag appended.
    #[must_use]
    pub fn from_discovery(discovery: &Discovery, supported_apps: &[String]) -> Self {
        let mut registry = Self::default();
        for app in &discovery.net_zone.apps {
            if !supported_apps.iter().any(|name| name == &app.name) {
                debug!(app = %app.name, "skipping app not in the allow-list");
                continue;
            }
            for action in &app.actions {
                if action.ext.is_empty() {
                    continue;
                }
                let base = action
                    .urlsrc
                    .split('<')
                    .next()
                    .unwrap_or(action.urlsrc.as_str());
                let url = format!(
                    "{base}{PLACEHOLDER_IS_LICENSED_USER}={PLACEHOLDER_IS_LICENSED_USER_VALUE}&"
                );
                registry
                    .extension_app_names
                    .insert(action.ext.clone(), app.name.clone());
                registry
                    .extension_action_urls
                    .entry(action.ext.clone())
                    .or_default()
                    .insert(action.name.clone(), url);
            }
        }
        if !registry.is_enabled() {
            warn!("no WOPI application registered, office integration disabled");
        }
        registry
    }

    /// Returns true when at least one application registered.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !(self.extension_app_names.is_empty() || self.extension_action_urls.is_empty())
    }

    /// Returns the application name registered for an extension.
    #[must_use]
    pub fn app_name(&self, extension: &str) -> Option<&str> {
        self.extension_app_names.get(extension).map(String::as_str)
    }

    /// Returns the URL template for an extension and action.
    #[must_use]
    pub fn action_url(&self, extension: &str, action: &str) -> Option<&str> {
        self.extension_action_urls
            .get(extension)?
            .get(action)
            .map(String::as_str)
    }

    /// Returns the office-integration binding for a file name, judged
    /// by its extension.
    ///
    /// Returns `None` when the registry is disabled, the file has no
    /// extension, or no application registered for it.
    #[must_use]
    pub fn app_for_file(&self, filename: &str) -> Option<AppBinding> {
        if !self.is_enabled() {
            return None;
        }
        let extension = filename.rsplit_once('.').map(|(_, ext)| ext)?;
        let app_name = self.extension_app_names.get(extension)?.clone();
        let mut actions: Vec<String> = self
            .extension_action_urls
            .get(extension)?
            .keys()
            .cloned()
            .collect();
        actions.sort();
        Some(AppBinding { app_name, actions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_discovery() -> Discovery {
        Discovery::parse(
            r#"<wopi-discovery>
  <net-zone name="external-https">
    <app name="Word">
      <action name="view" ext="docx" urlsrc="https://c/wv/frame.aspx?&lt;ui=UI_LLCC&amp;&gt;"/>
      <action name="edit" ext="docx" urlsrc="https://c/we/frame.aspx?&lt;ui=UI_LLCC&amp;&gt;"/>
      <action name="editnew" urlsrc="https://c/we/new.aspx?"/>
    </app>
    <app name="Excel">
      <action name="view" ext="xlsx" urlsrc="https://c/x/view.aspx?&lt;ui=UI_LLCC&amp;&gt;"/>
    </app>
  </net-zone>
</wopi-discovery>"#,
        )
        .unwrap()
    }

    fn allow(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn registers_allowed_apps_only() {
        let registry = ActionUrlRegistry::from_discovery(&sample_discovery(), &allow(&["Word"]));
        assert!(registry.is_enabled());
        assert_eq!(registry.app_name("docx"), Some("Word"));
        assert_eq!(registry.app_name("xlsx"), None);
    }

    #[test]
    fn action_url_truncates_placeholder_and_adds_license_flag() {
        let registry =
            ActionUrlRegistry::from_discovery(&sample_discovery(), &allow(&["Word", "Excel"]));
        assert_eq!(
            registry.action_url("docx", "view"),
            Some("https://c/wv/frame.aspx?IsLicensedUser=1&")
        );
        assert_eq!(
            registry.action_url("xlsx", "view"),
            Some("https://c/x/view.aspx?IsLicensedUser=1&")
        );
        assert_eq!(registry.action_url("docx", "convert"), None);
    }

    #[test]
    fn actions_without_extension_are_skipped() {
        let registry = ActionUrlRegistry::from_discovery(&sample_discovery(), &allow(&["Word"]));
        assert_eq!(registry.action_url("", "editnew"), None);
    }

    #[test]
    fn app_for_file_lists_actions() {
        let registry = ActionUrlRegistry::from_discovery(&sample_discovery(), &allow(&["Word"]));
        let binding = registry.app_for_file("report.docx").unwrap();
        assert_eq!(binding.app_name, "Word");
        assert_eq!(binding.actions, vec!["edit".to_string(), "view".to_string()]);

        assert_eq!(registry.app_for_file("notes.txt"), None);
        assert_eq!(registry.app_for_file("no-extension"), None);
    }

    #[test]
    fn empty_allow_list_disables_registry() {
        let registry = ActionUrlRegistry::from_discovery(&sample_discovery(), &[]);
        assert!(!registry.is_enabled());
        assert_eq!(registry.app_for_file("report.docx"), None);
    }

    #[test]
    fn empty_registry_is_disabled() {
        assert!(!ActionUrlRegistry::empty().is_enabled());
    }
}
