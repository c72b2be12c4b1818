//! Host configuration.

use wopihost_protocol::FileId;

/// Configuration of the WOPI host surface.
///
/// Built with a builder-style API:
///
/// ```
/// use wopihost_core::WopiConfig;
///
/// let config = WopiConfig::new("https://docs.example.com")
///     .with_supported_apps(["Word", "Excel"]);
/// assert!(config.base_url().ends_with('/'));
/// ```
#[derive(Debug, Clone)]
pub struct WopiConfig {
    base_url: String,
    supported_apps: Vec<String>,
}

impl Default for WopiConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

impl WopiConfig {
    /// Creates a configuration rooted at `base_url`.
    ///
    /// A missing trailing slash is added so URL building can always
    /// append path segments.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            supported_apps: Vec::new(),
        }
    }

    /// Sets the allow-list of office applications accepted from the
    /// discovery document.
    #[must_use]
    pub fn with_supported_apps<I, S>(mut self, apps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_apps = apps.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the externally visible base URL, with a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the office application allow-list.
    #[must_use]
    pub fn supported_apps(&self) -> &[String] {
        &self.supported_apps
    }

    /// WOPI endpoint URL for a file.
    #[must_use]
    pub fn file_url(&self, id: &FileId) -> String {
        format!("{}wopi/files/{id}", self.base_url)
    }

    /// Direct content download URL for a file.
    #[must_use]
    pub fn download_url(&self, id: &FileId) -> String {
        format!("{}wopi/files/{id}/contents", self.base_url)
    }

    /// Deep link into the host UI for viewing a file.
    #[must_use]
    pub fn view_url(&self, id: &FileId) -> String {
        format!("{}wopi/view/{}/{}", self.base_url, id.doc_id(), id.xpath())
    }

    /// Deep link into the host UI for editing a file.
    #[must_use]
    pub fn edit_url(&self, id: &FileId) -> String {
        format!("{}wopi/edit/{}/{}", self.base_url, id.doc_id(), id.xpath())
    }
}
