//! Deployment configuration.
//!
//! A run is fully described by a [`DeployConfig`]: the base site URL, the
//! version being deployed, the directory the tool works in and the fetch
//! timeout. The CLI builds one from flags and environment variables
//! (`URL`, `VERSION`) once at startup and hands it to every stage; nothing
//! in the core reads the process environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Name of the version manifest, both remote and local.
pub const MANIFEST_FILE: &str = "versions.json";

/// Name of the generated sitemap-of-sitemaps.
pub const SITEMAP_INDEX_FILE: &str = "sitemap_index.xml";

/// Per-version sitemap referenced from the index.
pub const VERSION_SITEMAP_FILE: &str = "sitemap.xml";

/// Directory holding the stub for the latest release.
pub const LATEST_DIR: &str = "latest";

/// Directory holding the stub for the development build.
pub const DEV_DIR: &str = "dev";

/// Substring that marks a version as a development build.
pub const DEV_MARKER: &str = "dev";

/// Default HTTP timeout for the manifest fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable settings for one deployment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    base_url: String,
    version: String,
    root: PathBuf,
    fetch_timeout: Duration,
}

impl DeployConfig {
    /// Validate and build a configuration rooted at `root`.
    ///
    /// The base URL must be an absolute `http` or `https` URL and the version
    /// must be non-empty. Both are trimmed; the base URL is otherwise kept as
    /// given so joins reproduce exactly what the site expects.
    pub fn new(
        base_url: impl Into<String>,
        version: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Result<Self> {
        let base_url = base_url.into().trim().to_string();
        let version = version.into().trim().to_string();

        if base_url.is_empty() {
            return Err(Error::Config("base URL (URL) must not be empty".into()));
        }
        if version.is_empty() {
            return Err(Error::Config("version (VERSION) must not be empty".into()));
        }

        let parsed = Url::parse(&base_url)
            .map_err(|e| Error::InvalidUrl(format!("'{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "'{base_url}': unsupported scheme '{}', expected http or https",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url,
            version,
            root: root.into(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        })
    }

    /// Override the manifest fetch timeout.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Base site URL, e.g. `https://docs.example.org`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Version identifier being deployed.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Working root for all reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Timeout applied to the manifest request.
    pub const fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Whether the deployed version is a development build.
    pub fn is_dev_version(&self) -> bool {
        self.version.contains(DEV_MARKER)
    }

    /// Resolve a root-relative path.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}
