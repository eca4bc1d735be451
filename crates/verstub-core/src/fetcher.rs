//! Fetch-or-fallback retrieval of site files.
//!
//! The hosted copy of a file is authoritative. When it cannot be fetched
//! (connection failure, timeout, non-success status) the same-named file in
//! the working root is used instead, and when that is missing too the
//! caller's default applies. Both fallbacks are logged, never fatal.
//!
//! Decoding is the caller's business: the raw text goes through a parse
//! function, and a parse failure is returned as-is. A corrupt manifest should
//! stop a deployment rather than silently reset the version list.

use std::fs;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_FETCH_TIMEOUT, DeployConfig};
use crate::utils::join_url;
use crate::{Error, Result};

/// User agent sent with every request. Some static hosts reject clients
/// without a browser-like agent.
pub const USER_AGENT: &str = "Mozilla/5.0";

/// HTTP client for fetching files from the hosted site
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new fetcher with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Creates a new fetcher with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Fetch a URL and return its body as text
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url.to_string()));
        }

        let response = response.error_for_status()?;
        let content = response.text().await?;
        debug!(%url, bytes = content.len(), "Fetched remote file");
        Ok(content)
    }
}

/// Where a loaded value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Fetched from the hosted site.
    Remote,
    /// Read from the working root after the fetch failed.
    Local,
    /// Neither was available; the caller's default was used.
    Default,
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Remote => "remote",
            Self::Local => "local",
            Self::Default => "default",
        })
    }
}

/// A value produced by [`load_or_default`] together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// The decoded value.
    pub value: T,
    /// Which source supplied it.
    pub source: LoadSource,
}

/// Load `filename` from the site, then the working root, then `default`.
///
/// `parse` receives the raw text from whichever source succeeded. Network and
/// read failures fall through to the next source; a parse failure is
/// returned.
pub async fn load_or_default<T, F>(
    fetcher: &Fetcher,
    config: &DeployConfig,
    filename: &str,
    parse: F,
    default: T,
) -> Result<Loaded<T>>
where
    F: FnOnce(&str) -> Result<T>,
{
    let url = join_url(config.base_url(), &[filename]);

    match fetcher.fetch_text(&url).await {
        Ok(text) => {
            info!(%url, bytes = text.len(), "Loaded {filename} from site");
            return Ok(Loaded {
                value: parse(&text)?,
                source: LoadSource::Remote,
            });
        },
        Err(e) => warn!(%url, error = %e, "Could not fetch {filename}, trying local copy"),
    }

    let path = config.path(filename);
    match fs::read_to_string(&path) {
        Ok(text) => {
            info!(path = %path.display(), bytes = text.len(), "Loaded {filename} from local copy");
            Ok(Loaded {
                value: parse(&text)?,
                source: LoadSource::Local,
            })
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "No usable local {filename}, using default");
            Ok(Loaded {
                value: default,
                source: LoadSource::Default,
            })
        },
    }
}
