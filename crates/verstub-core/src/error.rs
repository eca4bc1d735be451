//! Error types and handling for verstub-core operations.
//!
//! A deployment run has two tiers of failure. Fetch failures and a missing
//! local manifest are absorbed by the loader (logged, then the default is
//! used), so they rarely surface through this type. Everything else - bad
//! configuration, unwritable output, a manifest that does not parse - is
//! returned as an [`Error`] and aborts the run.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading the local manifest, writing stubs and indexes
//! - **Network Errors**: HTTP requests for the hosted manifest
//! - **Parse Errors**: manifest JSON that cannot be decoded
//! - **Configuration Errors**: missing or invalid `URL`/`VERSION`
//! - **XML Errors**: sitemap index serialization

use thiserror::Error;

/// The main error type for verstub-core operations.
///
/// All fallible public functions return `Result<T, Error>`. Source errors are
/// preserved so callers (the CLI) can print the full chain.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading the fallback manifest, creating stub directories and
    /// writing output files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Connection failures, timeouts and non-success HTTP statuses while
    /// fetching the hosted manifest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Requested remote resource was not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Manifest content could not be parsed.
    ///
    /// ## Common Causes
    ///
    /// - Truncated or hand-edited `versions.json`
    /// - An entry missing one of `version`, `display`, `url` or `latest`
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization of an output document failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or incomplete.
    ///
    /// Raised by [`crate::DeployConfig::new`] for an empty version or base URL.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Base URL is malformed or uses an unsupported scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// XML writer failed while emitting the sitemap index.
    #[error("XML error: {0}")]
    Xml(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Serialization(err.to_string())
        } else {
            Self::Parse(err.to_string())
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for timeouts, connection failures and interrupted I/O.
    /// The deployment pipeline itself never retries; this is exposed so that
    /// callers wrapping the library can decide for themselves.
    ///
    /// ```rust
    /// use verstub_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "eintr")).is_recoverable());
    /// assert!(!Error::Parse("expected `[`".to_string()).is_recoverable());
    /// assert!(!Error::Config("VERSION is empty".to_string()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Used as a structured `tracing` field and by the CLI to choose an exit
    /// code.
    ///
    /// ```rust
    /// use verstub_core::Error;
    ///
    /// assert_eq!(Error::Parse("bad".into()).category(), "parse");
    /// assert_eq!(Error::InvalidUrl("ftp://x".into()).category(), "invalid_url");
    /// ```
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::NotFound(_) => "not_found",
            Self::Parse(_) => "parse",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Xml(_) => "xml",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
