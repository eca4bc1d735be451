//! The version manifest (`versions.json`) and its update rules.
//!
//! The manifest is an ordered list of [`VersionEntry`] records. Order is the
//! order versions were first published; a run appends at most one entry.
//!
//! ## Update rules
//!
//! - A version already present (exact string match) is left alone.
//! - A new non-dev version clears every existing `latest` flag and is
//!   appended with `latest = true`.
//! - A new dev version (contains `dev`) is appended with `latest = false`
//!   and existing flags are untouched.
//!
//! ```rust
//! use verstub_core::Manifest;
//!
//! let mut manifest = Manifest::default();
//! manifest.add_version("1.0.0", "https://x.test");
//! manifest.add_version("1.1.0-dev", "https://x.test");
//!
//! assert_eq!(manifest.latest_version(), Some("1.0.0"));
//! assert_eq!(manifest.dev_version(), Some("1.1.0-dev"));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::VersionEntry;
use crate::utils::join_url;
use crate::{Error, Result};

/// Ordered collection of published versions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<VersionEntry>,
}

/// What [`Manifest::add_version`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The version was already listed; nothing changed.
    AlreadyPresent,
    /// The version was appended.
    Added {
        /// Whether the new entry became the latest release.
        latest: bool,
    },
}

impl Manifest {
    /// Wrap an existing list of entries.
    pub const fn new(entries: Vec<VersionEntry>) -> Self {
        Self { entries }
    }

    /// Decode a manifest from JSON text.
    ///
    /// Every entry must carry `version`, `display`, `url` and `latest`.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Parse(format!("invalid manifest: {e}")))
    }

    /// Encode as JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Read and decode a manifest file.
    pub fn read_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write the manifest, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        fs::write(path, json)?;
        info!(path = %path.display(), versions = self.entries.len(), "Wrote version manifest");
        Ok(())
    }

    /// Entries in manifest order.
    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    /// Consume the manifest, returning its entries.
    pub fn into_entries(self) -> Vec<VersionEntry> {
        self.entries
    }

    /// Number of versions listed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no versions are listed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `version` is listed (exact match).
    pub fn contains(&self, version: &str) -> bool {
        self.entries.iter().any(|e| e.version == version)
    }

    /// Record `version` as published under `base_url`.
    pub fn add_version(&mut self, version: &str, base_url: &str) -> UpdateOutcome {
        if self.contains(version) {
            debug!(%version, "Version already listed in manifest");
            return UpdateOutcome::AlreadyPresent;
        }

        let entry = VersionEntry::new(version, join_url(base_url, &[version]), false);
        let latest = !entry.is_dev();
        if latest {
            for existing in &mut self.entries {
                existing.latest = false;
            }
        }

        self.entries.push(VersionEntry { latest, ..entry });
        info!(%version, latest, "Added version to manifest");
        UpdateOutcome::Added { latest }
    }

    /// Most recent entry flagged `latest`, falling back to the last entry.
    pub fn latest_version(&self) -> Option<&str> {
        find_last_matching(&self.entries, |e| e.latest).map(|e| e.version.as_str())
    }

    /// Most recent development entry, falling back to the last entry.
    pub fn dev_version(&self) -> Option<&str> {
        find_last_matching(&self.entries, VersionEntry::is_dev).map(|e| e.version.as_str())
    }
}

impl From<Vec<VersionEntry>> for Manifest {
    fn from(entries: Vec<VersionEntry>) -> Self {
        Self::new(entries)
    }
}

/// Scan `items` from the end and return the first match.
///
/// When nothing matches, the last item is returned; an empty slice yields
/// `None`.
pub fn find_last_matching<T, P>(items: &[T], predicate: P) -> Option<&T>
where
    P: Fn(&T) -> bool,
{
    items
        .iter()
        .rev()
        .find(|item| predicate(*item))
        .or_else(|| items.last())
}
