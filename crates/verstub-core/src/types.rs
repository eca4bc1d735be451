//! Core data types for the version manifest.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One published documentation version as recorded in `versions.json`.
///
/// Field order is the serialized key order. Keys beyond the four known ones
/// are kept in `extra` and written back after them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Version identifier, also the directory name on the site.
    pub version: String,
    /// Label shown in version switchers.
    pub display: String,
    /// Canonical URL of this version's documentation root.
    pub url: String,
    /// Whether this is the default landing version.
    pub latest: bool,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl VersionEntry {
    /// Create an entry whose display label equals its version.
    pub fn new(version: impl Into<String>, url: impl Into<String>, latest: bool) -> Self {
        let version = version.into();
        Self {
            display: version.clone(),
            version,
            url: url.into(),
            latest,
            extra: Map::new(),
        }
    }

    /// Whether this entry is a development build.
    pub fn is_dev(&self) -> bool {
        self.version.contains(crate::config::DEV_MARKER)
    }
}
