//! # verstub-core
//!
//! Core functionality for verstub - keeps a versioned documentation site's
//! index in shape after each deployment.
//!
//! A static docs site publishes each release into its own directory
//! (`/1.2.0/`, `/1.3.0-dev/`, ...). After a new build is uploaded, this crate:
//!
//! - updates the `versions.json` manifest consumed by version switchers
//! - writes redirect stubs so `/`, `/latest/` and `/dev/` land on the right
//!   version
//! - regenerates `sitemap_index.xml`, one entry per version's `sitemap.xml`
//!
//! ## Architecture
//!
//! - **Configuration**: [`DeployConfig`], built once and passed explicitly
//! - **Loading**: [`Fetcher`] and [`fetcher::load_or_default`], site first,
//!   local copy second, default last
//! - **Manifest**: [`Manifest`] and [`VersionEntry`], with the update rules
//! - **Output**: [`redirect`] stubs and the [`sitemap`] index
//! - **Pipeline**: [`deploy()`] runs everything in order
//!
//! ## Quick Start
//!
//! ```no_run
//! use verstub_core::{DeployConfig, deploy};
//!
//! # async fn example() -> verstub_core::Result<()> {
//! let config = DeployConfig::new("https://docs.example.org", "1.2.0", ".")?;
//! let report = deploy(&config).await?;
//! println!("latest is now {:?}", report.latest_version);
//! # Ok(())
//! # }
//! ```

/// Deployment configuration
pub mod config;
/// The deployment pipeline
pub mod deploy;
/// Error types and result aliases
pub mod error;
/// HTTP fetching with local fallback
pub mod fetcher;
/// Version manifest and update rules
pub mod manifest;
/// HTML redirect stubs
pub mod redirect;
/// Sitemap index generation
pub mod sitemap;
/// Core data types
pub mod types;
/// String helpers
pub mod utils;

pub use config::DeployConfig;
pub use deploy::{DeployReport, deploy, deploy_with};
pub use error::{Error, Result};
pub use fetcher::{Fetcher, LoadSource, Loaded};
pub use manifest::{Manifest, UpdateOutcome, find_last_matching};
pub use redirect::{RedirectReport, RedirectStub};
pub use types::VersionEntry;
