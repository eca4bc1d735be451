//! The deployment pipeline.
//!
//! [`deploy`] runs the four stages in order against one [`DeployConfig`]:
//!
//! 1. load `versions.json` (site, then local copy, then empty)
//! 2. add the deployed version and write `versions.json`
//! 3. write redirect stubs for the latest and dev versions
//! 4. write `sitemap_index.xml`
//!
//! Stages share nothing but the manifest. A failure aborts the run and
//! leaves files written by earlier stages in place.

use tracing::{info, instrument};

use crate::config::{DeployConfig, MANIFEST_FILE, SITEMAP_INDEX_FILE};
use crate::fetcher::{Fetcher, LoadSource, load_or_default};
use crate::manifest::{Manifest, UpdateOutcome};
use crate::redirect::{RedirectReport, write_redirects};
use crate::sitemap::write_sitemap_index;
use crate::Result;

/// Summary of a completed deployment run.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployReport {
    /// Where the starting manifest came from.
    pub manifest_source: LoadSource,
    /// Whether the deployed version was added.
    pub outcome: UpdateOutcome,
    /// The manifest as written.
    pub manifest: Manifest,
    /// Version the root and `latest/` redirect to, if any.
    pub latest_version: Option<String>,
    /// Version `dev/` redirects to, if any.
    pub dev_version: Option<String>,
    /// Redirect stubs written.
    pub redirects: RedirectReport,
}

/// Run the full pipeline with a fetcher built from `config`.
pub async fn deploy(config: &DeployConfig) -> Result<DeployReport> {
    let fetcher = Fetcher::with_timeout(config.fetch_timeout())?;
    deploy_with(&fetcher, config).await
}

/// Run the full pipeline with an existing fetcher.
#[instrument(skip_all, fields(url = %config.base_url(), version = %config.version()))]
pub async fn deploy_with(fetcher: &Fetcher, config: &DeployConfig) -> Result<DeployReport> {
    let loaded = load_or_default(
        fetcher,
        config,
        MANIFEST_FILE,
        Manifest::from_json,
        Manifest::default(),
    )
    .await?;
    let mut manifest = loaded.value;

    let outcome = manifest.add_version(config.version(), config.base_url());
    manifest.write_to(&config.path(MANIFEST_FILE))?;

    let latest_version = manifest.latest_version().map(str::to_string);
    let dev_version = manifest.dev_version().map(str::to_string);

    let redirects = write_redirects(config, latest_version.as_deref(), dev_version.as_deref())?;

    write_sitemap_index(
        &config.path(SITEMAP_INDEX_FILE),
        config.base_url(),
        manifest.entries(),
    )?;

    info!(
        source = %loaded.source,
        versions = manifest.len(),
        stubs = redirects.len(),
        "Deployment index updated"
    );

    Ok(DeployReport {
        manifest_source: loaded.source,
        outcome,
        manifest,
        latest_version,
        dev_version,
        redirects,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::sitemap::parse_sitemap_index;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve_manifest(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/versions.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
            .mount(&server)
            .await;
        server
    }

    fn write_page(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<html></html>").unwrap();
    }

    #[tokio::test]
    async fn test_first_release_from_empty_remote() {
        let server = serve_manifest("[]").await;
        let root = tempfile::tempdir().unwrap();
        write_page(root.path(), "1.2.0/index.html");
        let config = DeployConfig::new(server.uri(), "1.2.0", root.path()).unwrap();

        let report = deploy(&config).await.unwrap();

        assert_eq!(report.manifest_source, LoadSource::Remote);
        assert_eq!(report.outcome, UpdateOutcome::Added { latest: true });
        assert_eq!(report.latest_version.as_deref(), Some("1.2.0"));
        // With a single non-dev entry the dev lookup falls back to it.
        assert_eq!(report.dev_version.as_deref(), Some("1.2.0"));

        let written = Manifest::read_from(&root.path().join("versions.json")).unwrap();
        assert_eq!(written, report.manifest);
        assert_eq!(written.entries()[0].url, format!("{}/1.2.0", server.uri()));

        let sitemap = fs::read_to_string(root.path().join("sitemap_index.xml")).unwrap();
        assert_eq!(
            parse_sitemap_index(&sitemap).unwrap(),
            vec![format!("{}/1.2.0/sitemap.xml", server.uri())]
        );

        for stub in ["index.html", "latest/index.html", "dev/index.html"] {
            assert!(root.path().join(stub).is_file(), "missing {stub}");
        }
    }

    #[tokio::test]
    async fn test_dev_deploy_keeps_latest_release() {
        let server = serve_manifest(
            r#"[
              {"version": "1.0.0", "display": "1.0.0", "url": "https://x.test/1.0.0", "latest": false},
              {"version": "1.1.0", "display": "1.1.0", "url": "https://x.test/1.1.0", "latest": true}
            ]"#,
        )
        .await;
        let root = tempfile::tempdir().unwrap();
        write_page(root.path(), "1.1.0/index.html");
        let config = DeployConfig::new(server.uri(), "1.2.0-dev", root.path()).unwrap();

        let report = deploy(&config).await.unwrap();

        assert_eq!(report.outcome, UpdateOutcome::Added { latest: false });
        assert_eq!(report.latest_version.as_deref(), Some("1.1.0"));
        assert_eq!(report.dev_version.as_deref(), Some("1.2.0-dev"));
        let dev = fs::read_to_string(root.path().join("dev").join("index.html")).unwrap();
        assert!(dev.contains(&format!("{}/1.2.0-dev/index.html", server.uri())));
    }

    #[tokio::test]
    async fn test_offline_without_cache_starts_empty() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let root = tempfile::tempdir().unwrap();
        let config = DeployConfig::new(format!("http://127.0.0.1:{port}"), "0.1.0", root.path())
            .unwrap()
            .with_fetch_timeout(Duration::from_secs(2));

        let report = deploy(&config).await.unwrap();

        assert_eq!(report.manifest_source, LoadSource::Default);
        assert_eq!(report.manifest.len(), 1);
        // No built pages: only the fixed-path stubs are written.
        assert_eq!(report.redirects.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_latest_entry_leaves_pages_alone() {
        let server = serve_manifest(
            r#"[{"version": "", "display": "", "url": "https://x.test/", "latest": true}]"#,
        )
        .await;
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("1.2.0")).unwrap();
        fs::write(root.path().join("1.2.0").join("index.html"), "<html>real docs</html>").unwrap();
        let config = DeployConfig::new(server.uri(), "1.3.0-dev", root.path()).unwrap();

        let report = deploy(&config).await.unwrap();

        assert_eq!(report.latest_version.as_deref(), Some(""));
        let original = fs::read_to_string(root.path().join("1.2.0").join("index.html")).unwrap();
        assert_eq!(original, "<html>real docs</html>");
        assert!(!root.path().join("latest").exists());
        // Only the dev stub is written.
        assert_eq!(report.redirects.len(), 1);
        assert!(root.path().join("dev").join("index.html").is_file());
    }

    #[tokio::test]
    async fn test_redeploy_is_stable() {
        let server = serve_manifest(
            r#"[{"version": "1.2.0", "display": "1.2.0", "url": "https://x.test/1.2.0", "latest": true}]"#,
        )
        .await;
        let root = tempfile::tempdir().unwrap();
        let config = DeployConfig::new(server.uri(), "1.2.0", root.path()).unwrap();

        let report = deploy(&config).await.unwrap();

        assert_eq!(report.outcome, UpdateOutcome::AlreadyPresent);
        assert_eq!(report.manifest.len(), 1);
        assert_eq!(report.manifest.entries()[0].url, "https://x.test/1.2.0");
    }
}
