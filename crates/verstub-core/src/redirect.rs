//! HTML redirect stubs.
//!
//! A stub is a five-line HTML page with a zero-delay meta refresh and a
//! canonical link. Three kinds are written:
//!
//! - one per page of the latest version, mirrored at the site root, so that
//!   `/` and every unversioned URL lands on the latest docs
//! - `latest/index.html`, pointing at the latest version's index
//! - `dev/index.html`, pointing at the development version's index

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{DEV_DIR, DeployConfig, LATEST_DIR};
use crate::utils::{join_url, to_url_path};
use crate::Result;

const INDEX_FILE: &str = "index.html";

/// Render the stub page for `url`.
///
/// ```
/// use verstub_core::redirect::render_redirect;
///
/// let html = render_redirect("https://x.test/1.0/index.html");
/// assert!(html.starts_with("<!DOCTYPE html>\n"));
/// assert!(html.contains(r#"content="0; URL=https://x.test/1.0/index.html""#));
/// ```
pub fn render_redirect(url: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <meta charset=\"utf-8\">\n\
         <title>Redirecting to {url}</title>\n\
         <meta http-equiv=\"refresh\" content=\"0; URL={url}\">\n\
         <link rel=\"canonical\" href=\"{url}\">\n"
    )
}

/// One stub written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectStub {
    /// Output path relative to the working root.
    pub path: PathBuf,
    /// URL the stub redirects to.
    pub target: String,
}

/// Every stub written by [`write_redirects`], in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectReport {
    /// Stubs in the order they were written.
    pub stubs: Vec<RedirectStub>,
}

impl RedirectReport {
    /// Number of stubs written.
    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    /// Look up the stub written at `path`.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&RedirectStub> {
        let path = path.as_ref();
        self.stubs.iter().find(|s| s.path == path)
    }
}

/// Create `dir` and its parents. An existing directory is fine.
fn ensure_dir(dir: &Path) -> io::Result<()> {
    match fs::create_dir_all(dir) {
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        other => other,
    }
}

/// Write a stub for `url` at `root/relative`, creating parent directories.
pub fn write_redirect(root: &Path, relative: &Path, url: &str) -> Result<RedirectStub> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(&path, render_redirect(url))?;
    debug!(path = %relative.display(), %url, "Wrote redirect stub");

    Ok(RedirectStub {
        path: relative.to_path_buf(),
        target: url.to_string(),
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// List `.html` files under `root/version`, as paths relative to `root`.
///
/// Hidden files and directories are skipped; symlinks are followed. An
/// empty version or a missing version directory yields an empty list.
pub fn collect_html_files(root: &Path, version: &str) -> Result<Vec<PathBuf>> {
    if version.is_empty() {
        return Ok(Vec::new());
    }
    let version_dir = root.join(version);
    if !version_dir.is_dir() {
        debug!(dir = %version_dir.display(), "Version directory not present, no pages to mirror");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&version_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.loop_ancestor().is_some() => {
                warn!(error = %err, "Skipping symlink loop");
                continue;
            },
            Err(err) => return Err(io::Error::from(err).into()),
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some("html") {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Write all redirect stubs for the chosen latest and dev versions.
///
/// Without a latest version no per-page or `latest/` stubs are written;
/// without a dev version `dev/index.html` is skipped. An empty version
/// string counts as absent.
pub fn write_redirects(
    config: &DeployConfig,
    latest_version: Option<&str>,
    dev_version: Option<&str>,
) -> Result<RedirectReport> {
    let root = config.root();
    let base_url = config.base_url();
    let mut report = RedirectReport::default();
    let latest_version = latest_version.filter(|v| !v.is_empty());
    let dev_version = dev_version.filter(|v| !v.is_empty());

    if let Some(latest) = latest_version {
        for page in collect_html_files(root, latest)? {
            let Ok(mirrored) = page.strip_prefix(latest) else {
                continue;
            };
            let url = join_url(base_url, &["", &to_url_path(&page)]);
            report.stubs.push(write_redirect(root, mirrored, &url)?);
        }

        let url = join_url(base_url, &[latest, INDEX_FILE]);
        let path = Path::new(LATEST_DIR).join(INDEX_FILE);
        report.stubs.push(write_redirect(root, &path, &url)?);
    }

    if let Some(dev) = dev_version {
        let url = join_url(base_url, &[dev, INDEX_FILE]);
        let path = Path::new(DEV_DIR).join(INDEX_FILE);
        report.stubs.push(write_redirect(root, &path, &url)?);
    }

    info!(
        stubs = report.len(),
        latest = latest_version.unwrap_or("-"),
        dev = dev_version.unwrap_or("-"),
        "Wrote redirect stubs"
    );
    Ok(report)
}
