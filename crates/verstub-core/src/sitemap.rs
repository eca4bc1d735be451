//! Sitemap index (sitemap of sitemaps) generation.
//!
//! Each published version ships its own `sitemap.xml`. The site root gets a
//! `sitemap_index.xml` that points at all of them:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><sitemap><loc>https://x.test/1.2.0/sitemap.xml</loc></sitemap></sitemapindex>
//! ```
//!
//! The index is declarative only: nothing checks that the referenced
//! sitemaps exist.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::{info, instrument};

use crate::config::VERSION_SITEMAP_FILE;
use crate::types::VersionEntry;
use crate::utils::join_url;
use crate::{Error, Result};

/// Namespace of the sitemaps.org protocol.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// URL of the sitemap for one version.
pub fn version_sitemap_url(base_url: &str, version: &str) -> String {
    join_url(base_url, &[&format!("{version}/{VERSION_SITEMAP_FILE}")])
}

/// Render the sitemap index document for `entries`.
#[instrument(skip(entries), fields(versions = entries.len()))]
pub fn render_sitemap_index(base_url: &str, entries: &[VersionEntry]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.get_mut().push(b'\n');

    let mut root = BytesStart::new("sitemapindex");
    root.push_attribute(("xmlns", SITEMAP_NS));
    writer.write_event(Event::Start(root))?;

    for entry in entries {
        let loc = version_sitemap_url(base_url, &entry.version);
        writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        writer.write_event(Event::Text(BytesText::new(&loc)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;
        writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sitemapindex")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))
}

/// Render and write the sitemap index to `path`.
pub fn write_sitemap_index(path: &Path, base_url: &str, entries: &[VersionEntry]) -> Result<()> {
    let xml = render_sitemap_index(base_url, entries)?;
    fs::write(path, xml)?;
    info!(path = %path.display(), sitemaps = entries.len(), "Wrote sitemap index");
    Ok(())
}

/// Extract the `<loc>` values of a sitemap index, in document order.
pub fn parse_sitemap_index(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut locs = Vec::new();
    let mut in_sitemap = false;
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sitemap" => in_sitemap = true,
                b"loc" if in_sitemap => in_loc = true,
                _ => {},
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"sitemap" => in_sitemap = false,
                b"loc" => in_loc = false,
                _ => {},
            },
            Ok(Event::Text(e)) if in_loc => {
                let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                locs.push(text.trim().to_string());
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("sitemap index parse error: {e}"))),
            _ => {},
        }
    }

    Ok(locs)
}
