//! Small string helpers shared by the pipeline stages.

/// Join URL segments the way POSIX paths are joined.
///
/// Each segment is appended after a `/` unless the accumulated value is empty
/// or already ends with `/`. A segment that itself starts with `/` replaces
/// everything before it. An empty segment only contributes a trailing `/`,
/// which is what makes `join_url("https://x.test", &["", "a.html"])` come out
/// as `https://x.test/a.html`.
///
/// # Examples
/// ```
/// use verstub_core::utils::join_url;
///
/// assert_eq!(join_url("https://x.test", &["1.2.0"]), "https://x.test/1.2.0");
/// assert_eq!(join_url("https://x.test/", &["1.2.0"]), "https://x.test/1.2.0");
/// assert_eq!(join_url("https://x.test", &[""]), "https://x.test/");
/// ```
pub fn join_url(base: &str, segments: &[&str]) -> String {
    let mut joined = base.to_string();
    for segment in segments {
        if segment.starts_with('/') {
            joined = (*segment).to_string();
        } else if joined.is_empty() || joined.ends_with('/') {
            joined.push_str(segment);
        } else {
            joined.push('/');
            joined.push_str(segment);
        }
    }
    joined
}

/// Convert a relative filesystem path to `/`-separated form for use in URLs.
pub fn to_url_path(path: &std::path::Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
