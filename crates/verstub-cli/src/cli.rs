//! # CLI Structure and Argument Parsing
//!
//! `verstub` is meant to be called once per docs deployment, after the new
//! build has been copied into its version directory. Every option can come
//! from the environment so CI jobs can set `URL` and `VERSION` and run the
//! bare command:
//!
//! ```bash
//! URL=https://docs.example.org VERSION=1.2.0 verstub
//!
//! # Equivalent, explicit
//! verstub --url https://docs.example.org --doc-version 1.2.0 --root site/
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Main CLI structure for the `verstub` command
#[derive(Parser, Clone, Debug)]
#[command(name = "verstub")]
#[command(version)]
#[command(
    about = "Update versions.json, redirect stubs and the sitemap index of a versioned docs site",
    long_about = None
)]
pub struct Cli {
    /// Base URL of the hosted documentation site
    #[arg(long, env = "URL", value_name = "URL")]
    pub url: String,

    /// Version identifier of the build being deployed
    #[arg(long = "doc-version", env = "VERSION", value_name = "VERSION")]
    pub doc_version: String,

    /// Directory to read the site from and write outputs into
    #[arg(long, env = "VERSTUB_ROOT", value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Timeout in seconds for fetching the hosted versions.json
    #[arg(long, env = "VERSTUB_TIMEOUT", value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// Enable debug logging
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Disable colored output (also honors `NO_COLOR`)
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "verstub",
            "--url",
            "https://x.test",
            "--doc-version",
            "1.2.0",
            "--root",
            "site",
            "--timeout",
            "5",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.url, "https://x.test");
        assert_eq!(cli.doc_version, "1.2.0");
        assert_eq!(cli.root, PathBuf::from("site"));
        assert_eq!(cli.timeout, 5);
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from([
            "verstub",
            "--url",
            "https://x.test",
            "--doc-version",
            "1.2.0",
            "-v",
            "-q",
        ]);
        assert!(result.is_err());
    }
}
