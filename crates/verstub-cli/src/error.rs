//! CLI error handling with semantic exit codes.
//!
//! Deploy jobs branch on the exit code, so every failure is mapped to a
//! category:
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Index files written |
//! | 1 | `Internal` | Filesystem or unexpected error |
//! | 2 | `Usage` | Missing or invalid `URL` / `VERSION` / flags |
//! | 3 | `NotFound` | A required resource does not exist |
//! | 5 | `Network` | HTTP failure that could not be recovered |
//! | 7 | `Integrity` | A `versions.json` that exists but does not parse |
//!
//! ```bash
//! verstub
//! case $? in
//!     0) echo "deployed" ;;
//!     7) echo "versions.json is corrupt, fix it by hand" ;;
//!     *) echo "deploy failed" ;;
//! esac
//! ```

use std::fmt;
use std::process::ExitCode;

use verstub_core::Error as CoreError;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,
    /// Invalid arguments or configuration (exit code 2).
    Usage = 2,
    /// Requested resource not found (exit code 3).
    NotFound = 3,
    /// Network or fetch failure (exit code 5).
    Network = 5,
    /// Corrupt manifest or other unreadable data (exit code 7).
    Integrity = 7,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Create an `ExitCode` from this category.
    #[must_use]
    pub fn as_exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Network => "network error",
            Self::Integrity => "integrity error",
        }
    }

    /// Category for a library error.
    #[must_use]
    pub const fn from_core(err: &CoreError) -> Self {
        match err {
            CoreError::Config(_) | CoreError::InvalidUrl(_) => Self::Usage,
            CoreError::NotFound(_) => Self::NotFound,
            CoreError::Network(_) => Self::Network,
            CoreError::Parse(_) => Self::Integrity,
            CoreError::Io(_) | CoreError::Serialization(_) | CoreError::Xml(_) => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` so context added with `.context(...)` survives
/// into the printed message.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::new(ErrorCategory::from_core(&err), err)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.source()
    }
}

/// Determine the category of an `anyhow::Error`.
///
/// A [`CliError`] anywhere in the chain decides; a bare library error is
/// categorized directly; anything else is internal.
#[must_use]
pub fn category_from_error(err: &anyhow::Error) -> ErrorCategory {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return cli_err.category;
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return ErrorCategory::from_core(core_err);
        }
    }
    ErrorCategory::Internal
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCategory::Internal.exit_code(), 1);
        assert_eq!(ErrorCategory::Usage.exit_code(), 2);
        assert_eq!(ErrorCategory::NotFound.exit_code(), 3);
        assert_eq!(ErrorCategory::Network.exit_code(), 5);
        assert_eq!(ErrorCategory::Integrity.exit_code(), 7);
    }

    #[test]
    fn test_core_error_mapping() {
        let cases = [
            (CoreError::Config("VERSION is empty".into()), ErrorCategory::Usage),
            (CoreError::InvalidUrl("ftp://x".into()), ErrorCategory::Usage),
            (CoreError::NotFound("x".into()), ErrorCategory::NotFound),
            (CoreError::Parse("invalid manifest".into()), ErrorCategory::Integrity),
            (CoreError::Xml("bad".into()), ErrorCategory::Internal),
            (
                CoreError::Io(std::io::Error::other("disk full")),
                ErrorCategory::Internal,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ErrorCategory::from_core(&err), expected, "{err}");
        }
    }

    #[test]
    fn test_cli_error_keeps_message() {
        let err = CliError::new(ErrorCategory::Usage, anyhow!("URL must not be empty"));
        assert_eq!(err.to_string(), "URL must not be empty");
        assert_eq!(err.category.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_from_wrapped_cli_error() {
        let err = anyhow::Error::new(CliError::from(CoreError::Parse("invalid manifest".into())));
        assert_eq!(category_from_error(&err), ErrorCategory::Integrity);
    }

    #[test]
    fn test_exit_code_through_context() {
        let result: Result<(), CoreError> = Err(CoreError::NotFound("x".into()));
        let err = result.context("while deploying").unwrap_err();
        assert_eq!(category_from_error(&err), ErrorCategory::NotFound);
    }

    #[test]
    fn test_unknown_error_is_internal() {
        assert_eq!(
            category_from_error(&anyhow!("something odd")),
            ErrorCategory::Internal
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Network.to_string(), "network error");
    }
}
