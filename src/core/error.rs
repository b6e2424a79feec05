//! Error handling for depviz.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`DepvizError`]) so callers can react to
//!    specific failure modes, most importantly the split between a fatal
//!    root-package lookup failure and a recoverable per-dependency failure
//!    during graph expansion.
//! 2. **User-friendly reporting** ([`ErrorContext`], [`user_friendly_error`])
//!    so the CLI exit path can show what failed together with an actionable
//!    suggestion.
//!
//! # Propagation policy
//!
//! Only configuration errors, root-level metadata failures, and
//! serialization failures propagate out of the library. A dependency whose
//! metadata lookup fails during expansion is absorbed by the graph builder:
//! it is kept in the graph as an unexpanded leaf, logged with
//! `tracing::warn!`, and reported after the run without failing it.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for depviz operations.
#[derive(Error, Debug)]
pub enum DepvizError {
    /// Configuration content is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was requested
        path: String,
    },

    /// Configuration file exists but could not be parsed.
    #[error("Invalid configuration file syntax in {file}: {reason}")]
    ConfigParseError {
        /// Path to the configuration file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// A package name is empty after normalization.
    #[error("Invalid package name: '{name}'")]
    InvalidPackageName {
        /// The raw name that failed normalization
        name: String,
    },

    /// The metadata source has no entry for the package.
    #[error("Package '{name}' not found in the package index")]
    PackageNotFound {
        /// Normalized name of the missing package
        name: String,
    },

    /// A metadata lookup failed for a reason other than a missing entry.
    ///
    /// Fatal when raised for the root package; recovered (the package
    /// becomes an unexpanded leaf) for any other package.
    #[error("Metadata lookup failed for '{name}': {reason}")]
    MetadataError {
        /// Normalized name of the package being looked up
        name: String,
        /// What went wrong
        reason: String,
    },

    /// A network-level failure outside any single package lookup.
    #[error("Network error during {operation}: {reason}")]
    NetworkError {
        /// The operation that failed (e.g. "client setup")
        operation: String,
        /// What went wrong
        reason: String,
    },

    /// A graph label cannot be represented in the output format.
    #[error("Cannot serialize '{name}': {reason}")]
    SerializationError {
        /// The label that cannot be escaped
        name: String,
        /// Why it cannot be represented
        reason: String,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization error.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Wrapper that pairs an error with a suggestion and optional details for
/// CLI display.
///
/// Produced by [`user_friendly_error`] on the exit path; `display()` writes
/// a colored report to stderr.
pub struct ErrorContext {
    /// The underlying error
    pub error: anyhow::Error,
    /// Actionable hint shown below the error message
    pub suggestion: Option<String>,
    /// Extra context shown below the suggestion
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self { error: error.into(), suggestion: None, details: None }
    }

    /// Attach an actionable suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach explanatory details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error report to stderr with color.
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.error);
        if let Some(ref details) = self.details {
            eprintln!("  {}", details.bright_black());
        }
        if let Some(ref suggestion) = self.suggestion {
            eprintln!("{} {}", "Hint:".cyan().bold(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(ref details) = self.details {
            write!(f, "\n  {details}")?;
        }
        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\nHint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion matched to
/// the failure mode.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<DepvizError>() {
        Some(DepvizError::ConfigNotFound { .. }) => {
            Some("Run 'depviz init' to create a starter configuration file")
        }
        Some(DepvizError::ConfigParseError { .. }) => {
            Some("Check the file for YAML syntax errors; 'depviz init' writes a valid example")
        }
        Some(DepvizError::ConfigError { .. }) => Some(
            "Review the settings in your configuration file, or run 'depviz config' to see the resolved values",
        ),
        Some(DepvizError::PackageNotFound { .. }) => Some(
            "Check the package name spelling, or point repository_url at an index that hosts it",
        ),
        Some(DepvizError::MetadataError { .. } | DepvizError::NetworkError { .. }) => {
            Some("Check your network connection and the repository_url setting")
        }
        Some(DepvizError::InvalidPackageName { .. }) => {
            Some("Package names must contain at least one alphanumeric character")
        }
        _ => None,
    };

    let ctx = ErrorContext::new(error);
    match suggestion {
        Some(s) => ctx.with_suggestion(s),
        None => ctx,
    }
}
