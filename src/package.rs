//! Package name normalization.
//!
//! Every package name entering the system is normalized exactly once, at
//! [`PackageName`] construction, and used in normalized form everywhere else:
//! as the graph node key, in metadata lookups, and in substring filtering.
//! Keeping the rule in this one place means it can change without touching
//! the traversal or serialization logic.
//!
//! The rule follows the Python packaging convention (PEP 503): names are
//! lowercased and runs of `-`, `_`, and `.` collapse to a single `-`, so
//! `Typing_Extensions` and `typing.extensions` resolve to the same node.
//! Leading and trailing separator runs are dropped.

use std::fmt;

use crate::core::DepvizError;

/// A normalized, non-empty package name.
///
/// `PackageName` is the node key for the dependency graph: two raw names
/// that normalize identically are the same node. Construction fails for
/// names that are empty (or contain nothing but whitespace and separators).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    /// Normalize `raw` into a package name.
    ///
    /// # Errors
    ///
    /// Returns [`DepvizError::InvalidPackageName`] if nothing remains after
    /// normalization.
    pub fn new(raw: &str) -> Result<Self, DepvizError> {
        let trimmed = raw.trim();
        let mut normalized = String::with_capacity(trimmed.len());
        let mut pending_separator = false;

        for ch in trimmed.chars() {
            if matches!(ch, '-' | '_' | '.') {
                pending_separator = true;
                continue;
            }
            if pending_separator && !normalized.is_empty() {
                normalized.push('-');
            }
            pending_separator = false;
            normalized.extend(ch.to_lowercase());
        }

        if normalized.is_empty() {
            return Err(DepvizError::InvalidPackageName { name: raw.to_string() });
        }

        Ok(Self(normalized))
    }

    /// The normalized name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
