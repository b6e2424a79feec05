//! Package metadata lookup.
//!
//! This module defines the one capability the graph builder needs from the
//! outside world ("given a package name, what are its direct dependency
//! names?") and the two backends that provide it:
//!
//! - [`RegistrySource`] queries a remote package index over HTTP.
//! - [`FixtureSource`] reads from a local fixture directory, used when test
//!   mode is enabled.
//!
//! The builder is generic over [`MetadataSource`], so it contains no
//! network- or filesystem-specific logic; the backend is selected once,
//! from configuration, at the call site.

pub mod fixture;
pub mod registry;

pub use fixture::FixtureSource;
pub use registry::RegistrySource;

use crate::core::DepvizError;
use crate::package::PackageName;

/// Capability to look up a package's direct dependencies.
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    /// Return the direct dependency names of `name`.
    ///
    /// An empty list is a valid answer (a package with no dependencies).
    ///
    /// # Errors
    ///
    /// [`DepvizError::PackageNotFound`] if the source has no entry for the
    /// package; [`DepvizError::MetadataError`] for any other lookup failure.
    /// Timeout and retry policy are owned by the implementation.
    async fn lookup(&self, name: &PackageName) -> Result<Vec<PackageName>, DepvizError>;
}
