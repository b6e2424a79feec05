//! Fixture-backed metadata source for deterministic, offline runs.
//!
//! A fixture repository is a directory holding one YAML document per
//! package, keyed by file name:
//!
//! ```text
//! fixtures/
//! ├── app.yaml          # dependencies: [lib-a, lib-b]
//! ├── lib-a.yaml        # dependencies: [lib-c]
//! └── lib-b.yaml        # dependencies: []
//! ```
//!
//! File stems are normalized the same way as every other package name, so
//! `Lib_A.yaml` and `lib-a.yaml` describe the same package. A file that
//! fails to parse degrades to an empty dependency list with a warning
//! rather than failing the whole scan; a package with no file at all is
//! `PackageNotFound`, which the builder turns into an unexpanded leaf (or a
//! fatal error if it is the root).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

use crate::core::DepvizError;
use crate::metadata::MetadataSource;
use crate::package::PackageName;

/// Metadata source backed by an in-memory map, loadable from a fixture
/// directory.
#[derive(Debug, Default)]
pub struct FixtureSource {
    packages: HashMap<PackageName, Vec<PackageName>>,
}

/// On-disk shape of a single fixture document.
#[derive(Debug, Deserialize, Default)]
struct FixtureDoc {
    #[serde(default)]
    dependencies: Vec<String>,
}

impl FixtureSource {
    /// Create an empty fixture source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package and its direct dependencies.
    ///
    /// # Errors
    ///
    /// Fails if the package name or any dependency name does not survive
    /// normalization.
    pub fn insert(&mut self, name: &str, dependencies: &[&str]) -> Result<(), DepvizError> {
        let key = PackageName::new(name)?;
        let deps = dependencies
            .iter()
            .map(|dep| PackageName::new(dep))
            .collect::<Result<Vec<_>, _>>()?;
        self.packages.insert(key, deps);
        Ok(())
    }

    /// Load every `*.yaml`/`*.yml` document under `dir`.
    ///
    /// The scan is sorted by file name so repeated loads observe the same
    /// fixtures in the same order.
    pub fn from_dir(dir: &Path) -> Result<Self, DepvizError> {
        if !dir.is_dir() {
            return Err(DepvizError::ConfigError {
                message: format!("fixture repository '{}' is not a directory", dir.display()),
            });
        }

        let mut source = Self::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => {}
                _ => continue,
            }

            let stem = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("");
            let name = match PackageName::new(stem) {
                Ok(name) => name,
                Err(_) => {
                    tracing::warn!(file = %path.display(), "skipping fixture with unusable name");
                    continue;
                }
            };

            let content = std::fs::read_to_string(path)?;
            let doc = match serde_yaml::from_str::<FixtureDoc>(&content) {
                Ok(doc) => doc,
                Err(err) => {
                    tracing::warn!(
                        file = %path.display(),
                        error = %err,
                        "unparseable fixture treated as having no dependencies"
                    );
                    FixtureDoc::default()
                }
            };

            let mut deps = Vec::with_capacity(doc.dependencies.len());
            for raw in &doc.dependencies {
                match PackageName::new(raw) {
                    Ok(dep) => deps.push(dep),
                    Err(_) => {
                        tracing::warn!(
                            file = %path.display(),
                            dependency = %raw,
                            "skipping unusable dependency name"
                        );
                    }
                }
            }
            source.packages.insert(name, deps);
        }

        tracing::debug!(count = source.packages.len(), dir = %dir.display(), "loaded fixtures");
        Ok(source)
    }

    /// Number of packages registered.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether no packages are registered.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl MetadataSource for FixtureSource {
    async fn lookup(&self, name: &PackageName) -> Result<Vec<PackageName>, DepvizError> {
        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| DepvizError::PackageNotFound { name: name.to_string() })
    }
}
