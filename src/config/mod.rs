//! Configuration for depviz.
//!
//! Settings live in a YAML file:
//!
//! ```yaml
//! package_name: requests
//! repository_url: https://pypi.org/simple/
//! test_repository_path: ./fixtures
//! test_mode: false
//! max_depth: 3
//! filter_substring: ""
//! keep_root: false
//! ```
//!
//! Every key is optional; missing keys take the defaults above
//! (`test_repository_path` defaults to `./test_repo`). Resolution order for
//! the file itself: an explicit `--config` path (which must exist), then
//! `./depviz.yaml` in the working directory, then `depviz/config.yaml`
//! under the user configuration directory, then pure defaults.
//!
//! Validation happens before the core pipeline runs, so the graph builder
//! only ever sees a coherent configuration:
//!
//! - `package_name` must be non-empty,
//! - `repository_url` must start with `http://` or `https://` when set,
//!   and must be set when `test_mode` is off,
//! - `test_repository_path` must be set and exist when `test_mode` is on,
//! - `max_depth` must be at most 10 (0 is allowed and means "root only").

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::DepvizError;

/// Hard ceiling on traversal depth, inherited from the visualizer's
/// original configuration rules.
pub const MAX_DEPTH_LIMIT: usize = 10;

/// Resolved tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VizConfig {
    /// Root package the traversal starts from.
    pub package_name: String,
    /// Base URL of the live package index.
    pub repository_url: String,
    /// Fixture directory used when `test_mode` is on.
    pub test_repository_path: String,
    /// Use the local fixture source instead of the live index.
    pub test_mode: bool,
    /// Maximum number of expansion rounds from the root.
    pub max_depth: usize,
    /// Substring filter applied to the built graph; empty disables it.
    pub filter_substring: String,
    /// Exempt the root node from substring filtering.
    pub keep_root: bool,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            package_name: "requests".to_string(),
            repository_url: "https://pypi.org/simple/".to_string(),
            test_repository_path: "./test_repo".to_string(),
            test_mode: false,
            max_depth: 3,
            filter_substring: String::new(),
            keep_root: false,
        }
    }
}

impl VizConfig {
    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// [`DepvizError::ConfigNotFound`] if the file does not exist,
    /// [`DepvizError::ConfigError`] for a non-YAML extension,
    /// [`DepvizError::ConfigParseError`] for invalid YAML.
    pub async fn load(path: &Path) -> Result<Self, DepvizError> {
        if !path.is_file() {
            return Err(DepvizError::ConfigNotFound { path: path.display().to_string() });
        }

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        if !extension.eq_ignore_ascii_case("yaml") && !extension.eq_ignore_ascii_case("yml") {
            return Err(DepvizError::ConfigError {
                message: format!(
                    "unsupported config extension '{}' for {}; expected .yaml or .yml",
                    extension,
                    path.display()
                ),
            });
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|err| DepvizError::ConfigParseError {
                file: path.display().to_string(),
                reason: err.to_string(),
            })?;

        tracing::debug!(file = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from `path` if given, otherwise from the first
    /// discoverable default location, otherwise defaults.
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, DepvizError> {
        if let Some(path) = path {
            return Self::load(path).await;
        }
        for candidate in Self::default_locations() {
            if candidate.is_file() {
                return Self::load(&candidate).await;
            }
        }
        Ok(Self::default())
    }

    /// Candidate default config file locations, in priority order.
    fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from("depviz.yaml")];
        if let Some(config_dir) = dirs::config_dir() {
            locations.push(config_dir.join("depviz").join("config.yaml"));
        }
        locations
    }

    /// Check the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// [`DepvizError::ConfigError`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), DepvizError> {
        if self.package_name.trim().is_empty() {
            return Err(DepvizError::ConfigError {
                message: "package_name must not be empty".to_string(),
            });
        }

        if !self.repository_url.is_empty()
            && !self.repository_url.starts_with("http://")
            && !self.repository_url.starts_with("https://")
        {
            return Err(DepvizError::ConfigError {
                message: format!(
                    "repository_url must start with http:// or https:// (got '{}')",
                    self.repository_url
                ),
            });
        }

        if self.test_mode {
            if self.test_repository_path.is_empty() {
                return Err(DepvizError::ConfigError {
                    message: "test_mode requires test_repository_path to be set".to_string(),
                });
            }
            if !Path::new(&self.test_repository_path).exists() {
                return Err(DepvizError::ConfigError {
                    message: format!(
                        "test_repository_path does not exist: {}",
                        self.test_repository_path
                    ),
                });
            }
        } else if self.repository_url.is_empty() {
            return Err(DepvizError::ConfigError {
                message: "repository_url is required when test_mode is off".to_string(),
            });
        }

        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(DepvizError::ConfigError {
                message: format!("max_depth must be at most {MAX_DEPTH_LIMIT}"),
            });
        }

        Ok(())
    }
}
