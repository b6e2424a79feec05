//! Live package index metadata source.
//!
//! Looks a package up by URL (`<repository_url>/<name>/`) and extracts its
//! declared dependency names from the returned page. Package index pages
//! expose dependency information in a few different shapes, so extraction
//! tries each of them and merges the results:
//!
//! - a `<div id="dependencies">` section,
//! - `"requires_dist"` arrays in embedded JSON metadata,
//! - `install_requires = [...]` lists.
//!
//! The request policy lives here, not in the graph builder: a 10 second
//! timeout per request and up to two retries with jittered exponential
//! backoff. A 404 is reported as [`DepvizError::PackageNotFound`] and never
//! retried.

use regex::Regex;
use reqwest::StatusCode;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::core::DepvizError;
use crate::metadata::MetadataSource;
use crate::package::PackageName;

static DEPENDENCIES_DIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div id="dependencies"[^>]*>(.*?)</div>"#).expect("valid regex")
});

static REQUIRES_DIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)"requires_dist"\s*:\s*\[(.*?)\]"#).expect("valid regex"));

static INSTALL_REQUIRES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)install_requires\s*=\s*\[(.*?)\]").expect("valid regex"));

/// Quoted dependency specifier; the capture stops at the first character
/// that cannot start a version constraint, so `"requests>=2.0"` yields
/// `requests`.
static QUOTED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"['"]\s*([A-Za-z0-9][A-Za-z0-9._-]*)"#).expect("valid regex"));

/// Metadata source that queries a remote package index over HTTP.
#[derive(Debug, Clone)]
pub struct RegistrySource {
    base_url: String,
    client: reqwest::Client,
}

impl RegistrySource {
    /// Create a source for the index at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DepvizError::NetworkError`] if the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str) -> Result<Self, DepvizError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("depviz/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| DepvizError::NetworkError {
                operation: "client setup".to_string(),
                reason: err.to_string(),
            })?;

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), client })
    }

    fn package_url(&self, name: &PackageName) -> String {
        format!("{}/{}/", self.base_url, name)
    }

    async fn fetch_page(&self, name: &PackageName) -> Result<String, DepvizError> {
        let url = self.package_url(name);
        tracing::debug!(%url, "fetching package page");

        let response =
            self.client.get(&url).send().await.map_err(|err| DepvizError::MetadataError {
                name: name.to_string(),
                reason: err.to_string(),
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                Err(DepvizError::PackageNotFound { name: name.to_string() })
            }
            status if !status.is_success() => Err(DepvizError::MetadataError {
                name: name.to_string(),
                reason: format!("HTTP {status}"),
            }),
            _ => response.text().await.map_err(|err| DepvizError::MetadataError {
                name: name.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}

/// Pull dependency name candidates out of an index page.
///
/// Returns raw (un-normalized) names, deduplicated and sorted.
fn extract_dependency_names(body: &str) -> Vec<String> {
    let mut names = BTreeSet::new();

    for section in DEPENDENCIES_DIV
        .captures_iter(body)
        .chain(REQUIRES_DIST.captures_iter(body))
        .chain(INSTALL_REQUIRES.captures_iter(body))
    {
        let inner = &section[1];
        for quoted in QUOTED_NAME.captures_iter(inner) {
            let candidate = &quoted[1];
            // bare version numbers also appear quoted in specifier strings
            if candidate.chars().any(|c| c.is_ascii_alphabetic()) {
                names.insert(candidate.to_string());
            }
        }
    }

    names.into_iter().collect()
}

impl MetadataSource for RegistrySource {
    async fn lookup(&self, name: &PackageName) -> Result<Vec<PackageName>, DepvizError> {
        let strategy = ExponentialBackoff::from_millis(200).map(jitter).take(2);
        let body = RetryIf::spawn(
            strategy,
            || self.fetch_page(name),
            |err: &DepvizError| !matches!(err, DepvizError::PackageNotFound { .. }),
        )
        .await?;

        let mut deps = BTreeSet::new();
        for raw in extract_dependency_names(&body) {
            match PackageName::new(&raw) {
                Ok(dep) => {
                    deps.insert(dep);
                }
                Err(_) => {
                    tracing::debug!(candidate = %raw, "discarding unusable dependency name");
                }
            }
        }

        Ok(deps.into_iter().collect())
    }
}
