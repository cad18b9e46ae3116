//! Latest published version lookup.
//!
//! The package repository exposes a directory listing per artifact:
//!
//! ```text
//! GET {repository_url}/com/pixelservices/flash
//! {"files": [{"type": "DIRECTORY", "name": "1.0.0"}, {"type": "FILE", "name": "maven-metadata.xml"}]}
//! ```
//!
//! The latest version is the greatest `DIRECTORY` name in plain string order.
//! This is not a semantic-version comparison: `"v10"` sorts before `"v2"`,
//! and `"1.10.0"` before `"1.9.0"`. Installation pages rely on this exact
//! ordering, so it is kept as is.

use crate::config::VersionsConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use ureq::Agent;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },
    #[error("Request failed: {0}")]
    Request(#[from] ureq::Error),
    #[error("No versions published for {0}")]
    NoVersions(String),
}

/// Directory listing returned by the repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub files: Vec<ListingEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

/// Greatest `DIRECTORY` entry name, in string order.
pub fn latest_version(listing: &Listing) -> Option<String> {
    listing
        .files
        .iter()
        .filter(|entry| entry.kind == "DIRECTORY")
        .map(|entry| entry.name.as_str())
        .max()
        .map(String::from)
}

/// Blocking client for the repository listing API.
pub struct VersionClient {
    agent: Agent,
    repository_url: String,
    placeholder: String,
}

impl VersionClient {
    pub fn new(config: &VersionsConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            repository_url: config.repository_url.trim_end_matches('/').to_string(),
            placeholder: config.placeholder.clone(),
        }
    }

    /// Listing URL for an artifact path such as `com/pixelservices/flash`.
    pub fn listing_url(&self, artifact: &str) -> String {
        format!("{}/{}", self.repository_url, artifact.trim_matches('/'))
    }

    pub fn fetch_listing(&self, artifact: &str) -> Result<Listing, VersionError> {
        let url = self.listing_url(artifact);
        debug!(%url, "fetching version listing");

        let response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(VersionError::Http { status, url });
        }
        Ok(response.into_body().read_json()?)
    }

    pub fn latest(&self, artifact: &str) -> Result<String, VersionError> {
        let listing = self.fetch_listing(artifact)?;
        latest_version(&listing).ok_or_else(|| VersionError::NoVersions(artifact.to_string()))
    }

    /// The latest version, or the configured placeholder when lookup fails.
    pub fn display_version(&self, artifact: &str) -> String {
        match self.latest(artifact) {
            Ok(version) => version,
            Err(e) => {
                warn!(artifact, error = %e, "error fetching latest version");
                self.placeholder.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(json: &str) -> Listing {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn latest_ignores_files() {
        let l = listing(
            r#"{"files":[
                {"type":"DIRECTORY","name":"1.0.0"},
                {"type":"FILE","name":"maven-metadata.xml"},
                {"type":"DIRECTORY","name":"1.1.0"}
            ]}"#,
        );
        assert_eq!(latest_version(&l).as_deref(), Some("1.1.0"));
    }

    #[test]
    fn latest_uses_string_order_not_semver() {
        let l = listing(
            r#"{"files":[
                {"type":"DIRECTORY","name":"v2"},
                {"type":"DIRECTORY","name":"v10"}
            ]}"#,
        );
        assert_eq!(latest_version(&l).as_deref(), Some("v2"));

        let l = listing(
            r#"{"files":[
                {"type":"DIRECTORY","name":"1.9.0"},
                {"type":"DIRECTORY","name":"1.10.0"}
            ]}"#,
        );
        assert_eq!(latest_version(&l).as_deref(), Some("1.9.0"));
    }

    #[test]
    fn latest_none_without_directories() {
        assert_eq!(latest_version(&listing(r#"{"files":[]}"#)), None);
        assert_eq!(latest_version(&listing("{}")), None);
        assert_eq!(
            latest_version(&listing(r#"{"files":[{"type":"FILE","name":"x.jar"}]}"#)),
            None
        );
    }

    #[test]
    fn listing_url_joins_without_double_slashes() {
        let client = VersionClient::new(&VersionsConfig {
            repository_url: "https://repo.example.com/api/".to_string(),
            ..VersionsConfig::default()
        });
        assert_eq!(
            client.listing_url("/com/pixelservices/flash"),
            "https://repo.example.com/api/com/pixelservices/flash"
        );
    }

    #[test]
    fn display_version_falls_back_to_placeholder() {
        // Port 1 on loopback refuses connections
        let client = VersionClient::new(&VersionsConfig {
            repository_url: "http://127.0.0.1:1/api".to_string(),
            timeout_secs: 2,
            ..VersionsConfig::default()
        });
        assert_eq!(client.display_version("com/pixelservices/flash"), "Error fetching version");
    }
}
