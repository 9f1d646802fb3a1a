use super::validation;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ARTIFACT: &str = "qsuits";
pub const DEFAULT_GROUP_ID: &str = "com.qiniu";
pub const DEFAULT_INDEX_URL: &str = "https://search.maven.org";
pub const DEFAULT_RELEASE_URL: &str =
    "https://github.com/NigelWu95/qiniu-suits-java/releases/download";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_5) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/75.0.3770.100 Safari/537.36";

/// Upper bound for the package-index lookup.
pub const MAX_RESOLVE_TIMEOUT_SECS: u64 = 60;
/// Upper bound for a single artifact download.
pub const MAX_DOWNLOAD_TIMEOUT_SECS: u64 = 600;

/// Endpoints and limits used to resolve and download the artifact.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```toml
/// index_url = "https://maven.example.com"
/// download_timeout_secs = 300
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Artifact id, also the jar file name prefix.
    pub artifact: String,
    /// Maven group id, dotted.
    pub group_id: String,
    /// Base URL of the package index (search API and file serving).
    pub index_url: String,
    /// Base URL of release downloads; `v<version>/<artifact>-<version>.jar` is appended.
    pub release_url: String,
    pub resolve_timeout_secs: u64,
    pub download_timeout_secs: u64,
    /// User-Agent sent to both download sources.
    pub user_agent: String,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            artifact: DEFAULT_ARTIFACT.to_string(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            release_url: DEFAULT_RELEASE_URL.to_string(),
            resolve_timeout_secs: MAX_RESOLVE_TIMEOUT_SECS,
            download_timeout_secs: MAX_DOWNLOAD_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl UpdaterConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path_str.clone(),
            source: e,
        })?;

        let config: UpdaterConfig = toml::from_str(&content).map_err(|e| Error::TomlParse {
            path: path_str,
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the validated defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_coordinate("artifact", &self.artifact)?;
        validation::validate_coordinate("group_id", &self.group_id)?;
        validation::validate_url(&self.index_url)?;
        validation::validate_url(&self.release_url)?;
        validation::validate_timeout(
            "resolve_timeout_secs",
            self.resolve_timeout_secs,
            MAX_RESOLVE_TIMEOUT_SECS,
        )?;
        validation::validate_timeout(
            "download_timeout_secs",
            self.download_timeout_secs,
            MAX_DOWNLOAD_TIMEOUT_SECS,
        )?;

        if self.user_agent.trim().is_empty() {
            return Err(Error::ConfigValidation("user_agent is empty".to_string()));
        }

        Ok(())
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    /// Points both the index and the release host at `base`.
    ///
    /// Handy for mirrors and for tests against a local server.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.index_url = base.to_string();
        self.release_url = format!("{base}/releases/download");
        self
    }
}
