use crate::config::UpdaterConfig;
use crate::domain::Version;
use crate::error::{Error, ResolutionError, Result};
use crate::infra::build_http_client;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

const SEARCH_PAGE_ROWS: u32 = 20;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchResults,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(rename = "numFound", default)]
    num_found: u64,
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(rename = "latestVersion")]
    latest_version: String,
}

/// Looks up the newest published version on the package index.
pub struct VersionResolver {
    http: Client,
    index_url: String,
    artifact: String,
}

impl VersionResolver {
    pub fn new(config: &UpdaterConfig) -> Result<Self> {
        let http = build_http_client(config.resolve_timeout(), "version resolution")?;
        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: &UpdaterConfig) -> Self {
        Self {
            http,
            index_url: config.index_url.trim_end_matches('/').to_string(),
            artifact: config.artifact.clone(),
        }
    }

    fn search_url(&self) -> std::result::Result<Url, String> {
        let mut url = Url::parse(&format!("{}/solrsearch/select", self.index_url))
            .map_err(|e| e.to_string())?;
        url.query_pairs_mut()
            .append_pair("q", &format!("a:{}", self.artifact))
            .append_pair("start", "0")
            .append_pair("rows", &SEARCH_PAGE_ROWS.to_string());
        Ok(url)
    }

    #[instrument(skip(self), fields(artifact = %self.artifact))]
    pub async fn resolve_latest(&self) -> Result<Version> {
        let url = self
            .search_url()
            .map_err(|reason| Error::InvalidUrl(self.index_url.clone(), reason))?;
        let url_str = url.to_string();
        debug!(url = %url_str, "Querying package index");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ResolutionError::Request {
                url: url_str.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolutionError::Status {
                url: url_str,
                status,
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ResolutionError::Request {
                url: url_str.clone(),
                source: e,
            })?;

        let parsed: SearchResponse =
            serde_json::from_slice(&body).map_err(|e| ResolutionError::Parse {
                url: url_str,
                source: e,
            })?;

        debug!(
            num_found = parsed.response.num_found,
            docs = parsed.response.docs.len(),
            "Package index responded"
        );

        let doc = parsed
            .response
            .docs
            .into_iter()
            .next()
            .ok_or_else(|| ResolutionError::NoDocuments {
                artifact: self.artifact.clone(),
            })?;

        let version = Version::parse(&doc.latest_version).map_err(|_| {
            ResolutionError::InvalidVersion {
                version: doc.latest_version.clone(),
            }
        })?;

        debug!(%version, "Resolved latest version");
        Ok(version)
    }
}
