use super::Version;
use crate::config::UpdaterConfig;

const VERSION_PLACEHOLDER: &str = "{version}";

/// One remote location the artifact can be downloaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSource {
    name: String,
    url_template: String,
    headers: Vec<(String, String)>,
}

impl ArtifactSource {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// GitHub release asset of the given version.
    pub fn release_host(config: &UpdaterConfig) -> Self {
        let base = config.release_url.trim_end_matches('/');
        let artifact = &config.artifact;
        Self::new(
            "release-host",
            format!("{base}/v{VERSION_PLACEHOLDER}/{artifact}-{VERSION_PLACEHOLDER}.jar"),
        )
        .with_header("Connection", "keep-alive")
        .with_header("Upgrade-Insecure-Requests", "1")
        .with_header("User-Agent", config.user_agent.clone())
        .with_header("Accept-Encoding", "gzip, deflate, br")
    }

    /// Fat jar served by the package index.
    pub fn package_index(config: &UpdaterConfig) -> Self {
        let base = config.index_url.trim_end_matches('/');
        let group_path = config.group_id.replace('.', "/");
        let artifact = &config.artifact;
        Self::new(
            "package-index",
            format!(
                "{base}/remotecontent?filepath={group_path}/{artifact}/{VERSION_PLACEHOLDER}/\
{artifact}-{VERSION_PLACEHOLDER}-jar-with-dependencies.jar"
            ),
        )
        .with_header("Upgrade-Insecure-Requests", "1")
        .with_header("User-Agent", config.user_agent.clone())
    }

    /// Primary first, secondary second.
    pub fn defaults(config: &UpdaterConfig) -> Vec<Self> {
        vec![Self::release_host(config), Self::package_index(config)]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self, version: &Version) -> String {
        self.url_template
            .replace(VERSION_PLACEHOLDER, version.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}
