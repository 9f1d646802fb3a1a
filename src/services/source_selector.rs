use super::artifact_fetcher::ArtifactFetch;
use crate::config::UpdaterConfig;
use crate::domain::{ArtifactSource, Version};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Tries each source once, in order, until one download succeeds.
///
/// With the default sources this is a single failover from the release
/// host to the package index. The last source's error is returned as-is.
pub struct SourceSelector<F: ArtifactFetch> {
    fetcher: F,
    sources: Vec<ArtifactSource>,
}

impl<F: ArtifactFetch> SourceSelector<F> {
    pub fn new(fetcher: F, config: &UpdaterConfig) -> Self {
        Self::with_sources(fetcher, ArtifactSource::defaults(config))
    }

    pub fn with_sources(fetcher: F, sources: Vec<ArtifactSource>) -> Self {
        Self { fetcher, sources }
    }

    pub fn sources(&self) -> &[ArtifactSource] {
        &self.sources
    }

    pub async fn fetch_with_fallback(&self, result_dir: &Path, version: &Version) -> Result<PathBuf> {
        self.fetch_with_fallback_observed(result_dir, version, |_, _| {})
            .await
    }

    /// Like [`fetch_with_fallback`](Self::fetch_with_fallback), calling
    /// `on_fallback(failed, next)` before moving to the next source.
    pub async fn fetch_with_fallback_observed<O>(
        &self,
        result_dir: &Path,
        version: &Version,
        on_fallback: O,
    ) -> Result<PathBuf>
    where
        O: Fn(&ArtifactSource, &ArtifactSource) + Send + Sync,
    {
        let mut last_error = None;

        for (index, source) in self.sources.iter().enumerate() {
            if let Some(previous) = index.checked_sub(1).and_then(|i| self.sources.get(i)) {
                on_fallback(previous, source);
            }

            match self.fetcher.fetch(source, result_dir, version).await {
                Ok(path) => {
                    info!(source = source.name(), %version, path = %path.display(), "Artifact downloaded");
                    return Ok(path);
                }
                Err(e) => {
                    warn!(source = source.name(), %version, error = %e, "Download attempt failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::ConfigValidation("no download sources configured".to_string())
        }))
    }
}
