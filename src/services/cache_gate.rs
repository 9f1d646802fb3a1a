use super::artifact_fetcher::{ArtifactFetch, ArtifactFetcher};
use super::progress::{ProgressReporter, ProgressSink};
use super::source_selector::SourceSelector;
use crate::config::UpdaterConfig;
use crate::domain::{CacheLayout, Version};
use crate::error::{Error, Result};
use crate::infra::is_regular_file;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

/// Entry point for callers: reuses a cached jar or downloads it.
pub struct Updater<F: ArtifactFetch = ArtifactFetcher> {
    layout: CacheLayout,
    selector: SourceSelector<F>,
    progress: ProgressReporter,
}

impl Updater<ArtifactFetcher> {
    pub fn new(config: &UpdaterConfig, sink: Arc<dyn ProgressSink>) -> Result<Self> {
        let fetcher = ArtifactFetcher::new(config)?;
        Ok(Self::with_parts(
            CacheLayout::new(&config.artifact),
            SourceSelector::new(fetcher, config),
            ProgressReporter::new(sink),
        ))
    }
}

impl<F: ArtifactFetch> Updater<F> {
    pub fn with_parts(
        layout: CacheLayout,
        selector: SourceSelector<F>,
        progress: ProgressReporter,
    ) -> Self {
        Self {
            layout,
            selector,
            progress,
        }
    }

    pub fn cache_path(&self, result_dir: &Path, version: &Version) -> PathBuf {
        self.layout.path(result_dir, version)
    }

    /// Returns the cached jar for `version`, downloading it first when absent.
    ///
    /// `is_latest` only changes the progress label.
    #[instrument(skip_all, fields(result_dir = %result_dir.display(), version = %version, is_latest = is_latest))]
    pub async fn update(
        &self,
        result_dir: &Path,
        version: &Version,
        is_latest: bool,
    ) -> Result<PathBuf> {
        let path = self.cache_path(result_dir, version);
        if is_regular_file(&path) {
            info!(path = %path.display(), "Artifact already cached");
            return Ok(path);
        }

        let sink = self.progress.sink().clone();
        let handle = self.progress.start(self.progress_label(version, is_latest));
        let result = self
            .selector
            .fetch_with_fallback_observed(result_dir, version, |_, next| {
                sink.write(&format!("\rdownload is retrying from {}...\n", next.name()));
            })
            .await;
        handle.stop().await;

        match &result {
            Ok(_) => sink.write(" -> finished.\n"),
            Err(_) => sink.clear(),
        }
        result
    }

    fn progress_label(&self, version: &Version, is_latest: bool) -> String {
        let artifact = self.layout.artifact();
        if is_latest {
            format!("latest {artifact} version: {version} is downloading")
        } else {
            format!("{artifact} version: {version} is downloading")
        }
    }

    /// Probes the cache without any network access.
    ///
    /// A directory at the cache path yields [`Error::DirectoryConflict`]: the
    /// path exists but is unusable. Any stat failure yields
    /// [`Error::NotFound`].
    pub fn exists(&self, result_dir: &Path, version: &Version) -> Result<PathBuf> {
        let path = self.cache_path(result_dir, version);
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => Err(Error::DirectoryConflict {
                path: path.display().to_string(),
            }),
            Ok(_) => Ok(path),
            Err(e) => Err(Error::NotFound {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }
}
