use crate::config::UpdaterConfig;
use crate::error::Result;
use crate::services::{ArtifactFetch, ArtifactFetcher, ProgressSink, Updater, VersionResolver};
use crate::term::TerminalProgress;
use std::sync::Arc;

/// Application context holding shared dependencies.
///
/// Constructed once at startup and passed to command handlers.
pub struct AppContext<F: ArtifactFetch = ArtifactFetcher> {
    /// Effective configuration.
    pub config: UpdaterConfig,
    /// Package-index lookup.
    pub resolver: VersionResolver,
    /// Cache check plus download.
    pub updater: Updater<F>,
}

impl AppContext<ArtifactFetcher> {
    /// Create a new AppContext reporting progress on the terminal.
    pub fn new(config: UpdaterConfig) -> Result<Self> {
        Self::with_sink(config, Arc::new(TerminalProgress::new()))
    }

    /// Create an AppContext with a custom progress sink.
    pub fn with_sink(config: UpdaterConfig, sink: Arc<dyn ProgressSink>) -> Result<Self> {
        let resolver = VersionResolver::new(&config)?;
        let updater = Updater::new(&config, sink)?;
        Ok(Self {
            config,
            resolver,
            updater,
        })
    }
}
