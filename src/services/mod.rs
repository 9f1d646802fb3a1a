mod artifact_fetcher;
mod cache_gate;
mod progress;
mod source_selector;
mod version_resolver;

pub use artifact_fetcher::{ArtifactFetch, ArtifactFetcher};
pub use cache_gate::Updater;
pub use progress::{ProgressHandle, ProgressReporter, ProgressSink, TICK_INTERVAL};
pub use source_selector::SourceSelector;
pub use version_resolver::VersionResolver;
