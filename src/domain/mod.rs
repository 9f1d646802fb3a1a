mod cache;
mod source;
mod version;

pub use cache::{CACHE_DIR_NAME, CacheLayout};
pub use source::ArtifactSource;
pub use version::{Version, VersionParseError};
