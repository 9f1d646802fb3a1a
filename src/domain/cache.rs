use super::Version;
use std::path::{Path, PathBuf};

/// Directory under the result dir that holds downloaded jars.
pub const CACHE_DIR_NAME: &str = ".qsuits";

/// Maps a (result dir, version) pair to its one cache file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    artifact: String,
}

impl CacheLayout {
    pub fn new(artifact: impl Into<String>) -> Self {
        Self {
            artifact: artifact.into(),
        }
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn dir(&self, result_dir: &Path) -> PathBuf {
        result_dir.join(CACHE_DIR_NAME)
    }

    pub fn file_name(&self, version: &Version) -> String {
        format!("{}-{}.jar", self.artifact, version)
    }

    pub fn path(&self, result_dir: &Path, version: &Version) -> PathBuf {
        self.dir(result_dir).join(self.file_name(version))
    }
}
