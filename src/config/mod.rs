mod settings;
mod validation;

pub use settings::{
    DEFAULT_ARTIFACT, DEFAULT_GROUP_ID, DEFAULT_INDEX_URL, DEFAULT_RELEASE_URL,
    DEFAULT_USER_AGENT, MAX_DOWNLOAD_TIMEOUT_SECS, MAX_RESOLVE_TIMEOUT_SECS, UpdaterConfig,
};
