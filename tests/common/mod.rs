#![allow(dead_code)]

use qsuits_updater::config::UpdaterConfig;
use qsuits_updater::services::ProgressSink;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

/// Test environment for integration tests.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnv {
    /// Creates a new test environment with temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("qsuits.toml");

        Self {
            temp_dir,
            config_path,
        }
    }

    /// Writes content to the config file.
    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config_path, content).expect("Failed to write config");
    }

    /// Writes a config file pointing both hosts at `base_url`.
    pub fn write_config_for(&self, base_url: &str) {
        self.write_config(&config_toml(base_url));
    }

    /// Cache file location for `version`.
    pub fn jar_path(&self, version: &str) -> PathBuf {
        self.temp_dir
            .path()
            .join(".qsuits")
            .join(format!("qsuits-{version}.jar"))
    }

    /// Pre-populates the cache with `content`.
    pub fn seed_cache(&self, version: &str, content: &[u8]) -> PathBuf {
        let path = self.jar_path(version);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create cache dir");
        std::fs::write(&path, content).expect("Failed to seed cache");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn config_toml(base_url: &str) -> String {
    format!(
        r#"index_url = "{base_url}"
release_url = "{base_url}/releases/download"
resolve_timeout_secs = 5
download_timeout_secs = 5
"#
    )
}

pub fn config_for(base_url: &str) -> UpdaterConfig {
    UpdaterConfig::default().with_base_url(base_url)
}

pub fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Sample search response with a single document.
pub fn search_body(latest: &str) -> String {
    format!(
        r#"{{"responseHeader":{{"status":0}},"response":{{"numFound":1,"start":0,"docs":[{{"id":"com.qiniu:qsuits","g":"com.qiniu","a":"qsuits","latestVersion":"{latest}","versionCount":3}}]}}}}"#
    )
}

/// Progress sink that keeps everything written to it.
#[derive(Default)]
pub struct CapturedProgress {
    writes: Mutex<Vec<String>>,
}

impl CapturedProgress {
    pub fn text(&self) -> String {
        self.writes.lock().unwrap().concat()
    }
}

impl ProgressSink for CapturedProgress {
    fn write(&self, text: &str) {
        self.writes.lock().unwrap().push(text.to_string());
    }
}
