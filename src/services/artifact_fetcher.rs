use crate::config::UpdaterConfig;
use crate::domain::{ArtifactSource, CacheLayout, Version};
use crate::error::{Error, Result};
use crate::infra::{build_http_client, ensure_dir, header_map, write_atomic_file};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[cfg(test)]
use mockall::automock;

/// Downloads one artifact version from one source into the cache.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactFetch: Send + Sync {
    async fn fetch(
        &self,
        source: &ArtifactSource,
        result_dir: &Path,
        version: &Version,
    ) -> Result<PathBuf>;
}

pub struct ArtifactFetcher {
    http: Client,
    layout: CacheLayout,
}

impl ArtifactFetcher {
    pub fn new(config: &UpdaterConfig) -> Result<Self> {
        let http = build_http_client(config.download_timeout(), "artifact download")?;
        Ok(Self::with_client(http, CacheLayout::new(&config.artifact)))
    }

    pub fn with_client(http: Client, layout: CacheLayout) -> Self {
        Self { http, layout }
    }

    pub fn layout(&self) -> &CacheLayout {
        &self.layout
    }

    #[instrument(skip_all, fields(source = source.name(), version = %version, result_dir = %result_dir.display()))]
    pub async fn fetch(
        &self,
        source: &ArtifactSource,
        result_dir: &Path,
        version: &Version,
    ) -> Result<PathBuf> {
        let cache_dir = self.layout.dir(result_dir);
        ensure_dir(&cache_dir).map_err(|e| Error::Storage {
            path: cache_dir.display().to_string(),
            source: e,
        })?;

        let url = source.url(version);
        let headers = header_map(source.headers())?;
        debug!(url = %url, "Downloading artifact");

        let response = self
            .http
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| Error::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(url = %url, %status, "Source rejected download");
            return Err(Error::HttpStatus { url, status });
        }

        // The whole body is buffered before anything touches the cache, so
        // an interrupted transfer never leaves a file behind.
        let body = response.bytes().await.map_err(|e| Error::Transport {
            url: url.clone(),
            source: e,
        })?;

        let path = self.layout.path(result_dir, version);
        write_atomic_file(&path, &body).map_err(|e| Error::Storage {
            path: path.display().to_string(),
            source: e,
        })?;

        debug!(path = %path.display(), bytes = body.len(), "Artifact stored");
        Ok(path)
    }
}

#[async_trait]
impl ArtifactFetch for ArtifactFetcher {
    async fn fetch(
        &self,
        source: &ArtifactSource,
        result_dir: &Path,
        version: &Version,
    ) -> Result<PathBuf> {
        ArtifactFetcher::fetch(self, source, result_dir, version).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        std::net::TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn version(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn fetcher() -> ArtifactFetcher {
        ArtifactFetcher::new(&UpdaterConfig::default()).unwrap()
    }

    fn source_at(base: &str) -> ArtifactSource {
        ArtifactSource::new("test", format!("{base}/v{{version}}/qsuits-{{version}}.jar"))
            .with_header("Upgrade-Insecure-Requests", "1")
    }

    #[tokio::test]
    async fn writes_body_to_cache_path_on_200() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8.4.1/qsuits-8.4.1.jar"))
            .and(header("Upgrade-Insecure-Requests", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jar-bytes".to_vec()))
            .expect(1)
            .mount(&server)
            .await;
        let dir = tempdir().unwrap();

        let path = fetcher()
            .fetch(&source_at(&server.uri()), dir.path(), &version("8.4.1"))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join(".qsuits/qsuits-8.4.1.jar"));
        assert_eq!(std::fs::read(&path).unwrap(), b"jar-bytes");
    }

    #[tokio::test]
    async fn sends_browser_headers_of_release_host() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases/download/v1.0/qsuits-1.0.jar"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
            .expect(1)
            .mount(&server)
            .await;
        let config = UpdaterConfig::default().with_base_url(&server.uri());
        let dir = tempdir().unwrap();

        ArtifactFetcher::new(&config)
            .unwrap()
            .fetch(&ArtifactSource::release_host(&config), dir.path(), &version("1.0"))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let headers = &requests[0].headers;
        assert_eq!(headers["user-agent"], crate::config::DEFAULT_USER_AGENT);
        assert_eq!(headers["accept-encoding"], "gzip, deflate, br");
        assert_eq!(headers["upgrade-insecure-requests"], "1");
    }

    #[tokio::test]
    async fn requests_fat_jar_from_package_index() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/remotecontent"))
            .and(query_param(
                "filepath",
                "com/qiniu/qsuits/1.0/qsuits-1.0-jar-with-dependencies.jar",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fat".to_vec()))
            .expect(1)
            .mount(&server)
            .await;
        let config = UpdaterConfig::default().with_base_url(&server.uri());
        let dir = tempdir().unwrap();

        let path = ArtifactFetcher::new(&config)
            .unwrap()
            .fetch(&ArtifactSource::package_index(&config), dir.path(), &version("1.0"))
            .await
            .unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"fat");
    }

    #[tokio::test]
    async fn non_200_is_status_error_and_leaves_no_file() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;
        let dir = tempdir().unwrap();
        let fetcher = fetcher();

        let result = fetcher
            .fetch(&source_at(&server.uri()), dir.path(), &version("1.0"))
            .await;

        assert!(matches!(
            result,
            Err(Error::HttpStatus { status, .. }) if status == StatusCode::NOT_FOUND
        ));
        assert!(!fetcher.layout().path(dir.path(), &version("1.0")).exists());
    }

    #[tokio::test]
    async fn other_success_codes_are_rejected() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        let dir = tempdir().unwrap();

        let result = fetcher()
            .fetch(&source_at(&server.uri()), dir.path(), &version("1.0"))
            .await;

        assert!(matches!(result, Err(Error::HttpStatus { .. })));
    }

    #[tokio::test]
    async fn creates_cache_dir_even_when_download_fails() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let dir = tempdir().unwrap();

        let _ = fetcher()
            .fetch(&source_at(&server.uri()), dir.path(), &version("1.0"))
            .await;

        assert!(dir.path().join(".qsuits").is_dir());
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        let dir = tempdir().unwrap();

        let result = fetcher()
            .fetch(&source_at("http://127.0.0.1:1"), dir.path(), &version("1.0"))
            .await;

        assert!(matches!(result, Err(Error::Transport { .. })));
    }

    #[tokio::test]
    async fn timeout_is_transport_error() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(2))
                    .set_body_bytes(b"late".to_vec()),
            )
            .mount(&server)
            .await;
        let dir = tempdir().unwrap();
        let http = build_http_client(Duration::from_millis(100), "test").unwrap();
        let fetcher = ArtifactFetcher::with_client(http, CacheLayout::new("qsuits"));

        let result = fetcher
            .fetch(&source_at(&server.uri()), dir.path(), &version("1.0"))
            .await;

        assert!(matches!(result, Err(Error::Transport { .. })));
        assert!(!fetcher.layout().path(dir.path(), &version("1.0")).exists());
    }

    #[tokio::test]
    async fn interrupted_body_leaves_no_cache_file() {
        if !can_bind_localhost() {
            return;
        }
        // Announces 1000 bytes, sends 10, then hangs up.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\nContent-Type: application/java-archive\r\n\r\n0123456789",
                )
                .await;
            let _ = socket.shutdown().await;
        });
        let dir = tempdir().unwrap();
        let fetcher = fetcher();

        let result = fetcher
            .fetch(&source_at(&format!("http://{addr}")), dir.path(), &version("1.0"))
            .await;

        assert!(matches!(result, Err(Error::Transport { .. })));
        let cache_dir = dir.path().join(".qsuits");
        assert!(!fetcher.layout().path(dir.path(), &version("1.0")).exists());
        assert_eq!(std::fs::read_dir(cache_dir).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn file_in_place_of_cache_dir_is_storage_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(".qsuits"), b"not a dir").unwrap();

        let result = fetcher()
            .fetch(&source_at("http://127.0.0.1:1"), dir.path(), &version("1.0"))
            .await;

        assert!(matches!(result, Err(Error::Storage { .. })));
    }

    #[tokio::test]
    async fn directory_at_cache_path_is_storage_error() {
        if !can_bind_localhost() {
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jar".to_vec()))
            .mount(&server)
            .await;
        let dir = tempdir().unwrap();
        let blocked = dir.path().join(".qsuits/qsuits-1.0.jar");
        std::fs::create_dir_all(blocked.join("inner")).unwrap();

        let result = fetcher()
            .fetch(&source_at(&server.uri()), dir.path(), &version("1.0"))
            .await;

        assert!(matches!(result, Err(Error::Storage { .. })));
        assert!(blocked.is_dir());
    }
}
