use reqwest::StatusCode;
use thiserror::Error;

/// Exit codes following sysexits.h conventions where applicable.
/// See: https://man.freebsd.org/cgi/man.cgi?query=sysexits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    /// General error
    pub const FAILURE: Self = Self(1);
    /// Data format error (malformed index response)
    pub const DATA: Self = Self(65); // EX_DATAERR
    /// Input file or artifact missing
    pub const NO_INPUT: Self = Self(66); // EX_NOINPUT
    /// Network/service unavailable
    pub const UNAVAILABLE: Self = Self(69); // EX_UNAVAILABLE
    /// Cannot create or write the cache file
    pub const CANT_CREATE: Self = Self(73); // EX_CANTCREAT
    /// Configuration error (invalid config file, validation failed)
    pub const CONFIG: Self = Self(78); // EX_CONFIG
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.0 as u8)
    }
}

/// Failure to determine the latest published version from the package index.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{url}' responded with {status}")]
    Status { url: String, status: StatusCode },

    #[error("malformed search response from '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("package index has no published release of '{artifact}'")]
    NoDocuments { artifact: String },

    #[error("package index returned an unusable version '{version}'")]
    InvalidVersion { version: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to resolve latest version: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Download from '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download from '{url}' failed with status {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Failed to store artifact at '{path}': {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cache path '{path}' exists but is a directory")]
    DirectoryConflict { path: String },

    #[error("No cached artifact at '{path}': {source}")]
    NotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("Config validation failed: {0}")]
    ConfigValidation(String),

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to initialize HTTP client for {context}: {source}")]
    HttpClientInit {
        context: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::Resolution(ResolutionError::Parse { .. })
            | Error::Resolution(ResolutionError::InvalidVersion { .. }) => ExitCode::DATA,
            Error::Resolution(_)
            | Error::Transport { .. }
            | Error::HttpStatus { .. }
            | Error::HttpClientInit { .. } => ExitCode::UNAVAILABLE,
            Error::Storage { .. } | Error::DirectoryConflict { .. } => ExitCode::CANT_CREATE,
            Error::NotFound { .. } | Error::FileRead { .. } => ExitCode::NO_INPUT,
            Error::InvalidUrl(_, _)
            | Error::ConfigValidation(_)
            | Error::TomlParse { .. } => ExitCode::CONFIG,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
