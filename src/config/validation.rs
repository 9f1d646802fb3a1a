use crate::error::{Error, Result};
use reqwest::Url;

/// Validates that a URL has a valid format.
///
/// Valid examples: "http://example.com", "https://example.com/path"
/// Invalid examples: "", "example.com", "ftp://example.com"
///
/// Rules:
/// - Must not be empty
/// - Must start with http:// or https://
pub fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(Error::InvalidUrl(
            url.to_string(),
            "URL is empty".to_string(),
        ));
    }

    let parsed = Url::parse(url)
        .map_err(|e| Error::InvalidUrl(url.to_string(), format!("Invalid URL format: {e}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::InvalidUrl(
            url.to_string(),
            "URL must start with http:// or https://".to_string(),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(Error::InvalidUrl(
            url.to_string(),
            "URL must include a host".to_string(),
        ));
    }

    Ok(())
}

/// Validates a Maven coordinate segment such as `qsuits` or `com.qiniu`.
///
/// Segments end up in URL paths and cache file names, so only
/// alphanumerics, `-`, `_` and single dots between parts are allowed.
pub fn validate_coordinate(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::ConfigValidation(format!("{field} is empty")));
    }

    let valid = value.split('.').all(|part| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    });

    if !valid {
        return Err(Error::ConfigValidation(format!(
            "{field} '{value}' contains invalid characters"
        )));
    }

    Ok(())
}

pub fn validate_timeout(field: &str, secs: u64, max: u64) -> Result<()> {
    if secs == 0 || secs > max {
        return Err(Error::ConfigValidation(format!(
            "{field} must be between 1 and {max} seconds, got {secs}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod url_validation {
        use super::*;

        #[test]
        fn accepts_https_url() {
            assert!(validate_url("https://search.maven.org").is_ok());
        }

        #[test]
        fn accepts_http_url_with_port() {
            assert!(validate_url("http://127.0.0.1:8080/path").is_ok());
        }

        #[test]
        fn rejects_empty_url() {
            assert!(matches!(validate_url(""), Err(Error::InvalidUrl(_, _))));
        }

        #[test]
        fn rejects_missing_scheme() {
            assert!(validate_url("search.maven.org").is_err());
        }

        #[test]
        fn rejects_ftp_scheme() {
            assert!(validate_url("ftp://example.com").is_err());
        }
    }

    mod coordinate {
        use super::*;

        #[test]
        fn accepts_artifact_name() {
            assert!(validate_coordinate("artifact", "qsuits").is_ok());
        }

        #[test]
        fn accepts_dotted_group() {
            assert!(validate_coordinate("group_id", "com.qiniu").is_ok());
        }

        #[test]
        fn rejects_empty_value() {
            assert!(matches!(
                validate_coordinate("artifact", ""),
                Err(Error::ConfigValidation(_))
            ));
        }

        #[test]
        fn rejects_slashes() {
            assert!(validate_coordinate("artifact", "../qsuits").is_err());
        }

        #[test]
        fn rejects_empty_parts() {
            assert!(validate_coordinate("group_id", "com..qiniu").is_err());
            assert!(validate_coordinate("group_id", "com.").is_err());
        }
    }

    mod timeout {
        use super::*;

        #[test]
        fn accepts_bounds() {
            assert!(validate_timeout("t", 1, 60).is_ok());
            assert!(validate_timeout("t", 60, 60).is_ok());
        }

        #[test]
        fn rejects_zero_and_overflow() {
            assert!(validate_timeout("t", 0, 60).is_err());
            assert!(validate_timeout("t", 61, 60).is_err());
        }
    }
}
