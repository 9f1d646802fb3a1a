use std::fmt;

/// Release identifier of the artifact, e.g. `8.4.1`.
///
/// The value is opaque: only equality and its use in URLs and file names
/// matter. Because it ends up in a file name, values that could escape the
/// cache directory are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParseError {
    input: String,
}

impl VersionParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

impl fmt::Display for VersionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid version '{}'", self.input)
    }
}

impl std::error::Error for VersionParseError {}

impl Version {
    pub fn parse(s: &str) -> Result<Self, VersionParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed != s {
            return Err(VersionParseError::new(s));
        }

        if s.contains(['/', '\\']) || s.contains("..") {
            return Err(VersionParseError::new(s));
        }

        if s.chars().any(char::is_control) {
            return Err(VersionParseError::new(s));
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
