pub mod exists;
pub mod latest;
pub mod update;

use crate::error::Error;

/// Follow-up advice printed under an error, when there is any.
pub fn hint_for(error: &Error) -> Option<String> {
    match error {
        Error::DirectoryConflict { path } => Some(format!(
            "Remove the directory '{path}' and run 'qsup update' again."
        )),
        Error::NotFound { .. } => Some("Run 'qsup update' to download it.".to_string()),
        Error::Resolution(_) => {
            Some("Pass --version to skip the package index lookup.".to_string())
        }
        _ => None,
    }
}
