use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a usable group export. Every variant is terminal.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("export file {path:?} does not exist")]
    NotFound { path: PathBuf },

    #[error("export from {location} is not a valid group document: {reason}")]
    InvalidFormat { location: String, reason: String },

    #[error("export from {location} could not be retrieved: {reason}")]
    Unavailable { location: String, reason: String },
}

impl SourceError {
    /// Short failure class shown to the user ahead of the details
    pub fn class(&self) -> &'static str {
        match self {
            SourceError::NotFound { .. } => "not found",
            SourceError::InvalidFormat { .. } => "invalid format",
            SourceError::Unavailable { .. } => "unavailable",
        }
    }

    /// What the user can do next, when there is something to suggest
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SourceError::Unavailable { .. } => Some(
                "The group may not expose a public export, or it may require authentication. \
                 Export the JSON manually from the website and run: owed-breakdown file <export.json>",
            ),
            _ => None,
        }
    }

    pub(crate) fn invalid_format(location: impl Into<String>, reason: impl ToString) -> Self {
        SourceError::InvalidFormat {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        SourceError::Unavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}
