// 📥 Data Source - Where the group export comes from
//
// One capability (fetch a GroupDocument), two interchangeable adapters:
//   - FileSource:   a JSON export saved on disk
//   - RemoteSource: the group's export endpoint, with an API fallback

use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::model::GroupDocument;
use anyhow::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

// ============================================================================
// CORE TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    LocalFile,
    Remote,
}

impl SourceKind {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            SourceKind::LocalFile => "Local file",
            SourceKind::Remote => "Remote export",
        }
    }

    /// Short code for logs
    pub fn code(&self) -> &str {
        match self {
            SourceKind::LocalFile => "file",
            SourceKind::Remote => "remote",
        }
    }
}

/// GroupSource - yields a parsed, validated group document
///
/// Adding a new origin means implementing this trait; nothing downstream changes.
pub trait GroupSource {
    fn fetch(&self) -> Result<GroupDocument, SourceError>;

    fn kind(&self) -> SourceKind;

    /// Where the document is read from (path or URL), for diagnostics
    fn describe(&self) -> String;
}

/// Parse and validate raw export text
pub fn parse_document(content: &str, location: &str) -> Result<GroupDocument, SourceError> {
    let document = GroupDocument::from_json(content)
        .map_err(|e| SourceError::invalid_format(location, e))?;
    document
        .validate()
        .map_err(|reason| SourceError::invalid_format(location, reason))?;
    Ok(document)
}

// ============================================================================
// FACTORY
// ============================================================================

/// Build the adapter selected by `config`
pub fn build_source(config: &SourceConfig) -> Result<Box<dyn GroupSource>> {
    match config {
        SourceConfig::LocalFile { path } => Ok(Box::new(FileSource::new(path.clone()))),
        #[cfg(feature = "remote")]
        SourceConfig::Remote { base_url, group_id } => {
            Ok(Box::new(RemoteSource::new(base_url, group_id)?))
        }
        #[cfg(not(feature = "remote"))]
        SourceConfig::Remote { .. } => Err(anyhow::anyhow!(
            "remote mode not available; rebuild with `--features remote`"
        )),
    }
}

// ============================================================================
// LOCAL FILE
// ============================================================================

/// Reads a whole JSON export from disk before parsing
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl GroupSource for FileSource {
    fn fetch(&self) -> Result<GroupDocument, SourceError> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound { path: self.path.clone() },
            _ => SourceError::unavailable(self.describe(), e),
        })?;

        parse_document(&content, &self.describe())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::LocalFile
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// REMOTE EXPORT
// ============================================================================

#[cfg(feature = "remote")]
pub use remote::RemoteSource;

#[cfg(feature = "remote")]
mod remote {
    use super::{parse_document, GroupSource, SourceKind};
    use crate::error::SourceError;
    use crate::model::GroupDocument;
    use anyhow::{Context, Result};
    use reqwest::blocking::{Client, Response};
    use reqwest::header::CONTENT_TYPE;
    use tracing::{debug, warn};

    /// Fetches a group export over HTTP
    ///
    /// Tries `{base}/groups/{id}/expenses/export/json` first. If that answers
    /// with something other than JSON (the web app serves HTML there), retries
    /// once against `{base}/api/groups/{id}/expenses`.
    pub struct RemoteSource {
        client: Client,
        base_url: String,
        group_id: String,
    }

    impl RemoteSource {
        pub fn new(base_url: &str, group_id: &str) -> Result<Self> {
            let client = Client::builder()
                .build()
                .context("Failed to build HTTP client")?;

            Ok(RemoteSource {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
                group_id: group_id.to_string(),
            })
        }

        pub fn export_url(&self) -> String {
            format!("{}/groups/{}/expenses/export/json", self.base_url, self.group_id)
        }

        pub fn fallback_url(&self) -> String {
            format!("{}/api/groups/{}/expenses", self.base_url, self.group_id)
        }

        fn get(&self, url: &str) -> Result<Response, SourceError> {
            debug!(%url, "sending HTTP request");
            let response = self
                .client
                .get(url)
                .send()
                .map_err(|e| SourceError::unavailable(url, e))?;
            debug!(%url, status = %response.status(), "received HTTP response");
            Ok(response)
        }

        fn read_json(&self, url: &str, response: Response) -> Result<GroupDocument, SourceError> {
            let status = response.status();
            if !status.is_success() {
                return Err(SourceError::unavailable(url, format!("HTTP {}", status)));
            }

            let body = response
                .text()
                .map_err(|e| SourceError::unavailable(url, e))?;
            parse_document(&body, url)
        }
    }

    fn content_type(response: &Response) -> String {
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase()
    }

    fn is_json(content_type: &str) -> bool {
        content_type.contains("json")
    }

    impl GroupSource for RemoteSource {
        fn fetch(&self) -> Result<GroupDocument, SourceError> {
            let export_url = self.export_url();
            let response = self.get(&export_url)?;

            let received = content_type(&response);
            if is_json(&received) {
                return self.read_json(&export_url, response);
            }

            let fallback_url = self.fallback_url();
            warn!(
                url = %export_url,
                content_type = %received,
                fallback = %fallback_url,
                "export endpoint did not return JSON, trying API endpoint"
            );

            let response = self.get(&fallback_url)?;
            let status = response.status();
            if !status.is_success() {
                return Err(SourceError::unavailable(&fallback_url, format!("HTTP {}", status)));
            }

            let received = content_type(&response);
            if !is_json(&received) {
                return Err(SourceError::unavailable(
                    &fallback_url,
                    format!("expected JSON, got '{}'", received),
                ));
            }

            self.read_json(&fallback_url, response)
        }

        fn kind(&self) -> SourceKind {
            SourceKind::Remote
        }

        fn describe(&self) -> String {
            self.export_url()
        }
    }
}
