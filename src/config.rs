// ⚙️ Source Configuration - Which export to read, from the command line
//
//   owed-breakdown <export.json>
//   owed-breakdown file <export.json>
//   owed-breakdown remote <groupId> [baseUrl]

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://spliit.app";

pub const USAGE: &str = "\
Usage:
  owed-breakdown <export.json>
  owed-breakdown file <export.json>
  owed-breakdown remote <groupId> [baseUrl]";

/// Selected data source adapter and its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    LocalFile { path: PathBuf },
    Remote { base_url: String, group_id: String },
}

impl SourceConfig {
    /// Parse program arguments (without the program name)
    pub fn from_args(args: &[String]) -> Result<SourceConfig> {
        match args {
            [] => bail!("no export given"),
            [mode, rest @ ..] if mode == "file" => match rest {
                [path] => Ok(SourceConfig::LocalFile { path: PathBuf::from(path) }),
                _ => bail!("'file' expects exactly one path"),
            },
            [mode, rest @ ..] if mode == "remote" => match rest {
                [group_id] => Ok(SourceConfig::remote(DEFAULT_BASE_URL, group_id)),
                [group_id, base_url] => Ok(SourceConfig::remote(base_url, group_id)),
                _ => bail!("'remote' expects a group id and an optional base URL"),
            },
            [path] if !path.starts_with('-') => Ok(SourceConfig::LocalFile { path: PathBuf::from(path) }),
            _ => bail!("unrecognized arguments: {}", args.join(" ")),
        }
    }

    pub fn remote(base_url: &str, group_id: &str) -> SourceConfig {
        SourceConfig::Remote {
            base_url: base_url.trim_end_matches('/').to_string(),
            group_id: group_id.to_string(),
        }
    }
}
