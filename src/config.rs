//! Optional `.vibecheck.toml` configuration.
//!
//! Every field has a default, so a missing file and an empty file behave the
//! same. CLI flags override whatever is loaded here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Config file looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".vibecheck.toml";

const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub scan: ScanConfig,
    pub focus: FocusConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Scheme and host of the Messages API, without a trailing path.
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Per-request timeout; a timed out call is treated as unavailable.
    pub timeout_secs: u64,
    /// Concurrent risk batches in flight (at least one).
    pub workers: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2048,
            timeout_secs: 120,
            workers: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub extensions: Vec<String>,
    pub max_files: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: [".py", ".ts", ".tsx", ".js", ".go", ".rs", ".java"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_files: 50,
        }
    }
}

/// Pinned files (absolute paths) flagged as focus in scan results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Load `explicit` if given (must exist), else `.vibecheck.toml` in the
    /// current directory if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
