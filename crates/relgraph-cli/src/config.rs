//! Configuration management for relgraph
//!
//! Built once in `main` from defaults, the environment and command-line
//! flags, then passed by reference to every component.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Release-notes site the index and per-version notes are fetched from.
pub const DEFAULT_BASE_URL: &str = "https://www.postgresql.org/docs/devel/static";

/// Directory holding the persisted version lists and cached release notes.
pub const DEFAULT_DATA_DIR: &str = "./release_notes";

/// HTTP timeout for a single page fetch during reload.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Number of data rows between repeated header lines.
pub const DEFAULT_HEADER_INTERVAL: usize = 20;

/// Oldest major number shown in the graph.
pub const DEFAULT_VERSION_FROM: u32 = 8;

/// Oldest major number recorded during reload.
pub const DEFAULT_MIN_SCRAPE_VERSION: u32 = 6;

/// relgraph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Persisted lists and cached release notes
    pub data_dir: PathBuf,

    /// Release-notes site root
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Data rows between header reprints; 0 never reprints
    pub header_interval: usize,

    /// Minimum major number to display
    pub version_from: u32,

    /// Minimum major number to record on reload
    pub min_scrape_version: u32,

    /// Skip versions whose release note is missing or unreadable
    #[serde(default)]
    pub skip_malformed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            header_interval: DEFAULT_HEADER_INTERVAL,
            version_from: DEFAULT_VERSION_FROM,
            min_scrape_version: DEFAULT_MIN_SCRAPE_VERSION,
            skip_malformed: false,
        }
    }
}

impl Config {
    /// Load config from environment variables
    ///
    /// - `RELGRAPH_DATA_DIR`
    /// - `RELGRAPH_BASE_URL`
    /// - `RELGRAPH_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config from any key/value source shaped like the environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("RELGRAPH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(url) = lookup("RELGRAPH_BASE_URL") {
            config.base_url = url;
        }

        if let Some(secs) = lookup("RELGRAPH_TIMEOUT_SECS") {
            config.timeout_secs = secs.parse().map_err(|_| {
                CliError::config(format!("RELGRAPH_TIMEOUT_SECS must be a number, got '{}'", secs))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject values no component can work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(CliError::config("base URL is empty"));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::config("timeout must be at least one second"));
        }
        Ok(())
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) {
        self.data_dir = dir;
    }

    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }

    pub fn set_header_interval(&mut self, interval: usize) {
        self.header_interval = interval;
    }

    pub fn set_version_from(&mut self, version: u32) {
        self.version_from = version;
    }

    pub fn set_skip_malformed(&mut self, skip: bool) {
        self.skip_malformed = skip;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.header_interval, 20);
        assert_eq!(config.version_from, 8);
        assert_eq!(config.min_scrape_version, 6);
        assert_eq!(config.data_dir(), Path::new("./release_notes"));
        assert!(!config.skip_malformed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_lookup() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("RELGRAPH_DATA_DIR", "/tmp/relgraph-notes"),
            ("RELGRAPH_BASE_URL", "http://mirror.example.com/docs"),
            ("RELGRAPH_TIMEOUT_SECS", "5"),
        ]);

        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.data_dir(), Path::new("/tmp/relgraph-notes"));
        assert_eq!(config.base_url(), "http://mirror.example.com/docs");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let result = Config::from_lookup(|k| (k == "RELGRAPH_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert!(matches!(result, Err(CliError::Config(_))));

        let result = Config::from_lookup(|k| (k == "RELGRAPH_TIMEOUT_SECS").then(|| "0".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_setters() {
        let mut config = Config::default();

        config.set_data_dir(PathBuf::from("/srv/notes"));
        config.set_base_url("http://localhost:9000".to_string());
        config.set_header_interval(5);
        config.set_version_from(12);
        config.set_skip_malformed(true);

        assert_eq!(config.data_dir(), Path::new("/srv/notes"));
        assert_eq!(config.base_url(), "http://localhost:9000");
        assert_eq!(config.header_interval, 5);
        assert_eq!(config.version_from, 12);
        assert!(config.skip_malformed);
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let mut config = Config::default();
        config.set_base_url("  ".to_string());
        assert!(config.validate().is_err());
    }
}
