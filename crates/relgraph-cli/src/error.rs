//! Error types for relgraph
//!
//! Every variant is operator-facing: the message says what went wrong and,
//! where there is one, what to run to fix it.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for relgraph operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for graph generation and reload
#[derive(Error, Debug)]
pub enum CliError {
    /// The persisted version lists have not been written yet
    #[error("Missing release data: {}. Reloading with 'relgraph --reload' might be needed.", display_paths(.missing))]
    MissingPersistedState { missing: Vec<PathBuf> },

    /// A cached release note has no readable release date
    #[error("Malformed release note for version {version}: {reason}. Run 'relgraph --reload' after deleting the file, or pass --skip-malformed.")]
    MalformedDocument { version: String, reason: String },

    /// A listed version has no cached release note
    #[error("No cached release note for version {0}. Run 'relgraph --reload' to download it.")]
    DocumentNotFound(String),

    /// A version string is not a dotted number of a supported scheme
    #[error("Invalid version '{0}': expected N.N or N.N.N before 10, N or N.N from 10 on")]
    InvalidVersion(String),

    /// Release index page could not be interpreted
    #[error("Failed to scrape release index: {0}")]
    Scrape(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables and command-line flags.")]
    Config(String),

    /// Regex compilation failed
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your internet connection and --base-url.")]
    Http(#[from] reqwest::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a malformed document error
    pub fn malformed(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a scrape error
    pub fn scrape(msg: impl Into<String>) -> Self {
        Self::Scrape(msg.into())
    }

    /// Whether `--skip-malformed` may downgrade this error to a warning
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::MalformedDocument { .. } | Self::DocumentNotFound(_)
        )
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\"{}\" doesn't exist", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_state_lists_every_path() {
        let err = CliError::MissingPersistedState {
            missing: vec![PathBuf::from("data/releases"), PathBuf::from("data/majors")],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"data/releases\" doesn't exist"));
        assert!(msg.contains("\"data/majors\" doesn't exist"));
        assert!(msg.contains("--reload"));
    }

    #[test]
    fn test_skippable_errors() {
        assert!(CliError::malformed("9.6.1", "no date").is_skippable());
        assert!(CliError::DocumentNotFound("12.3".into()).is_skippable());
        assert!(!CliError::config("bad").is_skippable());
        assert!(!CliError::MissingPersistedState { missing: vec![] }.is_skippable());
    }
}
