//! relgraph CLI Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Prints a calendar-aligned history of releases across major version lines,
//! built from a scraped release-notes index.
//!
//! # Overview
//!
//! - **Version model**: two numbering eras parsed into one comparable form ([`version`])
//! - **Release records**: versions paired with dates read from cached notes ([`release`])
//! - **Major lines**: releases grouped per line ([`group`])
//! - **Timeline**: ordering, grouping and cell computation ([`timeline`])
//! - **Rendering**: fixed-width text output ([`render`])
//! - **Reload**: scraping the index and caching notes ([`fetch`], [`commands::reload`])
//!
//! ```text
//! Date          9.6    10     11
//! Date----------9.6----10-----11----
//! 2017-10-05    :      0
//! 2017-11-09    6      1
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod group;
pub mod progress;
pub mod release;
pub mod render;
pub mod store;
pub mod timeline;
pub mod version;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};
pub use version::VersionIdentity;

use clap::Parser;
use config::{DEFAULT_HEADER_INTERVAL, DEFAULT_VERSION_FROM};
use std::path::PathBuf;

/// relgraph - release history graph
#[derive(Parser, Debug)]
#[command(name = "relgraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Reload all release note data before printing
    #[arg(short, long)]
    pub reload: bool,

    /// Number of data rows between repeated header lines (0 disables)
    #[arg(short, long, value_name = "NUM", default_value_t = DEFAULT_HEADER_INTERVAL)]
    pub interval: usize,

    /// Output releases from this major version on
    #[arg(short = 'v', long = "from-version", value_name = "NUM", default_value_t = DEFAULT_VERSION_FROM)]
    pub from_version: u32,

    /// Directory holding the version lists and cached release notes
    #[arg(long, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Release-notes site root
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Skip versions whose release note is missing or unreadable instead of failing
    #[arg(long)]
    pub skip_malformed: bool,

    /// Verbose logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::from_env()?;

        if let Some(ref dir) = self.data_dir {
            config.set_data_dir(dir.clone());
        }
        if let Some(ref url) = self.base_url {
            config.set_base_url(url.clone());
        }
        config.set_header_interval(self.interval);
        config.set_version_from(self.from_version);
        config.set_skip_malformed(self.skip_malformed);

        config.validate()?;
        Ok(config)
    }
}
