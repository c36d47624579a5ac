//! Reload of the persisted release data
//!
//! Scrapes the release index, caches every release note not already on
//! disk and rewrites both version lists. Fetches run one at a time.

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{parse_release_index, ReleaseNotesClient};
use crate::progress;
use crate::store::FsStore;
use colored::Colorize;
use std::time::Duration;
use tracing::{info, instrument};

/// Counts reported after a reload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReloadSummary {
    /// Versions found on the index
    pub versions: usize,
    /// Major lines found on the index
    pub major_lines: usize,
    /// Release notes downloaded during this reload
    pub downloaded: usize,
}

/// Refresh the data directory from the release-notes site
#[instrument(skip_all, fields(base_url = %config.base_url()))]
pub async fn run(config: &Config) -> Result<ReloadSummary> {
    let client =
        ReleaseNotesClient::new(config.base_url(), Duration::from_secs(config.timeout_secs))?;
    let store = FsStore::new(config.data_dir());

    let index = client.fetch_index().await?;
    let versions = parse_release_index(&index, config.min_scrape_version)?;

    let pb = progress::create_reload_progress(versions.len() as u64, "Checking release notes");
    let mut downloaded = 0;

    for version in &versions {
        if !store.has_document(version.raw()) {
            pb.set_message(format!("Saving the release note of {}", version));
            let note = client.fetch_release_note(version).await?;
            store.save_document(version.raw(), &note)?;
            downloaded += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let known: Vec<&str> = versions.iter().map(|v| v.raw()).collect();
    let firsts: Vec<&str> = versions
        .iter()
        .filter(|v| v.is_first_release())
        .map(|v| v.raw())
        .collect();

    store.write_known_versions(&known)?;
    store.write_display_major_lines(&firsts)?;

    let summary = ReloadSummary {
        versions: known.len(),
        major_lines: firsts.len(),
        downloaded,
    };

    info!(
        versions = summary.versions,
        major_lines = summary.major_lines,
        downloaded = summary.downloaded,
        "Reload complete"
    );
    eprintln!(
        "{} Indexed {} version(s) across {} major line(s), {} new release note(s) saved to {}",
        "✓".green(),
        summary.versions,
        summary.major_lines,
        summary.downloaded,
        store.dir().display()
    );

    Ok(summary)
}
