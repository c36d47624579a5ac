//! Release index scraping
//!
//! The index page lists one `span.sect1` per release, e.g.
//! `<span class="sect1"><a href="release-9-6-3.html">E.12. Release 9.6.3</a></span>`.

use crate::error::{CliError, Result};
use crate::version::VersionIdentity;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Versions listed on the release index, in page order
///
/// Entries whose major number is below `min_major` are dropped.
pub fn parse_release_index(html: &str, min_major: u32) -> Result<Vec<VersionIdentity>> {
    let document = Html::parse_document(html);
    let sections = Selector::parse("span.sect1").map_err(|e| CliError::scrape(e.to_string()))?;
    let release_pattern = Regex::new(r"Release\s+(\d+(?:\.\d+){0,2})")?;

    let mut versions = Vec::new();

    for section in document.select(&sections) {
        let title: String = section.text().collect();

        let Some(captures) = release_pattern.captures(&title) else {
            debug!(title = %title.trim(), "Not a release entry");
            continue;
        };

        let version = match VersionIdentity::parse(&captures[1]) {
            Ok(version) => version,
            Err(e) => {
                warn!(title = %title.trim(), error = %e, "Skipping release entry");
                continue;
            }
        };

        if version.major() < min_major {
            continue;
        }

        versions.push(version);
    }

    if versions.is_empty() {
        return Err(CliError::scrape("no release entries found on the index page"));
    }

    debug!(count = versions.len(), "Parsed release index");
    Ok(versions)
}
