//! Release-notes URL builders

use crate::version::VersionIdentity;

/// Page listing every release
pub fn release_index_url(base_url: &str) -> String {
    format!("{}/release.html", base_url.trim_end_matches('/'))
}

/// Release note of one version
///
/// The page name is the version with dots turned into dashes, which covers
/// both schemes: `9.6` -> `release-9-6.html`, `9.6.3` -> `release-9-6-3.html`,
/// `12` -> `release-12.html`, `12.1` -> `release-12-1.html`.
pub fn release_note_url(base_url: &str, version: &VersionIdentity) -> String {
    format!(
        "{}/release-{}.html",
        base_url.trim_end_matches('/'),
        version.raw().replace('.', "-")
    )
}
