//! Persisted release data
//!
//! The data directory holds two flat lists written by reload, plus one
//! cached release note per version:
//!
//! ```text
//! release_notes/
//!   releases        every known version, one per line, index order
//!   majors          every first release, one per line, index order
//!   12.1.html       cached release note of 12.1
//! ```

use crate::error::{CliError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File listing every known version
pub const RELEASES_FILENAME: &str = "releases";

/// File listing every first release, i.e. every major line
pub const MAJORS_FILENAME: &str = "majors";

/// Read side of the persisted release data
pub trait ReleaseStore {
    /// Every known version, in the order it was recorded
    fn list_known_versions(&self) -> Result<Vec<String>>;

    /// Every major line, in the order it was recorded (newest first)
    fn list_display_major_lines(&self) -> Result<Vec<String>>;

    /// The cached release note of `version`, if one was saved
    fn fetch_cached_document(&self, version: &str) -> Result<Option<String>>;
}

/// [`ReleaseStore`] backed by the data directory
#[derive(Debug, Clone)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// Wrap a data directory without checking its contents
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Wrap a data directory that must already hold both version lists
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(dir);

        let missing: Vec<PathBuf> = [store.releases_path(), store.majors_path()]
            .into_iter()
            .filter(|path| !path.is_file())
            .collect();

        if !missing.is_empty() {
            return Err(CliError::MissingPersistedState { missing });
        }

        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn releases_path(&self) -> PathBuf {
        self.dir.join(RELEASES_FILENAME)
    }

    pub fn majors_path(&self) -> PathBuf {
        self.dir.join(MAJORS_FILENAME)
    }

    pub fn document_path(&self, version: &str) -> PathBuf {
        self.dir.join(format!("{}.html", version))
    }

    pub fn has_document(&self, version: &str) -> bool {
        self.document_path(version).is_file()
    }

    /// Cache the release note of `version`
    pub fn save_document(&self, version: &str, document: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.document_path(version);
        fs::write(&path, document)?;
        debug!(version, path = %path.display(), "Saved release note");
        Ok(())
    }

    /// Replace the known-version list
    pub fn write_known_versions<S: AsRef<str>>(&self, versions: &[S]) -> Result<()> {
        write_list(&self.releases_path(), versions)
    }

    /// Replace the major-line list
    pub fn write_display_major_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<()> {
        write_list(&self.majors_path(), lines)
    }
}

impl ReleaseStore for FsStore {
    fn list_known_versions(&self) -> Result<Vec<String>> {
        read_list(&self.releases_path())
    }

    fn list_display_major_lines(&self) -> Result<Vec<String>> {
        read_list(&self.majors_path())
    }

    fn fetch_cached_document(&self, version: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.document_path(version)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn read_list(path: &Path) -> Result<Vec<String>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CliError::MissingPersistedState {
                missing: vec![path.to_path_buf()],
            })
        }
        Err(e) => return Err(e.into()),
    };

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn write_list<S: AsRef<str>>(path: &Path, items: &[S]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut body = String::new();
    for item in items {
        body.push_str(item.as_ref());
        body.push('\n');
    }

    fs::write(path, body)?;
    Ok(())
}

/// In-memory [`ReleaseStore`], for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    versions: Vec<String>,
    major_lines: Vec<String>,
    documents: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a version and its release note
    pub fn with_release(mut self, version: &str, document: impl Into<String>) -> Self {
        self.versions.push(version.to_string());
        self.documents.insert(version.to_string(), document.into());
        self
    }

    /// Record a version whose release note was never cached
    pub fn with_uncached_release(mut self, version: &str) -> Self {
        self.versions.push(version.to_string());
        self
    }

    pub fn with_major_line(mut self, line: &str) -> Self {
        self.major_lines.push(line.to_string());
        self
    }
}

impl ReleaseStore for MemoryStore {
    fn list_known_versions(&self) -> Result<Vec<String>> {
        Ok(self.versions.clone())
    }

    fn list_display_major_lines(&self) -> Result<Vec<String>> {
        Ok(self.major_lines.clone())
    }

    fn fetch_cached_document(&self, version: &str) -> Result<Option<String>> {
        Ok(self.documents.get(version).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_reports_every_missing_list() {
        let temp = TempDir::new().unwrap();
        let err = FsStore::open(temp.path()).unwrap_err();
        match err {
            CliError::MissingPersistedState { missing } => {
                assert_eq!(missing.len(), 2);
                assert!(missing[0].ends_with(RELEASES_FILENAME));
                assert!(missing[1].ends_with(MAJORS_FILENAME));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_with_one_list_missing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(RELEASES_FILENAME), "12.1\n").unwrap();
        let err = FsStore::open(temp.path()).unwrap_err();
        assert!(matches!(
            err,
            CliError::MissingPersistedState { ref missing } if missing.len() == 1
        ));
    }

    #[test]
    fn test_lists_round_trip_through_disk() {
        let temp = TempDir::new().unwrap();
        let store = FsStore::new(temp.path().join("notes"));

        store.write_known_versions(&["12.1", "12", "11.6"]).unwrap();
        store.write_display_major_lines(&["12", "11"]).unwrap();

        let store = FsStore::open(store.dir()).unwrap();
        assert_eq!(store.list_known_versions().unwrap(), vec!["12.1", "12", "11.6"]);
        assert_eq!(store.list_display_major_lines().unwrap(), vec!["12", "11"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(RELEASES_FILENAME), "9.6.1\n\n  9.6 \n").unwrap();
        fs::write(temp.path().join(MAJORS_FILENAME), "").unwrap();

        let store = FsStore::open(temp.path()).unwrap();
        assert_eq!(store.list_known_versions().unwrap(), vec!["9.6.1", "9.6"]);
        assert!(store.list_display_major_lines().unwrap().is_empty());
    }

    #[test]
    fn test_documents() {
        let temp = TempDir::new().unwrap();
        let store = FsStore::new(temp.path());

        assert!(!store.has_document("10.3"));
        assert_eq!(store.fetch_cached_document("10.3").unwrap(), None);

        store.save_document("10.3", "<p>note</p>").unwrap();
        assert!(store.has_document("10.3"));
        assert!(store.document_path("10.3").ends_with("10.3.html"));
        assert_eq!(
            store.fetch_cached_document("10.3").unwrap().as_deref(),
            Some("<p>note</p>")
        );
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new()
            .with_release("13.1", "doc")
            .with_uncached_release("13.2")
            .with_major_line("13");

        assert_eq!(store.list_known_versions().unwrap(), vec!["13.1", "13.2"]);
        assert_eq!(store.list_display_major_lines().unwrap(), vec!["13"]);
        assert!(store.fetch_cached_document("13.2").unwrap().is_none());
    }
}
