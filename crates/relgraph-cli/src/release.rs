//! Release records and release-date extraction
//!
//! A cached release note carries its date in a paragraph of the form
//! `<p><strong>Release date: </strong>2017-10-05</p>`. Versions that were
//! announced but withdrawn say `never released` there instead.

use crate::error::{CliError, Result};
use crate::version::VersionIdentity;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

/// Text marking a version that never shipped
pub const NEVER_RELEASED: &str = "never released";

/// Label inside the paragraph that holds the date
const RELEASE_DATE_LABEL: &str = "Release date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Release date of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseDate {
    Released(NaiveDate),
    NeverReleased,
}

impl ReleaseDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Released(date) => Some(*date),
            Self::NeverReleased => None,
        }
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Released(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::NeverReleased => f.write_str(NEVER_RELEASED),
        }
    }
}

/// A version paired with its release date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
    identity: VersionIdentity,
    release_date: ReleaseDate,
}

impl ReleaseRecord {
    pub fn new(identity: VersionIdentity, release_date: ReleaseDate) -> Self {
        Self {
            identity,
            release_date,
        }
    }

    /// Build a record whose date is read from a cached release note
    pub fn from_document(identity: VersionIdentity, document: &str) -> Result<Self> {
        let release_date = extract_release_date(identity.raw(), document)?;
        Ok(Self::new(identity, release_date))
    }

    pub fn identity(&self) -> &VersionIdentity {
        &self.identity
    }

    pub fn release_date(&self) -> ReleaseDate {
        self.release_date
    }

    /// The date, unless the version never shipped
    pub fn released_on(&self) -> Option<NaiveDate> {
        self.release_date.date()
    }
}

/// Read the release date out of a release-note document
///
/// Uses the first `<p>` that has a child element mentioning "Release date"
/// and takes the paragraph's own text nodes as the value.
pub fn extract_release_date(version: &str, document: &str) -> Result<ReleaseDate> {
    let html = Html::parse_document(document);
    let paragraphs = Selector::parse("p").map_err(|e| CliError::scrape(e.to_string()))?;

    let value = html
        .select(&paragraphs)
        .find(|p| labels_release_date(p))
        .map(|p| direct_text(&p))
        .ok_or_else(|| CliError::malformed(version, "no 'Release date' paragraph"))?;

    let value = value.trim();
    if value == NEVER_RELEASED {
        return Ok(ReleaseDate::NeverReleased);
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(ReleaseDate::Released)
        .map_err(|e| CliError::malformed(version, format!("unreadable date '{}': {}", value, e)))
}

fn labels_release_date(paragraph: &ElementRef<'_>) -> bool {
    paragraph
        .children()
        .filter_map(ElementRef::wrap)
        .any(|child| child.text().collect::<String>().contains(RELEASE_DATE_LABEL))
}

fn direct_text(paragraph: &ElementRef<'_>) -> String {
    paragraph
        .children()
        .filter_map(|node| node.value().as_text().map(|text| &**text))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn note(date_text: &str) -> String {
        format!(
            r#"<html><body>
            <div class="sect1"><h2>E.1. Release 12.1</h2>
            <p>Some unrelated paragraph.</p>
            <p><strong>Release date: </strong>{date_text}</p>
            <p>This release contains a variety of fixes from 12.0.</p>
            </div></body></html>"#
        )
    }

    #[test]
    fn test_extracts_date() {
        let date = extract_release_date("12.1", &note("2019-11-14")).unwrap();
        assert_eq!(
            date,
            ReleaseDate::Released(NaiveDate::from_ymd_opt(2019, 11, 14).unwrap())
        );
        assert_eq!(date.to_string(), "2019-11-14");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let date = extract_release_date("12.1", &note("\n   2019-11-14\n ")).unwrap();
        assert!(date.date().is_some());
    }

    #[test]
    fn test_never_released() {
        let date = extract_release_date("8.0.27", &note("never released")).unwrap();
        assert_eq!(date, ReleaseDate::NeverReleased);
        assert_eq!(date.date(), None);
        assert_eq!(date.to_string(), NEVER_RELEASED);
    }

    #[test]
    fn test_missing_paragraph_is_malformed() {
        let err = extract_release_date("9.1.2", "<html><p>nothing here</p></html>").unwrap_err();
        match err {
            CliError::MalformedDocument { version, reason } => {
                assert_eq!(version, "9.1.2");
                assert!(reason.contains("Release date"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparseable_date_is_malformed() {
        let err = extract_release_date("9.1.2", &note("sometime in 2012")).unwrap_err();
        assert!(matches!(err, CliError::MalformedDocument { .. }));
    }

    #[test]
    fn test_record_from_document() {
        let identity = VersionIdentity::parse("12.1").unwrap();
        let record = ReleaseRecord::from_document(identity, &note("2019-11-14")).unwrap();
        assert_eq!(record.identity().raw(), "12.1");
        assert_eq!(
            record.released_on(),
            NaiveDate::from_ymd_opt(2019, 11, 14)
        );
    }
}
