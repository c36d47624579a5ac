//! Version identities across the two numbering eras
//!
//! Before major 10 a release line is named by two numbers (`9.6`) and its
//! minor releases by a third (`9.6.3`). From 10 on the line is a single
//! number (`12`) and minors add a second (`12.1`). The scheme is decided
//! once, from the leading segment, when a [`VersionIdentity`] is parsed.

use crate::error::{CliError, Result};
use std::fmt;
use std::str::FromStr;

/// First major number numbered with the two-segment scheme.
pub const MODERN_SCHEME_MAJOR: u32 = 10;

/// Numbering scheme a version belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionScheme {
    /// `X.Y` first release, `X.Y.Z` minor release (major < 10)
    LegacyThreeSegment,
    /// `X` first release, `X.Y` minor release (major >= 10)
    ModernTwoSegment,
}

impl VersionScheme {
    /// Scheme implied by the leading segment
    pub fn for_major(major: u32) -> Self {
        if major >= MODERN_SCHEME_MAJOR {
            Self::ModernTwoSegment
        } else {
            Self::LegacyThreeSegment
        }
    }

    /// Number of segments naming the major line
    pub fn line_segments(self) -> usize {
        match self {
            Self::LegacyThreeSegment => 2,
            Self::ModernTwoSegment => 1,
        }
    }
}

/// A parsed, comparable version string
///
/// The sort key is the segments zero-padded to two digits and laid out as
/// `MMmmpp` (legacy) or `MM00pp` (modern), with absent segments written as
/// `00`. Keys are compared as strings: a segment of 100 or more widens the
/// key and breaks the ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionIdentity {
    raw: String,
    segments: Vec<u32>,
    scheme: VersionScheme,
    first_release: bool,
    sort_key: String,
}

impl VersionIdentity {
    /// Parse a dotted version string
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let invalid = || CliError::InvalidVersion(raw.to_string());

        let segments = raw
            .split('.')
            .map(|s| {
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                s.parse::<u32>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<u32>>>()?;

        let scheme = VersionScheme::for_major(segments[0]);
        let line_len = scheme.line_segments();

        let first_release = match segments.len() {
            n if n == line_len => true,
            n if n == line_len + 1 => false,
            _ => return Err(invalid()),
        };

        let sort_key = match (scheme, first_release) {
            (VersionScheme::ModernTwoSegment, true) => format!("{:02}0000", segments[0]),
            (VersionScheme::ModernTwoSegment, false) => {
                format!("{:02}00{:02}", segments[0], segments[1])
            }
            (VersionScheme::LegacyThreeSegment, true) => {
                format!("{:02}{:02}00", segments[0], segments[1])
            }
            (VersionScheme::LegacyThreeSegment, false) => {
                format!("{:02}{:02}{:02}", segments[0], segments[1], segments[2])
            }
        };

        Ok(Self {
            raw: raw.to_string(),
            segments,
            scheme,
            first_release,
            sort_key,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    pub fn scheme(&self) -> VersionScheme {
        self.scheme
    }

    /// True when the minor/patch segment is absent
    pub fn is_first_release(&self) -> bool {
        self.first_release
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Leading segment
    pub fn major(&self) -> u32 {
        self.segments[0]
    }

    /// Minor number within the major line; 0 for the first release
    pub fn minor_number(&self) -> u32 {
        if self.first_release {
            0
        } else {
            self.segments[self.scheme.line_segments()]
        }
    }

    /// Minor number as displayed in the graph
    pub fn minor_label(&self) -> String {
        if self.first_release {
            "0".to_string()
        } else {
            self.segments[self.scheme.line_segments()].to_string()
        }
    }

    /// Key of the major line this version belongs to (`"12"`, `"9.6"`)
    pub fn major_line(&self) -> String {
        match self.scheme {
            VersionScheme::ModernTwoSegment => self.segments[0].to_string(),
            VersionScheme::LegacyThreeSegment => {
                format!("{}.{}", self.segments[0], self.segments[1])
            }
        }
    }
}

impl FromStr for VersionIdentity {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Leading number of a major-line key such as `"9.6"` or `"12"`
pub fn line_major(line: &str) -> Option<u32> {
    line.split('.').next()?.trim().parse().ok()
}
