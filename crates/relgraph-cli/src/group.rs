//! Major version lines

use crate::release::ReleaseRecord;
use chrono::NaiveDate;

/// Every released version of one major line, in discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorVersionGroup {
    major_line: String,
    releases: Vec<ReleaseRecord>,
    max_minor_number: u32,
}

impl MajorVersionGroup {
    pub fn new(major_line: impl Into<String>) -> Self {
        Self {
            major_line: major_line.into(),
            releases: Vec::new(),
            max_minor_number: 0,
        }
    }

    pub fn major_line(&self) -> &str {
        &self.major_line
    }

    pub fn releases(&self) -> &[ReleaseRecord] {
        &self.releases
    }

    /// Highest minor number among the group's releases
    pub fn max_minor_number(&self) -> u32 {
        self.max_minor_number
    }

    /// Append a release and recompute the highest minor number
    pub fn add_release(&mut self, record: ReleaseRecord) {
        self.releases.push(record);
        self.max_minor_number = self
            .releases
            .iter()
            .map(|r| r.identity().minor_number())
            .max()
            .unwrap_or(0);
    }

    /// First release of this line shipped on `date`
    pub fn release_on(&self, date: NaiveDate) -> Option<&ReleaseRecord> {
        self.releases
            .iter()
            .find(|r| r.released_on() == Some(date))
    }
}
