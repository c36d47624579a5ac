//! Timeline assembly
//!
//! Turns the persisted version list into a calendar matrix: one row per
//! distinct release date, one column per displayed major line. Each cell is
//! the minor label released that day, an in-service marker while a line's
//! minor series is still running, or blank.
//!
//! Ordering of released versions is `(release date, sort key)`, ascending,
//! with a stable sort so equal keys keep discovery order. Rows only depend on
//! the sequence of distinct dates; the sort key decides which same-day
//! release a line reports when it shipped twice on one date.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::group::MajorVersionGroup;
use crate::release::{extract_release_date, ReleaseRecord};
use crate::store::ReleaseStore;
use crate::version::{line_major, VersionIdentity};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Released and never-released versions of one load
#[derive(Debug, Clone, Default)]
pub struct ReleaseSet {
    released: Vec<ReleaseRecord>,
    never_released: Vec<ReleaseRecord>,
}

impl ReleaseSet {
    /// Partition records by release status and order the released ones
    pub fn from_records(records: impl IntoIterator<Item = ReleaseRecord>) -> Self {
        let (mut released, never_released): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|r| r.released_on().is_some());

        order_released(&mut released);

        Self {
            released,
            never_released,
        }
    }

    /// Released versions, ascending by date then sort key
    pub fn released(&self) -> &[ReleaseRecord] {
        &self.released
    }

    pub fn never_released(&self) -> &[ReleaseRecord] {
        &self.never_released
    }
}

/// Stable sort by `(release date, sort key)`
pub fn order_released(records: &mut [ReleaseRecord]) {
    records.sort_by(|a, b| {
        a.released_on()
            .cmp(&b.released_on())
            .then_with(|| a.identity().sort_key().cmp(b.identity().sort_key()))
    });
}

/// Group released versions by major line
pub fn group_by_major_line(released: &[ReleaseRecord]) -> HashMap<String, MajorVersionGroup> {
    let mut groups: HashMap<String, MajorVersionGroup> = HashMap::new();

    for record in released {
        let line = record.identity().major_line();
        groups
            .entry(line.clone())
            .or_insert_with(|| MajorVersionGroup::new(line))
            .add_release(record.clone());
    }

    groups
}

/// Whether a major line is between its first release and its last known minor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeriesState {
    #[default]
    Idle,
    InSeries,
}

impl SeriesState {
    /// State after the line shows `label` with `max_minor` as its last known minor
    pub fn advance(self, label: &str, max_minor: u32) -> Self {
        let max = max_minor.to_string();
        if label == "0" && label != max {
            Self::InSeries
        } else if label == max {
            Self::Idle
        } else {
            self
        }
    }
}

/// One cell of the matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Minor label released on the row's date
    Release(String),
    /// No release that day, but the line's series is still running
    InService,
    Blank,
}

/// One release date and a cell per displayed major line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineRow {
    pub date: NaiveDate,
    pub cells: Vec<Cell>,
}

/// The assembled matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    columns: Vec<String>,
    rows: Vec<TimelineRow>,
}

impl Timeline {
    /// Major lines, in display order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TimelineRow] {
        &self.rows
    }
}

/// Builds a [`Timeline`] from persisted release data
#[derive(Debug, Clone)]
pub struct TimelineAssembler {
    version_from: u32,
    skip_malformed: bool,
}

impl TimelineAssembler {
    pub fn new(config: &Config) -> Self {
        Self {
            version_from: config.version_from,
            skip_malformed: config.skip_malformed,
        }
    }

    /// Resolve a record for every known version at or above the threshold
    pub fn load<S: ReleaseStore + ?Sized>(&self, store: &S) -> Result<ReleaseSet> {
        let mut records = Vec::new();

        for raw in store.list_known_versions()? {
            let identity = match VersionIdentity::parse(&raw) {
                Ok(identity) => identity,
                Err(e) => {
                    warn!(version = %raw, error = %e, "Ignoring unparseable version");
                    continue;
                }
            };

            if identity.major() < self.version_from {
                continue;
            }

            match self.resolve(store, identity) {
                Ok(record) => records.push(record),
                Err(e) if self.skip_malformed && e.is_skippable() => {
                    warn!(version = %raw, error = %e, "Skipping version without a readable release date");
                }
                Err(e) => return Err(e),
            }
        }

        let set = ReleaseSet::from_records(records);
        debug!(
            released = set.released().len(),
            never_released = set.never_released().len(),
            "Loaded release records"
        );
        Ok(set)
    }

    fn resolve<S: ReleaseStore + ?Sized>(
        &self,
        store: &S,
        identity: VersionIdentity,
    ) -> Result<ReleaseRecord> {
        let document = store
            .fetch_cached_document(identity.raw())?
            .ok_or_else(|| CliError::DocumentNotFound(identity.raw().to_string()))?;
        let release_date = extract_release_date(identity.raw(), &document)?;
        Ok(ReleaseRecord::new(identity, release_date))
    }

    /// Column order from the persisted major-line list
    ///
    /// The list is recorded newest first; columns run oldest first. Lines
    /// below the threshold are dropped.
    pub fn display_order(&self, major_lines: Vec<String>) -> Vec<String> {
        major_lines
            .into_iter()
            .rev()
            .filter(|line| match line_major(line) {
                Some(major) => major >= self.version_from,
                None => {
                    warn!(line = %line, "Ignoring unparseable major line");
                    false
                }
            })
            .collect()
    }

    /// Build the matrix for `set` with the given columns
    pub fn assemble(&self, set: &ReleaseSet, columns: Vec<String>) -> Timeline {
        let groups = group_by_major_line(set.released());
        let mut states: HashMap<String, SeriesState> = HashMap::new();
        let mut rows = Vec::new();
        let mut previous: Option<NaiveDate> = None;

        for record in set.released() {
            let Some(date) = record.released_on() else {
                continue;
            };
            if previous == Some(date) {
                continue;
            }
            previous = Some(date);

            let cells = columns
                .iter()
                .map(|line| {
                    let Some(group) = groups.get(line) else {
                        return Cell::Blank;
                    };
                    let state = states.entry(line.clone()).or_default();

                    match group.release_on(date) {
                        Some(release) => {
                            let label = release.identity().minor_label();
                            *state = state.advance(&label, group.max_minor_number());
                            Cell::Release(label)
                        }
                        None if *state == SeriesState::InSeries => Cell::InService,
                        None => Cell::Blank,
                    }
                })
                .collect();

            rows.push(TimelineRow { date, cells });
        }

        Timeline { columns, rows }
    }
}
