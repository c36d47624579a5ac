//! Fixed-width text rendering of a [`Timeline`]
//!
//! ```text
//! Date          13     14
//! Date----------13-----14-----
//! 2022-01-01    0
//! 2022-05-01    1
//! 2022-09-01           0
//! ```

use crate::timeline::{Cell, Timeline, TimelineRow};
use std::io::{self, Write};

/// Width of the date column
pub const DATE_WIDTH: usize = 14;

/// Width of every major-line column
pub const COLUMN_WIDTH: usize = 7;

/// Marker for a line whose minor series is still running
pub const CONTINUATION_MARKER: &str = ":";

const DATE_LABEL: &str = "Date";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column widths and header repetition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphLayout {
    pub date_width: usize,
    pub column_width: usize,
    /// Data rows between header reprints; 0 never reprints
    pub header_interval: usize,
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self {
            date_width: DATE_WIDTH,
            column_width: COLUMN_WIDTH,
            header_interval: crate::config::DEFAULT_HEADER_INTERVAL,
        }
    }
}

impl GraphLayout {
    pub fn with_header_interval(mut self, interval: usize) -> Self {
        self.header_interval = interval;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphRenderer {
    layout: GraphLayout,
}

impl GraphRenderer {
    pub fn new(layout: GraphLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &GraphLayout {
        &self.layout
    }

    /// `Date` followed by one padded column per major line
    pub fn header_line(&self, columns: &[String]) -> String {
        let mut line = pad(DATE_LABEL, self.layout.date_width);
        for column in columns {
            line.push_str(&pad(column, self.layout.column_width));
        }
        line
    }

    /// The header with every space and tab turned into a dash
    pub fn rule_line(header: &str) -> String {
        header.replace([' ', '\t'], "-")
    }

    pub fn format_row(&self, row: &TimelineRow) -> String {
        let mut line = pad(
            &row.date.format(DATE_FORMAT).to_string(),
            self.layout.date_width,
        );
        for cell in &row.cells {
            let symbol = match cell {
                Cell::Release(label) => label.as_str(),
                Cell::InService => CONTINUATION_MARKER,
                Cell::Blank => "",
            };
            line.push_str(&pad(symbol, self.layout.column_width));
        }
        line
    }

    /// Write the whole graph, returning the number of data rows written
    pub fn render<W: Write>(&self, timeline: &Timeline, out: &mut W) -> io::Result<usize> {
        let header = self.header_line(timeline.columns());
        writeln!(out, "{}", header)?;
        writeln!(out, "{}", Self::rule_line(&header))?;

        let mut since_header = 0;
        for row in timeline.rows() {
            writeln!(out, "{}", self.format_row(row))?;

            since_header += 1;
            if self.layout.header_interval > 0 && since_header >= self.layout.header_interval {
                writeln!(out, "{}", header)?;
                since_header = 0;
            }
        }

        out.flush()?;
        Ok(timeline.rows().len())
    }

    pub fn render_to_string(&self, timeline: &Timeline) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render(timeline, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}
