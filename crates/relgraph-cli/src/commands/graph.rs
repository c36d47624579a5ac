//! Graph generation
//!
//! Loads the persisted release data, assembles the timeline and writes it to
//! standard output.

use crate::config::Config;
use crate::error::Result;
use crate::render::{GraphLayout, GraphRenderer};
use crate::store::{FsStore, ReleaseStore};
use crate::timeline::TimelineAssembler;
use std::io::Write;
use tracing::{debug, info};

/// Print the release history graph to stdout
pub fn run(config: &Config) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_graph(config, &mut out)
}

/// Write the release history graph to `out`
///
/// Nothing is written unless both persisted lists exist and every needed
/// release note has been read.
pub fn write_graph<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let store = FsStore::open(config.data_dir())?;
    let assembler = TimelineAssembler::new(config);

    let releases = assembler.load(&store)?;
    let columns = assembler.display_order(store.list_display_major_lines()?);
    let timeline = assembler.assemble(&releases, columns);

    let renderer =
        GraphRenderer::new(GraphLayout::default().with_header_interval(config.header_interval));
    let rows = renderer.render(&timeline, out)?;

    for record in releases.never_released() {
        debug!(version = %record.identity(), "Never released");
    }
    info!(
        rows,
        columns = timeline.columns().len(),
        never_released = releases.never_released().len(),
        "Rendered release history"
    );

    Ok(())
}
