use crate::{
    data::Graph,
    error::Result,
    executor::{CensusRow, CsvSink, Matcher},
    pattern::Catalog,
    task::CancelHandle,
    types::EId,
};
use derive_more::Display;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ShardOutcome {
    #[display(fmt = "completed")]
    Completed,
    #[display(fmt = "interrupted")]
    Interrupted,
    #[display(fmt = "failed: {}", _0)]
    Failed(String),
    #[display(fmt = "worker panicked: {}", _0)]
    Panicked(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardReport {
    index: usize,
    path: PathBuf,
    edges: usize,
    rows: usize,
    skipped: usize,
    outcome: ShardOutcome,
}

impl ShardReport {
    pub fn new(index: usize, path: PathBuf, edges: usize, outcome: ShardOutcome) -> Self {
        Self {
            index,
            path,
            edges,
            rows: 0,
            skipped: 0,
            outcome,
        }
    }

    /// 1-based shard index.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Anchor edges assigned to the shard.
    pub fn edges(&self) -> usize {
        self.edges
    }

    /// Data rows written.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Edges dropped because the graph could not answer for them.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn outcome(&self) -> &ShardOutcome {
        &self.outcome
    }

    pub fn is_complete(&self) -> bool {
        self.outcome == ShardOutcome::Completed && self.skipped == 0
    }
}

/// Runs the census pipeline over one shard of anchor edges.
pub struct Worker<'a, G: Graph> {
    graph: &'a G,
    catalog: &'a Catalog,
    cancel: &'a CancelHandle,
}

impl<'a, G: Graph> Worker<'a, G> {
    pub fn new(graph: &'a G, catalog: &'a Catalog, cancel: &'a CancelHandle) -> Self {
        Self {
            graph,
            catalog,
            cancel,
        }
    }

    /// Writes one row per edge of `shard` to `path`.
    ///
    /// Never fails: problems are logged and end up in the report.
    pub fn run(&self, index: usize, shard: &[EId], path: &Path) -> ShardReport {
        let mut report = ShardReport::new(
            index,
            path.to_path_buf(),
            shard.len(),
            ShardOutcome::Completed,
        );
        match self.write_shard(shard, path, &mut report) {
            Ok(outcome) => report.outcome = outcome,
            Err(e) => {
                error!("shard {}: cannot write {}: {}", index, path.display(), e);
                report.outcome = ShardOutcome::Failed(e.to_string());
            }
        }
        info!(
            "shard {}: {} ({} of {} rows, {} skipped)",
            index, report.outcome, report.rows, report.edges, report.skipped
        );
        report
    }

    pub fn census_row(&self, matcher: &mut Matcher<'a, G>, eid: EId) -> Result<CensusRow> {
        let (from, to) = self.graph.endpoints(eid)?;
        Ok(CensusRow::new(from, to, matcher.census(self.catalog, eid)?))
    }
}

// private methods
impl<'a, G: Graph> Worker<'a, G> {
    fn write_shard(
        &self,
        shard: &[EId],
        path: &Path,
        report: &mut ShardReport,
    ) -> Result<ShardOutcome> {
        let mut sink = CsvSink::create(path)?;
        sink.write_header(self.catalog.names())?;
        let mut matcher = Matcher::new(self.graph);
        for &eid in shard {
            if self.cancel.is_cancelled() {
                warn!("shard {}: interrupted before edge {}", report.index, eid);
                sink.finish()?;
                return Ok(ShardOutcome::Interrupted);
            }
            match self.census_row(&mut matcher, eid) {
                Ok(row) => {
                    sink.write_row(&row)?;
                    report.rows += 1;
                }
                Err(e) => {
                    error!("shard {}: edge {}: {}", report.index, eid, e);
                    report.skipped += 1;
                }
            }
        }
        sink.finish()?;
        Ok(ShardOutcome::Completed)
    }
}
