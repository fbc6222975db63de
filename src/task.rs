use crate::{
    data::Graph,
    error::{Error, Result},
    executor::{shard_path, shard_range, ShardOutcome, ShardReport, Worker},
    pattern::Catalog,
    planner::Partition,
};
use log::{error, info, warn};
use rayon::prelude::*;
use std::{
    any::Any,
    fmt,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

pub const DEFAULT_OUTPUT: &str = "/tmp/motifs.csv";

/// One worker per CPU, or a single worker if the count is unavailable.
pub fn default_workers() -> usize {
    match sys_info::cpu_num() {
        Ok(n) if n > 0 => n as usize,
        _ => 1,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusConfig {
    etype: String,
    output: PathBuf,
    workers: usize,
}

impl CensusConfig {
    pub fn new(etype: &str) -> Self {
        Self {
            etype: etype.to_owned(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            workers: default_workers(),
        }
    }

    /// Shards are written next to `output` with `-1`, `-2`, ... before its extension.
    pub fn output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn etype(&self) -> &str {
        &self.etype
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    pub fn num_workers(&self) -> usize {
        self.workers
    }
}

/// Asks running workers to stop before their next edge.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusReport {
    range: String,
    shards: Vec<ShardReport>,
}

impl CensusReport {
    pub fn new(range: String, shards: Vec<ShardReport>) -> Self {
        Self { range, shards }
    }

    /// The shard paths attempted, as `<first> through <last>`.
    pub fn range(&self) -> &str {
        &self.range
    }

    pub fn shards(&self) -> &[ShardReport] {
        &self.shards
    }

    pub fn rows(&self) -> usize {
        self.shards.iter().map(ShardReport::rows).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.shards.iter().all(ShardReport::is_complete)
    }

    pub fn is_interrupted(&self) -> bool {
        self.shards
            .iter()
            .any(|shard| shard.outcome() == &ShardOutcome::Interrupted)
    }
}

impl fmt::Display for CensusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            write!(f, "Results written to: {}", self.range)
        } else {
            write!(f, "Census incomplete, attempted: {}", self.range)
        }
    }
}

/// A census run over one graph.
pub struct Task<'a, G: Graph> {
    graph: &'a G,
    catalog: &'a Catalog,
    config: CensusConfig,
    cancel: CancelHandle,
}

impl<'a, G: Graph> Task<'a, G> {
    pub fn new(graph: &'a G, catalog: &'a Catalog, config: CensusConfig) -> Self {
        Self {
            graph,
            catalog,
            config,
            cancel: CancelHandle::default(),
        }
    }

    pub fn config(&self) -> &CensusConfig {
        &self.config
    }

    /// A handle that interrupts [`Task::run`] from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Partitions the anchor edges and runs one worker per shard.
    ///
    /// Returns once every worker has finished. Shard failures do not make this
    /// fail; they are recorded in the report.
    pub fn run(&self) -> Result<CensusReport> {
        let start_time = Instant::now();
        let num_workers = self.config.num_workers();
        let partition = Partition::round_robin(
            self.graph.edges_of_type(self.config.etype()),
            num_workers,
        )?;
        if partition.num_edges() == 0 {
            warn!("no edges of type {}", self.config.etype());
        }
        info!(
            "census of {} {} edges over {} patterns with {} workers",
            partition.num_edges(),
            self.config.etype(),
            self.catalog.len(),
            num_workers
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("motifs-worker-{}", i + 1))
            .build()
            .map_err(|e| Error::ThreadPool(e.to_string()))?;
        let worker = Worker::new(self.graph, self.catalog, &self.cancel);
        let prefix = self.config.output_path();
        let shards: Vec<ShardReport> = pool.install(|| {
            partition
                .shards()
                .par_iter()
                .with_max_len(1)
                .enumerate()
                .map(|(i, shard)| {
                    let path = shard_path(prefix, i + 1);
                    panic::catch_unwind(AssertUnwindSafe(|| worker.run(i + 1, shard, &path)))
                        .unwrap_or_else(|cause| {
                            let message = panic_message(cause.as_ref());
                            error!("shard {}: worker panicked: {}", i + 1, message);
                            ShardReport::new(
                                i + 1,
                                path,
                                shard.len(),
                                ShardOutcome::Panicked(message),
                            )
                        })
                })
                .collect()
        });
        drop(pool);
        let report = CensusReport::new(shard_range(prefix, num_workers), shards);
        if report.is_interrupted() {
            warn!("census interrupted");
        } else if !report.is_complete() {
            error!("census incomplete");
        }
        info!(
            "{} rows in {} ms",
            report.rows(),
            start_time.elapsed().as_millis()
        );
        Ok(report)
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(message) = cause.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown cause".to_owned()
    }
}
