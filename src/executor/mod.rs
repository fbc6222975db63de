//! The executor.

pub use dedup::{distinct, Deduplicator};
pub use matcher::Matcher;
pub use output::{shard_path, shard_range, CensusRow, CsvSink};
pub use worker::{ShardOutcome, ShardReport, Worker};

mod dedup;
mod matcher;
mod output;
mod worker;
