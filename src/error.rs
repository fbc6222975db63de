//! Error management.

use crate::types::{EId, VId};
use derive_more::Display;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "unknown edge {}", _0)]
    UnknownEdge(EId),
    #[display(fmt = "unknown vertex {}", _0)]
    UnknownVertex(VId),
    #[display(fmt = "duplicate edge {}", _0)]
    DuplicateEdge(EId),
    #[display(fmt = "too many edge types")]
    TooManyEdgeTypes,
    #[display(fmt = "invalid template {}: {}", name, reason)]
    InvalidTemplate { name: String, reason: String },
    #[display(fmt = "worker count must be at least 1")]
    InvalidWorkers,
    #[display(fmt = "thread pool: {}", _0)]
    ThreadPool(String),
    #[display(fmt = "io: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "sqlite: {}", _0)]
    Sqlite(rusqlite::Error),
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Sqlite(e)
    }
}
