//! Compressed sparse adjacency storage.

pub use graph::CsrGraph;

mod create;
mod graph;
