//! Relationship-centric network motif census.

pub mod data;
pub mod error;
pub mod executor;
pub mod pattern;
pub mod planner;
pub mod task;
pub mod types;
