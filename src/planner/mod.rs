//! The planner.

pub use partition::Partition;
pub use plan::{MatchPlan, Step};

mod partition;
mod plan;
