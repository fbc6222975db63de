//! Various types related to the motif census.

/// The vertex id type.
pub type VId = i64;

/// The edge id type.
pub type EId = i64;

/// The edge label type, an index into the graph's table of edge type names.
pub type ELabel = u16;

/// The largest number of nodes a pattern template may have.
pub const MAX_NODES: usize = 5;

/// The largest number of edges a pattern template may have.
pub const MAX_EDGES: usize = MAX_NODES * (MAX_NODES - 1) / 2;
