//! The data graph.

pub use csr::CsrGraph;
pub use info::GraphInfo;
pub use types::ArcEntry;

use crate::{
    error::Result,
    types::{EId, VId},
};

pub mod csr;

mod info;
mod types;

/// Read access to an undirected, typed multigraph.
///
/// Implementations must stay unchanged for as long as they are borrowed, since
/// census workers traverse them concurrently.
pub trait Graph: Sync {
    /// Edges labelled `etype`, each exactly once, in a fixed order.
    fn edges_of_type<'a>(&'a self, etype: &str) -> Box<dyn Iterator<Item = EId> + 'a>;

    /// The stored `(src, dst)` of an edge.
    fn endpoints(&self, eid: EId) -> Result<(VId, VId)>;

    /// Every edge touching `vid`, of any type, with its other endpoint.
    fn incident(&self, vid: VId) -> Result<&[ArcEntry]>;

    fn info(&self) -> GraphInfo;
}
