use crate::types::{EId, ELabel, VId};

/// One side of an edge as seen from a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcEntry {
    pub eid: EId,
    pub nid: VId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeEntry {
    pub eid: EId,
    pub src: VId,
    pub dst: VId,
    pub elabel: ELabel,
}
