use crate::{
    data::{
        types::{ArcEntry, EdgeEntry},
        Graph, GraphInfo,
    },
    error::{Error, Result},
    types::{EId, VId},
};

/// The CSR data graph.
///
/// ```text
/// vids:    | v0 | v1 | v2 | ...                  (sorted)
/// offsets: | 0  | d0 | d0+d1 | ...   | num_arcs  (vids.len() + 1 entries)
/// arcs:    | ArcEntry ... of v0 | ArcEntry ... of v1 | ...
/// edges:   | EdgeEntry | ...                       (sorted by eid)
/// ```
///
/// A non-loop edge contributes one arc to each endpoint, a self-loop one arc.
pub struct CsrGraph {
    pub(super) vids: Vec<VId>,
    pub(super) offsets: Vec<usize>,
    pub(super) arcs: Vec<ArcEntry>,
    pub(super) edges: Vec<EdgeEntry>,
    pub(super) etypes: Vec<String>,
}

impl CsrGraph {
    /// Names of the edge types, indexed by `ELabel`.
    pub fn etypes(&self) -> &[String] {
        &self.etypes
    }

    /// Number of edges labelled `etype`.
    pub fn count(&self, etype: &str) -> usize {
        self.edges_of_type(etype).count()
    }

    fn edge(&self, eid: EId) -> Result<&EdgeEntry> {
        self.edges
            .binary_search_by_key(&eid, |e| e.eid)
            .map(|idx| &self.edges[idx])
            .map_err(|_| Error::UnknownEdge(eid))
    }
}

impl Graph for CsrGraph {
    fn edges_of_type<'a>(&'a self, etype: &str) -> Box<dyn Iterator<Item = EId> + 'a> {
        match self.etypes.iter().position(|name| name == etype) {
            Some(elabel) => Box::new(
                self.edges
                    .iter()
                    .filter(move |e| e.elabel as usize == elabel)
                    .map(|e| e.eid),
            ),
            None => Box::new(std::iter::empty()),
        }
    }

    fn endpoints(&self, eid: EId) -> Result<(VId, VId)> {
        self.edge(eid).map(|e| (e.src, e.dst))
    }

    fn incident(&self, vid: VId) -> Result<&[ArcEntry]> {
        let idx = self
            .vids
            .binary_search(&vid)
            .map_err(|_| Error::UnknownVertex(vid))?;
        Ok(&self.arcs[self.offsets[idx]..self.offsets[idx + 1]])
    }

    fn info(&self) -> GraphInfo {
        GraphInfo::new(self.vids.len(), self.edges.len(), self.etypes.len())
    }
}
