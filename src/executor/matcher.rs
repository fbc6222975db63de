use crate::{
    data::Graph,
    error::Result,
    executor::Deduplicator,
    pattern::{Catalog, CatalogEntry},
    planner::{MatchPlan, Step},
    types::{EId, VId, MAX_EDGES, MAX_NODES},
};

/// Graph vertices and edges bound to template slots so far.
///
/// Edges are kept in binding order, which is the plan's step order.
struct Bindings {
    vertices: [VId; MAX_NODES],
    bound: [bool; MAX_NODES],
    edges: [EId; MAX_EDGES],
    num_edges: usize,
}

impl Bindings {
    fn new() -> Self {
        Self {
            vertices: [0; MAX_NODES],
            bound: [false; MAX_NODES],
            edges: [0; MAX_EDGES],
            num_edges: 0,
        }
    }

    fn reset(&mut self) {
        self.bound = [false; MAX_NODES];
        self.num_edges = 0;
    }

    fn bind_vertex(&mut self, slot: usize, vid: VId) {
        self.vertices[slot] = vid;
        self.bound[slot] = true;
    }

    fn unbind_vertex(&mut self, slot: usize) {
        self.bound[slot] = false;
    }

    fn vertex(&self, slot: usize) -> VId {
        self.vertices[slot]
    }

    fn uses_vertex(&self, vid: VId) -> bool {
        (0..MAX_NODES).any(|slot| self.bound[slot] && self.vertices[slot] == vid)
    }

    fn push_edge(&mut self, eid: EId) {
        self.edges[self.num_edges] = eid;
        self.num_edges += 1;
    }

    fn pop_edge(&mut self) {
        self.num_edges -= 1;
    }

    fn uses_edge(&self, eid: EId) -> bool {
        self.edges().contains(&eid)
    }

    fn edges(&self) -> &[EId] {
        &self.edges[..self.num_edges]
    }
}

/// Finds template occurrences around anchor edges.
///
/// One matcher is owned by each worker; its buffers are reused across edges.
pub struct Matcher<'a, G: Graph> {
    graph: &'a G,
    bindings: Bindings,
    dedup: Deduplicator,
}

impl<'a, G: Graph> Matcher<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            bindings: Bindings::new(),
            dedup: Deduplicator::new(),
        }
    }

    /// Calls `visit` with the edges of every embedding that binds `anchor` to
    /// the plan's anchor role, in both orientations.
    ///
    /// An edge set is reported once per embedding, so template automorphisms
    /// that fix the anchor role report it several times.
    pub fn search<F>(&mut self, plan: &MatchPlan, anchor: EId, mut visit: F) -> Result<()>
    where
        F: FnMut(&[EId]),
    {
        search(self.graph, plan, anchor, &mut self.bindings, &mut visit)
    }

    /// Number of distinct occurrences found by all `plans` together.
    pub fn count_plans(&mut self, plans: &[MatchPlan], anchor: EId) -> Result<usize> {
        let graph = self.graph;
        let bindings = &mut self.bindings;
        let dedup = &mut self.dedup;
        dedup.clear();
        for plan in plans {
            search(graph, plan, anchor, bindings, &mut |edges: &[EId]| {
                dedup.insert(edges);
            })?;
        }
        Ok(dedup.len())
    }

    pub fn count(&mut self, entry: &CatalogEntry, anchor: EId) -> Result<usize> {
        self.count_plans(entry.plans(), anchor)
    }

    /// Counts for every catalog entry, in catalog order.
    pub fn census(&mut self, catalog: &Catalog, anchor: EId) -> Result<Vec<usize>> {
        catalog
            .entries()
            .iter()
            .map(|entry| self.count(entry, anchor))
            .collect()
    }
}

fn search<G, F>(
    graph: &G,
    plan: &MatchPlan,
    anchor: EId,
    bindings: &mut Bindings,
    visit: &mut F,
) -> Result<()>
where
    G: Graph,
    F: FnMut(&[EId]),
{
    let (src, dst) = graph.endpoints(anchor)?;
    if src == dst {
        return Ok(());
    }
    let (a, b) = plan.ends();
    for &(x, y) in &[(src, dst), (dst, src)] {
        bindings.reset();
        bindings.bind_vertex(a, x);
        bindings.bind_vertex(b, y);
        bindings.push_edge(anchor);
        descend(graph, plan.steps(), bindings, visit)?;
    }
    Ok(())
}

fn descend<G, F>(graph: &G, steps: &[Step], bindings: &mut Bindings, visit: &mut F) -> Result<()>
where
    G: Graph,
    F: FnMut(&[EId]),
{
    let (step, rest) = match steps.split_first() {
        Some(split) => split,
        None => {
            visit(bindings.edges());
            return Ok(());
        }
    };
    match *step {
        Step::Extend { from, to, .. } => {
            for arc in graph.incident(bindings.vertex(from))? {
                if bindings.uses_edge(arc.eid) || bindings.uses_vertex(arc.nid) {
                    continue;
                }
                bindings.bind_vertex(to, arc.nid);
                bindings.push_edge(arc.eid);
                descend(graph, rest, bindings, visit)?;
                bindings.pop_edge();
                bindings.unbind_vertex(to);
            }
        }
        Step::Close { a, b, .. } => {
            let target = bindings.vertex(b);
            for arc in graph.incident(bindings.vertex(a))? {
                if arc.nid != target || bindings.uses_edge(arc.eid) {
                    continue;
                }
                bindings.push_edge(arc.eid);
                descend(graph, rest, bindings, visit)?;
                bindings.pop_edge();
            }
        }
    }
    Ok(())
}
