use crate::{
    error::{Error, Result},
    pattern::symmetry::edge_orbits,
    types::{MAX_EDGES, MAX_NODES},
};
use itertools::Itertools;
use std::{collections::BTreeSet, fmt};

/// A motif topology.
///
/// Node slots are `0..node_count` and are printed as `p1..pk`; edge slots are
/// indices into `edges` and are printed as `r1..rm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    name: &'static str,
    node_count: usize,
    edges: &'static [(usize, usize)],
    anchor_roles: &'static [usize],
}

impl Template {
    pub const fn new(
        name: &'static str,
        node_count: usize,
        edges: &'static [(usize, usize)],
        anchor_roles: &'static [usize],
    ) -> Self {
        Self {
            name,
            node_count,
            edges,
            anchor_roles,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edges(&self) -> &'static [(usize, usize)] {
        self.edges
    }

    /// Edge slots the anchor edge is bound to, one per edge orbit.
    pub fn anchor_roles(&self) -> &'static [usize] {
        self.anchor_roles
    }

    /// Checks the structural invariants the matcher relies on.
    pub fn validate(&self) -> Result<()> {
        if self.node_count < 3 || self.node_count > MAX_NODES {
            return Err(self.invalid(format!("{} nodes", self.node_count)));
        }
        if self.edges.is_empty() || self.edges.len() > MAX_EDGES {
            return Err(self.invalid(format!("{} edges", self.edges.len())));
        }
        for (i, &(a, b)) in self.edges.iter().enumerate() {
            if a == b || a >= self.node_count || b >= self.node_count {
                return Err(self.invalid(format!("bad endpoints for r{}", i + 1)));
            }
        }
        if !self.is_connected() {
            return Err(self.invalid("not connected".to_owned()));
        }
        self.validate_anchor_roles()
    }
}

// private methods
impl Template {
    fn invalid(&self, reason: String) -> Error {
        Error::InvalidTemplate {
            name: self.name.to_owned(),
            reason,
        }
    }

    /// Also rejects node slots that no edge touches.
    fn is_connected(&self) -> bool {
        let mut reached = vec![false; self.node_count];
        reached[0] = true;
        let mut changed = true;
        while changed {
            changed = false;
            for &(a, b) in self.edges {
                if reached[a] != reached[b] {
                    reached[a] = true;
                    reached[b] = true;
                    changed = true;
                }
            }
        }
        reached.into_iter().all(|x| x)
    }

    fn validate_anchor_roles(&self) -> Result<()> {
        if self.anchor_roles.is_empty() {
            return Err(self.invalid("no anchor roles".to_owned()));
        }
        if let Some(&role) = self.anchor_roles.iter().find(|&&r| r >= self.edges.len()) {
            return Err(self.invalid(format!("anchor role r{} out of range", role + 1)));
        }
        let orbits = edge_orbits(self);
        let anchored: BTreeSet<usize> = self.anchor_roles.iter().map(|&r| orbits[r]).collect();
        if anchored.len() != self.anchor_roles.len() {
            return Err(self.invalid("two anchor roles are symmetric".to_owned()));
        }
        if let Some(slot) = (0..self.edges.len()).find(|&i| !anchored.contains(&orbits[i])) {
            return Err(self.invalid(format!("r{} is not covered by an anchor role", slot + 1)));
        }
        Ok(())
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}]",
            self.name,
            self.edges
                .iter()
                .map(|&(a, b)| format!("p{}-p{}", a + 1, b + 1))
                .join(" "),
            self.anchor_roles
                .iter()
                .map(|&r| format!("r{}", r + 1))
                .join(" ")
        )
    }
}
