use crate::{
    error::{Error, Result},
    pattern::Template,
};
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Walk an unused edge from the vertex bound to `from` to a fresh vertex for `to`.
    Extend { edge: usize, from: usize, to: usize },
    /// Bind an unused edge between the vertices already bound to `a` and `b`.
    Close { edge: usize, a: usize, b: usize },
}

impl Step {
    pub fn edge(&self) -> usize {
        match *self {
            Step::Extend { edge, .. } | Step::Close { edge, .. } => edge,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Step::Extend { edge, from, to } => {
                write!(f, "r{}:p{}->p{}", edge + 1, from + 1, to + 1)
            }
            Step::Close { edge, a, b } => write!(f, "r{}:p{}=p{}", edge + 1, a + 1, b + 1),
        }
    }
}

/// The order in which one anchor role binds the rest of a template.
///
/// Edges closing a cycle are bound as soon as both of their ends are, so
/// dead branches are cut before the search fans out further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlan {
    role: usize,
    ends: (usize, usize),
    steps: Vec<Step>,
}

impl MatchPlan {
    pub fn new(template: &Template, role: usize) -> Result<Self> {
        let edges = template.edges();
        let invalid = |reason: String| Error::InvalidTemplate {
            name: template.name().to_owned(),
            reason,
        };
        let ends = *edges
            .get(role)
            .ok_or_else(|| invalid(format!("anchor role r{} out of range", role + 1)))?;
        if edges
            .iter()
            .any(|&(a, b)| a >= template.node_count() || b >= template.node_count())
        {
            return Err(invalid("endpoint out of range".to_owned()));
        }
        let mut bound = vec![false; template.node_count()];
        let mut placed = vec![false; edges.len()];
        bound[ends.0] = true;
        bound[ends.1] = true;
        placed[role] = true;
        let mut steps = Vec::with_capacity(edges.len() - 1);
        while steps.len() + 1 < edges.len() {
            let closing =
                (0..edges.len()).find(|&i| !placed[i] && bound[edges[i].0] && bound[edges[i].1]);
            let step = match closing {
                Some(edge) => Step::Close {
                    edge,
                    a: edges[edge].0,
                    b: edges[edge].1,
                },
                None => {
                    let edge = (0..edges.len())
                        .find(|&i| !placed[i] && (bound[edges[i].0] || bound[edges[i].1]))
                        .ok_or_else(|| invalid("not connected".to_owned()))?;
                    let (a, b) = edges[edge];
                    let (from, to) = if bound[a] { (a, b) } else { (b, a) };
                    Step::Extend { edge, from, to }
                }
            };
            if let Step::Extend { to, .. } = step {
                bound[to] = true;
            }
            placed[step.edge()] = true;
            steps.push(step);
        }
        Ok(Self { role, ends, steps })
    }

    /// The edge slot bound to the anchor edge.
    pub fn role(&self) -> usize {
        self.role
    }

    /// Node slots of the anchor edge.
    pub fn ends(&self) -> (usize, usize) {
        self.ends
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl fmt::Display for MatchPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "r{}:p{}-p{}",
            self.role + 1,
            self.ends.0 + 1,
            self.ends.1 + 1
        )?;
        if !self.steps.is_empty() {
            write!(f, " {}", self.steps.iter().join(" "))?;
        }
        Ok(())
    }
}
