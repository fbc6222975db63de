use crate::{
    error::{Error, Result},
    pattern::Template,
    planner::MatchPlan,
};
use log::debug;
use std::{collections::HashSet, fmt};

/// The motif catalog, in output column order.
///
/// The first five are the classic 3- and 4-node motifs; the
/// rest complete the connected 4-node graphs and add common 5-node shapes.
pub static TEMPLATES: [Template; 13] = [
    // p1-p2-p3
    Template::new("m3_1", 3, &[(0, 1), (1, 2)], &[0]),
    // triangle
    Template::new("m3_2", 3, &[(0, 1), (1, 2), (2, 0)], &[0]),
    // p1-p2-p3-p4
    Template::new("m4_1", 4, &[(0, 1), (1, 2), (2, 3)], &[0, 1]),
    // star around p2
    Template::new("m4_2", 4, &[(0, 1), (1, 2), (1, 3)], &[0]),
    // triangle p2-p3-p4 with tail p1
    Template::new("m4_3", 4, &[(0, 1), (1, 2), (2, 3), (3, 1)], &[0, 1, 2]),
    // square
    Template::new("m4_4", 4, &[(0, 1), (1, 2), (2, 3), (3, 0)], &[0]),
    // square with chord p1-p3
    Template::new(
        "m4_5",
        4,
        &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
        &[0, 4],
    ),
    // 4-clique
    Template::new(
        "m4_6",
        4,
        &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
        &[0],
    ),
    // p1-p2-p3-p4-p5
    Template::new("m5_1", 5, &[(0, 1), (1, 2), (2, 3), (3, 4)], &[0, 1]),
    // star around p1
    Template::new("m5_2", 5, &[(0, 1), (0, 2), (0, 3), (0, 4)], &[0]),
    // pentagon
    Template::new(
        "m5_3",
        5,
        &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)],
        &[0],
    ),
    // house: square p1-p2-p3-p4 with roof p5 over p1-p2
    Template::new(
        "m5_4",
        5,
        &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 4), (1, 4)],
        &[0, 1, 2, 4],
    ),
    // bowtie: triangles p1-p2-p3 and p1-p4-p5
    Template::new(
        "m5_5",
        5,
        &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)],
        &[0, 1],
    ),
];

/// A template together with one match plan per anchor role.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    template: Template,
    plans: Vec<MatchPlan>,
}

impl CatalogEntry {
    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn plans(&self) -> &[MatchPlan] {
        &self.plans
    }
}

/// Validated templates with compiled plans. Built once, then shared read-only.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(templates: &[Template]) -> Result<Self> {
        let mut names = HashSet::new();
        let mut entries = Vec::with_capacity(templates.len());
        for &template in templates {
            template.validate()?;
            if !names.insert(template.name()) {
                return Err(Error::InvalidTemplate {
                    name: template.name().to_owned(),
                    reason: "duplicate name".to_owned(),
                });
            }
            let plans = template
                .anchor_roles()
                .iter()
                .map(|&role| MatchPlan::new(&template, role))
                .collect::<Result<Vec<_>>>()?;
            debug!("{}: {} plans", template.name(), plans.len());
            entries.push(CatalogEntry { template, plans });
        }
        Ok(Self { entries })
    }

    /// The catalog of [`TEMPLATES`].
    pub fn standard() -> Result<Self> {
        Self::new(&TEMPLATES)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.template.name())
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry.template)?;
        }
        Ok(())
    }
}
