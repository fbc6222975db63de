//! Automorphisms of pattern templates.
//!
//! Templates have at most five nodes, so the automorphism group is found by
//! trying every node permutation.

use crate::pattern::Template;
use itertools::Itertools;

fn unordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn sorted_pairs<I: IntoIterator<Item = (usize, usize)>>(pairs: I) -> Vec<(usize, usize)> {
    let mut pairs: Vec<_> = pairs.into_iter().map(|(a, b)| unordered(a, b)).collect();
    pairs.sort_unstable();
    pairs
}

/// Node permutations that map the template's edge multiset onto itself.
///
/// `p[i]` is the image of node slot `i`. The identity always comes first.
pub fn automorphisms(template: &Template) -> Vec<Vec<usize>> {
    let k = template.node_count();
    let edges = sorted_pairs(template.edges().iter().copied());
    (0..k)
        .permutations(k)
        .filter(|p| sorted_pairs(edges.iter().map(|&(a, b)| (p[a], p[b]))) == edges)
        .collect()
}

/// Labels every edge slot with the smallest slot index of its orbit.
///
/// Parallel template edges share an orbit.
pub fn edge_orbits(template: &Template) -> Vec<usize> {
    let pairs: Vec<_> = template
        .edges()
        .iter()
        .map(|&(a, b)| unordered(a, b))
        .collect();
    let autos = automorphisms(template);
    pairs
        .iter()
        .map(|&(a, b)| {
            autos
                .iter()
                .filter_map(|p| {
                    let image = unordered(p[a], p[b]);
                    pairs.iter().position(|&pair| pair == image)
                })
                .min()
                .unwrap_or(0)
        })
        .collect()
}
