use edge_motifs::{
    data::{CsrGraph, Graph},
    error::Error,
    executor::Matcher,
    pattern::{Catalog, Template},
    task::{CensusConfig, Task},
    types::{EId, VId},
};
use itertools::Itertools;
use rusqlite::{params, Connection};
use std::{fs, path::Path};

const ALSO_PURCHASED: &[(VId, VId)] = &[
    (1, 2),
    (2, 3),
    (3, 4),
    (4, 5),
    (5, 1),
    (1, 3),
    (3, 5),
    (5, 2),
    (2, 4),
    (4, 1),
    (1, 6),
    (2, 7),
    (6, 7),
];

fn create_graph(edges: &[(VId, VId)], etype: &str) -> CsrGraph {
    CsrGraph::from_edges(
        edges
            .iter()
            .enumerate()
            .map(|(i, &(src, dst))| (i as EId + 1, src, dst, etype)),
    )
    .unwrap()
}

fn unordered((a, b): (VId, VId)) -> (VId, VId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Counts edge sets containing `anchor` that form a copy of `template`, by trying
/// every edge subset and every vertex assignment.
fn reference_count(graph: &CsrGraph, template: &Template, anchor: EId, all: &[EId]) -> usize {
    let (src, dst) = graph.endpoints(anchor).unwrap();
    if src == dst {
        return 0;
    }
    let others: Vec<EId> = all
        .iter()
        .copied()
        .filter(|&eid| {
            let (a, b) = graph.endpoints(eid).unwrap();
            eid != anchor && a != b
        })
        .collect();
    let mut count = 0;
    for rest in others.into_iter().combinations(template.edges().len() - 1) {
        let mut pairs: Vec<(VId, VId)> = rest
            .iter()
            .chain(std::iter::once(&anchor))
            .map(|&eid| unordered(graph.endpoints(eid).unwrap()))
            .collect();
        pairs.sort_unstable();
        let vertices: Vec<VId> = pairs
            .iter()
            .flat_map(|&(a, b)| vec![a, b])
            .sorted()
            .dedup()
            .collect();
        if vertices.len() != template.node_count() {
            continue;
        }
        let is_copy = vertices
            .iter()
            .copied()
            .permutations(vertices.len())
            .any(|assignment| {
                let mut mapped: Vec<(VId, VId)> = template
                    .edges()
                    .iter()
                    .map(|&(a, b)| unordered((assignment[a], assignment[b])))
                    .collect();
                mapped.sort_unstable();
                mapped == pairs
            });
        if is_copy {
            count += 1;
        }
    }
    count
}

fn assert_matches_reference(graph: &CsrGraph) {
    let catalog = Catalog::standard().unwrap();
    let mut all: Vec<EId> = graph
        .etypes()
        .iter()
        .flat_map(|etype| graph.edges_of_type(etype).collect::<Vec<_>>())
        .collect();
    all.sort_unstable();
    let mut matcher = Matcher::new(graph);
    for &anchor in &all {
        let expected: Vec<usize> = catalog
            .entries()
            .iter()
            .map(|entry| reference_count(graph, entry.template(), anchor, &all))
            .collect();
        assert_eq!(
            matcher.census(&catalog, anchor).unwrap(),
            expected,
            "edge {}",
            anchor
        );
    }
}

fn read_shards(prefix: &Path, num_shards: usize) -> Vec<String> {
    (1..=num_shards)
        .map(|i| {
            let name = format!("motifs-{}.csv", i);
            fs::read_to_string(prefix.with_file_name(name)).unwrap()
        })
        .collect()
}

#[test]
fn test_also_purchased_reference() {
    assert_matches_reference(&create_graph(ALSO_PURCHASED, "ALSO_PURCHASED"));
}

#[test]
fn test_irregular_graph_reference() {
    let graph = CsrGraph::from_edges(vec![
        (1, 1, 2, "R"),
        (2, 2, 1, "R"),
        (3, 2, 3, "R"),
        (4, 3, 3, "R"),
        (5, 3, 4, "S"),
        (6, 4, 1, "S"),
        (7, 4, 5, "R"),
        (8, 5, 6, "S"),
        (9, 6, 4, "R"),
        (10, 1, 3, "R"),
    ])
    .unwrap();
    assert_matches_reference(&graph);
}

#[test]
fn test_census() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("motifs.csv");
    let graph = create_graph(ALSO_PURCHASED, "ALSO_PURCHASED");
    let catalog = Catalog::standard().unwrap();
    let config = CensusConfig::new("ALSO_PURCHASED")
        .output(&prefix)
        .workers(4);
    let report = Task::new(&graph, &catalog, config).run().unwrap();
    assert!(report.is_complete());
    assert!(report.to_string().starts_with("Results written to"));
    let shards = read_shards(&prefix, 4);
    let header = format!("from,to,{}", catalog.names().join(","));
    let mut rows = 0;
    for shard in &shards {
        let mut lines = shard.lines();
        assert_eq!(lines.next(), Some(header.as_str()));
        for line in lines {
            assert_eq!(line.split(',').count(), 2 + catalog.len());
            rows += 1;
        }
    }
    assert_eq!(rows, ALSO_PURCHASED.len());
    // Edge 1 (1-2) lands first in shard 1.
    let first = shards[0].lines().nth(1).unwrap();
    assert!(first.starts_with("1,2,"));
}

#[test]
fn test_deterministic() {
    let graph = create_graph(ALSO_PURCHASED, "ALSO_PURCHASED");
    let catalog = Catalog::standard().unwrap();
    let runs: Vec<Vec<String>> = (0..2)
        .map(|_| {
            let dir = tempfile::tempdir().unwrap();
            let prefix = dir.path().join("motifs.csv");
            let config = CensusConfig::new("ALSO_PURCHASED")
                .output(&prefix)
                .workers(3);
            Task::new(&graph, &catalog, config).run().unwrap();
            read_shards(&prefix, 3)
        })
        .collect();
    assert_eq!(runs[0], runs[1]);
}

#[test]
fn test_unknown_type() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("motifs.csv");
    let graph = create_graph(ALSO_PURCHASED, "ALSO_PURCHASED");
    let catalog = Catalog::standard().unwrap();
    let config = CensusConfig::new("SIMILAR").output(&prefix).workers(2);
    let report = Task::new(&graph, &catalog, config).run().unwrap();
    assert!(report.is_complete());
    assert_eq!(report.rows(), 0);
    for shard in read_shards(&prefix, 2) {
        assert_eq!(shard.lines().count(), 1);
    }
}

#[test]
fn test_interrupted() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("motifs.csv");
    let graph = create_graph(ALSO_PURCHASED, "ALSO_PURCHASED");
    let catalog = Catalog::standard().unwrap();
    let task = Task::new(
        &graph,
        &catalog,
        CensusConfig::new("ALSO_PURCHASED").output(&prefix).workers(2),
    );
    task.cancel_handle().cancel();
    let report = task.run().unwrap();
    assert!(report.is_interrupted());
    assert!(report
        .to_string()
        .starts_with("Census incomplete, attempted: "));
}

#[test]
fn test_zero_workers() {
    let graph = create_graph(ALSO_PURCHASED, "ALSO_PURCHASED");
    let catalog = Catalog::standard().unwrap();
    let task = Task::new(
        &graph,
        &catalog,
        CensusConfig::new("ALSO_PURCHASED").workers(0),
    );
    assert!(matches!(task.run(), Err(Error::InvalidWorkers)));
}

#[test]
fn test_from_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("graph.sqlite3");
    {
        let conn = Connection::open(&db).unwrap();
        conn.execute(
            "CREATE TABLE edges (eid INT, src INT, dst INT, etype TEXT)",
            [],
        )
        .unwrap();
        for (i, &(src, dst)) in ALSO_PURCHASED.iter().enumerate() {
            conn.execute(
                "INSERT INTO edges VALUES (?1, ?2, ?3, ?4)",
                params![i as EId + 1, src, dst, "ALSO_PURCHASED"],
            )
            .unwrap();
        }
    }
    let graph = CsrGraph::from_sqlite(&Connection::open(&db).unwrap()).unwrap();
    assert_eq!(graph.info().num_vertices(), 7);
    assert_eq!(graph.info().num_edges(), 13);
    assert_eq!(graph.count("ALSO_PURCHASED"), 13);
    let catalog = Catalog::standard().unwrap();
    let mut matcher = Matcher::new(&graph);
    // 1-6 only takes part in paths and in the square 1-6-7-2.
    let counts = matcher.census(&catalog, 11).unwrap();
    assert_eq!(counts[1], 0);
    assert_eq!(counts[5], 1);
}
