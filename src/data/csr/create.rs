use super::CsrGraph;
use crate::{
    data::types::{ArcEntry, EdgeEntry},
    error::{Error, Result},
    types::{EId, ELabel, VId},
};
use log::info;
use std::{collections::HashMap, convert::TryFrom};

impl CsrGraph {
    /// Builds the graph from `(eid, src, dst, etype)` tuples.
    pub fn from_edges<E, S>(edges: E) -> Result<Self>
    where
        E: IntoIterator<Item = (EId, VId, VId, S)>,
        S: AsRef<str>,
    {
        let (mut edges, etypes) = create_edge_entries(edges)?;
        edges.sort_unstable_by_key(|e| e.eid);
        if let Some(pair) = edges.windows(2).find(|pair| pair[0].eid == pair[1].eid) {
            return Err(Error::DuplicateEdge(pair[0].eid));
        }
        let mut vids: Vec<VId> = edges.iter().flat_map(|e| vec![e.src, e.dst]).collect();
        vids.sort_unstable();
        vids.dedup();
        let (offsets, arcs) = create_arcs(&vids, &edges)?;
        info!(
            "csr: {} vertices, {} edges, {} edge types",
            vids.len(),
            edges.len(),
            etypes.len()
        );
        Ok(Self {
            vids,
            offsets,
            arcs,
            edges,
            etypes,
        })
    }

    /// Reads the data graph stored in the SQLite3 database behind `conn`.
    ///
    /// The database must have the following schema:
    ///
    /// ```sql
    /// CREATE TABLE edges (eid INT, src INT, dst INT, etype TEXT);
    /// ```
    pub fn from_sqlite(conn: &rusqlite::Connection) -> Result<Self> {
        let mut stmt = conn.prepare("SELECT eid, src, dst, etype FROM edges")?;
        let edges = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, EId>(0)?,
                    row.get::<_, VId>(1)?,
                    row.get::<_, VId>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Self::from_edges(edges)
    }
}

fn create_edge_entries<E, S>(edges: E) -> Result<(Vec<EdgeEntry>, Vec<String>)>
where
    E: IntoIterator<Item = (EId, VId, VId, S)>,
    S: AsRef<str>,
{
    let mut elabels: HashMap<String, ELabel> = HashMap::new();
    let mut etypes = vec![];
    let mut entries = vec![];
    for (eid, src, dst, etype) in edges {
        let etype = etype.as_ref();
        let elabel = match elabels.get(etype) {
            Some(&elabel) => elabel,
            None => {
                let elabel =
                    ELabel::try_from(etypes.len()).map_err(|_| Error::TooManyEdgeTypes)?;
                elabels.insert(etype.to_owned(), elabel);
                etypes.push(etype.to_owned());
                elabel
            }
        };
        entries.push(EdgeEntry {
            eid,
            src,
            dst,
            elabel,
        });
    }
    Ok((entries, etypes))
}

/// Returns `(offsets, arcs)` for the sorted, deduplicated `vids`.
fn create_arcs(vids: &[VId], edges: &[EdgeEntry]) -> Result<(Vec<usize>, Vec<ArcEntry>)> {
    let position = |vid: VId| {
        vids.binary_search(&vid)
            .map_err(|_| Error::UnknownVertex(vid))
    };
    let mut offsets = vec![0; vids.len() + 1];
    for e in edges {
        offsets[position(e.src)? + 1] += 1;
        if e.src != e.dst {
            offsets[position(e.dst)? + 1] += 1;
        }
    }
    for i in 1..offsets.len() {
        offsets[i] += offsets[i - 1];
    }
    let mut arcs = vec![ArcEntry { eid: 0, nid: 0 }; offsets[vids.len()]];
    let mut next = offsets.clone();
    for e in edges {
        let src = position(e.src)?;
        arcs[next[src]] = ArcEntry {
            eid: e.eid,
            nid: e.dst,
        };
        next[src] += 1;
        if e.src != e.dst {
            let dst = position(e.dst)?;
            arcs[next[dst]] = ArcEntry {
                eid: e.eid,
                nid: e.src,
            };
            next[dst] += 1;
        }
    }
    Ok((offsets, arcs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Graph;
    use rusqlite::params;

    #[test]
    fn test_create_arcs() {
        let edges = vec![
            EdgeEntry {
                eid: 1,
                src: 7,
                dst: 9,
                elabel: 0,
            },
            EdgeEntry {
                eid: 2,
                src: 9,
                dst: 9,
                elabel: 0,
            },
        ];
        let (offsets, arcs) = create_arcs(&[7, 9], &edges).unwrap();
        assert_eq!(offsets, vec![0, 1, 3]);
        assert_eq!(
            arcs,
            vec![
                ArcEntry { eid: 1, nid: 9 },
                ArcEntry { eid: 1, nid: 7 },
                ArcEntry { eid: 2, nid: 9 },
            ]
        );
    }

    #[test]
    fn test_duplicate_edge() {
        let result = CsrGraph::from_edges(vec![(1, 1, 2, "A"), (2, 2, 3, "A"), (1, 3, 4, "B")]);
        assert!(matches!(result, Err(Error::DuplicateEdge(1))));
    }

    #[test]
    fn test_empty() {
        let graph = CsrGraph::from_edges(Vec::<(EId, VId, VId, String)>::new()).unwrap();
        assert_eq!(graph.info().num_vertices(), 0);
        assert_eq!(graph.edges_of_type("A").count(), 0);
    }

    #[test]
    fn test_from_sqlite() {
        let edges: Vec<(EId, VId, VId, &str)> = vec![
            (1, 10, 20, "ALSO_PURCHASED"),
            (2, 20, 30, "ALSO_PURCHASED"),
            (3, 30, 10, "VIEWED"),
        ];
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE edges (eid INT, src INT, dst INT, etype TEXT)",
            [],
        )
        .unwrap();
        for &(eid, src, dst, etype) in &edges {
            conn.execute(
                "INSERT INTO edges VALUES (?1, ?2, ?3, ?4)",
                params![eid, src, dst, etype],
            )
            .unwrap();
        }
        let graph = CsrGraph::from_sqlite(&conn).unwrap();
        assert_eq!(graph.etypes(), &["ALSO_PURCHASED", "VIEWED"]);
        assert_eq!(
            graph.edges_of_type("ALSO_PURCHASED").collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(graph.endpoints(3).unwrap(), (30, 10));
        assert_eq!(graph.incident(10).unwrap().len(), 2);
    }

    #[test]
    fn test_from_sqlite_missing_table() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        assert!(matches!(
            CsrGraph::from_sqlite(&conn),
            Err(Error::Sqlite(_))
        ));
    }
}
