use crate::{
    error::{Error, Result},
    types::EId,
};

/// Anchor edges dealt round-robin into shards, one per worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    shards: Vec<Vec<EId>>,
}

impl Partition {
    /// The `i`-th edge drawn goes to shard `i mod num_shards`.
    pub fn round_robin<I>(edges: I, num_shards: usize) -> Result<Self>
    where
        I: IntoIterator<Item = EId>,
    {
        if num_shards == 0 {
            return Err(Error::InvalidWorkers);
        }
        let mut shards = vec![vec![]; num_shards];
        for (counter, eid) in edges.into_iter().enumerate() {
            shards[counter % num_shards].push(eid);
        }
        Ok(Self { shards })
    }

    pub fn shards(&self) -> &[Vec<EId>] {
        &self.shards
    }

    pub fn num_shards(&self) -> usize {
        self.shards.len()
    }

    pub fn num_edges(&self) -> usize {
        self.shards.iter().map(Vec::len).sum()
    }
}
