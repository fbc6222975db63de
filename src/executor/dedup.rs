use crate::types::EId;
use std::collections::HashSet;

/// Collapses occurrences that bind the same set of graph edges.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<Box<[EId]>>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no occurrence with the same edges was inserted before.
    pub fn insert(&mut self, edges: &[EId]) -> bool {
        let mut key: Box<[EId]> = edges.into();
        key.sort_unstable();
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forgets every occurrence but keeps the allocation.
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    /// The distinct occurrences, each as sorted edge ids.
    pub fn occurrences(&self) -> impl Iterator<Item = &[EId]> + '_ {
        self.seen.iter().map(|key| &key[..])
    }
}

/// The distinct occurrences of `occurrences`, each sorted, in ascending order.
pub fn distinct<I, O>(occurrences: I) -> Vec<Vec<EId>>
where
    I: IntoIterator<Item = O>,
    O: AsRef<[EId]>,
{
    let mut dedup = Deduplicator::new();
    for occurrence in occurrences {
        dedup.insert(occurrence.as_ref());
    }
    let mut result: Vec<Vec<EId>> = dedup.occurrences().map(<[EId]>::to_vec).collect();
    result.sort_unstable();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.insert(&[3, 1, 2]));
        assert!(!dedup.insert(&[1, 2, 3]));
        assert!(!dedup.insert(&[2, 3, 1]));
        assert!(dedup.insert(&[1, 2, 4]));
        assert_eq!(dedup.len(), 2);
        dedup.clear();
        assert!(dedup.is_empty());
        assert!(dedup.insert(&[1, 2, 3]));
    }

    #[test]
    fn test_distinct_is_idempotent() {
        let raw: Vec<Vec<EId>> = vec![
            vec![5, 2],
            vec![2, 5],
            vec![7, 2],
            vec![2, 7],
            vec![9, 5],
        ];
        let once = distinct(&raw);
        assert_eq!(once, vec![vec![2, 5], vec![2, 7], vec![5, 9]]);
        assert_eq!(distinct(&once), once);
    }
}
