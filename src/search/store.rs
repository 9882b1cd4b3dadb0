use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use bigdecimal::BigDecimal;
use log::debug;

use crate::expression::{ExpressionTree, normalize};

/// Expressions grouped by the normalized value they evaluate to.
///
/// Every tree in a bucket normalizes to exactly that bucket's key, and
/// trees keep the order in which the search discovered them.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    buckets: BTreeMap<BigDecimal, Vec<ExpressionTree>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `tree` under the normalized form of `value`
    pub fn record(&mut self, value: &BigDecimal, tree: ExpressionTree) {
        let key = normalize(value);
        match self.buckets.entry(key) {
            Entry::Occupied(mut bucket) => bucket.get_mut().push(tree),
            Entry::Vacant(slot) => {
                debug!("New bucket {}", slot.key());
                slot.insert(vec![tree]);
            }
        }
    }

    /// Trees filed under `value` once normalized
    pub fn get(&self, value: &BigDecimal) -> Option<&[ExpressionTree]> {
        self.buckets.get(&normalize(value)).map(Vec::as_slice)
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of trees across all buckets
    pub fn expression_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Buckets in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&BigDecimal, &[ExpressionTree])> {
        self.buckets
            .iter()
            .map(|(key, trees)| (key, trees.as_slice()))
    }
}
