//! FILENAME: core/aggregation-engine/src/grouping.rs
//! Group tables keyed by the string form of one record field.
//!
//! Each distinct label is stored once, in order of first occurrence, so that
//! stable sorts downstream break ties by that order. Records whose grouping
//! field is absent never create or join a group.

use std::borrow::Cow;

use engine::{Field, Record};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// Insertion-ordered map with the fast non-cryptographic hasher.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Accumulators per category, in first-occurrence order.
#[derive(Debug, Clone)]
pub struct GroupTable<A> {
    groups: FxIndexMap<String, A>,
}

impl<A> Default for GroupTable<A> {
    fn default() -> Self {
        GroupTable {
            groups: FxIndexMap::default(),
        }
    }
}

impl<A> GroupTable<A> {
    pub fn new() -> Self {
        GroupTable::default()
    }

    /// Buckets `records` by `field`, creating accumulators with `init` and
    /// folding every member into its group with `fold`.
    pub fn build<'a, I, N, F>(records: I, field: Field, mut init: N, mut fold: F) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
        N: FnMut() -> A,
        F: FnMut(&mut A, &'a Record),
    {
        let mut table = GroupTable::new();
        for record in records {
            if let Some(label) = record.text(field) {
                fold(table.entry(label, &mut init), record);
            }
        }
        table
    }

    /// The accumulator for `label`, created on first sight.
    pub fn entry<N>(&mut self, label: Cow<'_, str>, init: N) -> &mut A
    where
        N: FnOnce() -> A,
    {
        if let Some(index) = self.groups.get_index_of(&*label) {
            return &mut self.groups[index];
        }
        self.groups.entry(label.into_owned()).or_insert_with(init)
    }

    pub fn get(&self, label: &str) -> Option<&A> {
        self.groups.get(label)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &A)> + '_ {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_vec(self) -> Vec<(String, A)> {
        self.groups.into_iter().collect()
    }
}
