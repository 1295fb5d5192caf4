//! FILENAME: core/engine/src/dataset.rs
//! PURPOSE: The loaded record collection and its filtered subsequences.
//! CONTEXT: A `Dataset` is decoded once and then shared read-only behind an
//! `Arc`. A `FilteredDataset` never copies records; it keeps the positions of
//! the matching records, in dataset order, plus the filter generation it was
//! computed for.

use std::sync::Arc;

use crate::record::Record;

/// An ordered, read-only sequence of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The subsequence of a dataset that satisfies one filter state.
#[derive(Debug, Clone)]
pub struct FilteredDataset {
    source: Arc<Dataset>,
    /// Positions into `source`, strictly increasing.
    indices: Vec<usize>,
    generation: u64,
}

impl FilteredDataset {
    /// Every record of `source`, in order.
    pub fn unfiltered(source: Arc<Dataset>, generation: u64) -> Self {
        let indices = (0..source.len()).collect();
        FilteredDataset { source, indices, generation }
    }

    pub(crate) fn from_indices(source: Arc<Dataset>, indices: Vec<usize>, generation: u64) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        FilteredDataset { source, indices, generation }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The filter generation this subset belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> &Arc<Dataset> {
        &self.source
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.indices.iter().filter_map(move |&i| self.source.get(i))
    }

    /// Collects the matching records, mostly useful in tests.
    pub fn to_records(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a FilteredDataset {
    type Item = &'a Record;
    type IntoIter = Box<dyn Iterator<Item = &'a Record> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
