use std::collections::{vec_deque, VecDeque};

use crate::CatalogEntry;

/// Completed scans, most recently added first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultStore {
    entries: VecDeque<CatalogEntry>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends `entry`; existing entries keep their relative order.
    pub fn insert(&mut self, entry: CatalogEntry) {
        self.entries.push_front(entry);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            entries: &self.entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Borrowed view of the store in display order.
///
/// Iteration is lazy and can be restarted any number of times.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    entries: &'a VecDeque<CatalogEntry>,
}

impl<'a> Snapshot<'a> {
    pub fn iter(&self) -> vec_deque::Iter<'a, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for Snapshot<'a> {
    type Item = &'a CatalogEntry;
    type IntoIter = vec_deque::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
