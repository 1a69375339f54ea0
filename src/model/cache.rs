//! Row cache: derived [`LogLine`]s keyed by row index.
//!
//! Entries are created on first access and stored sparsely, so jumping to the
//! end of a long file only caches the rows actually looked at. The cache only
//! ever changes through its explicit mutation points: [`RowCache::insert`],
//! [`RowCache::grow_to`] and [`RowCache::clear`].

use crate::parser::LogLine;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RowCache {
    rows: HashMap<usize, LogLine>,
    /// Number of rows the cache covers, cached or not
    bound: usize,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, row: usize) -> Option<&LogLine> {
        self.rows.get(&row)
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains_key(&row)
    }

    /// Store the derived line for `row`, replacing any previous entry
    pub fn insert(&mut self, row: usize, line: LogLine) -> &LogLine {
        self.bound = self.bound.max(row + 1);
        match self.rows.entry(row) {
            Entry::Occupied(mut entry) => {
                entry.insert(line);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(line),
        }
    }

    /// Cover `rows` rows without touching existing entries; allocates nothing
    pub fn grow_to(&mut self, rows: usize) {
        self.bound = self.bound.max(rows);
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.rows.clear();
        self.bound = 0;
    }

    /// Number of rows the cache covers
    pub fn capacity(&self) -> usize {
        self.bound
    }

    /// Number of rows actually cached
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
