//! Ordered, single-writer record collection
//!
//! The repository owns every stored [`StringRecord`] in insertion order.
//! Lookups are linear scans returning the first match. It does not reject
//! duplicates itself; callers check `find_by_value` first (see
//! [`StringStore::create`](crate::strings::StringStore::create), which does
//! both under one write lock).

use crate::query::FilterSet;
use crate::strings::types::StringRecord;

#[derive(Debug, Default)]
pub struct StringRepository {
    records: Vec<StringRecord>,
}

impl StringRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn insert(&mut self, record: StringRecord) {
        self.records.push(record);
    }

    pub fn find_by_id(&self, id: &str) -> Option<&StringRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_value(&self, value: &str) -> Option<&StringRecord> {
        self.records.iter().find(|r| r.value == value)
    }

    /// Records matching `filters`, in insertion order
    pub fn find_all(&self, filters: &FilterSet) -> Vec<&StringRecord> {
        self.records
            .iter()
            .filter(|r| filters.matches(&r.properties, &r.value))
            .collect()
    }

    /// Remove the first record with exactly this value
    pub fn delete_by_value(&mut self, value: &str) -> bool {
        match self.records.iter().position(|r| r.value == value) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
