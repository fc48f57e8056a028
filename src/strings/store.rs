//! String store: the repository behind a single async lock
//!
//! All mutation goes through the write guard, so a duplicate check and the
//! insert that follows it cannot interleave with another request.

use crate::error::{Error, Result};
use crate::query::FilterSet;
use crate::strings::repository::StringRepository;
use crate::strings::types::StringRecord;
use chrono::Utc;
use tokio::sync::RwLock;

/// In-memory store of analyzed strings
#[derive(Default)]
pub struct StringStore {
    repository: RwLock<StringRepository>,
}

impl StringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze and store a new value.
    ///
    /// Fails with [`Error::DuplicateValue`] if the exact value is already
    /// stored; the collection is left untouched in that case.
    pub async fn create(&self, value: String) -> Result<StringRecord> {
        let mut repository = self.repository.write().await;
        if repository.find_by_value(&value).is_some() {
            return Err(Error::DuplicateValue);
        }

        let record = StringRecord::analyze(value, Utc::now());
        repository.insert(record.clone());

        tracing::info!(
            id = %record.id,
            length = record.properties.length,
            total = repository.count(),
            "Stored string"
        );
        Ok(record)
    }

    /// Get a record by its exact value
    pub async fn get(&self, value: &str) -> Result<StringRecord> {
        self.repository
            .read()
            .await
            .find_by_value(value)
            .cloned()
            .ok_or_else(not_found)
    }

    /// Get a record by its fingerprint
    pub async fn get_by_id(&self, id: &str) -> Result<StringRecord> {
        self.repository
            .read()
            .await
            .find_by_id(id)
            .cloned()
            .ok_or_else(not_found)
    }

    /// Records matching `filters`, in insertion order
    pub async fn list(&self, filters: &FilterSet) -> Vec<StringRecord> {
        let repository = self.repository.read().await;
        let matched: Vec<StringRecord> = repository
            .find_all(filters)
            .into_iter()
            .cloned()
            .collect();
        tracing::debug!(
            matched = matched.len(),
            total = repository.count(),
            "Listed strings"
        );
        matched
    }

    /// Delete the record holding exactly this value
    pub async fn delete(&self, value: &str) -> Result<()> {
        let mut repository = self.repository.write().await;
        if !repository.delete_by_value(value) {
            return Err(not_found());
        }
        tracing::info!(total = repository.count(), "Deleted string");
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.repository.read().await.count()
    }

    pub async fn clear(&self) {
        self.repository.write().await.clear();
        tracing::info!("Cleared all strings");
    }
}

fn not_found() -> Error {
    Error::NotFound("String does not exist in the system".to_string())
}
