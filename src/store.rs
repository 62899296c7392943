//! Record store abstraction.
//!
//! Handlers only see [`RecordStore`]; production wires in
//! [`crate::dynamodb::DynamoDbStore`] and tests wire in [`MemoryStore`].

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::Record;

/// Point-read access to a key-value table.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the record stored under `key`.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Record found
    /// * `Ok(None)` - No record under this key
    /// * `Err(_)` - The read itself failed
    async fn get_item(&self, key: &str) -> Result<Option<Record>>;

    /// Verify the backing table is reachable.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// In-process store, optionally forced to fail every call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: RwLock::default(),
            failure: Some(message.into()),
        }
    }

    pub fn with_record(self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(id, value);
        self
    }

    pub fn insert(&self, id: impl Into<String>, value: impl Into<String>) {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.insert(id.into(), value.into());
    }

    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(anyhow!("{}", message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<Record>> {
        self.check_failure()?;

        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(key).map(|value| Record {
            id: key.to_string(),
            value: value.clone(),
        }))
    }

    async fn health_check(&self) -> Result<()> {
        self.check_failure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_hit_and_miss() {
        let store = MemoryStore::new().with_record("demo", "hello");

        let record = store.get_item("demo").await.unwrap();
        assert_eq!(
            record,
            Some(Record {
                id: "demo".to_string(),
                value: "hello".to_string(),
            })
        );
        assert_eq!(store.get_item("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_failing() {
        let store = MemoryStore::failing("boom");

        let error = store.get_item("demo").await.unwrap_err();
        assert_eq!(error.to_string(), "boom");
        assert!(store.health_check().await.is_err());
    }
}
