use crate::catalog::messages::AppError;
use crate::catalog::traits::KeywordStore;
use crate::models::KeywordRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keyword storage held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryKeywordStore {
    records: RwLock<HashMap<String, KeywordRecord>>,
}

impl InMemoryKeywordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl KeywordStore for InMemoryKeywordStore {
    async fn get(&self, id: &str) -> Result<Option<KeywordRecord>, AppError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn put(&self, record: KeywordRecord) -> Result<(), AppError> {
        self.records.write().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<Option<KeywordRecord>, AppError> {
        Ok(self.records.write().await.remove(id))
    }

    async fn all(&self) -> Result<Vec<KeywordRecord>, AppError> {
        Ok(self.records.read().await.values().cloned().collect())
    }
}
