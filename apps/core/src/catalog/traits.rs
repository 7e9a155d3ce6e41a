use crate::catalog::messages::AppError;
use crate::models::KeywordRecord;
use async_trait::async_trait;

/// Storage behind the keyword catalog.
///
/// The catalog task is the only writer, so implementations need no
/// read-modify-write coordination of their own; they only have to be safe to
/// share across tasks.
#[async_trait]
pub trait KeywordStore: Send + Sync + 'static {
    /// Fetch a record by id.
    async fn get(&self, id: &str) -> Result<Option<KeywordRecord>, AppError>;

    /// Insert or replace a record.
    async fn put(&self, record: KeywordRecord) -> Result<(), AppError>;

    /// Remove a record, returning it if it existed.
    async fn remove(&self, id: &str) -> Result<Option<KeywordRecord>, AppError>;

    /// Snapshot of every stored record, in no particular order.
    async fn all(&self) -> Result<Vec<KeywordRecord>, AppError>;
}
