use crate::catalog::messages::{AppError, CatalogError, CatalogMessage};
use crate::catalog::store::InMemoryKeywordStore;
use crate::catalog::traits::KeywordStore;
use crate::engine::{AioDistribution, DistributionReport, KeywordEngine};
use crate::models::{
    BatchRecompute, KeywordFilter, KeywordRecord, KeywordUpdate, NewKeyword, RecomputeOptions,
};
use chrono::{TimeDelta, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A handle to the keyword catalog task.
///
/// This is the entry point the resolver layer uses for keyword CRUD and batch
/// recomputation. Every request is a message to a single task that owns the
/// store, so read-modify-write sequences on a record never interleave.
#[derive(Clone)]
pub struct CatalogHandle {
    sender: mpsc::Sender<CatalogMessage>,
    request_timeout: Duration,
}

impl CatalogHandle {
    /// Spawns a catalog backed by an in-memory store and returns a handle to it.
    pub fn new(engine: KeywordEngine) -> Self {
        Self::with_store(engine, Arc::new(InMemoryKeywordStore::new()))
    }

    /// Spawns a catalog over the given store.
    ///
    /// # Arguments
    ///
    /// * `engine` - The engine used to annotate keywords on create, update and recompute.
    /// * `store` - Storage for keyword records; the catalog task is its only writer.
    pub fn with_store<S: KeywordStore>(engine: KeywordEngine, store: Arc<S>) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let runner = CatalogRunner::new(receiver, Arc::new(engine), store);
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override how long each request waits for the catalog to answer.
    ///
    /// The wait covers queueing and the answer. A request whose caller has
    /// already timed out is dropped by the catalog before it runs, so a
    /// timed-out `create` never stores a record.
    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, AppError>>) -> CatalogMessage,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        let message = build(send);
        let exchange = async {
            self.sender
                .send(message)
                .await
                .map_err(|_| CatalogError::Closed)?;
            let answer: Result<T, AppError> = recv.await.map_err(|_| CatalogError::NoResponse)?;
            answer
        };
        // Covers both a full queue and a slow answer.
        timeout(self.request_timeout, exchange).await?
    }

    /// Validates and stores a new keyword, annotated with its priority and AIO analysis.
    #[instrument(skip(self))]
    pub async fn create(&self, input: NewKeyword) -> Result<KeywordRecord, AppError> {
        self.request(|responder| CatalogMessage::Create { input, responder })
            .await
    }

    /// Fetches a keyword, or `AppError::NotFound`.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<KeywordRecord, AppError> {
        let id = id.to_string();
        self.request(|responder| CatalogMessage::Get { id, responder })
            .await
    }

    /// Applies a partial update.
    ///
    /// The priority is recomputed when the search volume changes and the AIO
    /// analysis when the text changes. `updatedAt` always advances.
    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, update: KeywordUpdate) -> Result<KeywordRecord, AppError> {
        let id = id.to_string();
        self.request(|responder| CatalogMessage::Update {
            id,
            update,
            responder,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let id = id.to_string();
        self.request(|responder| CatalogMessage::Delete { id, responder })
            .await
    }

    /// Lists keywords matching `filter`, highest search volume first.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: KeywordFilter) -> Result<Vec<KeywordRecord>, AppError> {
        self.request(|responder| CatalogMessage::List { filter, responder })
            .await
    }

    /// Recomputes the given keywords.
    ///
    /// Ids the catalog does not hold are not an error: they are returned in
    /// `BatchRecompute::skipped`. Duplicate ids are recomputed once.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn recompute_many(
        &self,
        ids: Vec<String>,
        options: RecomputeOptions,
    ) -> Result<BatchRecompute, AppError> {
        self.request(|responder| CatalogMessage::RecomputeMany {
            ids,
            options,
            responder,
        })
        .await
    }

    /// Recomputes every keyword in the catalog.
    #[instrument(skip(self))]
    pub async fn recompute_all(&self, options: RecomputeOptions) -> Result<BatchRecompute, AppError> {
        self.request(|responder| CatalogMessage::RecomputeAll { options, responder })
            .await
    }

    /// Tier distribution over a snapshot of the catalog.
    #[instrument(skip(self))]
    pub async fn distribution(&self) -> Result<DistributionReport, AppError> {
        self.request(|responder| CatalogMessage::Distribution { responder })
            .await
    }

    /// Predicted-performance distribution over a snapshot of the catalog.
    #[instrument(skip(self))]
    pub async fn aio_distribution(&self) -> Result<AioDistribution, AppError> {
        self.request(|responder| CatalogMessage::AioDistribution { responder })
            .await
    }

    /// Asks the catalog task to stop. Later requests fail with `CatalogError::Closed`.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(CatalogMessage::Shutdown)
            .await
            .map_err(|_| CatalogError::Closed)?;
        Ok(())
    }
}

// --- Catalog Runner ---
struct CatalogRunner<S: KeywordStore> {
    receiver: mpsc::Receiver<CatalogMessage>,
    engine: Arc<KeywordEngine>,
    store: Arc<S>,
}

/// Push `updated_at` forward, strictly past its previous value.
fn touch(record: &mut KeywordRecord) {
    let floor = record.updated_at + TimeDelta::microseconds(1);
    record.updated_at = Utc::now().max(floor);
}

impl<S: KeywordStore> CatalogRunner<S> {
    fn new(
        receiver: mpsc::Receiver<CatalogMessage>,
        engine: Arc<KeywordEngine>,
        store: Arc<S>,
    ) -> Self {
        Self {
            receiver,
            engine,
            store,
        }
    }

    async fn run(mut self) {
        info!("Keyword catalog started");
        while let Some(msg) = self.receiver.recv().await {
            if let CatalogMessage::Shutdown = msg {
                info!("Keyword catalog shutting down...");
                break;
            }
            if msg.is_abandoned() {
                warn!("Dropping request whose caller stopped waiting");
                continue;
            }
            self.handle_message(msg).await;
        }
        info!("Keyword catalog stopped");
    }

    async fn handle_message(&self, msg: CatalogMessage) {
        match msg {
            CatalogMessage::Create { input, responder } => {
                let result = self.create(input).await;
                if let Err(e) = &result {
                    error!("Error creating keyword: {}", e);
                }
                let _ = responder.send(result);
            }
            CatalogMessage::Get { id, responder } => {
                let _ = responder.send(self.fetch(&id).await);
            }
            CatalogMessage::Update {
                id,
                update,
                responder,
            } => {
                let result = self.update(&id, update).await;
                if let Err(e) = &result {
                    error!("Error updating keyword {}: {}", id, e);
                }
                let _ = responder.send(result);
            }
            CatalogMessage::Delete { id, responder } => {
                let result = self.delete(&id).await;
                if let Err(e) = &result {
                    error!("Error deleting keyword {}: {}", id, e);
                }
                let _ = responder.send(result);
            }
            CatalogMessage::List { filter, responder } => {
                let _ = responder.send(self.list(&filter).await);
            }
            CatalogMessage::RecomputeMany {
                ids,
                options,
                responder,
            } => {
                let result = self.recompute_many(ids, options).await;
                if let Err(e) = &result {
                    error!("Error during batch recompute: {}", e);
                }
                let _ = responder.send(result);
            }
            CatalogMessage::RecomputeAll { options, responder } => {
                let result = self.recompute_all(options).await;
                if let Err(e) = &result {
                    error!("Error during full recompute: {}", e);
                }
                let _ = responder.send(result);
            }
            CatalogMessage::Distribution { responder } => {
                let result = self
                    .store
                    .all()
                    .await
                    .map(|records| self.engine.aggregate(&records));
                let _ = responder.send(result);
            }
            CatalogMessage::AioDistribution { responder } => {
                let result = self
                    .store
                    .all()
                    .await
                    .map(|records| self.engine.aggregate_aio(&records));
                let _ = responder.send(result);
            }
            CatalogMessage::Shutdown => {}
        }
    }

    async fn create(&self, input: NewKeyword) -> Result<KeywordRecord, AppError> {
        input.check()?;
        let annotation = self.engine.annotate(&input.text, input.search_volume);
        let record = KeywordRecord::new(Uuid::new_v4().to_string(), input, annotation, Utc::now());
        self.store.put(record.clone()).await?;
        info!(
            id = %record.id,
            priority = %record.priority,
            aio_score = record.aio_score,
            "Keyword created"
        );
        Ok(record)
    }

    async fn fetch(&self, id: &str) -> Result<KeywordRecord, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    async fn update(&self, id: &str, update: KeywordUpdate) -> Result<KeywordRecord, AppError> {
        update.check()?;
        let mut record = self.fetch(id).await?;

        let mut reclassify = false;
        let mut rescore = false;
        if let Some(text) = update.text {
            rescore = text != record.text;
            record.text = text;
        }
        if let Some(volume) = update.search_volume {
            reclassify = volume != record.search_volume;
            record.search_volume = volume;
        }
        if let Some(cpc) = update.cpc {
            record.cpc = cpc;
        }
        if let Some(status) = update.status {
            record.status = status;
        }

        if reclassify {
            self.reclassify(&mut record);
        }
        if rescore {
            record.set_aio_analysis(self.engine.score(&record.text));
        }
        touch(&mut record);

        self.store.put(record.clone()).await?;
        info!(id, reclassify, rescore, "Keyword updated");
        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        match self.store.remove(id).await? {
            Some(_) => {
                info!(id, "Keyword deleted");
                Ok(())
            }
            None => Err(AppError::NotFound(id.to_string())),
        }
    }

    async fn list(&self, filter: &KeywordFilter) -> Result<Vec<KeywordRecord>, AppError> {
        let mut records: Vec<KeywordRecord> = self
            .store
            .all()
            .await?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();
        records.sort_by(|a, b| {
            b.search_volume
                .cmp(&a.search_volume)
                .then_with(|| a.text.cmp(&b.text))
        });

        Ok(records
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect())
    }

    fn reclassify(&self, record: &mut KeywordRecord) {
        let tier = self.engine.classify(record.search_volume);
        record.set_priority(tier, self.engine.tier_info(tier).clone());
    }

    fn recompute(&self, record: &mut KeywordRecord, options: RecomputeOptions) {
        self.reclassify(record);
        if options.include_aio {
            record.set_aio_analysis(self.engine.score(&record.text));
        }
        touch(record);
    }

    async fn recompute_many(
        &self,
        ids: Vec<String>,
        options: RecomputeOptions,
    ) -> Result<BatchRecompute, AppError> {
        let mut seen = HashSet::new();
        let mut batch = BatchRecompute::default();

        for id in ids {
            if !seen.insert(id.clone()) {
                continue;
            }
            match self.store.get(&id).await? {
                Some(mut record) => {
                    self.recompute(&mut record, options);
                    self.store.put(record.clone()).await?;
                    batch.updated.push(record);
                }
                None => {
                    warn!(%id, "Skipping recompute for unknown keyword");
                    batch.skipped.push(id);
                }
            }
        }

        info!(
            updated = batch.updated.len(),
            skipped = batch.skipped.len(),
            include_aio = options.include_aio,
            "Batch recompute finished"
        );
        Ok(batch)
    }

    async fn recompute_all(&self, options: RecomputeOptions) -> Result<BatchRecompute, AppError> {
        let mut records = self.store.all().await?;
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let mut batch = BatchRecompute::default();
        for mut record in records {
            self.recompute(&mut record, options);
            self.store.put(record.clone()).await?;
            batch.updated.push(record);
        }

        info!(updated = batch.updated.len(), "Full recompute finished");
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Store whose writes always fail, to check error propagation.
    struct ReadOnlyStore {
        inner: InMemoryKeywordStore,
    }

    #[async_trait]
    impl KeywordStore for ReadOnlyStore {
        async fn get(&self, id: &str) -> Result<Option<KeywordRecord>, AppError> {
            self.inner.get(id).await
        }

        async fn put(&self, _record: KeywordRecord) -> Result<(), AppError> {
            Err(AppError::Internal("store is read-only".to_string()))
        }

        async fn remove(&self, _id: &str) -> Result<Option<KeywordRecord>, AppError> {
            Err(AppError::Internal("store is read-only".to_string()))
        }

        async fn all(&self) -> Result<Vec<KeywordRecord>, AppError> {
            self.inner.all().await
        }
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let store = Arc::new(ReadOnlyStore {
            inner: InMemoryKeywordStore::new(),
        });
        let handle = CatalogHandle::with_store(KeywordEngine::default(), store);

        let result = handle.create(NewKeyword::new("eufy doorbell", 12_000, 0.8)).await;
        match result {
            Err(AppError::Internal(msg)) => assert!(msg.contains("read-only")),
            other => panic!("expected Internal error, got {:?}", other),
        }

        // The catalog keeps serving after a failed write.
        let report = handle.distribution().await.unwrap();
        assert_eq!(report.total, 0);
    }

    #[tokio::test]
    async fn test_requests_after_shutdown_fail() {
        let handle = CatalogHandle::new(KeywordEngine::default());
        handle.shutdown().await.unwrap();

        // Give the task a moment to drop its receiver.
        tokio::time::sleep(Duration::from_millis(20)).await;

        let result = handle.get("anything").await;
        assert!(matches!(result, Err(AppError::Catalog(CatalogError::Closed))));
    }

    #[test]
    fn test_touch_always_advances() {
        let engine = KeywordEngine::default();
        let far_future = Utc::now() + TimeDelta::days(1);
        let mut record = KeywordRecord::new(
            "kw".to_string(),
            NewKeyword::new("eufy", 3_000, 0.0),
            engine.annotate("eufy", 3_000),
            far_future,
        );

        touch(&mut record);
        assert!(record.updated_at > far_future);
    }
}
