use serde::Serialize;
use tokio::sync::oneshot;

use crate::engine::{AioDistribution, DistributionReport};
use crate::models::{
    BatchRecompute, KeywordFilter, KeywordRecord, KeywordUpdate, NewKeyword, RecomputeOptions,
};

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Failures of the channel between a `CatalogHandle` and its task.
#[derive(Debug, thiserror::Error, Serialize, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog task has stopped and no longer accepts messages.
    #[error("Catalog task is not running")]
    Closed,
    /// The catalog task dropped the request without answering.
    #[error("Catalog task failed to respond")]
    NoResponse,
}

type Responder<T> = oneshot::Sender<Result<T, AppError>>;

/// Messages that can be sent to the catalog task.
#[derive(Debug)]
pub enum CatalogMessage {
    /// Validate, annotate and store a new keyword.
    Create {
        input: NewKeyword,
        responder: Responder<KeywordRecord>,
    },
    Get {
        id: String,
        responder: Responder<KeywordRecord>,
    },
    /// Apply a partial update, recomputing annotations for changed inputs.
    Update {
        id: String,
        update: KeywordUpdate,
        responder: Responder<KeywordRecord>,
    },
    Delete {
        id: String,
        responder: Responder<()>,
    },
    List {
        filter: KeywordFilter,
        responder: Responder<Vec<KeywordRecord>>,
    },
    /// Recompute the given ids; absent ids are reported as skipped.
    RecomputeMany {
        ids: Vec<String>,
        options: RecomputeOptions,
        responder: Responder<BatchRecompute>,
    },
    RecomputeAll {
        options: RecomputeOptions,
        responder: Responder<BatchRecompute>,
    },
    /// Tier distribution over a snapshot of the whole catalog.
    Distribution {
        responder: Responder<DistributionReport>,
    },
    AioDistribution {
        responder: Responder<AioDistribution>,
    },
    /// A command to stop the catalog task.
    Shutdown,
}

impl CatalogMessage {
    /// Whether the caller stopped waiting for the answer, e.g. after a timeout.
    pub fn is_abandoned(&self) -> bool {
        match self {
            CatalogMessage::Create { responder, .. } => responder.is_closed(),
            CatalogMessage::Get { responder, .. } => responder.is_closed(),
            CatalogMessage::Update { responder, .. } => responder.is_closed(),
            CatalogMessage::Delete { responder, .. } => responder.is_closed(),
            CatalogMessage::List { responder, .. } => responder.is_closed(),
            CatalogMessage::RecomputeMany { responder, .. } => responder.is_closed(),
            CatalogMessage::RecomputeAll { responder, .. } => responder.is_closed(),
            CatalogMessage::Distribution { responder } => responder.is_closed(),
            CatalogMessage::AioDistribution { responder } => responder.is_closed(),
            CatalogMessage::Shutdown => false,
        }
    }
}
