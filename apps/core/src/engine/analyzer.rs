//! Keyword Engine - facade over classification, scoring and aggregation.
//!
//! Holds the injected configuration and exposes the four pure operations the
//! catalog calls: `classify`, `tier_info`, `score` and `aggregate`. The engine
//! keeps no mutable state, so a single instance can be shared across tasks.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::aio::{AioAnalysis, AioConfig, AioScorer};
use super::distribution::{
    AioDistribution, AioScored, DistributionAggregator, DistributionReport, Prioritized,
};
use super::priority::{PriorityClassifier, PriorityConfig, PriorityTier, PriorityTierConfig};

/// Annotation values the catalog attaches to a keyword record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnnotation {
    pub priority: PriorityTier,
    pub priority_info: PriorityTierConfig,
    pub aio_analysis: AioAnalysis,
}

/// Main engine that orchestrates all analysis components
#[derive(Debug, Clone, Default)]
pub struct KeywordEngine {
    classifier: PriorityClassifier,
    scorer: AioScorer,
    aggregator: DistributionAggregator,
}

impl KeywordEngine {
    /// Create an engine from validated configuration parts.
    pub fn new(priority: PriorityConfig, aio: AioConfig) -> Self {
        Self {
            classifier: PriorityClassifier::new(priority),
            scorer: AioScorer::new(aio),
            aggregator: DistributionAggregator::new(),
        }
    }

    pub fn classify(&self, search_volume: u64) -> PriorityTier {
        self.classifier.classify(search_volume)
    }

    pub fn tier_info(&self, tier: PriorityTier) -> &PriorityTierConfig {
        self.classifier.tier_info(tier)
    }

    pub fn list_configuration(&self) -> &[PriorityTierConfig] {
        self.classifier.list_configuration()
    }

    pub fn score(&self, text: &str) -> AioAnalysis {
        self.scorer.score(text)
    }

    pub fn aggregate<T: Prioritized>(&self, keywords: &[T]) -> DistributionReport {
        self.aggregator.aggregate(keywords)
    }

    pub fn aggregate_aio<T: AioScored>(&self, keywords: &[T]) -> AioDistribution {
        self.aggregator.aggregate_aio(keywords)
    }

    /// Classify and score in one call, snapshotting the tier row.
    pub fn annotate(&self, text: &str, search_volume: u64) -> KeywordAnnotation {
        let start = Instant::now();

        let priority = self.classify(search_volume);
        let annotation = KeywordAnnotation {
            priority,
            priority_info: self.tier_info(priority).clone(),
            aio_analysis: self.score(text),
        };

        debug!(
            "Annotated {:?}: {} / AIO {} ({}) in {:?}",
            text,
            priority,
            annotation.aio_analysis.score,
            annotation.aio_analysis.predicted_performance.label(),
            start.elapsed()
        );
        annotation
    }
}
