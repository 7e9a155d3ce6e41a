//! # Engine Module
//!
//! Deterministic keyword classification and AI-Overview adaptability scoring.
//! Every operation is a pure function of its inputs and the injected configuration.
//!
//! ## Components
//! - `priority`: tier table and search-volume classifier
//! - `signals`: linguistic signal extraction from keyword text
//! - `aio`: four-factor adaptability scorer
//! - `distribution`: per-tier and per-band population statistics
//! - `analyzer`: `KeywordEngine` facade used by the catalog

pub mod aio;
pub mod analyzer;
pub mod distribution;
pub mod priority;
pub mod signals;

pub use aio::{
    AioAnalysis, AioConfig, AioFactor, AioFactors, AioScorer, AioWeights, PredictedPerformance,
};
pub use analyzer::{KeywordAnnotation, KeywordEngine};
pub use distribution::{
    AioDistribution, AioScored, DistributionAggregator, DistributionReport, Prioritized,
};
pub use priority::{PriorityClassifier, PriorityConfig, PriorityTier, PriorityTierConfig};
pub use signals::{IntentClass, TextSignalExtractor, TextSignals};
