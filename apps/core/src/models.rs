use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::{
    AioAnalysis, AioScored, KeywordAnnotation, Prioritized, PriorityTier, PriorityTierConfig,
};
use crate::error::AppError;

/// Lifecycle state of a tracked keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordStatus {
    #[default]
    Active,
    Monitoring,
    Paused,
    Archived,
}

/// A keyword tracked by the catalog, with the engine's annotations attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRecord {
    /// The unique identifier for the keyword (UUID).
    pub id: String,
    /// The keyword phrase as entered.
    pub text: String,
    /// Monthly search volume.
    pub search_volume: u64,
    /// Cost per click; never negative.
    pub cpc: f64,
    /// Tier assigned from `search_volume`.
    pub priority: PriorityTier,
    /// Snapshot of the tier row at classification time.
    pub priority_info: PriorityTierConfig,
    /// Shortcut to `aio_analysis.score`.
    pub aio_score: u8,
    pub aio_analysis: AioAnalysis,
    pub status: KeywordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeywordRecord {
    /// Build a record from validated input and a fresh annotation.
    pub fn new(id: String, input: NewKeyword, annotation: KeywordAnnotation, now: DateTime<Utc>) -> Self {
        Self {
            id,
            text: input.text,
            search_volume: input.search_volume,
            cpc: input.cpc,
            priority: annotation.priority,
            priority_info: annotation.priority_info,
            aio_score: annotation.aio_analysis.score,
            aio_analysis: annotation.aio_analysis,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_priority(&mut self, priority: PriorityTier, info: PriorityTierConfig) {
        self.priority = priority;
        self.priority_info = info;
    }

    pub fn set_aio_analysis(&mut self, analysis: AioAnalysis) {
        self.aio_score = analysis.score;
        self.aio_analysis = analysis;
    }
}

impl Prioritized for KeywordRecord {
    fn priority(&self) -> PriorityTier {
        self.priority
    }
}

impl AioScored for KeywordRecord {
    fn aio_score(&self) -> u8 {
        self.aio_score
    }
}

fn check_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "keyword text must not be blank".to_string(),
        ));
    }
    Ok(())
}

fn check_cpc(cpc: f64) -> Result<(), AppError> {
    if !cpc.is_finite() {
        return Err(AppError::Validation(format!("cpc must be finite, got {}", cpc)));
    }
    Ok(())
}

/// Input for creating a keyword.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewKeyword {
    #[validate(length(min = 1, max = 200))]
    pub text: String,
    pub search_volume: u64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub cpc: f64,
    #[serde(default)]
    pub status: Option<KeywordStatus>,
}

impl NewKeyword {
    pub fn new(text: impl Into<String>, search_volume: u64, cpc: f64) -> Self {
        Self {
            text: text.into(),
            search_volume,
            cpc,
            status: None,
        }
    }

    /// Run derived validation plus the checks the derive cannot express.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        check_text(&self.text)?;
        check_cpc(self.cpc)
    }
}

/// Partial update for an existing keyword. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KeywordUpdate {
    #[validate(length(min = 1, max = 200))]
    pub text: Option<String>,
    pub search_volume: Option<u64>,
    #[validate(range(min = 0.0))]
    pub cpc: Option<f64>,
    pub status: Option<KeywordStatus>,
}

impl KeywordUpdate {
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;
        if let Some(text) = &self.text {
            check_text(text)?;
        }
        if let Some(cpc) = self.cpc {
            check_cpc(cpc)?;
        }
        Ok(())
    }
}

/// Query filter for listing keywords. Empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordFilter {
    pub priority: Option<PriorityTier>,
    pub status: Option<KeywordStatus>,
    pub min_aio_score: Option<u8>,
    /// Case-insensitive substring of the keyword text.
    pub search: Option<String>,
    #[serde(default)]
    pub offset: usize,
    pub limit: Option<usize>,
}

impl KeywordFilter {
    pub fn matches(&self, record: &KeywordRecord) -> bool {
        self.priority.map_or(true, |p| record.priority == p)
            && self.status.map_or(true, |s| record.status == s)
            && self.min_aio_score.map_or(true, |min| record.aio_score >= min)
            && self.search.as_ref().map_or(true, |needle| {
                record.text.to_lowercase().contains(&needle.to_lowercase())
            })
    }
}

/// Options for bulk recomputation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeOptions {
    /// Also rescore the AIO analysis, not just the priority tier.
    pub include_aio: bool,
}

/// Outcome of a batch recompute: recomputed records plus ids the catalog did not hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRecompute {
    pub updated: Vec<KeywordRecord>,
    pub skipped: Vec<String>,
}
