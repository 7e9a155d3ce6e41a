//! AI-Overview adaptability scoring.
//!
//! Combines four independent factors derived from [`TextSignals`] into a 0-100
//! score with a per-factor breakdown and advisory recommendations. Keywords
//! phrased as natural-language questions, with one clear intent and a phrase
//! shape that maps onto a structured answer, score highest.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::signals::{TextSignalExtractor, TextSignals};
use crate::error::AppError;

/// Recommendation emitted first when the keyword has no usable text.
pub const EMPTY_TEXT_RECOMMENDATION: &str = "Keyword needs more descriptive text";

/// Scores at or above this band are predicted to perform well.
const HIGH_PERFORMANCE_MIN: u8 = 70;
const MEDIUM_PERFORMANCE_MIN: u8 = 40;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// The four scoring factors, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AioFactor {
    QuestionTypeMatch,
    SearchIntentClarity,
    ContentStructure,
    CompetitiveEnvironment,
}

impl AioFactor {
    pub const ALL: [AioFactor; 4] = [
        AioFactor::QuestionTypeMatch,
        AioFactor::SearchIntentClarity,
        AioFactor::ContentStructure,
        AioFactor::CompetitiveEnvironment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AioFactor::QuestionTypeMatch => "questionTypeMatch",
            AioFactor::SearchIntentClarity => "searchIntentClarity",
            AioFactor::ContentStructure => "contentStructure",
            AioFactor::CompetitiveEnvironment => "competitiveEnvironment",
        }
    }

    /// Advice given when this factor falls under the recommendation threshold.
    pub fn recommendation(&self) -> &'static str {
        match self {
            AioFactor::QuestionTypeMatch => {
                "Rephrase the keyword as a question (how, what, why) to match conversational AI queries"
            }
            AioFactor::SearchIntentClarity => {
                "Sharpen the search intent around one informational, comparative or transactional cue"
            }
            AioFactor::ContentStructure => {
                "Target an answer shape AI overviews can lift directly, such as a how-to or comparison"
            }
            AioFactor::CompetitiveEnvironment => {
                "Add long-tail modifiers like model, use case or year to move away from contested head terms"
            }
        }
    }
}

impl fmt::Display for AioFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-factor sub-scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AioFactors {
    pub question_type_match: u8,
    pub search_intent_clarity: u8,
    pub content_structure: u8,
    pub competitive_environment: u8,
}

impl AioFactors {
    fn uniform(value: u8) -> Self {
        Self {
            question_type_match: value,
            search_intent_clarity: value,
            content_structure: value,
            competitive_environment: value,
        }
    }

    pub fn get(&self, factor: AioFactor) -> u8 {
        match factor {
            AioFactor::QuestionTypeMatch => self.question_type_match,
            AioFactor::SearchIntentClarity => self.search_intent_clarity,
            AioFactor::ContentStructure => self.content_structure,
            AioFactor::CompetitiveEnvironment => self.competitive_environment,
        }
    }
}

/// Categorical label derived from the score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictedPerformance {
    High,
    Medium,
    Low,
}

impl PredictedPerformance {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_PERFORMANCE_MIN {
            PredictedPerformance::High
        } else if score >= MEDIUM_PERFORMANCE_MIN {
            PredictedPerformance::Medium
        } else {
            PredictedPerformance::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PredictedPerformance::High => "high",
            PredictedPerformance::Medium => "medium",
            PredictedPerformance::Low => "low",
        }
    }
}

/// Full scoring result for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AioAnalysis {
    pub score: u8,
    pub factors: AioFactors,
    pub recommendations: Vec<String>,
    pub predicted_performance: PredictedPerformance,
}

/// Factor weights; must be finite, non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AioWeights {
    pub question_type_match: f64,
    pub search_intent_clarity: f64,
    pub content_structure: f64,
    pub competitive_environment: f64,
}

impl Default for AioWeights {
    fn default() -> Self {
        Self {
            question_type_match: 0.25,
            search_intent_clarity: 0.25,
            content_structure: 0.25,
            competitive_environment: 0.25,
        }
    }
}

impl AioWeights {
    /// Build weights from values in factor declaration order.
    pub fn new(
        question_type_match: f64,
        search_intent_clarity: f64,
        content_structure: f64,
        competitive_environment: f64,
    ) -> Result<Self, AppError> {
        let weights = Self {
            question_type_match,
            search_intent_clarity,
            content_structure,
            competitive_environment,
        };
        weights.validate()?;
        Ok(weights)
    }

    /// Parse `"w1,w2,w3,w4"` in factor declaration order.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let values = raw
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| AppError::Config(format!("invalid AIO weight {:?}: {}", part, e)))
            })
            .collect::<Result<Vec<f64>, AppError>>()?;

        match values.as_slice() {
            [q, i, c, e] => Self::new(*q, *i, *c, *e),
            _ => Err(AppError::Config(format!(
                "expected 4 AIO weights, got {}",
                values.len()
            ))),
        }
    }

    pub fn get(&self, factor: AioFactor) -> f64 {
        match factor {
            AioFactor::QuestionTypeMatch => self.question_type_match,
            AioFactor::SearchIntentClarity => self.search_intent_clarity,
            AioFactor::ContentStructure => self.content_structure,
            AioFactor::CompetitiveEnvironment => self.competitive_environment,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for factor in AioFactor::ALL {
            let weight = self.get(factor);
            if !weight.is_finite() || weight < 0.0 {
                return Err(AppError::Config(format!(
                    "weight for {} must be a non-negative number, got {}",
                    factor, weight
                )));
            }
        }
        let sum: f64 = AioFactor::ALL.iter().map(|f| self.get(*f)).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AppError::Config(format!(
                "AIO weights must sum to 1, got {}",
                sum
            )));
        }
        Ok(())
    }
}

/// Tunable scorer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AioConfig {
    pub weights: AioWeights,
    /// Factors strictly below this value produce a recommendation.
    pub recommendation_threshold: u8,
    /// Value every factor takes when the text is empty.
    pub empty_floor: u8,
}

impl Default for AioConfig {
    fn default() -> Self {
        Self {
            weights: AioWeights::default(),
            recommendation_threshold: 60,
            empty_floor: 10,
        }
    }
}

impl AioConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.weights.validate()?;
        if self.recommendation_threshold > 100 || self.empty_floor > 100 {
            return Err(AppError::Config(
                "recommendation threshold and empty floor must be within 0-100".to_string(),
            ));
        }
        Ok(())
    }
}

fn clamp_factor(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

/// Deterministic AI-Overview adaptability scorer.
#[derive(Debug, Clone, Default)]
pub struct AioScorer {
    config: AioConfig,
    extractor: TextSignalExtractor,
}

impl AioScorer {
    pub fn new(config: AioConfig) -> Self {
        Self {
            config,
            extractor: TextSignalExtractor::new(),
        }
    }

    pub fn config(&self) -> &AioConfig {
        &self.config
    }

    fn question_type_match(&self, signals: &TextSignals) -> u8 {
        let mut score = 30;
        let markers = signals.question_markers.len();
        if markers >= 1 {
            score += 40;
        }
        if markers >= 2 {
            score += 10;
        }
        if signals.has_question_mark {
            score += 10;
        }
        if signals.token_count >= 3 {
            score += 20;
        }
        clamp_factor(score)
    }

    fn search_intent_clarity(&self, signals: &TextSignals) -> u8 {
        let mut score = match signals.intent_cues.len() {
            0 => 40,
            1 => 80,
            _ => 55,
        };
        match signals.token_count {
            0..=1 => score -= 30,
            3..=6 => score += 15,
            n if n > 8 => score -= 25,
            _ => {}
        }
        clamp_factor(score)
    }

    fn content_structure(&self, signals: &TextSignals) -> u8 {
        let mut score = 25 + 25 * signals.structure_markers.len().min(3) as i32;
        if signals.has_digits {
            score += 10;
        }
        if signals.has_enumerable_noun {
            score += 10;
        }
        clamp_factor(score)
    }

    fn competitive_environment(&self, signals: &TextSignals) -> u8 {
        let mut score = match signals.token_count {
            0..=1 => 20,
            2 => 40,
            3 => 60,
            4 => 75,
            _ => 85,
        };
        if signals.has_digits {
            score += 10;
        }
        if signals.avg_token_length >= 6.0 {
            score += 5;
        }
        clamp_factor(score)
    }

    fn weighted_score(&self, factors: &AioFactors) -> u8 {
        let weighted: f64 = AioFactor::ALL
            .iter()
            .map(|f| f64::from(factors.get(*f)) * self.config.weights.get(*f))
            .sum();
        weighted.round().clamp(0.0, 100.0) as u8
    }

    fn recommendations(&self, factors: &AioFactors) -> impl Iterator<Item = String> + '_ {
        let factors = *factors;
        AioFactor::ALL
            .into_iter()
            .filter(move |f| factors.get(*f) < self.config.recommendation_threshold)
            .map(|f| f.recommendation().to_string())
    }

    /// Compute factors from already-extracted signals.
    pub fn factors(&self, signals: &TextSignals) -> AioFactors {
        if signals.is_empty() {
            return AioFactors::uniform(self.config.empty_floor);
        }
        AioFactors {
            question_type_match: self.question_type_match(signals),
            search_intent_clarity: self.search_intent_clarity(signals),
            content_structure: self.content_structure(signals),
            competitive_environment: self.competitive_environment(signals),
        }
    }

    /// Score a keyword phrase. Never fails; empty text scores at the floor.
    pub fn score(&self, text: &str) -> AioAnalysis {
        let signals = self.extractor.extract(text);
        let factors = self.factors(&signals);
        let score = self.weighted_score(&factors);

        let mut recommendations = Vec::new();
        if signals.is_empty() {
            recommendations.push(EMPTY_TEXT_RECOMMENDATION.to_string());
        }
        recommendations.extend(self.recommendations(&factors));

        debug!(text, score, "scored keyword");

        AioAnalysis {
            score,
            factors,
            recommendations,
            predicted_performance: PredictedPerformance::from_score(score),
        }
    }
}
