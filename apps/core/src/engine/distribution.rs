//! Per-tier distribution statistics over a keyword population.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aio::PredictedPerformance;
use super::priority::PriorityTier;

/// Anything that carries a priority tier.
pub trait Prioritized {
    fn priority(&self) -> PriorityTier;
}

impl Prioritized for PriorityTier {
    fn priority(&self) -> PriorityTier {
        *self
    }
}

/// Anything that carries an AIO score.
pub trait AioScored {
    fn aio_score(&self) -> u8;
}

impl AioScored for u8 {
    fn aio_score(&self) -> u8 {
        *self
    }
}

/// Tier counts and formatted percentages. Every tier is present, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub counts: BTreeMap<PriorityTier, u64>,
    pub total: u64,
    pub percentages: BTreeMap<PriorityTier, String>,
}

impl DistributionReport {
    pub fn count(&self, tier: PriorityTier) -> u64 {
        self.counts.get(&tier).copied().unwrap_or(0)
    }

    /// Parse the formatted percentages back to numbers.
    pub fn numeric_percentages(&self) -> BTreeMap<PriorityTier, f64> {
        self.percentages
            .iter()
            .map(|(tier, pct)| {
                let value = pct.trim_end_matches('%').parse::<f64>().unwrap_or(0.0);
                (*tier, value)
            })
            .collect()
    }
}

/// Predicted-performance breakdown over a keyword population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AioDistribution {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub total: u64,
    /// Mean AIO score, one decimal place; 0 for an empty population.
    pub average_score: f64,
}

fn format_percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", count as f64 / total as f64 * 100.0)
}

/// Single-pass aggregator over keyword collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistributionAggregator;

impl DistributionAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Count keywords per tier. An empty collection yields zero counts and `"0.0%"`.
    pub fn aggregate<T: Prioritized>(&self, keywords: &[T]) -> DistributionReport {
        let mut counts: BTreeMap<PriorityTier, u64> =
            PriorityTier::ALL.iter().map(|t| (*t, 0)).collect();

        for keyword in keywords {
            *counts.entry(keyword.priority()).or_insert(0) += 1;
        }

        let total = keywords.len() as u64;
        let percentages = counts
            .iter()
            .map(|(tier, count)| (*tier, format_percentage(*count, total)))
            .collect();

        DistributionReport {
            counts,
            total,
            percentages,
        }
    }

    /// Bucket keywords by predicted performance and average their scores.
    pub fn aggregate_aio<T: AioScored>(&self, keywords: &[T]) -> AioDistribution {
        let mut dist = AioDistribution {
            high: 0,
            medium: 0,
            low: 0,
            total: keywords.len() as u64,
            average_score: 0.0,
        };
        let mut sum: u64 = 0;

        for keyword in keywords {
            let score = keyword.aio_score();
            sum += u64::from(score);
            match PredictedPerformance::from_score(score) {
                PredictedPerformance::High => dist.high += 1,
                PredictedPerformance::Medium => dist.medium += 1,
                PredictedPerformance::Low => dist.low += 1,
            }
        }

        if dist.total > 0 {
            let mean = sum as f64 / dist.total as f64;
            dist.average_score = (mean * 10.0).round() / 10.0;
        }
        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection() {
        let report = DistributionAggregator::new().aggregate::<PriorityTier>(&[]);

        assert_eq!(report.total, 0);
        assert_eq!(report.counts.len(), 6);
        assert!(report.counts.values().all(|c| *c == 0));
        assert!(report.percentages.values().all(|p| p == "0.0%"));
    }

    #[test]
    fn test_counts_and_percentages() {
        use PriorityTier::*;
        let tiers = [P0, P1, P1, P5];
        let report = DistributionAggregator::new().aggregate(&tiers);

        assert_eq!(report.total, 4);
        assert_eq!(report.count(P0), 1);
        assert_eq!(report.count(P1), 2);
        assert_eq!(report.count(P3), 0);
        assert_eq!(report.percentages[&P1], "50.0%");
        assert_eq!(report.percentages[&P0], "25.0%");
        assert_eq!(report.percentages[&P2], "0.0%");
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        use PriorityTier::*;
        let tiers = [P0, P1, P2, P2, P3, P4, P5];
        let report = DistributionAggregator::new().aggregate(&tiers);

        let sum: f64 = report.numeric_percentages().values().sum();
        assert!((sum - 100.0).abs() <= 0.5, "sum was {}", sum);
        assert_eq!(report.counts.values().sum::<u64>(), report.total);
    }

    #[test]
    fn test_aio_distribution() {
        let scores: [u8; 4] = [80, 55, 20, 71];
        let dist = DistributionAggregator::new().aggregate_aio(&scores);

        assert_eq!(dist.high, 2);
        assert_eq!(dist.medium, 1);
        assert_eq!(dist.low, 1);
        assert_eq!(dist.total, 4);
        assert_eq!(dist.average_score, 56.5);
    }

    #[test]
    fn test_aio_distribution_empty() {
        let dist = DistributionAggregator::new().aggregate_aio::<u8>(&[]);
        assert_eq!(dist.total, 0);
        assert_eq!(dist.average_score, 0.0);
    }

    #[test]
    fn test_report_serializes_tier_keys() {
        let report = DistributionAggregator::new().aggregate(&[PriorityTier::P2]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["counts"]["P2"], 1);
        assert_eq!(json["percentages"]["P2"], "100.0%");
    }
}
