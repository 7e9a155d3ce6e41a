//! Priority tiers and the search-volume classifier.
//!
//! The tier table is plain configuration data: it is validated once when a
//! [`PriorityConfig`] is built and then only read. Classification scans the
//! table from the most urgent tier down and returns the first tier whose lower
//! bound the volume reaches.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::AppError;

/// Discrete urgency bucket assigned from search volume. `P0` is the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityTier {
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
}

impl PriorityTier {
    /// Every tier, most urgent first.
    pub const ALL: [PriorityTier; 6] = [
        PriorityTier::P0,
        PriorityTier::P1,
        PriorityTier::P2,
        PriorityTier::P3,
        PriorityTier::P4,
        PriorityTier::P5,
    ];

    /// Position in urgency order (0 = most urgent).
    pub fn rank(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::P0 => "P0",
            PriorityTier::P1 => "P1",
            PriorityTier::P2 => "P2",
            PriorityTier::P3 => "P3",
            PriorityTier::P4 => "P4",
            PriorityTier::P5 => "P5",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of the tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityTierConfig {
    pub tier: PriorityTier,
    /// Inclusive lower bound.
    pub min_volume: u64,
    /// Exclusive upper bound; `None` only for the most urgent tier.
    pub max_volume: Option<u64>,
    pub description: String,
    pub resource_allocation: String,
}

impl PriorityTierConfig {
    fn new(
        tier: PriorityTier,
        min_volume: u64,
        max_volume: Option<u64>,
        description: &str,
        resource_allocation: &str,
    ) -> Self {
        Self {
            tier,
            min_volume,
            max_volume,
            description: description.to_string(),
            resource_allocation: resource_allocation.to_string(),
        }
    }

    /// Whether `volume` falls inside `[min_volume, max_volume)`.
    pub fn contains(&self, volume: u64) -> bool {
        volume >= self.min_volume && self.max_volume.map_or(true, |max| volume < max)
    }
}

/// Validated, immutable tier table stored in urgency order (P0 first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityConfig {
    tiers: Vec<PriorityTierConfig>,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                PriorityTierConfig::new(PriorityTier::P0, 100_000, None, "Core head term", "30%"),
                PriorityTierConfig::new(
                    PriorityTier::P1,
                    50_000,
                    Some(100_000),
                    "High-volume strategic term",
                    "25%",
                ),
                PriorityTierConfig::new(
                    PriorityTier::P2,
                    20_000,
                    Some(50_000),
                    "Important growth term",
                    "20%",
                ),
                PriorityTierConfig::new(
                    PriorityTier::P3,
                    10_000,
                    Some(20_000),
                    "Mid-volume supporting term",
                    "12%",
                ),
                PriorityTierConfig::new(
                    PriorityTier::P4,
                    5_000,
                    Some(10_000),
                    "Long-tail opportunity",
                    "8%",
                ),
                PriorityTierConfig::new(PriorityTier::P5, 0, Some(5_000), "Monitor only", "5%"),
            ],
        }
    }
}

impl PriorityConfig {
    /// Build a tier table, checking that the tiers partition `[0, ∞)`.
    ///
    /// Rows may arrive in any order. Each tier must appear exactly once, lower
    /// bounds must strictly decrease from P0 to P5, P5 must start at zero, and
    /// every upper bound must equal the lower bound of the next more urgent tier.
    pub fn new(mut tiers: Vec<PriorityTierConfig>) -> Result<Self, AppError> {
        tiers.sort_by_key(|t| t.tier);

        let present: Vec<PriorityTier> = tiers.iter().map(|t| t.tier).collect();
        if present != PriorityTier::ALL {
            return Err(AppError::Config(format!(
                "tier table must define P0..P5 exactly once, got {:?}",
                present
            )));
        }

        if tiers[0].max_volume.is_some() {
            return Err(AppError::Config(
                "P0 must be unbounded above (maxVolume = null)".to_string(),
            ));
        }

        for pair in tiers.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            if lower.min_volume >= upper.min_volume {
                return Err(AppError::Config(format!(
                    "{} minVolume {} must be below {} minVolume {}",
                    lower.tier, lower.min_volume, upper.tier, upper.min_volume
                )));
            }
            if lower.max_volume != Some(upper.min_volume) {
                return Err(AppError::Config(format!(
                    "{} maxVolume must equal {} minVolume {} (got {:?})",
                    lower.tier, upper.tier, upper.min_volume, lower.max_volume
                )));
            }
        }

        if tiers[tiers.len() - 1].min_volume != 0 {
            return Err(AppError::Config(
                "P5 minVolume must be 0 so every volume is classified".to_string(),
            ));
        }

        Ok(Self { tiers })
    }

    /// Parse and validate a JSON array of tier rows.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let tiers: Vec<PriorityTierConfig> = serde_json::from_str(json)?;
        Self::new(tiers)
    }

    pub fn tiers(&self) -> &[PriorityTierConfig] {
        &self.tiers
    }
}

/// Maps search volume to a [`PriorityTier`] using an injected [`PriorityConfig`].
#[derive(Debug, Clone, Default)]
pub struct PriorityClassifier {
    config: PriorityConfig,
}

impl PriorityClassifier {
    pub fn new(config: PriorityConfig) -> Self {
        Self { config }
    }

    /// Return the most urgent tier whose lower bound `volume` reaches.
    pub fn classify(&self, volume: u64) -> PriorityTier {
        let tier = self
            .config
            .tiers
            .iter()
            .find(|t| t.min_volume <= volume)
            .map(|t| t.tier)
            // P5 starts at 0, so the scan always matches.
            .unwrap_or(PriorityTier::P5);
        debug!(volume, %tier, "classified search volume");
        tier
    }

    /// Look up the configuration row for a tier.
    pub fn tier_info(&self, tier: PriorityTier) -> &PriorityTierConfig {
        // The table holds all six tiers in rank order.
        &self.config.tiers[tier.rank()]
    }

    /// All tiers, P0 through P5.
    pub fn list_configuration(&self) -> &[PriorityTierConfig] {
        &self.config.tiers
    }
}
