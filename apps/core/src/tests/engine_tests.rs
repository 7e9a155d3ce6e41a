//! Engine Tests
//!
//! Properties of the classifier, scorer and aggregator over representative inputs.

use crate::engine::aio::EMPTY_TEXT_RECOMMENDATION;
use crate::engine::{
    AioFactor, DistributionAggregator, KeywordEngine, PredictedPerformance, PriorityConfig,
    PriorityTier,
};
use crate::samples::sample_keywords;

/// Volumes around every reference boundary plus a spread of ordinary values.
fn probe_volumes() -> Vec<u64> {
    let mut volumes = vec![0, 1, 2, 999, u64::MAX - 1, u64::MAX];
    for boundary in [5_000u64, 10_000, 20_000, 50_000, 100_000] {
        volumes.extend([boundary - 1, boundary, boundary + 1]);
    }
    volumes.extend((0..200).map(|i| i * 997));
    volumes.sort_unstable();
    volumes.dedup();
    volumes
}

fn probe_texts() -> Vec<String> {
    let mut texts: Vec<String> = sample_keywords().into_iter().map(|k| k.text).collect();
    texts.extend(
        [
            "",
            " ",
            "eufy",
            "?",
            "how",
            "what why how best vs guide review",
            "如何设置eufy摄像头",
            "eufy 哪个好？",
            "top 10 best security cameras 2024 vs ring vs arlo comparison guide",
            "🚀🚀🚀",
            "EUFY   Smart\tHOME",
            "a b c d e f g h i j k l m n o p",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    texts.push("word ".repeat(500));
    texts
}

#[cfg(test)]
mod classifier_tests {
    use super::*;

    #[test]
    fn test_every_volume_lands_in_its_tier() {
        let engine = KeywordEngine::default();

        for volume in probe_volumes() {
            let tier = engine.classify(volume);
            let info = engine.tier_info(tier);
            assert!(info.min_volume <= volume, "{} below {:?}", volume, tier);
            assert!(info.contains(volume), "{:?} does not contain {}", tier, volume);

            let matching = engine
                .list_configuration()
                .iter()
                .filter(|t| t.contains(volume))
                .count();
            assert_eq!(matching, 1, "volume {} matched {} tiers", volume, matching);
        }
    }

    #[test]
    fn test_urgency_never_drops_as_volume_grows() {
        let engine = KeywordEngine::default();
        let volumes = probe_volumes();

        for pair in volumes.windows(2) {
            let lower = engine.classify(pair[0]);
            let higher = engine.classify(pair[1]);
            assert!(
                higher.rank() <= lower.rank(),
                "{} -> {:?} but {} -> {:?}",
                pair[0],
                lower,
                pair[1],
                higher
            );
        }
    }

    #[test]
    fn test_reference_scenarios() {
        let engine = KeywordEngine::default();

        assert_eq!(engine.classify(120_000), PriorityTier::P0);
        let low = engine.classify(3_000);
        assert!(low.rank() >= PriorityTier::P4.rank());
        assert_eq!(low, PriorityTier::P5);
    }

    #[test]
    fn test_tiers_strictly_ordered_by_min_volume() {
        let engine = KeywordEngine::default();
        let tiers = engine.list_configuration();

        for pair in tiers.windows(2) {
            assert!(pair[0].tier < pair[1].tier);
            assert!(pair[0].min_volume > pair[1].min_volume);
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let engine = KeywordEngine::default();
        for volume in probe_volumes() {
            assert_eq!(engine.classify(volume), engine.classify(volume));
        }
    }

    #[test]
    fn test_json_tier_table() {
        let json = r#"[
            {"tier":"P5","minVolume":0,"maxVolume":10,"description":"d5","resourceAllocation":"1%"},
            {"tier":"P4","minVolume":10,"maxVolume":20,"description":"d4","resourceAllocation":"4%"},
            {"tier":"P3","minVolume":20,"maxVolume":30,"description":"d3","resourceAllocation":"10%"},
            {"tier":"P2","minVolume":30,"maxVolume":40,"description":"d2","resourceAllocation":"15%"},
            {"tier":"P1","minVolume":40,"maxVolume":50,"description":"d1","resourceAllocation":"30%"},
            {"tier":"P0","minVolume":50,"maxVolume":null,"description":"d0","resourceAllocation":"40%"}
        ]"#;
        let config = PriorityConfig::from_json(json).unwrap();
        let engine = KeywordEngine::new(config, Default::default());

        assert_eq!(engine.classify(35), PriorityTier::P2);
        assert_eq!(engine.classify(50), PriorityTier::P0);
        assert_eq!(engine.list_configuration()[0].tier, PriorityTier::P0);
    }

    #[test]
    fn test_json_tier_table_with_overlap_is_rejected() {
        let json = r#"[
            {"tier":"P5","minVolume":0,"maxVolume":15,"description":"d5","resourceAllocation":"1%"},
            {"tier":"P4","minVolume":10,"maxVolume":20,"description":"d4","resourceAllocation":"4%"},
            {"tier":"P3","minVolume":20,"maxVolume":30,"description":"d3","resourceAllocation":"10%"},
            {"tier":"P2","minVolume":30,"maxVolume":40,"description":"d2","resourceAllocation":"15%"},
            {"tier":"P1","minVolume":40,"maxVolume":50,"description":"d1","resourceAllocation":"30%"},
            {"tier":"P0","minVolume":50,"maxVolume":null,"description":"d0","resourceAllocation":"40%"}
        ]"#;
        assert!(PriorityConfig::from_json(json).is_err());
    }
}

#[cfg(test)]
mod scorer_tests {
    use super::*;

    #[test]
    fn test_score_bounds_for_all_inputs() {
        let engine = KeywordEngine::default();

        for text in probe_texts() {
            let analysis = engine.score(&text);
            assert!(analysis.score <= 100, "score out of range for {:?}", text);
            for factor in AioFactor::ALL {
                assert!(analysis.factors.get(factor) <= 100);
            }
            assert_eq!(
                analysis.predicted_performance,
                PredictedPerformance::from_score(analysis.score)
            );
        }
    }

    #[test]
    fn test_score_is_idempotent() {
        let engine = KeywordEngine::default();
        for text in probe_texts() {
            assert_eq!(engine.score(&text), engine.score(&text));
        }
    }

    #[test]
    fn test_question_phrase_beats_bare_token() {
        let engine = KeywordEngine::default();

        let question = engine.score("what is eufy smart home");
        let bare = engine.score("eufy");

        assert!(question.factors.question_type_match > bare.factors.question_type_match);
        assert!(question.score > bare.score);
    }

    #[test]
    fn test_recommendations_only_for_weak_factors() {
        let engine = KeywordEngine::default();

        for text in probe_texts() {
            let analysis = engine.score(&text);
            let advice: Vec<String> = analysis
                .recommendations
                .iter()
                .filter(|r| r.as_str() != EMPTY_TEXT_RECOMMENDATION)
                .cloned()
                .collect();
            let weak: Vec<String> = AioFactor::ALL
                .iter()
                .filter(|f| analysis.factors.get(**f) < 60)
                .map(|f| f.recommendation().to_string())
                .collect();
            assert_eq!(advice, weak, "for {:?}", text);
        }
    }

    #[test]
    fn test_overly_long_phrase_loses_clarity() {
        let engine = KeywordEngine::default();

        let focused = engine.score("how to clean eufy robot vacuum");
        let rambling = engine.score("how to clean my old eufy robot vacuum brush roll at home quickly");

        assert!(
            rambling.factors.search_intent_clarity < focused.factors.search_intent_clarity
        );
    }

    #[test]
    fn test_chinese_question_scores_as_question() {
        let engine = KeywordEngine::default();

        let question = engine.score("如何设置eufy摄像头");
        let bare = engine.score("eufy摄像头");

        assert!(question.factors.question_type_match > bare.factors.question_type_match);
        assert!(question.factors.content_structure > bare.factors.content_structure);
    }

    #[test]
    fn test_case_and_spacing_do_not_change_score() {
        let engine = KeywordEngine::default();
        assert_eq!(
            engine.score("EUFY   Smart\tHOME"),
            engine.score("eufy smart home")
        );
    }
}

#[cfg(test)]
mod aggregator_tests {
    use super::*;

    #[test]
    fn test_sample_population_distribution() {
        let engine = KeywordEngine::default();
        let tiers: Vec<PriorityTier> = sample_keywords()
            .iter()
            .map(|k| engine.classify(k.search_volume))
            .collect();

        let report = engine.aggregate(&tiers);

        assert_eq!(report.total, 10);
        assert_eq!(report.counts.values().sum::<u64>(), 10);
        for tier in PriorityTier::ALL {
            let expected = tiers.iter().filter(|t| **t == tier).count() as u64;
            assert_eq!(report.count(tier), expected, "count for {:?}", tier);
        }
        assert_eq!(report.percentages[&PriorityTier::P1], "20.0%");
        assert_eq!(report.percentages[&PriorityTier::P0], "10.0%");
    }

    #[test]
    fn test_empty_population() {
        let report = DistributionAggregator::new().aggregate::<PriorityTier>(&[]);

        assert_eq!(report.total, 0);
        assert!(report.percentages.values().all(|p| p == "0.0%"));
    }

    #[test]
    fn test_percentages_within_rounding_tolerance() {
        let engine = KeywordEngine::default();

        for size in 1..=25u64 {
            let tiers: Vec<PriorityTier> = (0..size).map(|i| engine.classify(i * 9_973)).collect();
            let report = engine.aggregate(&tiers);

            assert_eq!(report.total, size);
            assert_eq!(report.counts.values().sum::<u64>(), size);
            let sum: f64 = report.numeric_percentages().values().sum();
            assert!((sum - 100.0).abs() <= 0.6, "size {} summed to {}", size, sum);
        }
    }
}
