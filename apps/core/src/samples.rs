//! Sample keyword population used by the demo binary and the test suites.

use crate::models::NewKeyword;

/// Ten eufy keywords spread across every priority tier.
pub fn sample_keywords() -> Vec<NewKeyword> {
    vec![
        NewKeyword::new("eufy security camera", 120_000, 1.85),
        NewKeyword::new("eufy smart home", 85_000, 1.20),
        NewKeyword::new("what is eufy smart home", 52_000, 0.95),
        NewKeyword::new("eufy vs ring doorbell", 34_000, 2.10),
        NewKeyword::new("best robot vacuum for pet hair", 27_000, 2.45),
        NewKeyword::new("how to set up eufy homebase", 15_000, 0.60),
        NewKeyword::new("eufy doorbell review", 12_000, 1.05),
        NewKeyword::new("eufy camera troubleshooting offline", 8_000, 0.40),
        NewKeyword::new("eufy solar panel price", 3_000, 1.30),
        NewKeyword::new("eufy baby monitor night vision", 1_200, 0.85),
    ]
}
