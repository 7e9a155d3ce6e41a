//! Text signal extraction for keyword phrases.
//!
//! Derives cheap linguistic signals from raw keyword text using regex pattern
//! groups for English and Chinese. No model or network access: every signal is
//! a pure function of the input string.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Search intent class a cue word points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentClass {
    /// Looking for an explanation (how, what, guide, 教程, ...)
    Informational,
    /// Weighing options (vs, best, review, 对比, ...)
    Comparative,
    /// Ready to buy (price, buy, deal, 价格, ...)
    Transactional,
    /// Looking for a specific site or app (login, official, 官网, ...)
    Navigational,
}

impl IntentClass {
    pub fn label(&self) -> &'static str {
        match self {
            IntentClass::Informational => "informational",
            IntentClass::Comparative => "comparative",
            IntentClass::Transactional => "transactional",
            IntentClass::Navigational => "navigational",
        }
    }
}

impl fmt::Display for IntentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Signals extracted from one keyword phrase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSignals {
    /// Lowercased, trimmed text
    pub normalized: String,
    /// Word runs; a CJK run is kept whole
    pub tokens: Vec<String>,
    /// Effective token count (CJK runs count one per two characters)
    pub token_count: usize,
    /// Distinct interrogative/answer-seeking markers, in order of appearance
    pub question_markers: Vec<String>,
    pub has_question_mark: bool,
    /// Cue hits per intent class; classes without cues are absent
    pub intent_cues: BTreeMap<IntentClass, usize>,
    /// Distinct markers of list/FAQ/how-to/comparison answer shapes
    pub structure_markers: Vec<String>,
    pub has_digits: bool,
    /// Whether a plural noun suggests an enumerable answer ("cameras", "ideas")
    pub has_enumerable_noun: bool,
    /// Average characters per token run
    pub avg_token_length: f32,
}

impl TextSignals {
    pub fn is_empty(&self) -> bool {
        self.token_count == 0
    }

    /// The single intent class with cues, if exactly one class matched.
    pub fn dominant_intent(&self) -> Option<IntentClass> {
        if self.intent_cues.len() == 1 {
            self.intent_cues.keys().next().copied()
        } else {
            None
        }
    }
}

// Compiled once; the patterns are literals.
static QUESTION_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // English
        Regex::new(r"(?i)\b(how|what|why|when|where|which|who|best|vs|versus|guide|review)\b")
            .expect("Invalid regex: English question markers"),
        // Chinese
        Regex::new(r"(如何|怎么|怎样|为什么|什么|哪个|哪里|最好|对比|评测|推荐|指南|教程)")
            .expect("Invalid regex: Chinese question markers"),
    ]
});

static INFORMATIONAL_CUES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(how|what|why|when|where|who|guide|tutorial|tips|learn|meaning|explained|ideas|examples)\b")
            .expect("Invalid regex: English informational cues"),
        Regex::new(r"(如何|怎么|怎样|为什么|什么|教程|指南|方法)")
            .expect("Invalid regex: Chinese informational cues"),
    ]
});

static COMPARATIVE_CUES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(vs|versus|best|top|compare|comparison|review|reviews|alternative|alternatives|difference)\b")
            .expect("Invalid regex: English comparative cues"),
        Regex::new(r"(对比|评测|哪个好|最好|推荐|区别|排行)")
            .expect("Invalid regex: Chinese comparative cues"),
    ]
});

static TRANSACTIONAL_CUES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(buy|price|prices|pricing|cheap|deal|deals|discount|coupon|sale|order|cost|shop)\b")
            .expect("Invalid regex: English transactional cues"),
        Regex::new(r"(价格|购买|多少钱|优惠|折扣|哪里买)")
            .expect("Invalid regex: Chinese transactional cues"),
    ]
});

static NAVIGATIONAL_CUES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(login|log in|sign in|official|website|download|support|contact|account)\b")
            .expect("Invalid regex: English navigational cues"),
        Regex::new(r"(官网|登录|下载|客服)").expect("Invalid regex: Chinese navigational cues"),
    ]
});

static STRUCTURE_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // How-to / procedural
        Regex::new(r"(?i)\b(how to|step by step|steps|setup|set up|install|installation|guide|tutorial)\b")
            .expect("Invalid regex: how-to markers"),
        // Troubleshooting / FAQ
        Regex::new(r"(?i)\b(troubleshooting|troubleshoot|fix|not working|problems|issues|faq)\b")
            .expect("Invalid regex: troubleshooting markers"),
        // Comparison / list
        Regex::new(r"(?i)\b(vs|versus|compare|comparison|pros and cons|best|top|list|ideas|tips|checklist|examples|types of|review)\b")
            .expect("Invalid regex: comparison and list markers"),
        // Chinese
        Regex::new(r"(设置|安装|故障|对比|推荐|步骤|教程|排行|清单|问题)")
            .expect("Invalid regex: Chinese structure markers"),
    ]
});

/// Words ending in "s" that are not plurals of an enumerable noun.
const NON_PLURAL_S: &[&str] = &[
    "does", "this", "news", "plus", "always", "status", "series", "lens", "bus", "gas", "chaos",
    "versus", "atlas", "canvas", "bonus", "campus", "focus", "its", "yes", "was", "has", "is",
];

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{3040}'..='\u{30FF}'
        | '\u{AC00}'..='\u{D7AF}')
}

fn collect_distinct(patterns: &[Regex], text: &str, into: &mut Vec<String>) {
    for pattern in patterns {
        for m in pattern.find_iter(text) {
            let found = m.as_str().to_string();
            if !into.contains(&found) {
                into.push(found);
            }
        }
    }
}

fn count_matches(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|p| p.find_iter(text).count()).sum()
}

/// Stateless extractor of [`TextSignals`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSignalExtractor;

impl TextSignalExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Split text into word runs. Latin-script runs break on anything that is not
    /// alphanumeric, `-` or `'`; CJK characters form their own runs.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut current_cjk = false;

        for c in text.chars() {
            let cjk = is_cjk(c);
            let word_char = cjk || c.is_alphanumeric() || c == '-' || c == '\'';

            if !word_char || (!current.is_empty() && cjk != current_cjk) {
                let run = current.trim_matches(|c| c == '-' || c == '\'');
                if !run.is_empty() {
                    tokens.push(run.to_string());
                }
                current.clear();
            }
            if word_char {
                current.push(c);
                current_cjk = cjk;
            }
        }
        let run = current.trim_matches(|c| c == '-' || c == '\'');
        if !run.is_empty() {
            tokens.push(run.to_string());
        }

        tokens
    }

    /// Effective token count: a CJK run of n characters counts as ceil(n / 2) words.
    fn effective_token_count(&self, tokens: &[String]) -> usize {
        tokens
            .iter()
            .map(|t| {
                if t.chars().all(is_cjk) {
                    t.chars().count().div_ceil(2)
                } else {
                    1
                }
            })
            .sum()
    }

    fn has_enumerable_noun(&self, tokens: &[String]) -> bool {
        tokens.iter().any(|t| {
            t.chars().count() > 3
                && t.ends_with('s')
                && !t.ends_with("ss")
                && !NON_PLURAL_S.contains(&t.as_str())
        })
    }

    /// Extract all signals from `text`. Empty or whitespace-only input yields
    /// empty signals with `token_count == 0`.
    pub fn extract(&self, text: &str) -> TextSignals {
        let normalized = text.trim().to_lowercase();
        let tokens = self.tokenize(&normalized);
        let token_count = self.effective_token_count(&tokens);

        let mut question_markers = Vec::new();
        collect_distinct(&QUESTION_MARKERS, &normalized, &mut question_markers);

        let mut structure_markers = Vec::new();
        collect_distinct(&STRUCTURE_MARKERS, &normalized, &mut structure_markers);

        let mut intent_cues = BTreeMap::new();
        for (class, patterns) in [
            (IntentClass::Informational, &*INFORMATIONAL_CUES),
            (IntentClass::Comparative, &*COMPARATIVE_CUES),
            (IntentClass::Transactional, &*TRANSACTIONAL_CUES),
            (IntentClass::Navigational, &*NAVIGATIONAL_CUES),
        ] {
            let hits = count_matches(patterns, &normalized);
            if hits > 0 {
                intent_cues.insert(class, hits);
            }
        }

        let avg_token_length = if tokens.is_empty() {
            0.0
        } else {
            let chars: usize = tokens.iter().map(|t| t.chars().count()).sum();
            chars as f32 / tokens.len() as f32
        };

        TextSignals {
            has_question_mark: normalized.contains('?') || normalized.contains('？'),
            has_digits: normalized.chars().any(|c| c.is_ascii_digit()),
            has_enumerable_noun: self.has_enumerable_noun(&tokens),
            normalized,
            tokens,
            token_count,
            question_markers,
            intent_cues,
            structure_markers,
            avg_token_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_phrase() {
        let signals = TextSignalExtractor::new().extract("What is eufy smart home");

        assert_eq!(signals.normalized, "what is eufy smart home");
        assert_eq!(signals.token_count, 5);
        assert_eq!(signals.question_markers, vec!["what"]);
        assert_eq!(signals.dominant_intent(), Some(IntentClass::Informational));
        assert!(!signals.has_question_mark);
    }

    #[test]
    fn test_bare_token() {
        let signals = TextSignalExtractor::new().extract("eufy");

        assert_eq!(signals.token_count, 1);
        assert!(signals.question_markers.is_empty());
        assert!(signals.intent_cues.is_empty());
        assert!(signals.structure_markers.is_empty());
    }

    #[test]
    fn test_empty_and_whitespace() {
        let extractor = TextSignalExtractor::new();

        for text in ["", "   ", "\t\n", "?!"] {
            let signals = extractor.extract(text);
            assert!(signals.is_empty(), "expected no tokens for {:?}", text);
            assert_eq!(signals.avg_token_length, 0.0);
        }
    }

    #[test]
    fn test_comparison_and_structure() {
        let signals = TextSignalExtractor::new().extract("eufy vs ring doorbell");

        assert!(signals.question_markers.contains(&"vs".to_string()));
        assert!(signals.structure_markers.contains(&"vs".to_string()));
        assert_eq!(signals.dominant_intent(), Some(IntentClass::Comparative));
    }

    #[test]
    fn test_mixed_intent_has_no_dominant_class() {
        let signals = TextSignalExtractor::new().extract("best eufy camera price");

        assert_eq!(signals.intent_cues.len(), 2);
        assert_eq!(signals.dominant_intent(), None);
    }

    #[test]
    fn test_chinese_phrase_counts_pairs() {
        let signals = TextSignalExtractor::new().extract("如何设置eufy摄像头");

        // 如何设置 -> 2, eufy -> 1, 摄像头 -> 2
        assert_eq!(signals.tokens, vec!["如何设置", "eufy", "摄像头"]);
        assert_eq!(signals.token_count, 5);
        assert!(signals.question_markers.contains(&"如何".to_string()));
        assert!(signals.structure_markers.contains(&"设置".to_string()));
    }

    #[test]
    fn test_digits_and_plurals() {
        let signals = TextSignalExtractor::new().extract("top 10 security cameras 2024");

        assert!(signals.has_digits);
        assert!(signals.has_enumerable_noun);

        let signals = TextSignalExtractor::new().extract("wireless doorbell status");
        assert!(!signals.has_enumerable_noun);
    }

    #[test]
    fn test_full_width_question_mark() {
        let signals = TextSignalExtractor::new().extract("eufy 哪个好？");
        assert!(signals.has_question_mark);
    }
}
