pub mod keywords;

use std::collections::{BTreeSet, HashSet};

use regex::Regex;
use serde::Serialize;

/// Result of classifying one text. Ephemeral, never persisted as-is.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct Classification {
    pub has_drug_signal: bool,
    pub has_geo_signal: bool,
    pub is_suspicious: bool,
    pub risk_score: f64,
    pub triggers: BTreeSet<String>,
}

impl Classification {
    /// Comma-joined trigger list for alert text and log lines.
    pub fn trigger_summary(&self) -> String {
        self.triggers.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Pure keyword classifier. Compiled once at startup, shared across all
/// accounts; `classify` is synchronous, deterministic and never fails.
pub struct Classifier {
    drug_patterns: Vec<(String, Regex)>,
    geo_patterns: Vec<(String, Regex)>,
    ambiguous: HashSet<&'static str>,
    job_context: Vec<&'static str>,
    link_pattern: Regex,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            drug_patterns: compile_word_patterns(keywords::DRUG_KEYWORDS),
            geo_patterns: compile_word_patterns(keywords::GEO_KEYWORDS),
            ambiguous: keywords::AMBIGUOUS_DRUG_KEYWORDS.iter().copied().collect(),
            job_context: keywords::JOB_CONTEXT_KEYWORDS.to_vec(),
            link_pattern: Regex::new(r"t\.me/[\w@]+").unwrap(),
        }
    }

    /// Classify one text. Empty input yields the all-false zero result.
    ///
    /// A non-empty drug hit set where every member is ambiguous AND the text
    /// reads like a job posting is discarded entirely; a single
    /// non-ambiguous drug term defeats that suppression.
    pub fn classify(&self, text: &str) -> Classification {
        if text.is_empty() {
            return Classification::default();
        }

        let normalized = text.to_lowercase();

        let mut drug_hits: Vec<&str> = self
            .drug_patterns
            .iter()
            .filter(|(_, re)| re.is_match(&normalized))
            .map(|(kw, _)| kw.as_str())
            .collect();

        let geo_hits: Vec<&str> = self
            .geo_patterns
            .iter()
            .filter(|(_, re)| re.is_match(&normalized))
            .map(|(kw, _)| kw.as_str())
            .collect();

        if !drug_hits.is_empty()
            && self.has_job_context(&normalized)
            && drug_hits.iter().all(|h| self.ambiguous.contains(h))
        {
            drug_hits.clear();
        }

        let has_drug_signal = !drug_hits.is_empty();
        let has_geo_signal = !geo_hits.is_empty();

        let mut risk: f64 = 0.0;
        if has_drug_signal {
            risk += 0.7;
        }
        if has_geo_signal {
            risk += 0.3;
        }

        let mut triggers: BTreeSet<String> = drug_hits.iter().map(|h| h.to_string()).collect();
        if has_geo_signal {
            triggers.insert(keywords::GEO_TRIGGER.to_string());
        }

        Classification {
            has_drug_signal,
            has_geo_signal,
            is_suspicious: has_drug_signal,
            risk_score: risk.min(1.0),
            triggers,
        }
    }

    fn has_job_context(&self, normalized: &str) -> bool {
        self.job_context.iter().any(|kw| normalized.contains(kw))
    }

    /// Extract `t.me/...` references from a text. Used by the bot prober.
    pub fn extract_links(&self, text: &str) -> Vec<String> {
        self.link_pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_word_patterns(words: &[&str]) -> Vec<(String, Regex)> {
    words
        .iter()
        .map(|kw| {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(kw))).unwrap();
            (kw.to_string(), re)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new()
    }

    #[test]
    fn test_empty_text_is_zero_result() {
        let result = classifier().classify("");
        assert!(!result.has_drug_signal);
        assert!(!result.has_geo_signal);
        assert!(!result.is_suspicious);
        assert_eq!(result.risk_score, 0.0);
        assert!(result.triggers.is_empty());
    }

    #[test]
    fn test_clean_text_is_not_suspicious() {
        let result = classifier().classify("встретимся завтра у парка в обед?");
        assert!(!result.is_suspicious);
        assert_eq!(result.risk_score, 0.0);
    }

    #[test]
    fn test_drug_keyword_triggers() {
        let result = classifier().classify("продам мефедрон недорого");
        assert!(result.has_drug_signal);
        assert!(result.is_suspicious);
        assert_eq!(result.risk_score, 0.7);
        assert!(result.triggers.contains("мефедрон"));
    }

    #[test]
    fn test_case_folding() {
        let result = classifier().classify("ПРОДАМ ГАШИШ");
        assert!(result.is_suspicious);
        assert!(result.triggers.contains("гашиш"));
    }

    #[test]
    fn test_word_boundary_no_substring_match() {
        // "семянной" must not trigger "семя"
        let result = classifier().classify("семянной фонд хозяйства");
        assert!(!result.is_suspicious);
        assert!(result.triggers.is_empty());
    }

    #[test]
    fn test_word_boundary_whole_word_matches() {
        let result = classifier().classify("купил семена");
        assert!(result.is_suspicious);
        assert!(result.triggers.contains("семена"));
    }

    #[test]
    fn test_job_context_suppresses_ambiguous_only_hits() {
        // "закладка" is ambiguous; with job vocabulary around it the
        // message reads as a logistics vacancy, not an offer.
        let result = classifier()
            .classify("вакансия: закладка товара на склад, зарплата от 200000, график 5/2");
        assert!(!result.is_suspicious);
        assert!(!result.has_drug_signal);
        assert_eq!(result.risk_score, 0.0);
        assert!(result.triggers.is_empty());
    }

    #[test]
    fn test_non_ambiguous_hit_defeats_suppression() {
        let result = classifier()
            .classify("вакансия курьера, зарплата высокая, работа с мефедрон закладка");
        assert!(result.is_suspicious);
        assert!(result.triggers.contains("мефедрон"));
        assert!(result.triggers.contains("закладка"));
    }

    #[test]
    fn test_ambiguous_without_job_context_still_triggers() {
        let result = classifier().classify("закладка в районе вокзала, пиши в лс");
        assert!(result.is_suspicious);
        assert!(result.triggers.contains("закладка"));
    }

    #[test]
    fn test_risk_score_in_unit_range() {
        for text in ["", "привет", "гашиш", "гашиш и кокс и мдма"] {
            let result = classifier().classify(text);
            assert!(result.risk_score >= 0.0 && result.risk_score <= 1.0, "text: {}", text);
        }
    }

    #[test]
    fn test_risk_score_formula() {
        let c = classifier();
        let drugs_only = c.classify("продаю гашиш");
        assert_eq!(drugs_only.risk_score, 0.7);
        let clean = c.classify("ничего интересного");
        assert_eq!(clean.risk_score, 0.0);
    }

    #[test]
    fn test_multiple_hits_collected_ordered() {
        let result = classifier().classify("кокс, гашиш, мдма в наличии");
        let triggers: Vec<&String> = result.triggers.iter().collect();
        assert_eq!(triggers.len(), 3);
        // BTreeSet keeps a stable order
        let mut sorted = triggers.clone();
        sorted.sort();
        assert_eq!(triggers, sorted);
    }

    #[test]
    fn test_english_slang() {
        let result = classifier().classify("got some weed and acid for the trip");
        assert!(result.is_suspicious);
        assert!(result.triggers.contains("weed"));
        assert!(result.triggers.contains("acid"));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let c = classifier();
        let a = c.classify("закладка соль кристаллы астана");
        let b = c.classify("закладка соль кристаллы астана");
        assert_eq!(a, b);
    }

    #[test]
    fn test_extract_links() {
        let c = classifier();
        let links = c.extract_links("смотри t.me/some_channel и ещё https://t.me/other");
        assert_eq!(links, vec!["t.me/some_channel", "t.me/other"]);
        assert!(c.extract_links("ничего тут нет").is_empty());
    }

    #[test]
    fn test_trigger_summary() {
        let result = classifier().classify("гашиш и кокс");
        assert_eq!(result.trigger_summary(), "гашиш, кокс");
    }
}
