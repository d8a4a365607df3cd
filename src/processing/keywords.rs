//! Keyword extraction heuristics
//!
//! Small, independent pure functions over raw text: stop-word filtered
//! tokenization with frequency ranking, plus the capitalized-phrase and
//! acronym detectors used for job-keyword harvesting.

use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Tokenizes text into candidate keywords and applies the extraction
/// heuristics. All state is read-only after construction.
pub struct KeywordExtractor {
    stop_words: HashSet<&'static str>,
    token_re: Regex,
    phrase_re: Regex,
    acronym_re: Regex,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    pub fn new() -> Self {
        let token_re =
            Regex::new(r"\b[a-zA-Z][a-zA-Z0-9+#.]*\b").expect("Invalid token regex");

        // Capitalized words/phrases, e.g. "Machine Learning"
        let phrase_re =
            Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").expect("Invalid phrase regex");

        // Acronyms, e.g. "AWS", "NLP"
        let acronym_re = Regex::new(r"\b[A-Z]{2,}\b").expect("Invalid acronym regex");

        Self {
            stop_words: Self::stop_words(),
            token_re,
            phrase_re,
            acronym_re,
        }
    }

    /// Tokenize text into candidate keyword strings, dropping stop words
    /// and tokens of two characters or fewer. Original casing is kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.token_re
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .filter(|w| w.chars().count() > 2 && !self.is_stop_word(w))
            .collect()
    }

    /// Top keywords ranked by frequency. Ties keep first-occurrence order,
    /// so output is deterministic for a given input.
    pub fn top_keywords(&self, text: &str, max_keywords: usize) -> Vec<String> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for token in self.tokenize(text) {
            if !counts.contains_key(&token) {
                order.push(token.clone());
            }
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = order
            .into_iter()
            .map(|t| {
                let count = counts[&t];
                (t, count)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(max_keywords)
            .map(|(word, _)| word)
            .collect()
    }

    /// Capitalized words and multi-word phrases, in source order.
    pub fn capitalized_phrases(&self, text: &str) -> Vec<String> {
        self.phrase_re
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// All-caps acronym tokens, in source order.
    pub fn acronyms(&self, text: &str) -> Vec<String> {
        self.acronym_re
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Proper-noun/acronym heuristic over a single line of text.
    pub fn proper_noun_keywords(&self, text: &str) -> Vec<String> {
        let mut words = self.capitalized_phrases(text);
        words.extend(self.acronyms(text));
        words
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word.to_lowercase().as_str())
    }

    fn stop_words() -> HashSet<&'static str> {
        [
            "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
            "of", "with", "by", "from", "as", "is", "was", "are", "were", "been",
            "be", "have", "has", "had", "do", "does", "did", "will", "would",
            "could", "should", "may", "might", "must", "can", "this", "that",
            "these", "those", "i", "you", "he", "she", "it", "we", "they",
        ]
        .into_iter()
        .collect()
    }
}
