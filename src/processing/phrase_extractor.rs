//! Candidate phrase extraction

use crate::processing::stopwords::StopwordSet;
use crate::processing::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};

/// Longest phrase, in tokens, any extractor may produce
pub const MAX_PHRASE_WORDS: usize = 3;

/// Capability shared by every extraction strategy.
///
/// `candidates` returns one entry per occurrence, in source order, so the ranker can
/// count frequencies and break ties by first appearance.
pub trait PhraseExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    fn candidates(&self, text: &str) -> Vec<String>;
}

/// How stopwords constrain n-gram windows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopwordPolicy {
    /// Stopwords, sub-length words and digit runs split the stream; windows never span them
    #[default]
    Boundary,
    /// Windows slide over all tokens; only all-stopword windows are dropped
    AllTokens,
}

/// Which extractor the engine builds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    #[default]
    Ngram,
    Lexicon,
}

/// Sliding-window 1..=3 gram extractor over tokenized text
#[derive(Debug, Clone)]
pub struct NgramExtractor {
    tokenizer: Tokenizer,
    stopwords: &'static StopwordSet,
    policy: StopwordPolicy,
    max_words: usize,
}

impl Default for NgramExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl NgramExtractor {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            stopwords: StopwordSet::english(),
            policy: StopwordPolicy::default(),
            max_words: MAX_PHRASE_WORDS,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_policy(mut self, policy: StopwordPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Clamped to `1..=MAX_PHRASE_WORDS`
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words.clamp(1, MAX_PHRASE_WORDS);
        self
    }

    pub fn policy(&self) -> StopwordPolicy {
        self.policy
    }

    /// Runs of tokens that windows may slide over
    fn segments(&self, text: &str) -> Vec<Vec<String>> {
        match self.policy {
            StopwordPolicy::AllTokens => {
                let tokens = self.tokenizer.tokenize(text);
                if tokens.is_empty() {
                    Vec::new()
                } else {
                    vec![tokens]
                }
            }
            StopwordPolicy::Boundary => {
                let mut segments = Vec::new();
                let mut current = Vec::new();

                for token in self.tokenizer.token_stream(text) {
                    match token {
                        Some(word) if !self.stopwords.contains(&word) => current.push(word),
                        _ => {
                            if !current.is_empty() {
                                segments.push(std::mem::take(&mut current));
                            }
                        }
                    }
                }
                if !current.is_empty() {
                    segments.push(current);
                }

                segments
            }
        }
    }

    fn keep(&self, phrase: &str) -> bool {
        !self.stopwords.covers_phrase(phrase) && !is_numeric_phrase(phrase)
    }
}

impl PhraseExtractor for NgramExtractor {
    fn name(&self) -> &'static str {
        "ngram"
    }

    fn candidates(&self, text: &str) -> Vec<String> {
        let mut candidates = Vec::new();

        for segment in self.segments(text) {
            for start in 0..segment.len() {
                let longest = self.max_words.min(segment.len() - start);
                for n in 1..=longest {
                    let phrase = segment[start..start + n].join(" ");
                    if self.keep(&phrase) {
                        candidates.push(phrase);
                    }
                }
            }
        }

        candidates
    }
}

/// A phrase made only of digits (spaces aside)
pub fn is_numeric_phrase(phrase: &str) -> bool {
    let mut chars = phrase.chars().filter(|c| !c.is_whitespace()).peekable();
    chars.peek().is_some() && chars.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_count(phrase: &str) -> usize {
        phrase.split(' ').count()
    }

    #[test]
    fn test_windows_up_to_three_tokens() {
        let extractor = NgramExtractor::new();
        let candidates = extractor.candidates("scalable data infrastructure platform");

        assert!(candidates.contains(&"scalable".to_string()));
        assert!(candidates.contains(&"scalable data".to_string()));
        assert!(candidates.contains(&"scalable data infrastructure".to_string()));
        assert!(candidates.contains(&"data infrastructure platform".to_string()));
        assert!(!candidates.iter().any(|c| word_count(c) > 3));
        // 4 unigrams + 3 bigrams + 2 trigrams
        assert_eq!(candidates.len(), 9);
    }

    #[test]
    fn test_boundary_policy_never_spans_stopwords() {
        let extractor = NgramExtractor::new();
        let candidates = extractor.candidates(
            "Looking for a Data Engineer with experience in cloud infrastructure and data infrastructure.",
        );
        let stopwords = StopwordSet::english();

        assert!(candidates.contains(&"cloud infrastructure".to_string()));
        assert!(candidates.contains(&"data infrastructure".to_string()));
        assert!(!candidates.contains(&"experience cloud".to_string()));
        for candidate in &candidates {
            assert!(
                candidate.split(' ').all(|w| !stopwords.contains(w)),
                "{candidate} contains a stopword"
            );
        }
    }

    #[test]
    fn test_boundary_policy_breaks_on_short_words_and_numbers() {
        let extractor = NgramExtractor::new();

        let short = extractor.candidates("Senior Go developer");
        assert_eq!(short, vec!["senior", "developer"]);

        let numeric = extractor.candidates("Python 3 developer");
        assert_eq!(numeric, vec!["python", "developer"]);

        let spanning = NgramExtractor::new().with_policy(StopwordPolicy::AllTokens);
        assert!(spanning.candidates("Senior Go developer").contains(&"senior developer".to_string()));
        assert!(spanning.candidates("Python 3 developer").contains(&"python developer".to_string()));
    }

    #[test]
    fn test_all_tokens_policy_drops_only_pure_stopword_windows() {
        let extractor = NgramExtractor::new().with_policy(StopwordPolicy::AllTokens);
        let candidates = extractor.candidates("experience with and for cloud");

        assert!(candidates.contains(&"experience with".to_string()));
        assert!(candidates.contains(&"for cloud".to_string()));
        assert!(!candidates.contains(&"with and".to_string()));
        assert!(!candidates.contains(&"with and for".to_string()));
        assert!(!candidates.contains(&"and".to_string()));
    }

    #[test]
    fn test_empty_text_has_no_candidates() {
        assert!(NgramExtractor::new().candidates("").is_empty());
        assert!(NgramExtractor::new()
            .with_policy(StopwordPolicy::AllTokens)
            .candidates("")
            .is_empty());
    }

    #[test]
    fn test_numeric_phrase_check() {
        assert!(is_numeric_phrase("2024"));
        assert!(is_numeric_phrase("10 20"));
        assert!(!is_numeric_phrase("rust 2024"));
        assert!(!is_numeric_phrase(""));
    }

    #[test]
    fn test_max_words_clamped() {
        let extractor = NgramExtractor::new().with_max_words(10);
        let candidates = extractor.candidates("one two three four five");
        assert!(candidates.iter().all(|c| word_count(c) <= MAX_PHRASE_WORDS));

        let unigrams = NgramExtractor::new().with_max_words(1);
        assert_eq!(unigrams.candidates("rust python"), vec!["rust", "python"]);
    }
}
