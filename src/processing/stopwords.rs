//! Immutable English function-word set

use std::collections::HashSet;
use std::sync::OnceLock;

const ENGLISH: &[&str] = &[
    // articles
    "a", "an", "the",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "also", "both", "either", "neither", "if", "than",
    "then", "while", "whether", "because", "although", "though", "as",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "by", "during", "for", "from",
    "in", "into", "near", "of", "off", "on", "onto", "out", "over", "per", "through",
    "throughout", "to", "toward", "towards", "under", "until", "upon", "via", "with", "within",
    "without",
    // auxiliary and modal verbs
    "is", "are", "am", "was", "were", "be", "been", "being", "has", "have", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must",
    // pronouns and determiners
    "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he", "him",
    "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "who", "whom",
    "whose", "which", "what", "this", "that", "these", "those", "all", "any", "each", "every",
    "some", "such", "not", "no",
];

/// Read-only stopword lookup. Words are stored lowercase.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<&'static str>,
}

impl StopwordSet {
    /// Process-wide English set, built on first use
    pub fn english() -> &'static StopwordSet {
        static SET: OnceLock<StopwordSet> = OnceLock::new();
        SET.get_or_init(|| StopwordSet {
            words: ENGLISH.iter().copied().collect(),
        })
    }

    /// Expects an already lowercased token.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// True when every whitespace-separated word of `phrase` is a stopword
    pub fn covers_phrase(&self, phrase: &str) -> bool {
        let mut words = phrase.split_whitespace().peekable();
        words.peek().is_some() && words.all(|w| self.contains(w))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
