//! Frequency ranking of candidate phrases

use crate::processing::phrase_extractor::{NgramExtractor, PhraseExtractor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default cap on the annotation keyword list
pub const DEFAULT_MAX_KEYWORDS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub phrase: String,
    pub words: usize,
    pub count: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordRanker {
    max_count: usize,
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_KEYWORDS)
    }
}

impl KeywordRanker {
    pub fn new(max_count: usize) -> Self {
        Self { max_count }
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Count, order by (word count desc, frequency desc, first seen) and truncate
    pub fn rank_with_counts<I>(&self, candidates: I) -> Vec<RankedKeyword>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut ranked: Vec<RankedKeyword> = Vec::new();

        for phrase in candidates {
            match positions.get(&phrase) {
                Some(&idx) => ranked[idx].count += 1,
                None => {
                    positions.insert(phrase.clone(), ranked.len());
                    ranked.push(RankedKeyword {
                        words: phrase.split_whitespace().count(),
                        phrase,
                        count: 1,
                    });
                }
            }
        }

        // sort_by is stable, so equal keys keep first-seen order
        ranked.sort_by(|a, b| b.words.cmp(&a.words).then_with(|| b.count.cmp(&a.count)));
        ranked.truncate(self.max_count);
        ranked
    }

    pub fn rank<I>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        self.rank_with_counts(candidates)
            .into_iter()
            .map(|k| k.phrase)
            .collect()
    }

    pub fn extract(&self, extractor: &dyn PhraseExtractor, text: &str) -> Vec<String> {
        if self.max_count == 0 {
            return Vec::new();
        }
        self.rank(extractor.candidates(text))
    }
}

/// Top `max_count` keywords of `text` using the default n-gram extractor
pub fn extract_keywords(text: &str, max_count: usize) -> Vec<String> {
    KeywordRanker::new(max_count).extract(&NgramExtractor::new(), text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::stopwords::StopwordSet;
    use std::collections::HashSet;

    const JOB: &str =
        "Looking for a Data Engineer with experience in cloud infrastructure and data infrastructure.";

    #[test]
    fn test_multiword_phrases_rank_first() {
        let keywords = extract_keywords(JOB, 5);

        assert_eq!(keywords.len(), 5);
        let pos = |p: &str| keywords.iter().position(|k| k == p);
        let cloud = pos("cloud infrastructure").unwrap();
        let data = pos("data infrastructure").unwrap();
        if let Some(experience) = pos("experience") {
            assert!(cloud < experience && data < experience);
        }
        for keyword in &keywords {
            for word in keyword.split(' ') {
                assert!(!["with", "and", "a", "in"].contains(&word), "{keyword}");
            }
        }
    }

    #[test]
    fn test_ranking_order_and_ties() {
        let keywords = extract_keywords(JOB, 40);
        assert_eq!(
            keywords,
            vec![
                "data engineer",
                "cloud infrastructure",
                "data infrastructure",
                "data",
                "infrastructure",
                "looking",
                "engineer",
                "experience",
                "cloud",
            ]
        );
    }

    #[test]
    fn test_frequency_breaks_length_ties() {
        let ranker = KeywordRanker::new(10);
        let ranked = ranker.rank_with_counts(
            ["rust", "go lang", "python", "python", "go lang", "rust", "python"]
                .map(String::from),
        );

        let phrases: Vec<_> = ranked.iter().map(|k| k.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["go lang", "python", "rust"]);
        assert_eq!(ranked[1].count, 3);
        assert_eq!(ranked[0].words, 2);
    }

    #[test]
    fn test_empty_and_zero_cap() {
        assert!(extract_keywords("", 10).is_empty());
        assert!(extract_keywords("", 0).is_empty());
        assert!(extract_keywords(JOB, 0).is_empty());
    }

    #[test]
    fn test_output_invariants() {
        let text = "The team will build and operate the platform. The platform team \
                    owns data pipelines, data quality and data platform tooling for the \
                    analytics platform. It is what it is, and that is that.";
        let stopwords = StopwordSet::english();

        for cap in [1, 3, 7, 40] {
            let keywords = extract_keywords(text, cap);
            assert!(keywords.len() <= cap);

            let unique: HashSet<_> = keywords.iter().collect();
            assert_eq!(unique.len(), keywords.len());

            for keyword in &keywords {
                assert!(keyword.split(' ').count() <= 3);
                assert!(!stopwords.covers_phrase(keyword));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Rust services, Rust tooling, distributed systems and systems design";
        assert_eq!(extract_keywords(text, 20), extract_keywords(text, 20));
    }
}
