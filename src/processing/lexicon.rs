//! Lexicon-backed phrase tagging
//!
//! The lexicon acts as the optional linguistic model: a plain phrase list (one phrase per
//! line, lines starting with `#` are comments) whose entries are tagged wherever they occur in the text.

use crate::error::{Result, TailorError};
use crate::processing::phrase_extractor::{PhraseExtractor, MAX_PHRASE_WORDS};
use crate::processing::stopwords::StopwordSet;
use aho_corasick::{AhoCorasick, MatchKind};
use log::{debug, info};
use std::collections::HashSet;
use std::path::Path;

pub struct LexiconExtractor {
    matcher: AhoCorasick,
    phrases: Vec<String>,
}

impl LexiconExtractor {
    /// Extractor over the built-in skill lexicon
    pub fn builtin() -> Result<Self> {
        Self::from_phrases(default_skill_lexicon())
    }

    /// Load a lexicon file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TailorError::Lexicon(format!("Failed to read lexicon '{}': {}", path.display(), e))
        })?;

        let phrases = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let extractor = Self::from_phrases(phrases)?;
        info!(
            "Loaded {} lexicon phrases from {}",
            extractor.phrase_count(),
            path.display()
        );
        Ok(extractor)
    }

    pub fn from_phrases<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = StopwordSet::english();
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for phrase in phrases {
            let normalized = phrase
                .as_ref()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();

            let words = normalized.split(' ').count();
            if normalized.is_empty() || words > MAX_PHRASE_WORDS {
                debug!("Skipping lexicon entry '{}'", phrase.as_ref());
                continue;
            }
            if stopwords.covers_phrase(&normalized) {
                continue;
            }
            if seen.insert(normalized.clone()) {
                entries.push(normalized);
            }
        }

        if entries.is_empty() {
            return Err(TailorError::Lexicon("Lexicon contains no usable phrases".to_string()));
        }

        // Leftmost-longest prefers "machine learning" over "machine"
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&entries)
            .map_err(|e| TailorError::Lexicon(format!("Failed to build lexicon matcher: {}", e)))?;

        Ok(Self {
            matcher,
            phrases: entries,
        })
    }

    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }
}

impl PhraseExtractor for LexiconExtractor {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn candidates(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();

        self.matcher
            .find_iter(&lowered)
            .filter(|mat| on_word_boundary(&lowered, mat.start(), mat.end()))
            .map(|mat| self.phrases[mat.pattern().as_usize()].clone())
            .collect()
    }
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Built-in skill lexicon used when no lexicon file is configured
pub fn default_skill_lexicon() -> Vec<&'static str> {
    vec![
        // Programming languages
        "rust", "python", "javascript", "typescript", "java", "c++", "c#", "ruby", "php",
        "swift", "kotlin", "scala", "haskell", "clojure", "golang", "matlab", "sql",
        // Web technologies
        "react", "vue", "angular", "svelte", "html", "css", "sass", "tailwind", "webpack",
        "node.js", "express", "nextjs", "graphql", "rest", "grpc",
        // Infrastructure
        "docker", "kubernetes", "aws", "azure", "gcp", "terraform", "ansible", "jenkins",
        "ci/cd", "devops", "microservices", "cloud infrastructure", "data infrastructure",
        "distributed systems", "redis", "elasticsearch", "nginx", "linux",
        // Databases
        "postgresql", "mysql", "mongodb", "cassandra", "dynamodb", "sqlite", "neo4j",
        // Data and machine learning
        "machine learning", "deep learning", "data pipelines", "data engineering",
        "tensorflow", "pytorch", "pandas", "numpy", "spark", "hadoop", "kafka", "airflow",
        // Testing
        "pytest", "junit", "selenium", "cypress", "unit testing", "tdd",
        // Practices and soft skills
        "agile", "scrum", "kanban", "leadership", "communication", "teamwork",
        "problem solving", "critical thinking", "project management", "time management",
        "collaboration", "mentoring", "stakeholder management", "customer service",
        // Roles
        "software engineer", "data engineer", "data scientist", "ml engineer",
        "product manager", "full stack", "frontend", "backend", "site reliability",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicon_tags_multiword_skills() {
        let extractor = LexiconExtractor::builtin().unwrap();
        let candidates = extractor.candidates(
            "Data Engineer with Kafka, Spark and machine learning. Kafka on AWS.",
        );

        assert_eq!(
            candidates,
            vec!["data engineer", "kafka", "spark", "machine learning", "kafka", "aws"]
        );
    }

    #[test]
    fn test_word_boundaries_respected() {
        let extractor = LexiconExtractor::from_phrases(["art", "rest"]).unwrap();
        assert!(extractor.candidates("party restaurant").is_empty());
        assert_eq!(extractor.candidates("REST apis and art"), vec!["rest", "art"]);
    }

    #[test]
    fn test_entries_filtered_on_load() {
        let extractor = LexiconExtractor::from_phrases([
            "continuous integration and delivery",
            "the",
            "Kubernetes",
            "kubernetes",
            "  cloud   native  ",
        ])
        .unwrap();

        assert_eq!(extractor.phrase_count(), 2);
        assert_eq!(extractor.candidates("Cloud native Kubernetes"), vec!["cloud native", "kubernetes"]);
    }

    #[test]
    fn test_empty_lexicon_rejected() {
        assert!(LexiconExtractor::from_phrases(Vec::<String>::new()).is_err());
        assert!(LexiconExtractor::from_phrases(["and", "the"]).is_err());
    }
}
