//! Tailoring pipeline: keywords, annotated resume, cover letter and diff for one request

use crate::config::Config;
use crate::processing::annotator::{annotate, AnnotationOptions, TailoredResume};
use crate::processing::cover_letter::{CoverLetterComposer, Identity};
use crate::processing::diff::{DiffRenderer, DiffSpan};
use crate::processing::keyword_ranker::KeywordRanker;
use crate::processing::lexicon::LexiconExtractor;
use crate::processing::phrase_extractor::{ExtractorKind, NgramExtractor, PhraseExtractor};
use crate::processing::tokenizer::Tokenizer;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TailorRequest {
    pub resume_text: String,
    pub job_text: String,
    pub identity: Identity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoringOutcome {
    pub keywords: Vec<String>,
    pub cover_keywords: Vec<String>,
    pub resume: TailoredResume,
    pub tailored: String,
    pub cover: String,
    pub diff_spans: Vec<DiffSpan>,
    pub diff_html: String,
    pub extractor: String,
    pub warnings: Vec<String>,
    pub processing_time_ms: u64,
}

/// Holds the configured extractor and stage settings. Immutable once built, so one
/// engine can serve concurrent requests.
pub struct TailoringEngine {
    extractor: Box<dyn PhraseExtractor>,
    keyword_ranker: KeywordRanker,
    cover_ranker: KeywordRanker,
    annotation: AnnotationOptions,
    composer: CoverLetterComposer,
    diff: DiffRenderer,
    identity_defaults: Identity,
    warnings: Vec<String>,
}

impl TailoringEngine {
    /// Build from configuration. A lexicon that cannot be loaded degrades to the
    /// n-gram extractor with a warning attached to every outcome.
    pub fn new(config: &Config) -> Self {
        let mut warnings = Vec::new();
        let extractor = Self::build_extractor(config, &mut warnings);

        let cover = &config.cover_letter;
        Self {
            extractor,
            keyword_ranker: KeywordRanker::new(config.extraction.max_keywords),
            cover_ranker: KeywordRanker::new(config.extraction.cover_letter_pool),
            annotation: AnnotationOptions {
                match_mode: config.annotation.match_mode,
                max_suggestions: config.annotation.max_suggestions,
            },
            composer: CoverLetterComposer::new(cover.keyword_count),
            diff: DiffRenderer::new(config.diff.max_cells),
            identity_defaults: Identity::new(
                cover.default_name.clone(),
                cover.default_company.clone(),
                cover.default_position.clone(),
                cover.default_summary.clone(),
            ),
            warnings,
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn PhraseExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    fn build_extractor(config: &Config, warnings: &mut Vec<String>) -> Box<dyn PhraseExtractor> {
        let ngram = || -> Box<dyn PhraseExtractor> {
            Box::new(
                NgramExtractor::new()
                    .with_tokenizer(Tokenizer::with_min_len(config.extraction.min_token_len))
                    .with_policy(config.extraction.stopword_policy),
            )
        };

        match config.extraction.extractor {
            ExtractorKind::Ngram => ngram(),
            ExtractorKind::Lexicon => {
                let loaded = match &config.extraction.lexicon_path {
                    Some(path) => LexiconExtractor::from_file(path),
                    None => LexiconExtractor::builtin(),
                };
                match loaded {
                    Ok(lexicon) => {
                        info!("Using lexicon extractor with {} phrases", lexicon.phrase_count());
                        Box::new(lexicon)
                    }
                    Err(e) => {
                        let message = format!("Lexicon extractor unavailable, using n-grams instead: {}", e);
                        warn!("{}", message);
                        warnings.push(message);
                        ngram()
                    }
                }
            }
        }
    }

    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    /// Annotation keyword list for `text`
    pub fn keywords(&self, text: &str) -> Vec<String> {
        self.keyword_ranker.extract(self.extractor.as_ref(), text)
    }

    /// Separately capped list feeding the cover letter
    pub fn cover_keywords(&self, text: &str) -> Vec<String> {
        self.cover_ranker.extract(self.extractor.as_ref(), text)
    }

    pub fn annotate(&self, resume_text: &str, keywords: &[String]) -> TailoredResume {
        annotate(resume_text, keywords, &self.annotation)
    }

    pub fn cover_letter(&self, identity: &Identity, job_text: &str) -> String {
        let identity = identity.clone().or_defaults(&self.identity_defaults);
        self.composer.compose(&identity, &self.cover_keywords(job_text))
    }

    pub fn render_diff(&self, original: &str, tailored: &str) -> String {
        self.diff.render(original, tailored)
    }

    pub fn tailor(&self, request: &TailorRequest) -> TailoringOutcome {
        let started = Instant::now();
        let mut warnings = self.warnings.clone();

        if request.job_text.trim().is_empty() {
            warnings.push("Job description is empty; no keywords were extracted".to_string());
        }
        if request.resume_text.trim().is_empty() {
            warnings.push("Resume text is empty; every keyword is reported as missing".to_string());
        }

        let keywords = self.keywords(&request.job_text);
        debug!("Extracted {} keywords with {}", keywords.len(), self.extractor.name());

        let resume = self.annotate(&request.resume_text, &keywords);
        let tailored = resume.render();
        info!(
            "Annotated {} of {} resume lines, {} keywords missing",
            resume.matched_line_count(),
            resume.lines.len(),
            resume.missing.len()
        );

        let identity = request.identity.clone().or_defaults(&self.identity_defaults);
        let cover_keywords = self.cover_keywords(&request.job_text);
        let cover = self.composer.compose(&identity, &cover_keywords);

        let (diff_spans, diff_html) = self.diff.render_with_spans(&request.resume_text, &tailored);

        TailoringOutcome {
            keywords,
            cover_keywords,
            resume,
            tailored,
            cover,
            diff_spans,
            diff_html,
            extractor: self.extractor.name().to_string(),
            warnings,
            processing_time_ms: started.elapsed().as_millis() as u64,
        }
    }
}

impl Default for TailoringEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
