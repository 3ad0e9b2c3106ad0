//! Serializable result of one tailoring run

use crate::processing::diff::DiffSpan;
use crate::processing::engine::TailoringOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a formatter or HTTP client needs from a tailoring run.
///
/// Field names on the wire follow the `/api/tailor` response: `keywords`, `tailored`,
/// `cover` and `diff`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoringReport {
    /// Ranked job-description keywords used for annotation
    pub keywords: Vec<String>,

    /// Annotated resume followed by the suggestions block
    pub tailored: String,

    /// Generated cover letter
    pub cover: String,

    /// Word-level diff markup of original vs tailored resume
    #[serde(rename = "diff")]
    pub diff_html: String,

    /// Keywords found nowhere in the resume, in ranked order
    pub missing_keywords: Vec<String>,

    /// Non-fatal problems met along the way
    pub warnings: Vec<String>,

    pub metadata: ReportMetadata,

    #[serde(skip)]
    pub diff_spans: Vec<DiffSpan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub resume_source: Option<String>,
    pub job_source: Option<String>,
    pub extractor: String,
    pub processing_time_ms: u64,
    pub matched_lines: usize,
    pub total_lines: usize,
}

impl TailoringReport {
    pub fn from_outcome(outcome: TailoringOutcome) -> Self {
        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            resume_source: None,
            job_source: None,
            extractor: outcome.extractor,
            processing_time_ms: outcome.processing_time_ms,
            matched_lines: outcome.resume.matched_line_count(),
            total_lines: outcome.resume.lines.len(),
        };

        Self {
            keywords: outcome.keywords,
            tailored: outcome.tailored,
            cover: outcome.cover,
            diff_html: outcome.diff_html,
            missing_keywords: outcome.resume.missing,
            warnings: outcome.warnings,
            metadata,
            diff_spans: outcome.diff_spans,
        }
    }

    /// Record where the inputs came from
    pub fn with_sources(mut self, resume: impl Into<String>, job: impl Into<String>) -> Self {
        self.metadata.resume_source = Some(resume.into());
        self.metadata.job_source = Some(job.into());
        self
    }

    /// Prepend warnings raised before the engine ran, such as ingestion failures
    pub fn with_leading_warnings(mut self, warnings: Vec<String>) -> Self {
        if !warnings.is_empty() {
            let mut all = warnings;
            all.append(&mut self.warnings);
            self.warnings = all;
        }
        self
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
