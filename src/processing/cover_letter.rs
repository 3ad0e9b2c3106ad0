//! Templated cover letter

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Keywords named in the letter
pub const DEFAULT_LETTER_KEYWORDS: usize = 6;

/// Applicant-supplied fields for the letter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub company: String,
    pub position: String,
    pub summary: String,
}

impl Identity {
    pub fn new(
        name: impl Into<String>,
        company: impl Into<String>,
        position: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            position: position.into(),
            summary: summary.into(),
        }
    }

    /// Replace blank fields with the given defaults
    pub fn or_defaults(self, defaults: &Identity) -> Self {
        fn pick(value: String, fallback: &str) -> String {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value
            }
        }

        Self {
            name: pick(self.name, &defaults.name),
            company: pick(self.company, &defaults.company),
            position: pick(self.position, &defaults.position),
            summary: pick(self.summary, &defaults.summary),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CoverLetterComposer {
    keyword_count: usize,
}

impl Default for CoverLetterComposer {
    fn default() -> Self {
        Self::new(DEFAULT_LETTER_KEYWORDS)
    }
}

impl CoverLetterComposer {
    pub fn new(keyword_count: usize) -> Self {
        Self { keyword_count }
    }

    pub fn compose(&self, identity: &Identity, keywords: &[String]) -> String {
        self.compose_on(Local::now().date_naive(), identity, keywords)
    }

    pub fn compose_on(&self, date: NaiveDate, identity: &Identity, keywords: &[String]) -> String {
        let top_keywords = keywords
            .iter()
            .take(self.keyword_count)
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        let keyword_clause = if top_keywords.is_empty() {
            String::new()
        } else {
            format!(", particularly in {}", top_keywords)
        };

        let mut opening = format!(
            "I am excited to apply for the {} role. I bring experience that aligns with your needs{}.",
            identity.position, keyword_clause
        );
        if !identity.summary.is_empty() {
            opening.push(' ');
            opening.push_str(&identity.summary);
        }

        format!(
            "{date}\n\nDear Hiring Team at {company},\n\n{opening}\n\n\
             I look forward to discussing how my background can contribute to {company}'s success.\n\n\
             Sincerely,\n{name}\n",
            date = format_letter_date(date),
            company = identity.company,
            opening = opening,
            name = identity.name,
        )
    }
}

/// Full month name, day without padding, four-digit year
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Letter dated today using the first six keywords
pub fn compose_cover_letter(
    name: &str,
    company: &str,
    position: &str,
    summary: &str,
    keywords: &[String],
) -> String {
    CoverLetterComposer::default().compose(&Identity::new(name, company, position, summary), keywords)
}

pub fn compose_cover_letter_on(
    date: NaiveDate,
    name: &str,
    company: &str,
    position: &str,
    summary: &str,
    keywords: &[String],
) -> String {
    CoverLetterComposer::default().compose_on(date, &Identity::new(name, company, position, summary), keywords)
}
