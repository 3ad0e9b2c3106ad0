//! Resume line annotation and suggestion bullets

use serde::{Deserialize, Serialize};

pub const SUGGESTIONS_HEADER: &str = "--- Suggested additions ---";

pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;

/// How a keyword is matched against resume text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring; "art" matches inside "party"
    #[default]
    Substring,
    /// Case-insensitive and delimited by non-alphanumeric characters
    WordBoundary,
}

impl MatchMode {
    /// `haystack` and `needle` must already be lowercased
    fn matches(self, haystack: &str, needle: &str) -> bool {
        if needle.is_empty() {
            return false;
        }
        match self {
            MatchMode::Substring => haystack.contains(needle),
            MatchMode::WordBoundary => haystack.match_indices(needle).any(|(start, _)| {
                let before = haystack[..start].chars().next_back();
                let after = haystack[start + needle.len()..].chars().next();
                !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AnnotationOptions {
    pub match_mode: MatchMode,
    pub max_suggestions: usize,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedLine {
    pub text: String,
    pub matches: Vec<String>,
}

impl AnnotatedLine {
    pub fn render(&self) -> String {
        if self.matches.is_empty() {
            self.text.clone()
        } else {
            format!("{}  (keywords: {})", self.text, self.matches.join(", "))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredResume {
    pub lines: Vec<AnnotatedLine>,
    /// Keywords absent from the whole resume, in keyword order
    pub missing: Vec<String>,
    pub suggestions: Vec<String>,
}

impl TailoredResume {
    /// Annotated lines, a blank line, the suggestions header and one bullet per line
    pub fn render(&self) -> String {
        let mut output = self
            .lines
            .iter()
            .map(AnnotatedLine::render)
            .collect::<Vec<_>>()
            .join("\n");

        output.push_str("\n\n");
        output.push_str(SUGGESTIONS_HEADER);
        for suggestion in &self.suggestions {
            output.push('\n');
            output.push_str(suggestion);
        }

        output
    }

    pub fn matched_line_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.matches.is_empty()).count()
    }
}

/// Non-empty, trimmed lines of `text`
pub fn resume_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn suggestion_for(keyword: &str) -> String {
    format!(
        "- Suggested: Demonstrated experience with {} (describe a specific project or outcome).",
        keyword
    )
}

pub fn annotate(resume_text: &str, keywords: &[String], options: &AnnotationOptions) -> TailoredResume {
    let lowered_keywords: Vec<String> = keywords.iter().map(|k| k.trim().to_lowercase()).collect();
    let lines = resume_lines(resume_text);

    let annotated: Vec<AnnotatedLine> = lines
        .iter()
        .map(|line| {
            let lowered = line.to_lowercase();
            let matches = keywords
                .iter()
                .zip(&lowered_keywords)
                .filter(|(_, needle)| options.match_mode.matches(&lowered, needle))
                .map(|(keyword, _)| keyword.clone())
                .collect();
            AnnotatedLine {
                text: line.to_string(),
                matches,
            }
        })
        .collect();

    let full_text = lines.join(" ").to_lowercase();
    let missing: Vec<String> = keywords
        .iter()
        .zip(&lowered_keywords)
        .filter(|(_, needle)| !needle.is_empty() && !options.match_mode.matches(&full_text, needle))
        .map(|(keyword, _)| keyword.clone())
        .collect();

    let suggestions = missing
        .iter()
        .take(options.max_suggestions)
        .map(|k| suggestion_for(k))
        .collect();

    TailoredResume {
        lines: annotated,
        missing,
        suggestions,
    }
}

/// Annotated resume followed by suggestion bullets for missing keywords
pub fn annotate_and_suggest(resume_text: &str, keywords: &[String]) -> String {
    annotate(resume_text, keywords, &AnnotationOptions::default()).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_annotates_matching_lines() {
        let resume = "Built scalable data infrastructure\nLed a team of 5";
        let output = annotate_and_suggest(resume, &keywords(&["data infrastructure", "cloud"]));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines[0],
            "Built scalable data infrastructure  (keywords: data infrastructure)"
        );
        assert_eq!(lines[1], "Led a team of 5");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], SUGGESTIONS_HEADER);
        assert_eq!(
            lines[4],
            "- Suggested: Demonstrated experience with cloud (describe a specific project or outcome)."
        );
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_case_insensitive_substring_match() {
        let result = annotate(
            "  Designed CLOUD-native services  \n\n\nPlanned the office party",
            &keywords(&["cloud", "art"]),
            &AnnotationOptions::default(),
        );

        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].text, "Designed CLOUD-native services");
        assert_eq!(result.lines[0].matches, vec!["cloud"]);
        assert_eq!(result.lines[1].matches, vec!["art"]);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_word_boundary_mode() {
        let options = AnnotationOptions {
            match_mode: MatchMode::WordBoundary,
            ..AnnotationOptions::default()
        };
        let result = annotate("Planned the office party", &keywords(&["art", "office"]), &options);

        assert_eq!(result.lines[0].matches, vec!["office"]);
        assert_eq!(result.missing, vec!["art"]);
    }

    #[test]
    fn test_matches_follow_keyword_order() {
        let result = annotate(
            "Python and Rust services on AWS",
            &keywords(&["aws", "rust", "go", "python"]),
            &AnnotationOptions::default(),
        );
        assert_eq!(result.lines[0].matches, vec!["aws", "rust", "python"]);
    }

    #[test]
    fn test_suggestions_capped_and_ordered() {
        let many: Vec<String> = (0..15).map(|i| format!("skill{}", (b'a' + i) as char)).collect();
        let result = annotate("Nothing relevant here", &many, &AnnotationOptions::default());

        assert_eq!(result.missing.len(), 15);
        assert_eq!(result.suggestions.len(), DEFAULT_MAX_SUGGESTIONS);
        assert!(result.suggestions[0].contains("skilla"));
        assert!(result.suggestions[9].contains("skillj"));
    }

    #[test]
    fn test_empty_resume_suggests_everything() {
        let kws = keywords(&["rust", "kafka"]);
        let result = annotate("", &kws, &AnnotationOptions::default());

        assert!(result.lines.is_empty());
        assert_eq!(result.missing, kws);
        assert_eq!(
            result.render(),
            format!("\n\n{}\n{}\n{}", SUGGESTIONS_HEADER, suggestion_for("rust"), suggestion_for("kafka"))
        );
    }

    #[test]
    fn test_no_missing_keywords_leaves_header_alone() {
        let output = annotate_and_suggest("Rust developer", &keywords(&["rust"]));
        assert!(output.ends_with(SUGGESTIONS_HEADER));
    }

    #[test]
    fn test_suggested_keywords_absent_annotated_present() {
        let resume = "Shipped Kafka consumers in Rust\nMentored interns\nOwned on-call rotation";
        let kws = keywords(&["kafka", "rust", "terraform", "mentored", "call rot", "python"]);
        let result = annotate(resume, &kws, &AnnotationOptions::default());
        let lowered = resume.to_lowercase();

        for missing in &result.missing {
            assert!(!lowered.contains(missing.as_str()));
        }
        for line in &result.lines {
            for keyword in &line.matches {
                assert!(line.text.to_lowercase().contains(keyword.as_str()));
            }
        }
        assert_eq!(result.missing, vec!["terraform", "python"]);
    }
}
