//! Configuration management for the resume tailor

use crate::error::{Result, TailorError};
use crate::processing::annotator::MatchMode;
use crate::processing::diff::MAX_TABLE_CELLS;
use crate::processing::phrase_extractor::{ExtractorKind, StopwordPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub annotation: AnnotationConfig,
    pub cover_letter: CoverLetterConfig,
    pub diff: DiffConfig,
    pub output: OutputConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Cap on the keyword list used for annotation and suggestions
    pub max_keywords: usize,
    /// Cap on the separate extraction that feeds the cover letter
    pub cover_letter_pool: usize,
    pub min_token_len: usize,
    pub stopword_policy: StopwordPolicy,
    pub extractor: ExtractorKind,
    /// Phrase lexicon for the lexicon extractor; the built-in skill lexicon is used when unset
    pub lexicon_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub match_mode: MatchMode,
    pub max_suggestions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverLetterConfig {
    pub keyword_count: usize,
    pub default_name: String,
    pub default_company: String,
    pub default_position: String,
    pub default_summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Upper bound on LCS table cells before the renderer falls back to plain text
    pub max_cells: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_keywords: 40,
            cover_letter_pool: 10,
            min_token_len: 3,
            stopword_policy: StopwordPolicy::default(),
            extractor: ExtractorKind::default(),
            lexicon_path: None,
        }
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            max_suggestions: 10,
        }
    }
}

impl Default for CoverLetterConfig {
    fn default() -> Self {
        Self {
            keyword_count: 6,
            default_name: "Your Name".to_string(),
            default_company: "Company".to_string(),
            default_position: "Position".to_string(),
            default_summary: "I have X years experience delivering measurable results.".to_string(),
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_cells: 4_000_000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| TailorError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TailorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-tailor")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.extraction.min_token_len == 0 {
            return Err(TailorError::Configuration(
                "extraction.min_token_len must be at least 1".to_string(),
            ));
        }
        if self.cover_letter.keyword_count > self.extraction.cover_letter_pool {
            return Err(TailorError::Configuration(format!(
                "cover_letter.keyword_count ({}) exceeds extraction.cover_letter_pool ({})",
                self.cover_letter.keyword_count, self.extraction.cover_letter_pool
            )));
        }
        if self.diff.max_cells > MAX_TABLE_CELLS {
            return Err(TailorError::Configuration(format!(
                "diff.max_cells ({}) exceeds the limit of {}",
                self.diff.max_cells, MAX_TABLE_CELLS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caps() {
        let config = Config::default();
        assert_eq!(config.extraction.max_keywords, 40);
        assert_eq!(config.extraction.cover_letter_pool, 10);
        assert_eq!(config.cover_letter.keyword_count, 6);
        assert_eq!(config.annotation.max_suggestions, 10);
        assert_eq!(config.annotation.match_mode, MatchMode::Substring);
        assert_eq!(config.extraction.stopword_policy, StopwordPolicy::Boundary);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            "[annotation]\nmatch_mode = \"word_boundary\"\n\n[server]\nport = 8080\n",
        )
        .unwrap();

        assert_eq!(config.annotation.match_mode, MatchMode::WordBoundary);
        assert_eq!(config.annotation.max_suggestions, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.extraction.max_keywords, 40);
    }

    #[test]
    fn test_rejects_cover_letter_count_above_pool() {
        let mut config = Config::default();
        config.cover_letter.keyword_count = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unbounded_diff_budget() {
        let mut config = Config::default();
        config.diff.max_cells = usize::MAX;
        assert!(config.validate().is_err());

        config.diff.max_cells = MAX_TABLE_CELLS;
        assert!(config.validate().is_ok());
    }
}
