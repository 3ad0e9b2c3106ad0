//! Input manager for handling different file types

use crate::error::{Result, TailorError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Text handed to the core, plus a user-facing warning when extraction failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestedText {
    pub text: String,
    pub file_type: FileType,
    pub warning: Option<String>,
}

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(TailorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Docx => {
                return Err(TailorError::UnsupportedFormat(format!(
                    "DOCX reading is not available; save {} as .txt, .md or .pdf",
                    path.display()
                )));
            }
            FileType::Unknown => {
                return Err(TailorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {} (expected .txt, .md or .pdf)",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Like `extract_text`, but failures become a warning with empty text
    pub async fn ingest(&mut self, path: &Path) -> IngestedText {
        let file_type = FileType::from_path(path);
        match self.extract_text(path).await {
            Ok(text) => IngestedText {
                text,
                file_type,
                warning: None,
            },
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                IngestedText {
                    text: String::new(),
                    file_type,
                    warning: Some(e.to_string()),
                }
            }
        }
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
