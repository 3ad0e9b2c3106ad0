//! Writing tailored documents back to disk as txt or pdf

use crate::error::{Result, TailorError};
use crate::input::file_detector::FileType;
use log::{info, warn};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 5.5;
/// Helvetica at 11pt fits roughly this many characters in the text column
const WRAP_COLUMNS: usize = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Txt,
    Pdf,
    Docx,
}

impl ExportFormat {
    /// Same format as the upload when it can be written, txt otherwise
    pub fn matching(file_type: FileType) -> Self {
        match file_type {
            FileType::Pdf => ExportFormat::Pdf,
            FileType::Docx => ExportFormat::Docx,
            FileType::Text | FileType::Markdown | FileType::Unknown => ExportFormat::Txt,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        Self::matching(FileType::from_path(path))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

/// Encoded document bytes for `format`
pub fn export_bytes(text: &str, format: ExportFormat, title: &str) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Txt => Ok(text.as_bytes().to_vec()),
        ExportFormat::Pdf => render_pdf(text, title),
        ExportFormat::Docx => Err(TailorError::UnsupportedFormat(
            "DOCX writing is not available".to_string(),
        )),
    }
}

/// Write `text` to `path` in the format its extension names. A docx target is written as
/// txt next to it; the returned path is where the file actually landed.
pub fn export_to_file(text: &str, path: &Path) -> Result<PathBuf> {
    let format = ExportFormat::from_path(path);
    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Tailored Resume".to_string());

    let (target, bytes) = match export_bytes(text, format, &title) {
        Ok(bytes) => (path.to_path_buf(), bytes),
        Err(TailorError::UnsupportedFormat(reason)) => {
            let fallback = path.with_extension(ExportFormat::Txt.extension());
            warn!("{}; writing {} instead", reason, fallback.display());
            (fallback, text.as_bytes().to_vec())
        }
        Err(e) => return Err(e),
    };

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&target, bytes)?;
    info!("Exported {} ({})", target.display(), ExportFormat::from_path(&target).extension());
    Ok(target)
}

fn render_pdf(text: &str, title: &str) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| TailorError::Export(format!("Failed to load PDF font: {}", e)))?;

    let lines = wrap_lines(text, WRAP_COLUMNS);
    let per_page = lines_per_page();
    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    for (page_index, chunk) in lines.chunks(per_page).enumerate() {
        if page_index > 0 {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
        }

        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
        for line in chunk {
            if !line.is_empty() {
                layer.use_text(latin1_only(line), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
            }
            y -= LINE_HEIGHT_MM;
        }
    }

    doc.save_to_bytes()
        .map_err(|e| TailorError::Export(format!("Failed to write PDF: {}", e)))
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM).floor() as usize
}

/// Greedy word wrap; words longer than a line are split
pub fn wrap_lines(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut wrapped = Vec::new();

    for source_line in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in source_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > columns {
                if current_len > 0 {
                    wrapped.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                wrapped.push(word.drain(..columns).collect());
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > columns && current_len > 0 {
                wrapped.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        wrapped.push(current);
    }

    wrapped
}

// Builtin PDF fonts only cover Latin-1
fn latin1_only(line: &str) -> String {
    line.chars().map(|c| if (c as u32) < 256 { c } else { '?' }).collect()
}
