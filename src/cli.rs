//! CLI interface for the resume tailor

use crate::config::OutputFormat;
use crate::processing::cover_letter::Identity;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-tailor")]
#[command(about = "Tailor a resume to a job description")]
#[command(
    long_about = "Extract keywords from a job description, annotate resume lines that match them, \
suggest missing ones, draft a cover letter and show a word-level diff"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Applicant details for the cover letter; blanks fall back to configured defaults
#[derive(Args, Debug, Clone, Default)]
pub struct IdentityArgs {
    /// Applicant name
    #[arg(long)]
    pub name: Option<String>,

    /// Hiring company
    #[arg(long)]
    pub company: Option<String>,

    /// Position applied for
    #[arg(long)]
    pub position: Option<String>,

    /// One-sentence summary appended to the opening paragraph
    #[arg(long)]
    pub summary: Option<String>,
}

impl IdentityArgs {
    pub fn into_identity(self) -> Identity {
        Identity::new(
            self.name.unwrap_or_default(),
            self.company.unwrap_or_default(),
            self.position.unwrap_or_default(),
            self.summary.unwrap_or_default(),
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Annotate a resume, suggest missing keywords, draft a cover letter
    Tailor {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        #[command(flatten)]
        identity: IdentityArgs,

        /// Include the word-level diff in console output
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown, html (defaults to config)
        #[arg(short, long)]
        output: Option<String>,

        /// Save the report to a file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Write the tailored resume as a document (.txt, .pdf); defaults to the resume's format
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// List ranked keywords from a job description
    Keywords {
        /// Path to job description file
        #[arg(short, long)]
        job: PathBuf,

        /// Maximum number of keywords (defaults to config)
        #[arg(short, long)]
        max: Option<usize>,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Draft a cover letter from a job description
    CoverLetter {
        /// Path to job description file
        #[arg(short, long)]
        job: PathBuf,

        #[command(flatten)]
        identity: IdentityArgs,

        /// Save the letter (.txt or .pdf)
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Word-level diff between two documents
    Diff {
        /// Original document
        original: PathBuf,

        /// Revised document
        revised: PathBuf,

        /// Print HTML markup instead of the colored inline view
        #[arg(long)]
        html: bool,
    },

    /// Serve the JSON API
    Serve {
        /// Listen address (defaults to config)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (defaults to config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err(format!(
            "File has no extension. Allowed: {}",
            allowed_extensions.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tailor() {
        let cli = Cli::parse_from([
            "resume-tailor",
            "tailor",
            "-r",
            "cv.pdf",
            "-j",
            "job.txt",
            "--company",
            "Acme",
            "-o",
            "json",
        ]);

        match cli.command {
            Commands::Tailor { resume, identity, output, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(identity.company.as_deref(), Some("Acme"));
                assert_eq!(identity.name, None);
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected tailor command"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("a.TXT"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("a.doc"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("a"), &["txt"]).is_err());
    }
}
