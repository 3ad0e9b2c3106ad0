//! Resume tailoring library
//!
//! Ranks keyword phrases from a job description, annotates the resume lines that mention
//! them, suggests the missing ones, drafts a cover letter and renders a word-level diff.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod server;

pub use config::Config;
pub use error::{Result, TailorError};
pub use processing::annotator::annotate_and_suggest;
pub use processing::cover_letter::{compose_cover_letter, Identity};
pub use processing::diff::render_diff;
pub use processing::engine::{TailorRequest, TailoringEngine, TailoringOutcome};
pub use processing::keyword_ranker::extract_keywords;
