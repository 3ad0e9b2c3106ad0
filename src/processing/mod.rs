//! Keyword extraction, annotation, cover letter and diff pipeline

pub mod stopwords;
pub mod tokenizer;
pub mod phrase_extractor;
pub mod lexicon;
pub mod keyword_ranker;
pub mod annotator;
pub mod cover_letter;
pub mod diff;
pub mod engine;
