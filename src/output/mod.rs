//! Reports, formatters and document export

pub mod export;
pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::TailoringReport;
