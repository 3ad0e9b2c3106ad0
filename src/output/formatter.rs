//! Output formatters for tailoring reports

use crate::config::OutputFormat;
use crate::error::{Result, TailorError};
use crate::output::report::TailoringReport;
use crate::processing::diff::{DiffSpan, SpanKind};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tailored Resume Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .keyword {
            display: inline-block;
            padding: 2px 10px;
            margin: 3px;
            border-radius: 12px;
            background: #e7f1fa;
        }
        .keyword.missing { background: #fff3cd; }
        pre {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            white-space: pre-wrap;
        }
        .diff {
            max-height: 400px;
            overflow-y: auto;
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            white-space: pre-wrap;
        }
        ins { background: #d4edda; text-decoration: none; }
        del { background: #f8d7da; }
        .warnings {
            background: #fff3cd;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #ffc107;
        }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Tailored Resume Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>
        {% if !warnings.is_empty() %}
        <div class="section warnings">
            <ul>
            {% for warning in warnings %}
                <li>{{ warning }}</li>
            {% endfor %}
            </ul>
        </div>
        {% endif %}
        <div class="section">
            <h2>Keywords</h2>
            {% for keyword in keywords %}<span class="keyword">{{ keyword }}</span>{% endfor %}
            {% if !missing.is_empty() %}
            <h3>Not yet in your resume</h3>
            {% for keyword in missing %}<span class="keyword missing">{{ keyword }}</span>{% endfor %}
            {% endif %}
        </div>
        <div class="section">
            <h2>Tailored Resume</h2>
            <pre>{{ tailored }}</pre>
        </div>
        <div class="section">
            <h2>Changes</h2>
            <div class="diff">{{ diff_html|safe }}</div>
        </div>
        <div class="section">
            <h2>Cover Letter</h2>
            <pre>{{ cover }}</pre>
        </div>
        <div class="metadata">
            Resume Tailor v{{ version }} | Extractor: {{ extractor }} | {{ matched_lines }} of {{ total_lines }} lines matched
        </div>
    </div>
</body>
</html>"#,
    ext = "html"
)]
struct HtmlTemplate<'a> {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    warnings: &'a [String],
    keywords: &'a [String],
    missing: &'a [String],
    tailored: &'a str,
    diff_html: &'a str,
    cover: &'a str,
    version: &'a str,
    extractor: &'a str,
    matched_lines: usize,
    total_lines: usize,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    /// Inline diff: colored when enabled, otherwise `{+added+}` / `[-removed-]`
    pub fn format_diff(&self, spans: &[DiffSpan]) -> String {
        spans
            .iter()
            .map(|span| match span.kind {
                SpanKind::Equal => span.text.clone(),
                SpanKind::Inserted | SpanKind::ReplacedNew => {
                    if self.use_colors {
                        span.text.green().underline().to_string()
                    } else {
                        format!("{{+{}+}}", span.text)
                    }
                }
                SpanKind::Deleted | SpanKind::ReplacedOld => {
                    if self.use_colors {
                        span.text.red().strikethrough().to_string()
                    } else {
                        format!("[-{}-]", span.text)
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME TAILORING", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        if report.has_warnings() {
            output.push_str(&self.format_header("Warnings", 3));
            for warning in &report.warnings {
                output.push_str(&format!("  ! {}\n", self.colorize(warning, Color::Yellow)));
            }
        }

        output.push_str(&self.format_header(&format!("Keywords ({})", report.keywords.len()), 2));
        for (i, keyword) in report.keywords.iter().enumerate() {
            let color = if report.missing_keywords.contains(keyword) {
                Color::Yellow
            } else {
                Color::Green
            };
            output.push_str(&format!("  {:>2}. {}\n", i + 1, self.colorize(keyword, color)));
        }

        output.push_str(&self.format_header("Tailored Resume", 2));
        output.push_str(&report.tailored);
        output.push('\n');

        if self.detailed {
            output.push_str(&self.format_header("Changes", 2));
            if report.diff_spans.is_empty() {
                output.push_str(&self.colorize("(no word-level diff available)", Color::BrightBlack));
            } else {
                output.push_str(&self.format_diff(&report.diff_spans));
            }
            output.push('\n');
        }

        output.push_str(&self.format_header("Cover Letter", 2));
        output.push_str(&report.cover);

        output.push_str(&format!(
            "\n{} Resume Tailor v{} | extractor: {} | {} of {} lines matched\n",
            self.colorize("i", Color::Blue),
            report.metadata.version,
            report.metadata.extractor,
            report.metadata.matched_lines,
            report.metadata.total_lines
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn file_label(source: Option<&str>) -> String {
        source
            .map(|s| {
                Path::new(s)
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| s.to_string())
            })
            .unwrap_or_else(|| "-".to_string())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Tailored Resume Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                Self::file_label(report.metadata.resume_source.as_deref()),
                Self::file_label(report.metadata.job_source.as_deref())
            ));
        }

        if report.has_warnings() {
            output.push_str("> **Warnings**\n");
            for warning in &report.warnings {
                output.push_str(&format!("> - {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str("## Keywords\n\n");
        output.push_str("| # | Keyword | In resume |\n");
        output.push_str("|---|---------|-----------|\n");
        for (i, keyword) in report.keywords.iter().enumerate() {
            let present = if report.missing_keywords.contains(keyword) { "no" } else { "yes" };
            output.push_str(&format!("| {} | {} | {} |\n", i + 1, keyword, present));
        }
        output.push('\n');

        output.push_str("## Tailored Resume\n\n```text\n");
        output.push_str(&report.tailored);
        output.push_str("\n```\n\n");

        output.push_str("## Cover Letter\n\n");
        output.push_str(&report.cover);
        output.push('\n');

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Tailor v{} using the {} extractor*\n",
                report.metadata.version, report.metadata.extractor
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data<'a>(&self, report: &'a TailoringReport) -> HtmlTemplate<'a> {
        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            warnings: &report.warnings,
            keywords: &report.keywords,
            missing: &report.missing_keywords,
            tailored: &report.tailored,
            diff_html: &report.diff_html,
            cover: &report.cover,
            version: &report.metadata.version,
            extractor: &report.metadata.extractor,
            matched_lines: report.metadata.matched_lines,
            total_lines: report.metadata.total_lines,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &TailoringReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| TailorError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &TailoringReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
