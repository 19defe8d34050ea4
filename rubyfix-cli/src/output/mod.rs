//! Output formatting module

use anyhow::Result;
use rubyfix_engine::FileReport;
use std::io::Write;

/// Trait for report formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the report for one input
    fn format_report(&mut self, report: &FileReport) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One status line (or extracted text block) per input
    Text,
    /// JSON array of reports
    Json,
    /// Markdown document
    Markdown,
}

/// Writer type shared by all formatters
pub type ReportWriter = Box<dyn Write + Send + Sync>;

/// Build the formatter for `format`
///
/// `separator` goes between text reports: a newline for status lines, a
/// blank line for extracted text.
pub fn create_formatter(
    format: OutputFormat,
    writer: ReportWriter,
    separator: &'static str,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, separator)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}
