//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use rubyfix_engine::{FileReport, Outcome};
use std::io::Write;

/// Markdown formatter - a table of fixes, or one section per extracted file
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    table_open: bool,
    file_count: usize,
    failed_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            table_open: false,
            file_count: 0,
            failed_count: 0,
        }
    }

    fn row(&mut self, path: &str, status: &str, details: &str) -> Result<()> {
        if !self.table_open {
            writeln!(self.writer, "| File | Status | Details |")?;
            writeln!(self.writer, "|------|--------|---------|")?;
            self.table_open = true;
        }
        writeln!(
            self.writer,
            "| {} | {status} | {} |",
            escape_cell(path),
            escape_cell(details)
        )?;
        Ok(())
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_report(&mut self, report: &FileReport) -> Result<()> {
        self.file_count += 1;
        let path = report.path.display().to_string();
        match &report.outcome {
            Outcome::Resplit { target, stats } => {
                let details = format!(
                    "{} of {} ruby run(s) split, written to {}",
                    stats.split,
                    stats.candidates,
                    target.display()
                );
                self.row(&path, "success", &details)?;
            }
            Outcome::Extracted { text } => {
                if self.table_open {
                    writeln!(self.writer)?;
                    self.table_open = false;
                }
                writeln!(self.writer, "## {path}")?;
                writeln!(self.writer)?;
                writeln!(self.writer, "```text")?;
                write!(self.writer, "{text}")?;
                if !text.ends_with('\n') {
                    writeln!(self.writer)?;
                }
                writeln!(self.writer, "```")?;
                writeln!(self.writer)?;
            }
            Outcome::Failed { message } | Outcome::InputFailed { message } => {
                self.failed_count += 1;
                self.row(&path, "error", message)?;
            }
            Outcome::Unresolved => {
                self.failed_count += 1;
                self.row(&path, "unresolved", "no matching file")?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Inputs: {}, failed: {}*",
            self.file_count, self.failed_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
