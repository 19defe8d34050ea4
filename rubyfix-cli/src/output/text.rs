//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use rubyfix_engine::FileReport;
use std::io::Write;

/// Plain text formatter - status lines and extracted text as they are
pub struct TextFormatter<W: Write> {
    writer: W,
    separator: &'static str,
    written: usize,
    ends_with_newline: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, separator: &'static str) -> Self {
        Self {
            writer,
            separator,
            written: 0,
            ends_with_newline: true,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_report(&mut self, report: &FileReport) -> Result<()> {
        if self.written > 0 {
            self.writer.write_all(self.separator.as_bytes())?;
        }
        let line = report.to_string();
        self.writer.write_all(line.as_bytes())?;
        self.ends_with_newline = line.ends_with('\n');
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if !self.ends_with_newline {
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
