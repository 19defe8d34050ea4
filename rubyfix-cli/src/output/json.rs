//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use rubyfix_engine::{FileReport, Outcome, ResplitStats};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs reports as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    reports: Vec<ReportData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportData {
    /// Input file or argument
    pub path: String,
    /// `success`, `error` or `unresolved`
    pub status: String,
    /// Written file, for successful fixes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Extracted text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Run counters, for successful fixes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsData>,
}

/// Run counters of one fixed document
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsData {
    /// Ruby runs inspected
    pub candidates: usize,
    /// Ruby runs split
    pub split: usize,
    /// Ruby runs over a single segment
    pub unsplittable: usize,
    /// Ruby runs without a usable anchor
    pub unresolved: usize,
    /// Runs written in their place
    pub runs_written: usize,
}

impl From<&ResplitStats> for StatsData {
    fn from(stats: &ResplitStats) -> Self {
        Self {
            candidates: stats.candidates,
            split: stats.split,
            unsplittable: stats.unsplittable,
            unresolved: stats.unresolved,
            runs_written: stats.runs_written,
        }
    }
}

impl From<&FileReport> for ReportData {
    fn from(report: &FileReport) -> Self {
        let mut data = Self {
            path: report.path.display().to_string(),
            status: "success".to_string(),
            target: None,
            text: None,
            message: None,
            stats: None,
        };
        match &report.outcome {
            Outcome::Resplit { target, stats } => {
                data.target = Some(target.display().to_string());
                data.stats = Some(stats.into());
            }
            Outcome::Extracted { text } => data.text = Some(text.clone()),
            Outcome::Failed { message } | Outcome::InputFailed { message } => {
                data.status = "error".to_string();
                data.message = Some(message.clone());
            }
            Outcome::Unresolved => data.status = "unresolved".to_string(),
        }
        data
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            reports: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_report(&mut self, report: &FileReport) -> Result<()> {
        self.reports.push(report.into());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.reports)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.reports)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_reports_as_array() {
        let mut formatter = JsonFormatter::new(Vec::new(), false);
        formatter
            .format_report(&FileReport {
                path: PathBuf::from("a.docx"),
                outcome: Outcome::Resplit {
                    target: PathBuf::from("a.C.docx"),
                    stats: ResplitStats {
                        candidates: 2,
                        split: 1,
                        runs_written: 3,
                        ..Default::default()
                    },
                },
            })
            .unwrap();
        formatter
            .format_report(&FileReport::input_failed("[", "bad"))
            .unwrap();
        formatter.finish().unwrap();

        let parsed: Vec<ReportData> = serde_json::from_slice(&formatter.writer).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].status, "success");
        assert_eq!(parsed[0].target.as_deref(), Some("a.C.docx"));
        assert_eq!(parsed[0].stats.as_ref().unwrap().split, 1);
        assert_eq!(parsed[1].status, "error");
        assert_eq!(parsed[1].message.as_deref(), Some("bad"));
        assert!(parsed[1].stats.is_none());
    }

    #[test]
    fn test_empty_array() {
        let mut formatter = JsonFormatter::new(Vec::new(), true);
        formatter.finish().unwrap();
        assert_eq!(String::from_utf8(formatter.writer).unwrap(), "[]\n");
    }
}
