//! CSV export of generated cases and model runs, plus sweep progress.
//!
//! Records append to an existing file; the header row is only written when
//! the file is created. Shapes are exported in their display form so rows
//! stay flat.

use std::fs::OpenOptions;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::generator::Case;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One generated case as a CSV row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub num_arguments: usize,
    pub shape: String,
    pub prompt: String,
    pub answer: bool,
}

impl From<&Case> for CaseRecord {
    fn from(case: &Case) -> Self {
        Self {
            num_arguments: case.num_arguments,
            shape: case.shape.to_string(),
            prompt: case.prompt.clone(),
            answer: case.answer,
        }
    }
}

/// One model interaction as a CSV row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub model: String,
    pub num_arguments: usize,
    pub shape: String,
    pub prompt: String,
    pub expected: bool,
    pub response: String,
    /// The parsed yes/no, empty when the response was indeterminate.
    pub parsed: Option<bool>,
}

// ---------------------------------------------------------------------------
// CSV writing
// ---------------------------------------------------------------------------

/// Append one record to `path`, writing the header only on file creation.
pub fn append_record<T: Serialize>(path: &Path, record: &T) -> ExportResult<()> {
    let exists = path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(!exists)
        .from_writer(file);
    writer
        .serialize(record)
        .map_err(|e| ExportError::Csv {
            message: e.to_string(),
        })?;
    writer.flush().map_err(|e| ExportError::Csv {
        message: e.to_string(),
    })
}

/// Append a whole batch of cases to `path`.
pub fn append_cases(path: &Path, cases: &[Case]) -> ExportResult<()> {
    for case in cases {
        append_record(path, &CaseRecord::from(case))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Elapsed/ETA tracking for sweep runs.
pub struct Progress {
    total: usize,
    done: usize,
    started: Instant,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            done: 0,
            started: Instant::now(),
        }
    }

    /// Record one completed item and log the current state.
    pub fn tick(&mut self) {
        self.done += 1;
        let pct = 100.0 * self.done as f64 / self.total.max(1) as f64;
        tracing::info!(
            done = self.done,
            total = self.total,
            eta = %self.eta_hms(),
            "{pct:.1}% complete"
        );
    }

    /// Estimated remaining time as `h:mm:ss`, from the mean pace so far.
    pub fn eta_hms(&self) -> String {
        if self.done == 0 {
            return "?:??:??".to_string();
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let per_item = elapsed / self.done as f64;
        let remaining = (self.total.saturating_sub(self.done)) as f64 * per_item;
        format_hms(remaining as u64)
    }
}

/// Format seconds as `h:mm:ss`.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_written_once_across_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cases.csv");

        let record = CaseRecord {
            num_arguments: 3,
            shape: "(2)".to_string(),
            prompt: "p".to_string(),
            answer: true,
        };
        append_record(&path, &record).unwrap();
        append_record(&path, &record).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("num_arguments"));
        assert!(!lines[1].contains("num_arguments"));
    }

    #[test]
    fn result_record_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        let record = ResultRecord {
            model: "dummy".to_string(),
            num_arguments: 4,
            shape: "(1,2)".to_string(),
            prompt: "prompt with, comma\nand newline".to_string(),
            expected: false,
            response: "Answer: no".to_string(),
            parsed: Some(false),
        };
        append_record(&path, &record).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let parsed: ResultRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(parsed.prompt, record.prompt);
        assert_eq!(parsed.parsed, Some(false));
    }

    #[test]
    fn hms_formatting() {
        assert_eq!(format_hms(0), "0:00:00");
        assert_eq!(format_hms(61), "0:01:01");
        assert_eq!(format_hms(3723), "1:02:03");
    }
}
