//! Failure log sinks
//!
//! Probe failures are written as two-line records: a timestamp and
//! description, then the underlying error detail on the following line.

use chrono::{DateTime, Local};
use statusbar_types::SegmentId;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// How a failure affected the displayed segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Logged only, content untouched
    Minor,
    /// Content replaced by the error token
    Full,
}

/// One logged probe failure
#[derive(Debug, Clone)]
pub struct FailureRecord {
    pub timestamp: DateTime<Local>,
    pub segment: SegmentId,
    pub severity: Severity,
    pub description: String,
    pub detail: String,
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}\t[{}] {}",
            self.timestamp.format("%a %b %e %H:%M:%S %Y"),
            self.segment,
            self.description
        )?;
        writeln!(f, "\tError: {}", self.detail)
    }
}

/// Append-only destination for failure records
pub trait LogSink {
    fn record(&mut self, record: &FailureRecord);
}

/// Appends records to a file, opened once at startup
pub struct FileLogSink {
    path: PathBuf,
    file: File,
}

impl FileLogSink {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }
}

impl LogSink for FileLogSink {
    fn record(&mut self, record: &FailureRecord) {
        let result = write!(self.file, "{}", record).and_then(|_| self.file.flush());
        if let Err(e) = result {
            log::error!("Failed to write failure log {}: {}", self.path.display(), e);
        }
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    records: Vec<FailureRecord>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[FailureRecord] {
        &self.records
    }
}

impl LogSink for MemoryLogSink {
    fn record(&mut self, record: &FailureRecord) {
        self.records.push(record.clone());
    }
}

/// Forwards to another sink held behind a shared handle
///
/// Lets tests keep a view of records written by an engine that owns its sink.
impl<S: LogSink> LogSink for std::rc::Rc<std::cell::RefCell<S>> {
    fn record(&mut self, record: &FailureRecord) {
        self.borrow_mut().record(record);
    }
}
