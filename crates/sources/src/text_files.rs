//! Probes that show the contents of plain text files

use statusbar_core::{Probe, ProbeContext, ProbeFailure, ProbeOutcome};
use statusbar_types::SegmentId;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;

/// Bytes read from the end of the log when looking for its last line
const TAIL_BYTES: u64 = 4096;

/// Todo list, one item per line
pub struct TodoProbe {
    path: PathBuf,
}

impl TodoProbe {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Probe for TodoProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Todo
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => ProbeOutcome::Render(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join(" | "),
            ),
            Err(e) => ProbeOutcome::failed("Failed to read todo file", &e),
        }
    }
}

/// Last line written to the window manager's log
///
/// An unreadable log is a minor failure; the previous line stays on screen.
pub struct LogTailProbe {
    path: PathBuf,
}

impl LogTailProbe {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn last_line(&self) -> io::Result<String> {
        let mut file = File::open(&self.path)?;
        let len = file.metadata()?.len();
        file.seek(SeekFrom::Start(len.saturating_sub(TAIL_BYTES)))?;

        let mut tail = Vec::new();
        file.read_to_end(&mut tail)?;
        let tail = String::from_utf8_lossy(&tail);
        Ok(tail
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .to_string())
    }
}

impl Probe for LogTailProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Log
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        match self.last_line() {
            Ok(line) => ProbeOutcome::Render(line),
            Err(e) => ProbeOutcome::Degraded {
                failure: ProbeFailure::from_error("Failed to read dwm log", &e),
                text: None,
            },
        }
    }
}

/// Status line left by the backup job
pub struct BackupProbe {
    path: PathBuf,
}

impl BackupProbe {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Probe for BackupProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Backup
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => ProbeOutcome::Render(
                contents.lines().next().unwrap_or_default().trim().to_string(),
            ),
            // no backup running
            Err(e) if e.kind() == io::ErrorKind::NotFound => ProbeOutcome::Render(String::new()),
            Err(e) => ProbeOutcome::failed("Failed to read backup status", &e),
        }
    }
}
