//! Display sink trait

use anyhow::Result;
use statusbar_types::BarId;

/// Write-only consumer of assembled bars
pub trait DisplaySink {
    fn set_text(&mut self, bar: BarId, text: &str) -> Result<()>;

    /// Called after a render pass that wrote at least one bar, and after
    /// any pass while [`DisplaySink::pending`] is true
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Text was accepted but not yet flushed to the display
    fn pending(&self) -> bool {
        false
    }
}

/// Records every write, for tests
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<(BarId, String)>,
    pub flushes: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent text written for a bar
    pub fn last(&self, bar: BarId) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|(id, _)| *id == bar)
            .map(|(_, text)| text.as_str())
    }
}

impl DisplaySink for RecordingSink {
    fn set_text(&mut self, bar: BarId, text: &str) -> Result<()> {
        self.writes.push((bar, text.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
