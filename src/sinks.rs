//! Display sinks for the three bars

use anyhow::{bail, Context, Result};
use statusbar_core::{BarId, DisplaySink};
use std::io::Write;
use std::process::Command;

/// Publishes the bars as the X root window name, `status;top;bottom`, which
/// the dwm extrabar patch splits back into its bars.
pub struct RootNameSink {
    bars: [String; BarId::COUNT],
    joiner: String,
    dirty: bool,
}

impl RootNameSink {
    pub fn new<S: Into<String>>(joiner: S) -> Self {
        Self {
            bars: Default::default(),
            joiner: joiner.into(),
            dirty: false,
        }
    }

    /// The full root window name
    pub fn root_name(&self) -> String {
        self.bars.join(self.joiner.as_str())
    }
}

impl DisplaySink for RootNameSink {
    fn set_text(&mut self, bar: BarId, text: &str) -> Result<()> {
        let slot = &mut self.bars[bar.index()];
        if *slot != text {
            *slot = text.to_string();
            self.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let status = Command::new("xsetroot")
            .arg("-name")
            .arg(self.root_name())
            .status()
            .context("Failed to run xsetroot")?;
        if !status.success() {
            bail!("xsetroot exited with {}", status);
        }
        self.dirty = false;
        Ok(())
    }

    fn pending(&self) -> bool {
        self.dirty
    }
}

/// Prints `bar: text` lines, for `--stdout`
#[derive(Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl DisplaySink for StdoutSink {
    fn set_text(&mut self, bar: BarId, text: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}: {}", bar, text)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }
}
