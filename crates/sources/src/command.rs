//! Segments fed by the output of a shell command

use statusbar_core::{Probe, ProbeContext, ProbeFailure, ProbeOutcome};
use statusbar_types::SegmentId;
use std::process::Command;

/// Runs `sh -c <command>` and shows its trimmed stdout
///
/// The command only runs when the segment's cadence fires. Between firings
/// the last output stays on screen.
pub struct CommandProbe {
    segment: SegmentId,
    command: String,
    cached: Option<String>,
}

impl CommandProbe {
    pub fn new(segment: SegmentId, command: impl Into<String>) -> Self {
        Self {
            segment,
            command: command.into(),
            cached: None,
        }
    }

    fn run(&self) -> Result<String, ProbeFailure> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .output()
            .map_err(|e| ProbeFailure::from_error(format!("Failed to run `{}`", self.command), &e))?;

        if !output.status.success() {
            return Err(ProbeFailure::new(
                format!("`{}` exited with {}", self.command, output.status),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Probe for CommandProbe {
    fn segment(&self) -> SegmentId {
        self.segment
    }

    fn sample(&mut self, ctx: &ProbeContext) -> ProbeOutcome {
        if !ctx.triggered && self.cached.is_some() {
            return ProbeOutcome::Unchanged;
        }

        log::debug!("Running {} command", self.segment);
        match self.run() {
            Ok(text) => {
                self.cached = Some(text.clone());
                ProbeOutcome::Render(text)
            }
            Err(failure) => {
                self.cached = None;
                ProbeOutcome::Failed(failure)
            }
        }
    }
}
