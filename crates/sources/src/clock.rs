//! Local time probe

use statusbar_core::{Probe, ProbeContext, ProbeOutcome};
use statusbar_types::SegmentId;

const TIME_FORMAT: &str = "%a %b %d %H:%M";

/// Renders the cycle's wall-clock time
#[derive(Default)]
pub struct TimeProbe;

impl TimeProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Probe for TimeProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Time
    }

    fn sample(&mut self, ctx: &ProbeContext) -> ProbeOutcome {
        ProbeOutcome::Render(ctx.now.format(TIME_FORMAT).to_string())
    }
}
