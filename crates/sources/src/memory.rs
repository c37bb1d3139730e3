//! RAM usage probe

use statusbar_core::{Probe, ProbeContext, ProbeFailure, ProbeOutcome};
use statusbar_types::SegmentId;
use sysinfo::System;

pub struct RamProbe {
    system: System,
}

impl RamProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for RamProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for RamProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Ram
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return ProbeOutcome::Failed(ProbeFailure::new(
                "Memory totals unavailable",
                "total memory reported as zero",
            ));
        }
        let used = self.system.used_memory();
        ProbeOutcome::Render(format!(
            "{}%",
            crate::sysfs::percent(used as f64, total as f64)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ctx;

    #[test]
    fn test_reports_percentage() {
        let mut probe = RamProbe::new();
        match probe.sample(&ctx(true)) {
            ProbeOutcome::Render(text) => {
                let value: u32 = text.trim_end_matches('%').parse().unwrap();
                assert!(value <= 100);
            }
            ProbeOutcome::Failed(_) => {}
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
