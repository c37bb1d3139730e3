//! CPU usage and load average probes

use statusbar_core::{Probe, ProbeContext, ProbeOutcome};
use statusbar_types::SegmentId;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Global CPU usage across all cores
///
/// sysinfo computes usage from the difference between two refreshes, so the
/// first sample after startup reads as zero.
pub struct CpuUsageProbe {
    system: System,
    cpu_ratio: f64,
}

impl CpuUsageProbe {
    pub fn new(cpu_ratio: f64) -> Self {
        let system = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage()),
        );
        Self { system, cpu_ratio }
    }

    fn render(&self, usage: f32) -> String {
        let scaled = f64::from(usage) / self.cpu_ratio;
        format!("{:.0}%", scaled.clamp(0.0, 100.0))
    }
}

impl Probe for CpuUsageProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::CpuUsage
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        self.system.refresh_cpu_usage();
        ProbeOutcome::Render(self.render(self.system.global_cpu_usage()))
    }
}

/// 1, 5 and 15 minute load averages
#[derive(Default)]
pub struct LoadProbe;

impl LoadProbe {
    pub fn new() -> Self {
        Self
    }
}

fn format_load(one: f64, five: f64, fifteen: f64) -> String {
    format!("{:.2} {:.2} {:.2}", one, five, fifteen)
}

impl Probe for LoadProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Load
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        let load = System::load_average();
        ProbeOutcome::Render(format_load(load.one, load.five, load.fifteen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ctx;

    #[test]
    fn test_usage_scaled_by_ratio() {
        let probe = CpuUsageProbe::new(2.0);
        assert_eq!(probe.render(50.0), "25%");
        assert_eq!(probe.render(250.0), "100%");
    }

    #[test]
    fn test_usage_sample_renders_percent() {
        let mut probe = CpuUsageProbe::new(1.0);
        match probe.sample(&ctx(true)) {
            ProbeOutcome::Render(text) => assert!(text.ends_with('%')),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_load_format() {
        assert_eq!(format_load(0.5, 1.25, 2.0), "0.50 1.25 2.00");
    }
}
