//! Disk usage probe

use crate::sysfs::scale_bytes;
use statusbar_core::{Probe, ProbeContext, ProbeFailure, ProbeOutcome};
use statusbar_types::SegmentId;
use std::path::PathBuf;
use sysinfo::Disks;

/// Used and total space of one mounted filesystem
pub struct DiskProbe {
    disks: Disks,
    mount_point: PathBuf,
    block_size: u64,
}

impl DiskProbe {
    pub fn new(mount_point: PathBuf, block_size: u64) -> Self {
        Self {
            disks: Disks::new_with_refreshed_list(),
            mount_point,
            block_size,
        }
    }

    fn render(&self, used: u64, total: u64) -> String {
        format!(
            "{}/{}",
            scale_bytes(used as f64, self.block_size),
            scale_bytes(total as f64, self.block_size)
        )
    }
}

impl Probe for DiskProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Disk
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        self.disks.refresh();

        let Some(disk) = self
            .disks
            .iter()
            .find(|d| d.mount_point() == self.mount_point.as_path())
        else {
            return ProbeOutcome::Failed(ProbeFailure::new(
                "Disk not mounted",
                format!("no filesystem mounted at {}", self.mount_point.display()),
            ));
        };

        let total = disk.total_space();
        let used = total.saturating_sub(disk.available_space());
        ProbeOutcome::Render(self.render(used, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ctx;

    #[test]
    fn test_render_used_over_total() {
        let probe = DiskProbe {
            disks: Disks::new(),
            mount_point: PathBuf::from("/"),
            block_size: 1024,
        };
        assert_eq!(
            probe.render(3 * 1024 * 1024 * 1024 / 2, 100 * 1024 * 1024 * 1024),
            "1.5G/100.0G"
        );
    }

    #[test]
    fn test_missing_mount_is_full_failure() {
        let mut probe = DiskProbe::new(PathBuf::from("/nonexistent/mount/point"), 1024);
        assert!(matches!(probe.sample(&ctx(true)), ProbeOutcome::Failed(_)));
    }
}
