//! statusbar-sources: probe implementations for dwm-statusbar segments.
//!
//! Each probe reads one sysfs/procfs file set, a `sysinfo` view, a text file
//! or a shell command, and renders the info text of one segment.

mod clock;
mod command;
mod cpu;
mod disk;
mod fan_speed;
mod memory;
mod network;
mod power;
mod sensors;
mod sysfs;
mod system_temp;
mod text_files;

pub use clock::TimeProbe;
pub use command::CommandProbe;
pub use cpu::{CpuUsageProbe, LoadProbe};
pub use disk::DiskProbe;
pub use fan_speed::FanProbe;
pub use memory::RamProbe;
pub use network::{NetworkProbe, WifiProbe};
pub use power::{Backlight, BatteryProbe, BrightnessProbe};
pub use sensors::SensorPaths;
pub use system_temp::CpuTempProbe;
pub use text_files::{BackupProbe, LogTailProbe, TodoProbe};

use statusbar_core::BoxedProbe;
use statusbar_types::{SegmentId, StatusbarConfig};
use std::sync::Arc;

/// Build the probe for one segment
///
/// Returns `None` for a command-fed segment with no command configured.
pub fn build_probe(
    id: SegmentId,
    config: &StatusbarConfig,
    sensors: &Arc<SensorPaths>,
) -> Option<BoxedProbe> {
    let paths = &config.paths;
    let limits = &config.limits;
    let commands = &config.commands;

    let probe: BoxedProbe = match id {
        SegmentId::Log => Box::new(LogTailProbe::new(paths.dwm_log.clone())),
        SegmentId::Todo => Box::new(TodoProbe::new(paths.todo_file.clone())),
        SegmentId::Backup => Box::new(BackupProbe::new(paths.backup_status.clone())),
        SegmentId::Weather => Box::new(CommandProbe::new(id, commands.weather.clone()?)),
        SegmentId::Portfolio => Box::new(CommandProbe::new(id, commands.portfolio.clone()?)),
        SegmentId::Volume => Box::new(CommandProbe::new(id, commands.volume.clone()?)),
        SegmentId::Wifi => Box::new(WifiProbe::new(
            &paths.net_class_dir,
            &paths.wifi_interface,
            paths.wireless_stats.clone(),
        )),
        SegmentId::Time => Box::new(TimeProbe::new()),
        SegmentId::Network => Box::new(NetworkProbe::new(
            &paths.net_class_dir,
            &paths.wifi_interface,
            limits.block_size,
        )),
        SegmentId::Disk => Box::new(DiskProbe::new(paths.disk_mount.clone(), limits.block_size)),
        SegmentId::Ram => Box::new(RamProbe::new()),
        SegmentId::Load => Box::new(LoadProbe::new()),
        SegmentId::CpuUsage => Box::new(CpuUsageProbe::new(limits.cpu_ratio)),
        SegmentId::CpuTemp => Box::new(CpuTempProbe::new(
            Arc::clone(sensors),
            limits.temp_max,
            &config.format,
        )),
        SegmentId::Fan => Box::new(FanProbe::new(
            Arc::clone(sensors),
            limits.fan_min,
            limits.fan_max,
        )),
        SegmentId::Brightness => Box::new(BrightnessProbe::new(
            Backlight {
                path: paths.screen_brightness.clone(),
                max: limits.screen_brightness_max,
            },
            paths.kbd_brightness.clone().map(|path| Backlight {
                path,
                max: limits.kbd_brightness_max,
            }),
        )),
        SegmentId::Battery => Box::new(BatteryProbe::new(
            paths.battery_status.clone(),
            paths.battery_capacity.clone(),
            limits.battery_warning,
            &config.format,
        )),
    };
    Some(probe)
}

/// Build probes for every enabled segment
///
/// Sensor directories are scanned here, once.
pub fn build_probes(config: &StatusbarConfig) -> Vec<BoxedProbe> {
    let sensors = Arc::new(SensorPaths::discover(
        &config.paths.cpu_temp_dir,
        &config.paths.fan_dir,
    ));

    SegmentId::ALL
        .iter()
        .copied()
        .filter(|id| config.segments.is_enabled(*id))
        .filter_map(|id| {
            let probe = build_probe(id, config, &sensors);
            if probe.is_none() {
                log::info!("No command configured for {}, segment left empty", id);
            }
            probe
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use statusbar_core::Probe;

    #[test]
    fn test_build_probes_skips_unconfigured_commands() {
        let mut config = StatusbarConfig::default();
        config.commands.weather = Some("echo sunny".to_string());

        let probes = build_probes(&config);
        let ids: Vec<SegmentId> = probes.iter().map(|p| p.segment()).collect();

        assert!(ids.contains(&SegmentId::Weather));
        assert!(!ids.contains(&SegmentId::Portfolio));
        assert!(!ids.contains(&SegmentId::Volume));
        assert_eq!(ids.len(), SegmentId::COUNT - 2);
    }

    #[test]
    fn test_build_probes_respects_disabled() {
        let mut config = StatusbarConfig::default();
        config.segments.disabled = vec![SegmentId::Battery, SegmentId::Fan];

        let ids: Vec<SegmentId> = build_probes(&config).iter().map(|p| p.segment()).collect();
        assert!(!ids.contains(&SegmentId::Battery));
        assert!(!ids.contains(&SegmentId::Fan));
    }

    #[test]
    fn test_each_probe_feeds_its_segment() {
        let mut config = StatusbarConfig::default();
        config.commands.volume = Some("echo 50%".to_string());
        let sensors = Arc::new(SensorPaths::default());

        for id in SegmentId::ALL {
            if let Some(probe) = build_probe(id, &config, &sensors) {
                assert_eq!(probe.segment(), id);
            }
        }
    }
}
