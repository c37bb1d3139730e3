//! Network throughput and wifi link probes

use crate::sysfs::{percent, read_number, read_trimmed, scale_bytes};
use chrono::NaiveDateTime;
use statusbar_core::{Probe, ProbeContext, ProbeFailure, ProbeOutcome};
use statusbar_types::SegmentId;
use std::path::{Path, PathBuf};

/// Link quality reported by most drivers as 100%
const LINK_QUALITY_MAX: f64 = 70.0;

#[derive(Debug, Clone, Copy)]
struct Counters {
    rx: u64,
    tx: u64,
    at: NaiveDateTime,
}

/// Receive and transmit rates of one interface
///
/// Rates are computed from the byte counters between consecutive samples.
/// The first sample has no baseline and reports zero.
pub struct NetworkProbe {
    statistics_dir: PathBuf,
    block_size: u64,
    last: Option<Counters>,
}

impl NetworkProbe {
    pub fn new(net_class_dir: &Path, interface: &str, block_size: u64) -> Self {
        Self {
            statistics_dir: net_class_dir.join(interface).join("statistics"),
            block_size,
            last: None,
        }
    }

    fn read_counters(&self, at: NaiveDateTime) -> std::io::Result<Counters> {
        Ok(Counters {
            rx: read_number(&self.statistics_dir.join("rx_bytes"))?,
            tx: read_number(&self.statistics_dir.join("tx_bytes"))?,
            at,
        })
    }

    fn rates(&self, current: &Counters) -> (f64, f64) {
        let Some(previous) = self.last else {
            return (0.0, 0.0);
        };
        let elapsed = (current.at - previous.at).num_milliseconds();
        let seconds = if elapsed > 0 { elapsed as f64 / 1000.0 } else { 1.0 };
        // counters reset when the interface goes down
        let rx = current.rx.saturating_sub(previous.rx) as f64 / seconds;
        let tx = current.tx.saturating_sub(previous.tx) as f64 / seconds;
        (rx, tx)
    }
}

impl Probe for NetworkProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Network
    }

    fn sample(&mut self, ctx: &ProbeContext) -> ProbeOutcome {
        let current = match self.read_counters(ctx.now) {
            Ok(counters) => counters,
            Err(e) => {
                self.last = None;
                return ProbeOutcome::failed("Failed to read interface byte counters", &e);
            }
        };
        let (rx, tx) = self.rates(&current);
        self.last = Some(current);

        ProbeOutcome::Render(format!(
            "{} {}",
            scale_bytes(rx, self.block_size),
            scale_bytes(tx, self.block_size)
        ))
    }
}

/// Wifi interface state and link quality
pub struct WifiProbe {
    interface: String,
    operstate: PathBuf,
    wireless_stats: PathBuf,
}

impl WifiProbe {
    pub fn new(net_class_dir: &Path, interface: &str, wireless_stats: PathBuf) -> Self {
        Self {
            interface: interface.to_string(),
            operstate: net_class_dir.join(interface).join("operstate"),
            wireless_stats,
        }
    }
}

/// Link quality for `interface` from the `/proc/net/wireless` table
fn link_quality(table: &str, interface: &str) -> Option<f64> {
    table.lines().skip(2).find_map(|line| {
        let (name, rest) = line.split_once(':')?;
        if name.trim() != interface {
            return None;
        }
        // columns: status, link, level, noise, ...
        let link = rest.split_whitespace().nth(1)?;
        link.trim_end_matches('.').parse::<f64>().ok()
    })
}

impl Probe for WifiProbe {
    fn segment(&self) -> SegmentId {
        SegmentId::Wifi
    }

    fn sample(&mut self, _ctx: &ProbeContext) -> ProbeOutcome {
        let state = match read_trimmed(&self.operstate) {
            Ok(state) => state,
            Err(e) => return ProbeOutcome::failed("Failed to read interface state", &e),
        };
        if state != "up" {
            return ProbeOutcome::Render(state);
        }

        match std::fs::read_to_string(&self.wireless_stats) {
            Ok(table) => match link_quality(&table, &self.interface) {
                Some(quality) => {
                    ProbeOutcome::Render(format!("{}%", percent(quality, LINK_QUALITY_MAX)))
                }
                None => ProbeOutcome::Render(state),
            },
            Err(e) => ProbeOutcome::Degraded {
                failure: ProbeFailure::from_error("Failed to read wireless link quality", &e),
                text: Some(state),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ctx, ctx_at};

    const WIRELESS: &str = "\
Inter-| sta-|   Quality        |   Discarded packets               | Missed | WE
 face | tus | link level noise |  nwid  crypt   frag  retry   misc | beacon | 22
wlp4s0: 0000   49.  -61.  -256        0      0      0      0     14        0
";

    fn write_counters(dir: &Path, rx: u64, tx: u64) {
        let stats = dir.join("wlp4s0").join("statistics");
        std::fs::create_dir_all(&stats).unwrap();
        std::fs::write(stats.join("rx_bytes"), format!("{}\n", rx)).unwrap();
        std::fs::write(stats.join("tx_bytes"), format!("{}\n", tx)).unwrap();
    }

    #[test]
    fn test_rates_between_samples() {
        let dir = tempfile::tempdir().unwrap();
        write_counters(dir.path(), 10_000, 5_000);
        let mut probe = NetworkProbe::new(dir.path(), "wlp4s0", 1024);

        assert_eq!(
            probe.sample(&ctx_at(12, 0, 0)),
            ProbeOutcome::Render("0B 0B".to_string())
        );

        write_counters(dir.path(), 10_000 + 2 * 3072, 5_000 + 2 * 512);
        assert_eq!(
            probe.sample(&ctx_at(12, 0, 2)),
            ProbeOutcome::Render("3.0K 512B".to_string())
        );
    }

    #[test]
    fn test_missing_counters_is_full_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut probe = NetworkProbe::new(dir.path(), "eth9", 1024);
        assert!(matches!(probe.sample(&ctx(true)), ProbeOutcome::Failed(_)));
    }

    #[test]
    fn test_link_quality_parse() {
        assert_eq!(link_quality(WIRELESS, "wlp4s0"), Some(49.0));
        assert_eq!(link_quality(WIRELESS, "wlan1"), None);
    }

    #[test]
    fn test_wifi_states() {
        let dir = tempfile::tempdir().unwrap();
        let iface = dir.path().join("wlp4s0");
        std::fs::create_dir_all(&iface).unwrap();
        let wireless = dir.path().join("wireless");
        std::fs::write(&wireless, WIRELESS).unwrap();
        let mut probe = WifiProbe::new(dir.path(), "wlp4s0", wireless.clone());

        std::fs::write(iface.join("operstate"), "down\n").unwrap();
        assert_eq!(probe.sample(&ctx(true)), ProbeOutcome::Render("down".to_string()));

        std::fs::write(iface.join("operstate"), "up\n").unwrap();
        assert_eq!(probe.sample(&ctx(true)), ProbeOutcome::Render("70%".to_string()));

        std::fs::remove_file(&wireless).unwrap();
        assert!(matches!(
            probe.sample(&ctx(true)),
            ProbeOutcome::Degraded { text: Some(ref t), .. } if t == "up"
        ));

        std::fs::remove_file(iface.join("operstate")).unwrap();
        assert!(matches!(probe.sample(&ctx(true)), ProbeOutcome::Failed(_)));
    }
}
